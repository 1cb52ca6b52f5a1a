//! Pure chunk generation.

use glam::DVec2;
use prospector_noise::ValueNoise;

use crate::tile::{DIRT_THRESHOLD, TileKind};
use crate::{CHUNK_SIZE, TILE_SIZE};

/// Integer chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoords {
    /// Chunk grid X.
    pub x: i32,
    /// Chunk grid Y.
    pub y: i32,
}

impl ChunkCoords {
    /// Chunk containing the given world position.
    pub fn from_world(position: DVec2) -> Self {
        let span = CHUNK_SIZE as f64 * TILE_SIZE;
        Self {
            x: (position.x / span).floor() as i32,
            y: (position.y / span).floor() as i32,
        }
    }

    /// World-space origin (top-left corner) of this chunk.
    pub fn world_origin(&self) -> DVec2 {
        let span = CHUNK_SIZE as f64 * TILE_SIZE;
        DVec2::new(self.x as f64 * span, self.y as f64 * span)
    }
}

/// A generated 16×16 tile grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Location of this chunk on the chunk grid.
    pub coords: ChunkCoords,
    /// Tiles indexed `[row][column]`.
    pub tiles: [[TileKind; CHUNK_SIZE]; CHUNK_SIZE],
}

impl Chunk {
    /// Tile at chunk-local `(x, y)`.
    pub fn tile(&self, x: usize, y: usize) -> TileKind {
        self.tiles[y][x]
    }
}

/// Frequency applied to global tile indices before noise sampling.
const NOISE_SCALE: f64 = 0.1;

/// Octaves used for terrain noise.
const OCTAVES: u32 = 3;

/// Amplitude falloff between octaves.
const PERSISTENCE: f64 = 0.5;

/// Generate the chunk at `(cx, cy)` with the shipped dirt threshold.
///
/// Referentially transparent: the output depends only on the sampler's seed
/// and the chunk coordinates. Both peers rely on this to render identical
/// worlds from the seed alone.
pub fn generate_chunk(noise: &ValueNoise, cx: i32, cy: i32) -> Chunk {
    generate_chunk_with(noise, cx, cy, DIRT_THRESHOLD)
}

/// Generate a chunk with an explicit dirt threshold.
///
/// Peers must agree on the threshold as they do on the seed, or their worlds
/// diverge.
pub fn generate_chunk_with(noise: &ValueNoise, cx: i32, cy: i32, dirt_threshold: f64) -> Chunk {
    let mut tiles = [[TileKind::Grass(0); CHUNK_SIZE]; CHUNK_SIZE];

    for (y, row) in tiles.iter_mut().enumerate() {
        for (x, tile) in row.iter_mut().enumerate() {
            let tx = cx as f64 * CHUNK_SIZE as f64 + x as f64;
            let ty = cy as f64 * CHUNK_SIZE as f64 + y as f64;
            let value = noise.octave_noise(tx * NOISE_SCALE, ty * NOISE_SCALE, OCTAVES, PERSISTENCE);
            *tile = TileKind::from_noise_with(value, dirt_threshold);
        }
    }

    Chunk {
        coords: ChunkCoords { x: cx, y: cy },
        tiles,
    }
}
