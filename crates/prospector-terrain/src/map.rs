//! Memoizing chunk store that streams terrain around the player.

use glam::DVec2;
use hashbrown::HashMap;
use prospector_noise::ValueNoise;

use crate::VIEW_DISTANCE;
use crate::chunk::{Chunk, ChunkCoords, generate_chunk_with};
use crate::tile::DIRT_THRESHOLD;

/// Loaded terrain for one session.
///
/// Generation is memoized: asking for the same chunk twice returns the cached
/// layout. [`ChunkMap::update_around`] keeps a square of chunks loaded around
/// a world position and unloads everything else, mirroring what the rendering
/// boundary needs to show.
pub struct ChunkMap {
    noise: ValueNoise,
    chunks: HashMap<ChunkCoords, Chunk>,
    view_distance: i32,
    dirt_threshold: f64,
}

impl ChunkMap {
    /// Create an empty map for the given world seed.
    pub fn new(seed: u32) -> Self {
        Self {
            noise: ValueNoise::new(seed),
            chunks: HashMap::new(),
            view_distance: VIEW_DISTANCE,
            dirt_threshold: DIRT_THRESHOLD,
        }
    }

    /// Override the view distance (chunks in each direction).
    pub fn with_view_distance(mut self, view_distance: i32) -> Self {
        self.view_distance = view_distance;
        self
    }

    /// Override the dirt threshold. Must match the peer's, like the seed.
    pub fn with_dirt_threshold(mut self, dirt_threshold: f64) -> Self {
        self.dirt_threshold = dirt_threshold;
        self
    }

    /// The seed terrain is generated from.
    pub fn seed(&self) -> u32 {
        self.noise.seed()
    }

    /// Get the chunk at `coords`, generating and caching it if needed.
    pub fn get_or_generate(&mut self, coords: ChunkCoords) -> &Chunk {
        self.chunks.entry(coords).or_insert_with(|| {
            generate_chunk_with(&self.noise, coords.x, coords.y, self.dirt_threshold)
        })
    }

    /// Whether the chunk at `coords` is currently loaded.
    pub fn is_loaded(&self, coords: ChunkCoords) -> bool {
        self.chunks.contains_key(&coords)
    }

    /// Number of chunks currently loaded.
    pub fn loaded_count(&self) -> usize {
        self.chunks.len()
    }

    /// Drop the chunk at `coords`, if loaded.
    pub fn unload(&mut self, coords: ChunkCoords) {
        self.chunks.remove(&coords);
    }

    /// Load every chunk within the view distance of `position` and unload the
    /// rest.
    pub fn update_around(&mut self, position: DVec2) {
        let center = ChunkCoords::from_world(position);

        let keep = |c: &ChunkCoords| {
            (c.x - center.x).abs() <= self.view_distance
                && (c.y - center.y).abs() <= self.view_distance
        };
        self.chunks.retain(|coords, _| keep(coords));

        for dy in -self.view_distance..=self.view_distance {
            for dx in -self.view_distance..=self.view_distance {
                let coords = ChunkCoords {
                    x: center.x + dx,
                    y: center.y + dy,
                };
                self.get_or_generate(coords);
            }
        }
    }

    /// Iterate over the loaded chunks.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }
}
