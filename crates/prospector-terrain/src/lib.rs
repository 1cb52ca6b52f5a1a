//! Deterministic chunked terrain.
//!
//! Chunks are a pure function of `(world seed, chunk coordinates)`: both peers
//! regenerate identical tile layouts from the shared seed, so no terrain data
//! ever crosses the wire. The [`ChunkMap`] memoizes generated chunks and
//! streams a small grid of them around the local player.

pub mod chunk;
pub mod map;
pub mod tile;

pub use chunk::{Chunk, ChunkCoords, generate_chunk, generate_chunk_with};
pub use map::ChunkMap;
pub use tile::{DIRT_THRESHOLD, TileKind};

/// Chunk edge length in tiles.
pub const CHUNK_SIZE: usize = 16;

/// Tile edge length in world units.
pub const TILE_SIZE: f64 = 32.0;

/// Chunks loaded in each direction around the player (1 = a 3×3 grid).
pub const VIEW_DISTANCE: i32 = 1;
