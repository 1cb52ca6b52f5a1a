//! Collectible items: kinds, the world-item registry, and player inventories.
//!
//! The registry owns every live item and the spawn timer, but never touches
//! the network: each operation returns the items it spawned or collected and
//! the session orchestrator decides what to broadcast.

pub mod inventory;
pub mod kind;
pub mod registry;

pub use inventory::Inventory;
pub use kind::ItemKind;
pub use registry::{ItemRegistry, WorldItem};

/// Milliseconds between autonomous spawn bursts (5 minutes).
pub const SPAWN_INTERVAL_MS: f64 = 300_000.0;

/// Default collection radius in world units.
pub const COLLECTION_RADIUS: f64 = 20.0;

/// Random spawns land within ±this distance of the origin on each axis.
pub const SPAWN_HALF_EXTENT: f64 = 1000.0;
