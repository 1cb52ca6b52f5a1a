//! Player movement: input-driven local entity, interpolated remote mirror.

pub mod local;
pub mod remote;

pub use local::{LocalPlayer, MoveInput};
pub use remote::RemotePlayer;

/// Movement speed in world units per second.
pub const PLAYER_SPEED: f64 = 200.0;

/// Fraction of the remaining distance a remote player covers each tick.
pub const INTERPOLATION_FACTOR: f64 = 0.15;

/// Pointer drags shorter than this are ignored.
pub const DRAG_DEAD_ZONE: f64 = 5.0;
