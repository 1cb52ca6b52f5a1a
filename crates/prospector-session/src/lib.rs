//! The session orchestrator.
//!
//! A [`Session`] ties the pieces together for one peer: the local player,
//! the mirrored remote player, the terrain chunk map, the item registry and
//! inventory, and (in multiplayer) a [`prospector_sync::PeerLink`]. One
//! [`Session::update`] call per frame drives movement, terrain streaming,
//! collection, authoritative spawning, and message exchange. Tuning comes
//! from [`prospector_config::Config`] via [`Session::with_config`]; the
//! host's 500 ms world-snapshot delay lives there as
//! `network.world_sync_delay_ms`.

pub mod session;

pub use session::{ConnectionStatus, Session};
