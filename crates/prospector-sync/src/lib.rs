//! The synchronization protocol layer.
//!
//! [`PeerLink`] sits between the session orchestrator and a transport. It
//! owns the authority policy (host-only message guards), outbound position
//! throttling, and the decoding of inbound frames into the closed
//! [`SyncEvent`] set the orchestrator consumes.

pub mod event;
pub mod link;

pub use event::SyncEvent;
pub use link::{LinkStatus, PeerLink, Role};

/// Minimum elapsed game time between outbound position broadcasts.
pub const POSITION_SYNC_INTERVAL_MS: f64 = 50.0;
