//! Inbound protocol events.

use glam::DVec2;
use prospector_items::ItemKind;
use prospector_net::ItemPayload;

/// Everything a session can learn from its peer link, as one closed enum.
///
/// This replaces per-message callback slots: the orchestrator drains these
/// once per tick and applies each to local state, so the protocol's message
/// set is explicit and exhaustively matchable.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncEvent {
    /// The connection is established.
    Connected,
    /// The connection ended; the session degrades to solo play.
    Disconnected,
    /// A transport or decode fault. Surfaced for the UI, never fatal.
    Fault(String),
    /// The remote player moved.
    Position {
        /// Remote player id.
        id: String,
        /// New target position.
        position: DVec2,
    },
    /// The remote player collected an item.
    ItemCollected {
        /// Id of the collected item.
        item_id: String,
    },
    /// The remote player dropped an item into the world.
    ItemDropped {
        /// Item id minted by the remote peer.
        id: String,
        /// Item kind.
        kind: ItemKind,
        /// Drop position.
        position: DVec2,
    },
    /// The host spawned an item autonomously.
    ItemSpawned {
        /// Item id minted by the host.
        id: String,
        /// Item kind.
        kind: ItemKind,
        /// Spawn position.
        position: DVec2,
    },
    /// The host's one-time full world snapshot.
    WorldSync {
        /// Terrain seed to adopt.
        seed: u32,
        /// The complete live item set.
        items: Vec<ItemPayload>,
        /// Spawn-timer accumulator in milliseconds.
        spawn_timer_ms: f64,
    },
    /// Periodic host spawn-timer overwrite.
    SpawnTimer {
        /// Timer accumulator in milliseconds.
        time_ms: f64,
    },
}
