//! Wire message types and serialization.
//!
//! Messages are serialized with [`postcard`] behind a protocol version byte.
//! The enum is the complete, closed message set of the sync protocol; every
//! message is one-way and unacknowledged — reliability and ordering are the
//! transport's job.

use prospector_items::ItemKind;
use serde::{Deserialize, Serialize};

/// Current wire-protocol version, prepended to every serialized message.
pub const PROTOCOL_VERSION: u8 = 1;

/// A protocol message. The enum discriminant is the type tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Message {
    /// Either peer, throttled: the sender's current position.
    Position(PositionUpdate),
    /// Either peer: the sender collected an item.
    ItemCollected {
        /// Id of the collected item.
        item_id: String,
    },
    /// Either peer: the sender dropped an inventory item into the world.
    ItemDropped(ItemPayload),
    /// Host only: an autonomous spawn occurred.
    ItemSpawned(ItemPayload),
    /// Host only, once shortly after connect: full world state.
    WorldSync(WorldSync),
    /// Host only, every tick: spawn-timer replica overwrite.
    SpawnTimer {
        /// Host's timer accumulator in milliseconds.
        time_ms: f64,
    },
}

/// A peer's position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionUpdate {
    /// Sender's player id.
    pub id: String,
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
}

/// One world item on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPayload {
    /// Item id, minted by the originating peer.
    pub id: String,
    /// Item kind.
    pub kind: ItemKind,
    /// World X.
    pub x: f64,
    /// World Y.
    pub y: f64,
}

/// The host's authoritative world snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldSync {
    /// Terrain seed; the guest regenerates all terrain from it.
    pub seed: u32,
    /// Every live item.
    pub items: Vec<ItemPayload>,
    /// Spawn-timer accumulator in milliseconds.
    pub spawn_timer_ms: f64,
}

/// Errors from message deserialization.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The payload was empty (no version byte).
    #[error("empty payload")]
    EmptyPayload,

    /// The version byte does not match [`PROTOCOL_VERSION`].
    #[error("unsupported protocol version: {0}")]
    UnsupportedVersion(u8),

    /// Postcard deserialization failed.
    #[error("malformed message: {0}")]
    Postcard(#[from] postcard::Error),
}

/// Serialize a [`Message`] into a versioned binary payload.
///
/// Wire format: `[version: u8] [postcard-encoded Message]`.
pub fn serialize_message(msg: &Message) -> Result<Vec<u8>, postcard::Error> {
    let body = postcard::to_allocvec(msg)?;
    let mut out = Vec::with_capacity(1 + body.len());
    out.push(PROTOCOL_VERSION);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Deserialize a versioned binary payload into a [`Message`].
pub fn deserialize_message(data: &[u8]) -> Result<Message, MessageError> {
    let (&version, body) = data.split_first().ok_or(MessageError::EmptyPayload)?;
    if version != PROTOCOL_VERSION {
        return Err(MessageError::UnsupportedVersion(version));
    }
    Ok(postcard::from_bytes(body)?)
}
