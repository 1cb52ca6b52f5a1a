//! Peer networking: wire messages, the transport boundary, and transports.
//!
//! The protocol layer consumes an abstract [`Transport`] — anything offering
//! ordered, reliable, bidirectional delivery with open/data/close/error
//! events. Two implementations live here: an in-process [`memory`] pair for
//! tests and the headless demo, and a length-prefixed [`tcp`] transport with
//! room-code rendezvous for real play.

pub mod memory;
pub mod messages;
pub mod room;
pub mod tcp;
pub mod transport;

pub use messages::{
    ItemPayload, Message, MessageError, PROTOCOL_VERSION, PositionUpdate, WorldSync,
    deserialize_message, serialize_message,
};
pub use room::{RoomCode, RoomCodeError};
pub use tcp::{JoinError, TcpTransport};
pub use transport::{Transport, TransportEvent};
