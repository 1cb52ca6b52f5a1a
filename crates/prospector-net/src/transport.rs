//! The transport boundary consumed by the sync protocol.

/// Lifecycle and data events surfaced by a transport.
///
/// Events are delivered in order and drained on the game-loop thread, so a
/// handler always runs to completion before the next event or tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is established; sends are now delivered.
    Opened,
    /// One complete inbound message payload.
    Data(Vec<u8>),
    /// The connection ended (peer close or connection loss).
    Closed,
    /// A transport-level fault. Non-fatal by itself; a `Closed` follows if
    /// the connection is gone.
    Error(String),
}

/// Ordered, reliable, bidirectional message delivery to exactly one peer.
///
/// This is the seam to the outside world: a WebRTC data channel, a TCP
/// stream, or an in-process loopback all fit. Sending while the connection
/// is not open is a silent no-op, never an error.
pub trait Transport: Send {
    /// Queue one message payload for delivery. No-op while not open.
    fn send(&mut self, payload: &[u8]);

    /// Drain all pending events since the last poll.
    fn poll(&mut self) -> Vec<TransportEvent>;

    /// Close the connection. Further sends are no-ops.
    fn close(&mut self);

    /// Whether the connection is currently open.
    fn is_open(&self) -> bool;
}
