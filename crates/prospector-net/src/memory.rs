//! In-process loopback transport pair.
//!
//! Backs tests and the headless demo: two [`MemoryTransport`] halves joined
//! by channels, delivering in order with no I/O. Each half reports `Opened`
//! on its first poll, mirroring a real connection completing its handshake.

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};

use crate::transport::{Transport, TransportEvent};

/// One half of an in-process transport pair.
pub struct MemoryTransport {
    to_peer: Sender<TransportEvent>,
    from_peer: Receiver<TransportEvent>,
    open: bool,
    opened_reported: bool,
}

/// Create a connected transport pair.
pub fn pair() -> (MemoryTransport, MemoryTransport) {
    let (a_tx, b_rx) = unbounded();
    let (b_tx, a_rx) = unbounded();
    let make = |to_peer, from_peer| MemoryTransport {
        to_peer,
        from_peer,
        open: true,
        opened_reported: false,
    };
    (make(a_tx, a_rx), make(b_tx, b_rx))
}

impl MemoryTransport {
    /// Inject a transport-level error on the peer side (tests only need
    /// this; real transports produce their own).
    pub fn inject_peer_error(&self, message: impl Into<String>) {
        let _ = self.to_peer.send(TransportEvent::Error(message.into()));
    }
}

impl Transport for MemoryTransport {
    fn send(&mut self, payload: &[u8]) {
        if !self.open {
            return;
        }
        if self.to_peer.send(TransportEvent::Data(payload.to_vec())).is_err() {
            // Peer half was dropped; the connection is gone.
            self.open = false;
        }
    }

    fn poll(&mut self) -> Vec<TransportEvent> {
        let mut events = Vec::new();

        if self.open && !self.opened_reported {
            self.opened_reported = true;
            events.push(TransportEvent::Opened);
        }

        loop {
            match self.from_peer.try_recv() {
                Ok(event) => {
                    if event == TransportEvent::Closed {
                        self.open = false;
                    }
                    events.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.open {
                        self.open = false;
                        events.push(TransportEvent::Closed);
                    }
                    break;
                }
            }
        }

        events
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            let _ = self.to_peer.send(TransportEvent::Closed);
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
