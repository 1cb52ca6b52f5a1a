//! Length-prefixed TCP transport with room-code rendezvous.
//!
//! The host binds the port derived from its room code and accepts exactly one
//! peer; the guest connects to `(host address, code port)` with a connection
//! timeout. Background tokio tasks move bytes; the game loop sees only
//! [`TransportEvent`]s drained through a channel, keeping the protocol layer
//! single-threaded.
//!
//! Wire format per message: `[length: u32 LE] [payload]`.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use crate::room::RoomCode;
use crate::transport::{Transport, TransportEvent};

/// Default guest connection timeout.
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on a single frame; protocol messages are tiny.
const MAX_FRAME_LEN: u32 = 65_536;

/// Errors establishing a guest connection.
#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// The host did not answer within the timeout.
    #[error("connection attempt timed out")]
    TimedOut,

    /// The connection attempt failed outright.
    #[error("connection failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A TCP-backed [`Transport`].
pub struct TcpTransport {
    outbound: Option<mpsc::UnboundedSender<Vec<u8>>>,
    events: Receiver<TransportEvent>,
    io_task: tokio::task::JoinHandle<()>,
    open: bool,
    closed: bool,
}

impl TcpTransport {
    /// Host a room: bind the code-derived port and accept one peer in the
    /// background. Returns as soon as the listener is bound; `Opened` arrives
    /// via [`Transport::poll`] once a guest connects.
    pub async fn host(code: &RoomCode) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", code.port())).await?;
        let (event_tx, event_rx) = unbounded();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let io_task = tokio::spawn(async move {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    tracing::info!(%peer, "guest connected");
                    // One peer per session; stop listening.
                    drop(listener);
                    let _ = event_tx.send(TransportEvent::Opened);
                    run_io(stream, event_tx, outbound_rx).await;
                }
                Err(e) => {
                    let _ = event_tx.send(TransportEvent::Error(e.to_string()));
                    let _ = event_tx.send(TransportEvent::Closed);
                }
            }
        });

        Ok(Self {
            outbound: Some(outbound_tx),
            events: event_rx,
            io_task,
            open: false,
            closed: false,
        })
    }

    /// Join a room at `host` with the given code.
    ///
    /// Fails with [`JoinError::TimedOut`] if the host does not answer within
    /// `timeout` — an unreachable host must not leave the caller waiting
    /// forever.
    pub async fn join(host: IpAddr, code: &RoomCode, timeout: Duration) -> Result<Self, JoinError> {
        let addr = SocketAddr::new(host, code.port());
        let stream = tokio::time::timeout(timeout, TcpStream::connect(addr))
            .await
            .map_err(|_| JoinError::TimedOut)??;

        let (event_tx, event_rx) = unbounded();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let _ = event_tx.send(TransportEvent::Opened);
        let io_task = tokio::spawn(run_io(stream, event_tx, outbound_rx));

        Ok(Self {
            outbound: Some(outbound_tx),
            events: event_rx,
            io_task,
            open: false,
            closed: false,
        })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, payload: &[u8]) {
        if !self.open {
            return;
        }
        if let Some(tx) = &self.outbound
            && tx.send(payload.to_vec()).is_err()
        {
            self.open = false;
        }
    }

    fn poll(&mut self) -> Vec<TransportEvent> {
        // A closed transport stays closed: events still in flight from the
        // io task (a late `Opened`, buffered data) must not resurrect it.
        if self.closed {
            return Vec::new();
        }
        let mut events = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    match event {
                        TransportEvent::Opened => self.open = true,
                        TransportEvent::Closed => self.open = false,
                        _ => {}
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
        self.open = false;
        self.closed = true;
        // Dropping the sender ends the writer task, which closes the socket.
        self.outbound = None;
        // Stops a still-listening host, releasing the bound port.
        self.io_task.abort();
    }

    fn is_open(&self) -> bool {
        self.open
    }
}

/// Drive one established connection until either side ends it.
async fn run_io(
    stream: TcpStream,
    events: Sender<TransportEvent>,
    mut outbound: mpsc::UnboundedReceiver<Vec<u8>>,
) {
    if let Err(e) = stream.set_nodelay(true) {
        tracing::warn!("set_nodelay failed: {e}");
    }
    let (mut reader, mut writer) = stream.into_split();

    let write_events = events.clone();
    let write_task = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if let Err(e) = write_frame(&mut writer, &payload).await {
                let _ = write_events.send(TransportEvent::Error(e.to_string()));
                break;
            }
        }
        // Sender dropped (local close) or write failure: closing the write
        // half signals EOF to the peer.
    });

    loop {
        match read_frame(&mut reader).await {
            Ok(Some(payload)) => {
                let _ = events.send(TransportEvent::Data(payload));
            }
            Ok(None) => {
                let _ = events.send(TransportEvent::Closed);
                break;
            }
            Err(e) => {
                let _ = events.send(TransportEvent::Error(e.to_string()));
                let _ = events.send(TransportEvent::Closed);
                break;
            }
        }
    }

    write_task.abort();
}

/// Read one frame. `Ok(None)` means the peer closed cleanly at a frame
/// boundary.
async fn read_frame<R: AsyncReadExt + Unpin>(reader: &mut R) -> std::io::Result<Option<Vec<u8>>> {
    let mut len_buf = [0u8; 4];
    match reader.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let len = u32::from_le_bytes(len_buf);
    if len > MAX_FRAME_LEN {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("frame of {len} bytes exceeds limit {MAX_FRAME_LEN}"),
        ));
    }

    let mut payload = vec![0u8; len as usize];
    reader.read_exact(&mut payload).await?;
    Ok(Some(payload))
}

/// Write one length-prefixed frame.
async fn write_frame<W: AsyncWriteExt + Unpin>(writer: &mut W, payload: &[u8]) -> std::io::Result<()> {
    writer.write_all(&(payload.len() as u32).to_le_bytes()).await?;
    writer.write_all(payload).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Poll `transport` until `pred` matches an event or the attempts run out.
    async fn wait_for(
        transport: &mut TcpTransport,
        pred: impl Fn(&TransportEvent) -> bool,
    ) -> Option<TransportEvent> {
        for _ in 0..200 {
            for event in transport.poll() {
                if pred(&event) {
                    return Some(event);
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        None
    }

    #[tokio::test]
    async fn test_host_and_join_exchange_frames() {
        let code = RoomCode::parse("111111").unwrap();
        let mut host = TcpTransport::host(&code).await.unwrap();
        let mut guest = TcpTransport::join("127.0.0.1".parse().unwrap(), &code, DEFAULT_JOIN_TIMEOUT)
            .await
            .unwrap();

        assert!(
            wait_for(&mut host, |e| *e == TransportEvent::Opened).await.is_some(),
            "host should see the guest connect"
        );
        assert!(wait_for(&mut guest, |e| *e == TransportEvent::Opened).await.is_some());

        guest.send(b"hello host");
        host.send(b"hello guest");

        let to_host = wait_for(&mut host, |e| matches!(e, TransportEvent::Data(_))).await;
        assert_eq!(to_host, Some(TransportEvent::Data(b"hello host".to_vec())));

        let to_guest = wait_for(&mut guest, |e| matches!(e, TransportEvent::Data(_))).await;
        assert_eq!(to_guest, Some(TransportEvent::Data(b"hello guest".to_vec())));
    }

    #[tokio::test]
    async fn test_close_reaches_peer() {
        let code = RoomCode::parse("222222").unwrap();
        let mut host = TcpTransport::host(&code).await.unwrap();
        let mut guest = TcpTransport::join("127.0.0.1".parse().unwrap(), &code, DEFAULT_JOIN_TIMEOUT)
            .await
            .unwrap();

        wait_for(&mut host, |e| *e == TransportEvent::Opened).await.unwrap();
        wait_for(&mut guest, |e| *e == TransportEvent::Opened).await.unwrap();

        guest.close();
        assert!(!guest.is_open());

        assert!(
            wait_for(&mut host, |e| *e == TransportEvent::Closed).await.is_some(),
            "host should observe the guest closing"
        );
        assert!(!host.is_open());
    }

    #[tokio::test]
    async fn test_send_before_open_is_noop() {
        let code = RoomCode::parse("333333").unwrap();
        let mut host = TcpTransport::host(&code).await.unwrap();
        // No guest yet: the transport is not open and the send vanishes.
        assert!(!host.is_open());
        host.send(b"too early");

        let mut guest = TcpTransport::join("127.0.0.1".parse().unwrap(), &code, DEFAULT_JOIN_TIMEOUT)
            .await
            .unwrap();
        wait_for(&mut host, |e| *e == TransportEvent::Opened).await.unwrap();
        wait_for(&mut guest, |e| *e == TransportEvent::Opened).await.unwrap();

        // Nothing should arrive at the guest.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let events = guest.poll();
        assert!(!events.iter().any(|e| matches!(e, TransportEvent::Data(_))));
    }

    #[tokio::test]
    async fn test_close_is_final_despite_buffered_events() {
        let code = RoomCode::parse("555555").unwrap();
        let mut host = TcpTransport::host(&code).await.unwrap();
        let _guest = TcpTransport::join("127.0.0.1".parse().unwrap(), &code, DEFAULT_JOIN_TIMEOUT)
            .await
            .unwrap();

        // Let the accept task queue its `Opened` without draining it, then
        // close. The buffered event must not reopen the transport.
        tokio::time::sleep(Duration::from_millis(50)).await;
        host.close();

        for _ in 0..10 {
            assert!(host.poll().is_empty());
            assert!(!host.is_open());
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn test_close_before_accept_releases_port() {
        let code = RoomCode::parse("666666").unwrap();
        let mut host = TcpTransport::host(&code).await.unwrap();
        host.close();

        // Give the aborted accept task a moment to drop the listener.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let result = TcpTransport::join(
            "127.0.0.1".parse().unwrap(),
            &code,
            Duration::from_millis(200),
        )
        .await;
        assert!(result.is_err(), "nobody should be listening any more");
    }

    #[tokio::test]
    async fn test_join_unreachable_host_fails_fast() {
        let code = RoomCode::parse("444444").unwrap();
        // TEST-NET-1 address: guaranteed unrouted. Either the SYN is dropped
        // (timeout) or the network stack rejects it outright (io error);
        // both must surface as an error well before the default timeout.
        let result = TcpTransport::join(
            "192.0.2.1".parse().unwrap(),
            &code,
            Duration::from_millis(200),
        )
        .await;
        assert!(result.is_err(), "joining an unreachable host must fail");
    }
}
