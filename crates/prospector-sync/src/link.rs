//! The peer link manager.

use glam::DVec2;
use prospector_items::WorldItem;
use prospector_net::{
    ItemPayload, Message, PositionUpdate, Transport, TransportEvent, WorldSync, deserialize_message,
    serialize_message,
};

use crate::POSITION_SYNC_INTERVAL_MS;
use crate::event::SyncEvent;

/// Which side of the session this peer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Spawn authority; sends `ItemSpawned`, `WorldSync`, `SpawnTimer`.
    Host,
    /// Replica; applies host state and never originates authority messages.
    Guest,
}

/// Connection state as the link sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStatus {
    /// Waiting for the transport to open.
    Connecting,
    /// Live; messages flow.
    Connected,
    /// Over; the link never reconnects.
    Disconnected,
}

/// Wraps a [`Transport`], enforcing the authority policy and the outbound
/// position throttle, and translating raw frames into [`SyncEvent`]s.
///
/// All send methods are silent no-ops until the link is connected, and again
/// after it disconnects; callers never need to gate on status.
pub struct PeerLink {
    transport: Box<dyn Transport>,
    role: Role,
    status: LinkStatus,
    position_elapsed_ms: f64,
    position_interval_ms: f64,
}

impl PeerLink {
    /// Wrap `transport` as the given role. The link starts `Connecting` and
    /// reports [`SyncEvent::Connected`] from [`poll`](Self::poll) once the
    /// transport opens.
    pub fn new(transport: Box<dyn Transport>, role: Role) -> Self {
        Self {
            transport,
            role,
            status: LinkStatus::Connecting,
            position_elapsed_ms: 0.0,
            position_interval_ms: POSITION_SYNC_INTERVAL_MS,
        }
    }

    /// Override the position broadcast interval.
    pub fn with_position_interval(mut self, interval_ms: f64) -> Self {
        self.position_interval_ms = interval_ms;
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> LinkStatus {
        self.status
    }

    pub fn is_connected(&self) -> bool {
        self.status == LinkStatus::Connected
    }

    /// Drain the transport and decode everything received this tick.
    ///
    /// Malformed frames become [`SyncEvent::Fault`] and are otherwise
    /// skipped; one bad message never takes the connection down.
    pub fn poll(&mut self) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        for event in self.transport.poll() {
            match event {
                TransportEvent::Opened => {
                    self.status = LinkStatus::Connected;
                    events.push(SyncEvent::Connected);
                }
                TransportEvent::Closed => {
                    if self.status != LinkStatus::Disconnected {
                        self.status = LinkStatus::Disconnected;
                        events.push(SyncEvent::Disconnected);
                    }
                }
                TransportEvent::Error(message) => {
                    tracing::warn!(%message, "transport fault");
                    events.push(SyncEvent::Fault(message));
                }
                TransportEvent::Data(payload) => match deserialize_message(&payload) {
                    Ok(msg) => events.push(translate(msg)),
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping undecodable message");
                        events.push(SyncEvent::Fault(e.to_string()));
                    }
                },
            }
        }
        events
    }

    /// End the connection. Idempotent.
    pub fn disconnect(&mut self) {
        self.transport.close();
        self.status = LinkStatus::Disconnected;
    }

    // ------------------------------------------------------------------
    // Outbound
    // ------------------------------------------------------------------

    /// Send the local position if at least the position interval of game time
    /// (default [`POSITION_SYNC_INTERVAL_MS`]) has accumulated since the last
    /// send. Returns whether a message went out.
    pub fn maybe_send_position(&mut self, id: &str, position: DVec2, delta_ms: f64) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.position_elapsed_ms += delta_ms;
        if self.position_elapsed_ms < self.position_interval_ms {
            return false;
        }
        self.position_elapsed_ms = 0.0;
        self.send(&Message::Position(PositionUpdate {
            id: id.to_string(),
            x: position.x,
            y: position.y,
        }));
        true
    }

    /// Announce that the local player collected an item.
    pub fn send_item_collected(&mut self, item_id: &str) {
        self.send(&Message::ItemCollected {
            item_id: item_id.to_string(),
        });
    }

    /// Announce that the local player dropped an item into the world.
    pub fn send_item_dropped(&mut self, item: &WorldItem) {
        self.send(&Message::ItemDropped(payload_for(item)));
    }

    /// Host only: announce an autonomous spawn.
    pub fn send_item_spawned(&mut self, item: &WorldItem) {
        if self.deny_unless_host("item_spawned") {
            return;
        }
        self.send(&Message::ItemSpawned(payload_for(item)));
    }

    /// Host only: send the full world snapshot.
    pub fn send_world_sync(&mut self, seed: u32, items: &[WorldItem], spawn_timer_ms: f64) {
        if self.deny_unless_host("world_sync") {
            return;
        }
        self.send(&Message::WorldSync(WorldSync {
            seed,
            items: items.iter().map(payload_for).collect(),
            spawn_timer_ms,
        }));
    }

    /// Host only: overwrite the guest's spawn-timer replica.
    pub fn send_spawn_timer(&mut self, time_ms: f64) {
        if self.deny_unless_host("spawn_timer") {
            return;
        }
        self.send(&Message::SpawnTimer { time_ms });
    }

    fn deny_unless_host(&self, what: &str) -> bool {
        if self.role == Role::Host {
            return false;
        }
        tracing::warn!(message = what, "guest attempted a host-only send; dropped");
        true
    }

    fn send(&mut self, msg: &Message) {
        if !self.is_connected() {
            return;
        }
        match serialize_message(msg) {
            Ok(bytes) => self.transport.send(&bytes),
            Err(e) => tracing::error!(error = %e, "failed to serialize outbound message"),
        }
    }
}

fn translate(msg: Message) -> SyncEvent {
    match msg {
        Message::Position(p) => SyncEvent::Position {
            id: p.id,
            position: DVec2::new(p.x, p.y),
        },
        Message::ItemCollected { item_id } => SyncEvent::ItemCollected { item_id },
        Message::ItemDropped(p) => SyncEvent::ItemDropped {
            id: p.id,
            kind: p.kind,
            position: DVec2::new(p.x, p.y),
        },
        Message::ItemSpawned(p) => SyncEvent::ItemSpawned {
            id: p.id,
            kind: p.kind,
            position: DVec2::new(p.x, p.y),
        },
        Message::WorldSync(w) => SyncEvent::WorldSync {
            seed: w.seed,
            items: w.items,
            spawn_timer_ms: w.spawn_timer_ms,
        },
        Message::SpawnTimer { time_ms } => SyncEvent::SpawnTimer { time_ms },
    }
}

fn payload_for(item: &WorldItem) -> ItemPayload {
    ItemPayload {
        id: item.id.clone(),
        kind: item.kind,
        x: item.position.x,
        y: item.position.y,
    }
}
