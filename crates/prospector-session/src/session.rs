//! One peer's complete game state and per-frame pipeline.

use glam::DVec2;
use prospector_config::Config;
use prospector_items::{Inventory, ItemKind, ItemRegistry, WorldItem};
use prospector_net::Transport;
use prospector_player::{LocalPlayer, MoveInput, RemotePlayer};
use prospector_sync::{PeerLink, Role, SyncEvent};
use prospector_terrain::ChunkMap;

/// Connection state as shown to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No peer link was ever created.
    SinglePlayer,
    /// Waiting for the peer.
    Connecting,
    /// Synchronized play.
    Connected,
    /// The peer is gone; the session continues solo with its current world.
    Disconnected,
}

/// Everything one peer runs: players, terrain, items, and the peer link.
///
/// Single-player and host sessions own their world from the start. A guest
/// session starts with no terrain at all and builds its world from the
/// host's snapshot, so both sides are guaranteed to agree on the seed.
pub struct Session {
    player: LocalPlayer,
    remote: Option<RemotePlayer>,
    terrain: Option<ChunkMap>,
    items: ItemRegistry,
    inventory: Inventory,
    link: Option<PeerLink>,
    config: Config,
    world_sync_countdown_ms: Option<f64>,
    faults: Vec<String>,
}

impl Session {
    /// A solo session: full world authority, no link.
    pub fn single_player(seed: u32) -> Self {
        Self::with_world("local", Some(seed), None)
    }

    /// The hosting side of a room. Authority over spawning from the start;
    /// sends the world snapshot shortly after the guest connects.
    pub fn host(seed: u32, transport: Box<dyn Transport>) -> Self {
        Self::with_world(
            "host",
            Some(seed),
            Some(PeerLink::new(transport, Role::Host)),
        )
    }

    /// The joining side of a room. Has no terrain and no authority until the
    /// host's world snapshot arrives.
    pub fn guest(transport: Box<dyn Transport>) -> Self {
        Self::with_world("guest", None, Some(PeerLink::new(transport, Role::Guest)))
    }

    fn with_world(id: &str, seed: Option<u32>, link: Option<PeerLink>) -> Self {
        let items = ItemRegistry::new(u64::from(seed.unwrap_or_default())).with_id_prefix(id);
        Self {
            player: LocalPlayer::new(id, DVec2::ZERO),
            remote: None,
            terrain: seed.map(ChunkMap::new),
            items,
            inventory: Inventory::default(),
            link,
            config: Config::default(),
            world_sync_countdown_ms: None,
            faults: Vec::new(),
        }
    }

    /// Apply tuning overrides to every component. Call at construction time,
    /// before the first tick.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.config = config.clone();
        self.player.speed = config.player.speed;
        self.player.drag_dead_zone = config.player.drag_dead_zone;
        self.items = std::mem::replace(&mut self.items, ItemRegistry::new(0))
            .with_spawn_interval(config.items.spawn_interval_ms)
            .with_spawn_weights(config.items.spawn_weights);
        if let Some(terrain) = &self.terrain {
            self.terrain = Some(
                ChunkMap::new(terrain.seed())
                    .with_view_distance(config.terrain.view_distance)
                    .with_dirt_threshold(config.terrain.dirt_threshold),
            );
        }
        self.link = self
            .link
            .take()
            .map(|link| link.with_position_interval(config.network.position_sync_interval_ms));
        self
    }

    /// Override the autonomous spawn interval (tests and tuning).
    pub fn with_spawn_interval(mut self, interval_ms: f64) -> Self {
        self.config.items.spawn_interval_ms = interval_ms;
        self.items = std::mem::replace(&mut self.items, ItemRegistry::new(0))
            .with_spawn_interval(interval_ms);
        self
    }

    // ------------------------------------------------------------------
    // Frame pipeline
    // ------------------------------------------------------------------

    /// Advance the whole session by one frame of `delta_ms` milliseconds.
    pub fn update(&mut self, input: &MoveInput, delta_ms: f64) {
        self.player.update(input, delta_ms);
        if let Some(remote) = &mut self.remote {
            remote.update();
        }
        if let Some(terrain) = &mut self.terrain {
            terrain.update_around(self.player.position);
        }

        self.collect_nearby();

        if self.is_spawn_authority() {
            let spawned = self.items.advance(delta_ms);
            for item in &spawned {
                tracing::info!(id = %item.id, kind = ?item.kind, "item spawned");
                if let Some(link) = &mut self.link {
                    link.send_item_spawned(item);
                }
            }
        }

        let events = match &mut self.link {
            Some(link) => link.poll(),
            None => Vec::new(),
        };
        for event in events {
            self.apply(event);
        }

        self.tick_world_sync(delta_ms);

        if let Some(link) = &mut self.link {
            link.maybe_send_position(&self.player.id, self.player.position, delta_ms);
            if link.role() == Role::Host {
                link.send_spawn_timer(self.items.timer_ms());
            }
        }
    }

    /// Pick up every item within collection range and tell the peer.
    fn collect_nearby(&mut self) {
        let collected = self
            .items
            .check_collection(self.player.position, self.config.items.collection_radius);
        for item in collected {
            tracing::debug!(id = %item.id, kind = ?item.kind, "collected");
            self.inventory.add(item.kind, 1);
            if let Some(link) = &mut self.link {
                link.send_item_collected(&item.id);
            }
        }
    }

    /// Whether this session drives the autonomous spawn timer. The guest is
    /// a replica only while the host is actually there; once disconnected it
    /// runs its own timer.
    fn is_spawn_authority(&self) -> bool {
        match &self.link {
            None => true,
            Some(link) => match link.role() {
                Role::Host => true,
                // A guest that never received a world has nothing to spawn
                // into, even after the link dies.
                Role::Guest => !link.is_connected() && self.terrain.is_some(),
            },
        }
    }

    fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Connected => {
                tracing::info!("peer connected");
                if self.link.as_ref().is_some_and(|l| l.role() == Role::Host) {
                    self.world_sync_countdown_ms = Some(self.config.network.world_sync_delay_ms);
                }
            }
            SyncEvent::Disconnected => {
                tracing::info!("peer disconnected; continuing solo");
                self.world_sync_countdown_ms = None;
                self.remote = None;
            }
            SyncEvent::Fault(message) => self.faults.push(message),
            SyncEvent::Position { id, position } => match &mut self.remote {
                Some(remote) => remote.set_target(position),
                // First sighting: appear directly there, no interpolation
                // sweep across the map.
                None => {
                    self.remote = Some(
                        RemotePlayer::new(id, position)
                            .with_interpolation(self.config.player.interpolation_factor),
                    );
                }
            },
            SyncEvent::ItemCollected { item_id } => {
                // May already be gone if both peers grabbed it the same
                // frame; last writer silently loses.
                self.items.remove(&item_id);
            }
            SyncEvent::ItemDropped { id, kind, position }
            | SyncEvent::ItemSpawned { id, kind, position } => {
                self.items.spawn(kind, position, Some(id));
            }
            SyncEvent::WorldSync {
                seed,
                items,
                spawn_timer_ms,
            } => self.adopt_world(seed, items, spawn_timer_ms),
            SyncEvent::SpawnTimer { time_ms } => self.items.set_timer(time_ms),
        }
    }

    /// Replace the whole world with the host's snapshot.
    fn adopt_world(
        &mut self,
        seed: u32,
        items: Vec<prospector_net::ItemPayload>,
        spawn_timer_ms: f64,
    ) {
        tracing::info!(seed, items = items.len(), "adopting host world");
        let mut terrain = ChunkMap::new(seed)
            .with_view_distance(self.config.terrain.view_distance)
            .with_dirt_threshold(self.config.terrain.dirt_threshold);
        terrain.update_around(self.player.position);
        self.terrain = Some(terrain);

        let mut registry = ItemRegistry::new(u64::from(seed))
            .with_id_prefix(self.player.id.clone())
            .with_spawn_interval(self.config.items.spawn_interval_ms)
            .with_spawn_weights(self.config.items.spawn_weights);
        for payload in items {
            registry.spawn(
                payload.kind,
                DVec2::new(payload.x, payload.y),
                Some(payload.id),
            );
        }
        registry.set_timer(spawn_timer_ms);
        self.items = registry;
    }

    fn tick_world_sync(&mut self, delta_ms: f64) {
        let Some(remaining) = self.world_sync_countdown_ms else {
            return;
        };
        let remaining = remaining - delta_ms;
        if remaining > 0.0 {
            self.world_sync_countdown_ms = Some(remaining);
            return;
        }
        self.world_sync_countdown_ms = None;

        let Some(seed) = self.terrain.as_ref().map(ChunkMap::seed) else {
            return;
        };
        let snapshot: Vec<WorldItem> = self.items.items().cloned().collect();
        if let Some(link) = &mut self.link {
            tracing::info!(seed, items = snapshot.len(), "sending world snapshot");
            link.send_world_sync(seed, &snapshot, self.items.timer_ms());
        }
    }

    // ------------------------------------------------------------------
    // Player actions
    // ------------------------------------------------------------------

    /// Drop one item of `kind` from the inventory at the player's feet.
    ///
    /// Returns the dropped world item, or `None` (and changes nothing) when
    /// the inventory has none of that kind.
    pub fn drop_item(&mut self, kind: ItemKind) -> Option<WorldItem> {
        if !self.inventory.remove(kind, 1) {
            return None;
        }
        let item = self.items.drop_item(kind, self.player.position, None);
        if let Some(link) = &mut self.link {
            link.send_item_dropped(&item);
        }
        Some(item)
    }

    /// Close the peer link. The session keeps its world and continues solo.
    pub fn disconnect(&mut self) {
        if let Some(link) = &mut self.link {
            link.disconnect();
        }
        self.world_sync_countdown_ms = None;
        self.remote = None;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn status(&self) -> ConnectionStatus {
        match &self.link {
            None => ConnectionStatus::SinglePlayer,
            Some(link) => match link.status() {
                prospector_sync::LinkStatus::Connecting => ConnectionStatus::Connecting,
                prospector_sync::LinkStatus::Connected => ConnectionStatus::Connected,
                prospector_sync::LinkStatus::Disconnected => ConnectionStatus::Disconnected,
            },
        }
    }

    pub fn player(&self) -> &LocalPlayer {
        &self.player
    }

    pub fn remote(&self) -> Option<&RemotePlayer> {
        self.remote.as_ref()
    }

    /// Loaded terrain; `None` on a guest that has not yet received the
    /// host's snapshot.
    pub fn terrain(&self) -> Option<&ChunkMap> {
        self.terrain.as_ref()
    }

    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Direct registry access for the embedding game (scripted spawns,
    /// level setup).
    pub fn items_mut(&mut self) -> &mut ItemRegistry {
        &mut self.items
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Time until the next autonomous spawn, formatted `m:ss`.
    pub fn spawn_countdown(&self) -> String {
        let total = self.items.time_until_spawn_secs().ceil() as u64;
        format!("{}:{:02}", total / 60, total % 60)
    }

    /// Drain accumulated non-fatal fault messages (for the UI).
    pub fn take_faults(&mut self) -> Vec<String> {
        std::mem::take(&mut self.faults)
    }
}
