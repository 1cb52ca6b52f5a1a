//! The collectible registry: live items and the spawn timer.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::kind::{GOLD_WEIGHT, ItemKind, SILVER_WEIGHT, STONE_WEIGHT};
use crate::{SPAWN_HALF_EXTENT, SPAWN_INTERVAL_MS};

/// A collectible lying in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItem {
    /// Globally unique identifier.
    pub id: String,
    /// What it is.
    pub kind: ItemKind,
    /// Where it lies.
    pub position: DVec2,
}

/// Owns the set of live world items and the autonomous spawn timer.
///
/// Randomness comes from a session-owned [`ChaCha8Rng`] so spawn sequences
/// are reproducible from the seed. Ids combine a peer prefix, a monotonic
/// counter, and a millisecond timestamp so two peers can never mint the same
/// id.
pub struct ItemRegistry {
    items: HashMap<String, WorldItem>,
    rng: ChaCha8Rng,
    id_prefix: String,
    next_item_id: u64,
    spawn_timer_ms: f64,
    spawn_interval_ms: f64,
    spawn_weights: (f64, f64, f64),
}

impl ItemRegistry {
    /// Create a registry with its own seeded RNG.
    pub fn new(rng_seed: u64) -> Self {
        Self {
            items: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(rng_seed),
            id_prefix: "item".to_string(),
            next_item_id: 0,
            spawn_timer_ms: 0.0,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            spawn_weights: (GOLD_WEIGHT, SILVER_WEIGHT, STONE_WEIGHT),
        }
    }

    /// Set the id prefix (use distinct prefixes per peer).
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Override the spawn interval (tests and tuning).
    pub fn with_spawn_interval(mut self, interval_ms: f64) -> Self {
        self.spawn_interval_ms = interval_ms;
        self
    }

    /// Override the `(gold, silver, stone)` spawn weights.
    pub fn with_spawn_weights(mut self, weights: (f64, f64, f64)) -> Self {
        self.spawn_weights = weights;
        self
    }

    fn mint_id(&mut self) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let id = format!("{}_{}_{}", self.id_prefix, self.next_item_id, millis);
        self.next_item_id += 1;
        id
    }

    /// Spawn an item with every field chosen by the registry: weighted random
    /// kind, uniform position in the spawn square, fresh id.
    pub fn spawn_random(&mut self) -> WorldItem {
        let kind = ItemKind::from_roll_weighted(self.rng.random::<f64>(), self.spawn_weights);
        let position = DVec2::new(
            (self.rng.random::<f64>() - 0.5) * 2.0 * SPAWN_HALF_EXTENT,
            (self.rng.random::<f64>() - 0.5) * 2.0 * SPAWN_HALF_EXTENT,
        );
        self.spawn(kind, position, None)
    }

    /// Spawn an item with explicit kind and position, minting an id unless one
    /// is supplied (remote-originated items arrive with their id).
    pub fn spawn(&mut self, kind: ItemKind, position: DVec2, id: Option<String>) -> WorldItem {
        let id = id.unwrap_or_else(|| self.mint_id());
        let item = WorldItem { id, kind, position };
        self.items.insert(item.id.clone(), item.clone());
        item
    }

    /// Return an item to the world at an explicit position.
    pub fn drop_item(&mut self, kind: ItemKind, position: DVec2, id: Option<String>) -> WorldItem {
        self.spawn(kind, position, id)
    }

    /// Collect every item strictly closer than `radius` to `position`.
    ///
    /// All matches in one call are removed and returned; order among ties is
    /// unspecified.
    pub fn check_collection(&mut self, position: DVec2, radius: f64) -> Vec<WorldItem> {
        let collected_ids: Vec<String> = self
            .items
            .values()
            .filter(|item| item.position.distance(position) < radius)
            .map(|item| item.id.clone())
            .collect();

        collected_ids
            .into_iter()
            .filter_map(|id| self.items.remove(&id))
            .collect()
    }

    /// Remove an item without any notification. Idempotent: removing an
    /// already-absent id is a no-op (the other peer may have collected it
    /// first).
    pub fn remove(&mut self, id: &str) -> bool {
        self.items.remove(id).is_some()
    }

    /// Advance the spawn timer. On crossing the interval the timer resets to
    /// zero and 1–3 random items spawn; the spawned items are returned so the
    /// caller can broadcast them.
    pub fn advance(&mut self, delta_ms: f64) -> Vec<WorldItem> {
        self.spawn_timer_ms += delta_ms;

        if self.spawn_timer_ms < self.spawn_interval_ms {
            return Vec::new();
        }

        self.spawn_timer_ms = 0.0;
        let count = self.rng.random_range(1..=3);
        tracing::debug!(count, "spawn interval elapsed");
        (0..count).map(|_| self.spawn_random()).collect()
    }

    /// Authoritative timer overwrite for replica synchronization.
    pub fn set_timer(&mut self, time_ms: f64) {
        self.spawn_timer_ms = time_ms;
    }

    /// Current timer accumulator in milliseconds.
    pub fn timer_ms(&self) -> f64 {
        self.spawn_timer_ms
    }

    /// Timer progress in `[0, 1)`.
    pub fn progress(&self) -> f64 {
        self.spawn_timer_ms / self.spawn_interval_ms
    }

    /// Seconds until the next autonomous spawn.
    pub fn time_until_spawn_secs(&self) -> f64 {
        ((self.spawn_interval_ms - self.spawn_timer_ms) / 1000.0).max(0.0)
    }

    /// Look up a live item.
    pub fn get(&self, id: &str) -> Option<&WorldItem> {
        self.items.get(id)
    }

    /// All live items, in unspecified order.
    pub fn items(&self) -> impl Iterator<Item = &WorldItem> {
        self.items.values()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are live.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
