//! Per-player inventory counts.

use crate::kind::ItemKind;

/// Non-negative per-kind counts for one local player.
///
/// Only local collection increments and local drops decrement; remote events
/// never touch the inventory directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    gold: u32,
    silver: u32,
    stone: u32,
}

impl Inventory {
    /// An empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: ItemKind) -> &mut u32 {
        match kind {
            ItemKind::Gold => &mut self.gold,
            ItemKind::Silver => &mut self.silver,
            ItemKind::Stone => &mut self.stone,
        }
    }

    /// Count for one kind.
    pub fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::Gold => self.gold,
            ItemKind::Silver => self.silver,
            ItemKind::Stone => self.stone,
        }
    }

    /// Add `count` of `kind`.
    pub fn add(&mut self, kind: ItemKind, count: u32) {
        *self.slot(kind) += count;
    }

    /// Remove `count` of `kind`. Fails and leaves the inventory unchanged if
    /// fewer than `count` are held.
    pub fn remove(&mut self, kind: ItemKind, count: u32) -> bool {
        let slot = self.slot(kind);
        if *slot >= count {
            *slot -= count;
            true
        } else {
            false
        }
    }

    /// Total number of held items.
    pub fn total(&self) -> u32 {
        self.gold + self.silver + self.stone
    }

    /// Reset every count to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
