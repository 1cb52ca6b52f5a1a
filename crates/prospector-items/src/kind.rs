//! Item kinds and weighted random selection.

use serde::{Deserialize, Serialize};

/// The three collectible kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Rare.
    Gold,
    /// Uncommon.
    Silver,
    /// Common.
    Stone,
}

/// Spawn weight for gold.
pub const GOLD_WEIGHT: f64 = 0.1;

/// Spawn weight for silver.
pub const SILVER_WEIGHT: f64 = 0.3;

/// Spawn weight for stone.
pub const STONE_WEIGHT: f64 = 0.6;

impl ItemKind {
    /// All kinds, in weight order (rarest first).
    pub const ALL: [ItemKind; 3] = [ItemKind::Gold, ItemKind::Silver, ItemKind::Stone];

    /// Pick a kind from a uniform roll in `[0, 1)` with the shipped weights.
    ///
    /// Cumulative weights 0.1 / 0.4 / 1.0, so gold is rare and stone common.
    pub fn from_roll(roll: f64) -> Self {
        Self::from_roll_weighted(roll, (GOLD_WEIGHT, SILVER_WEIGHT, STONE_WEIGHT))
    }

    /// Pick a kind from a uniform roll with explicit `(gold, silver, stone)`
    /// weights, normalized by their sum.
    pub fn from_roll_weighted(roll: f64, weights: (f64, f64, f64)) -> Self {
        let (gold, silver, stone) = weights;
        let total = gold + silver + stone;
        if total <= 0.0 {
            return ItemKind::Stone;
        }
        let mut cumulative = 0.0;
        for (kind, weight) in [
            (ItemKind::Gold, gold),
            (ItemKind::Silver, silver),
            (ItemKind::Stone, stone),
        ] {
            // A zero-weight kind must never win, even at roll 0.0.
            if weight <= 0.0 {
                continue;
            }
            cumulative += weight / total;
            if roll <= cumulative {
                return kind;
            }
        }
        ItemKind::Stone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_boundaries() {
        assert_eq!(ItemKind::from_roll(0.0), ItemKind::Gold);
        assert_eq!(ItemKind::from_roll(0.1), ItemKind::Gold);
        assert_eq!(ItemKind::from_roll(0.11), ItemKind::Silver);
        assert_eq!(ItemKind::from_roll(0.4), ItemKind::Silver);
        assert_eq!(ItemKind::from_roll(0.41), ItemKind::Stone);
        assert_eq!(ItemKind::from_roll(0.999), ItemKind::Stone);
    }

    #[test]
    fn test_stone_is_most_common() {
        let mut counts = [0u32; 3];
        for i in 0..1000 {
            let roll = i as f64 / 1000.0;
            match ItemKind::from_roll(roll) {
                ItemKind::Gold => counts[0] += 1,
                ItemKind::Silver => counts[1] += 1,
                ItemKind::Stone => counts[2] += 1,
            }
        }
        assert!(counts[2] > counts[1]);
        assert!(counts[1] > counts[0]);
    }

    #[test]
    fn test_weighted_roll_normalizes() {
        // Unnormalized weights behave like their normalized counterparts.
        assert_eq!(
            ItemKind::from_roll_weighted(0.05, (1.0, 3.0, 6.0)),
            ItemKind::Gold
        );
        assert_eq!(
            ItemKind::from_roll_weighted(0.2, (1.0, 3.0, 6.0)),
            ItemKind::Silver
        );
        assert_eq!(
            ItemKind::from_roll_weighted(0.9, (1.0, 3.0, 6.0)),
            ItemKind::Stone
        );
        // A zeroed-out kind never wins.
        assert_eq!(
            ItemKind::from_roll_weighted(0.0, (0.0, 0.0, 1.0)),
            ItemKind::Stone
        );
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        // Wire compatibility: kinds serialize as lowercase names.
        let json = serde_json::to_string(&ItemKind::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
    }
}
