//! Tile categories and the noise-to-tile mapping.

/// A single terrain tile. The variant index (0–3) selects between visually
/// distinct sprites of the same category at the rendering boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Low-noise ground.
    Dirt(u8),
    /// Everything above the dirt threshold.
    Grass(u8),
}

/// Noise threshold below which a tile is dirt.
pub const DIRT_THRESHOLD: f64 = 0.3;

/// Number of sprite variants per tile category.
const VARIANTS: u8 = 4;

impl TileKind {
    /// Map an octave-noise sample in `[0, 1]` to a tile with the shipped
    /// dirt threshold.
    pub fn from_noise(value: f64) -> Self {
        Self::from_noise_with(value, DIRT_THRESHOLD)
    }

    /// Map a noise sample to a tile with an explicit dirt threshold.
    ///
    /// The variant multipliers (13 and 17) spread neighboring noise values
    /// across the four sprites; they are tuning, not structure, and must stay
    /// fixed for visual parity between peers.
    pub fn from_noise_with(value: f64, dirt_threshold: f64) -> Self {
        if value < dirt_threshold {
            Self::Dirt(((value * 13.0).floor() as u8) % VARIANTS)
        } else {
            Self::Grass(((value * 17.0).floor() as u8) % VARIANTS)
        }
    }

    /// The sprite variant index for this tile.
    pub fn variant(&self) -> u8 {
        match self {
            Self::Dirt(v) | Self::Grass(v) => *v,
        }
    }
}
