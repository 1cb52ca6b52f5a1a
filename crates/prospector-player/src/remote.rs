//! The mirrored remote player.

use glam::DVec2;

use crate::INTERPOLATION_FACTOR;

/// The other peer's player, smoothed toward its last reported position.
///
/// Each tick the rendered position moves 15 % of the remaining distance to
/// the target, which absorbs network jitter and converges within a few dozen
/// ticks once updates stop arriving. Remote players take no input.
#[derive(Debug, Clone)]
pub struct RemotePlayer {
    /// Identifier from the peer's position updates.
    pub id: String,
    /// Rendered (smoothed) position.
    pub position: DVec2,
    /// Last received authoritative position.
    pub target: DVec2,
    /// Per-tick fraction of the remaining distance covered.
    pub interpolation: f64,
}

impl RemotePlayer {
    /// Create a remote player directly at its first reported position.
    pub fn new(id: impl Into<String>, position: DVec2) -> Self {
        Self {
            id: id.into(),
            position,
            target: position,
            interpolation: INTERPOLATION_FACTOR,
        }
    }

    /// Override the interpolation factor.
    pub fn with_interpolation(mut self, factor: f64) -> Self {
        self.interpolation = factor;
        self
    }

    /// Record a newly received position. The rendered position is untouched;
    /// interpolation closes the gap over subsequent ticks.
    pub fn set_target(&mut self, target: DVec2) {
        self.target = target;
    }

    /// Advance one tick of exponential smoothing toward the target.
    pub fn update(&mut self) {
        self.position += (self.target - self.position) * self.interpolation;
    }
}
