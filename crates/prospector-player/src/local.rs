//! The authoritative, input-driven local player.

use glam::DVec2;

use crate::{DRAG_DEAD_ZONE, PLAYER_SPEED};

/// One tick's worth of raw input, captured by the input boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoveInput {
    /// Up key held.
    pub up: bool,
    /// Down key held.
    pub down: bool,
    /// Left key held.
    pub left: bool,
    /// Right key held.
    pub right: bool,
    /// Active pointer drag, as a world-space target position.
    pub drag_target: Option<DVec2>,
}

impl MoveInput {
    /// Input with nothing pressed.
    pub fn idle() -> Self {
        Self::default()
    }
}

/// The local player. Its position is authoritative for this peer and is
/// broadcast (throttled) to the other side.
#[derive(Debug, Clone)]
pub struct LocalPlayer {
    /// Identifier sent with position updates.
    pub id: String,
    /// Current world position.
    pub position: DVec2,
    /// Movement speed in units per second.
    pub speed: f64,
    /// Pointer drags shorter than this are ignored.
    pub drag_dead_zone: f64,
}

impl LocalPlayer {
    /// Create a local player at `position`.
    pub fn new(id: impl Into<String>, position: DVec2) -> Self {
        Self {
            id: id.into(),
            position,
            speed: PLAYER_SPEED,
            drag_dead_zone: DRAG_DEAD_ZONE,
        }
    }

    /// Override the movement speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Override the pointer-drag dead zone.
    pub fn with_drag_dead_zone(mut self, dead_zone: f64) -> Self {
        self.drag_dead_zone = dead_zone;
        self
    }

    /// Unit-or-zero velocity for the given input.
    ///
    /// Keyboard axes are each ±1, with diagonals scaled by 1/√2 so diagonal
    /// speed equals axis speed. A pointer drag beyond the dead zone overrides
    /// the keys and is normalized, so it is never faster than axis movement.
    pub fn velocity(&self, input: &MoveInput) -> DVec2 {
        if let Some(target) = input.drag_target {
            let delta = target - self.position;
            let distance = delta.length();
            if distance > self.drag_dead_zone {
                return delta / distance;
            }
            return DVec2::ZERO;
        }

        let mut velocity = DVec2::ZERO;
        if input.up {
            velocity.y -= 1.0;
        }
        if input.down {
            velocity.y += 1.0;
        }
        if input.left {
            velocity.x -= 1.0;
        }
        if input.right {
            velocity.x += 1.0;
        }

        if velocity.x != 0.0 && velocity.y != 0.0 {
            velocity *= std::f64::consts::FRAC_1_SQRT_2;
        }
        velocity
    }

    /// Advance the player by one tick of `delta_ms` milliseconds.
    pub fn update(&mut self, input: &MoveInput, delta_ms: f64) {
        let movement = self.speed * delta_ms / 1000.0;
        self.position += self.velocity(input) * movement;
    }
}
