//! ECS components for hecs entities.
//!
//! Components are plain data; the per-tick logic lives in systems. The
//! few methods here are single-field state transitions with invariants
//! worth centralizing (monotonic destruction, saturating damage).

use serde::{Deserialize, Serialize};

/// Physical extent and gravitational strength of a body.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Body {
    /// Mass, used when this body acts as a gravity source.
    pub mass: f64,
    /// Collision radius.
    pub radius: f64,
}

/// Destruction flag. Monotonic: once set it never reverts; the entity
/// stays in the world, logically dead, until the cleanup pass despawns it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Hull {
    pub destroyed: bool,
}

impl Hull {
    /// Idempotent: destroying an already-destroyed hull is a no-op.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// Damage sink for the Moon. The Moon is never destroyed, only damaged;
/// loss is triggered when health reaches zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: u32,
    pub initial: u32,
}

impl Health {
    pub fn new(initial: u32) -> Self {
        Self {
            current: initial,
            initial,
        }
    }

    pub fn damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn depleted(&self) -> bool {
        self.current == 0
    }
}

/// Gun aim state. The gun is stationary and rotational only.
///
/// Pointer auto-aim sets `base_angle` every tick; held rotation keys
/// accumulate into `manual_offset` on top of it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Turret {
    /// Angle toward the tracked pointer (radians, CCW from +x).
    pub base_angle: f64,
    /// Accumulated manual rotation offset (radians).
    pub manual_offset: f64,
    /// Elapsed-seconds timestamp of the last shot. `None` before the
    /// first shot, so the first trigger pull always fires.
    pub last_shot_secs: Option<f64>,
}

impl Turret {
    /// Effective aim angle.
    pub fn angle(&self) -> f64 {
        self.base_angle + self.manual_offset
    }

    /// Whether the fire cooldown has elapsed.
    pub fn ready(&self, elapsed_secs: f64, period: f64) -> bool {
        match self.last_shot_secs {
            Some(last) => elapsed_secs - last >= period,
            None => true,
        }
    }
}

/// Marks the Moon — the defended central body and dominant gravity source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Moon;

/// Marks the player's turret.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Gun;

/// Marks a projectile fired by the gun.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bullet;

/// Marks an enemy fighter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Fighter;
