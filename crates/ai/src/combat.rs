use arcadia_common::{facing, planar_distance};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Half-angle of the player's melee swing, measured from the facing direction.
pub const MELEE_ARC_HALF_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

/// Fraction of an incoming strike that gets through a held block.
pub const BLOCK_FACTOR: f32 = 0.5;

/// True if `target` is within `range` of `origin` on the ground plane and no
/// more than `half_angle` radians off the facing given by `heading`.
pub fn within_arc(origin: Vec3, heading: f32, target: Vec3, range: f32, half_angle: f32) -> bool {
    let distance = planar_distance(origin, target);
    if distance > range {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }
    let to_target = Vec3::new(target.x - origin.x, 0.0, target.z - origin.z) / distance;
    to_target.dot(facing(heading)) >= half_angle.cos()
}

/// Player health bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerVitals {
    pub health: f32,
    pub max_health: f32,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl PlayerVitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply an incoming strike, halved when blocking. Returns the damage taken.
    pub fn receive(&mut self, power: f32, blocking: bool) -> f32 {
        if self.is_dead() {
            return 0.0;
        }
        let power = power.max(0.0);
        let damage = if blocking { power * BLOCK_FACTOR } else { power };
        let before = self.health;
        self.health = (self.health - damage).max(0.0);
        before - self.health
    }

    pub fn reset(&mut self) {
        self.health = self.max_health;
    }
}
