use arcadia_common::{EntityId, Transform, facing, frame_scale};
use arcadia_input::Edge;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::motion::VehicleState;

/// Cannon tuning. Speeds and gravity are per 60 Hz frame; times are seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonParams {
    pub reload_time: f64,
    pub projectile_speed: f32,
    /// Downward velocity added to every shell each frame.
    pub gravity: f32,
    /// Muzzle position in the vehicle's local frame (+Z is forward).
    pub muzzle_offset: Vec3,
    pub max_lifetime: f64,
    pub impact_lifetime: f64,
    pub ground_height: f32,
}

impl Default for CannonParams {
    fn default() -> Self {
        Self {
            reload_time: 0.5,
            projectile_speed: 1.0,
            gravity: 0.01,
            muzzle_offset: Vec3::new(0.0, 0.5, 2.0),
            max_lifetime: 5.0,
            impact_lifetime: 1.0,
            ground_height: 0.0,
        }
    }
}

/// Trigger and reload bookkeeping for the hover tank's gun.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cannon {
    trigger: Edge,
    last_shot_at: Option<f64>,
}

impl Cannon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_shot_at(&self) -> Option<f64> {
        self.last_shot_at
    }

    /// True once `reload_time` has strictly elapsed since the last shot.
    pub fn is_loaded(&self, params: &CannonParams, now: f64) -> bool {
        self.last_shot_at
            .is_none_or(|last| now - last > params.reload_time)
    }

    /// Feed the shoot flag for this frame. Fires only on the press edge and
    /// only when loaded; a press during reload is dropped, not queued.
    pub fn pull(
        &mut self,
        params: &CannonParams,
        vehicle: &VehicleState,
        shoot: bool,
        now: f64,
    ) -> Option<Projectile> {
        if !self.trigger.rising(shoot) || !self.is_loaded(params, now) {
            return None;
        }
        self.last_shot_at = Some(now);

        let rotation = Quat::from_rotation_y(vehicle.heading);
        let shell = Projectile {
            id: EntityId::new(),
            position: vehicle.position + rotation * params.muzzle_offset,
            velocity: facing(vehicle.heading) * params.projectile_speed,
            fired_at: now,
        };
        tracing::debug!(id = %shell.id.short(), "cannon fired");
        Some(shell)
    }
}

/// What happened to a shell this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileFate {
    Flying,
    /// Hit the ground at the given point.
    Landed(Vec3),
    /// Outlived `max_lifetime` without landing.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub fired_at: f64,
}

impl Projectile {
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            ..Transform::default()
        }
    }

    /// Move one frame under the constant gravity bias.
    pub fn advance(&mut self, params: &CannonParams, delta: f32, now: f64) -> ProjectileFate {
        let k = frame_scale(delta);
        self.velocity.y -= params.gravity * k;
        self.position += self.velocity * k;

        if self.position.y <= params.ground_height {
            self.position.y = params.ground_height;
            return ProjectileFate::Landed(self.position);
        }
        if now - self.fired_at >= params.max_lifetime {
            return ProjectileFate::Expired;
        }
        ProjectileFate::Flying
    }
}

/// Short-lived ground burst left where a shell lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub id: EntityId,
    pub position: Vec3,
    pub spawned_at: f64,
}

impl Impact {
    pub fn new(position: Vec3, now: f64) -> Self {
        Self {
            id: EntityId::new(),
            position,
            spawned_at: now,
        }
    }

    /// Linear fade from 1 at spawn to 0 at `impact_lifetime`.
    pub fn intensity(&self, params: &CannonParams, now: f64) -> f32 {
        if params.impact_lifetime <= 0.0 {
            return 0.0;
        }
        let age = (now - self.spawned_at) / params.impact_lifetime;
        (1.0 - age).clamp(0.0, 1.0) as f32
    }

    pub fn is_expired(&self, params: &CannonParams, now: f64) -> bool {
        now - self.spawned_at >= params.impact_lifetime
    }

    /// Effect transform; scale grows as the burst fades.
    pub fn transform(&self, params: &CannonParams, now: f64) -> Transform {
        let spread = 1.0 + (1.0 - self.intensity(params, now));
        Transform {
            position: self.position,
            scale: Vec3::splat(spread),
            ..Transform::default()
        }
    }
}
