use arcadia_common::{Transform, facing, frame_scale};
use arcadia_input::ControlFlags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// What happens to speed while coasting near zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdlePolicy {
    /// Friction only; speed decays towards zero without ever reaching it.
    #[default]
    Asymptotic,
    /// While coasting, speed is zeroed once `|speed| < deceleration`.
    SnapToRest,
}

/// Cosmetic vertical bob applied on top of the integrated position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverBob {
    pub base_height: f32,
    /// Angular frequency in radians per second of clock time.
    pub frequency: f32,
    pub amplitude: f32,
}

impl Default for HoverBob {
    fn default() -> Self {
        Self {
            base_height: 0.5,
            frequency: 2.0,
            amplitude: 0.1,
        }
    }
}

impl HoverBob {
    pub fn height_at(&self, time: f64) -> f32 {
        self.base_height + ((time as f32) * self.frequency).sin() * self.amplitude
    }
}

/// Tuning constants, all expressed per 60 Hz frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    /// Forward top speed in units per frame. Reverse tops out at half.
    pub max_speed: f32,
    pub acceleration: f32,
    /// Rest threshold for [`IdlePolicy::SnapToRest`].
    pub deceleration: f32,
    pub brake_strength: f32,
    /// Per-frame speed multiplier in `(0, 1]`.
    pub friction: f32,
    pub max_steering_angle: f32,
    pub steering_speed: f32,
    pub steering_return: f32,
    pub idle_policy: IdlePolicy,
    pub hover: Option<HoverBob>,
}

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            max_speed: 0.5,
            acceleration: 0.02,
            deceleration: 0.005,
            brake_strength: 0.03,
            friction: 0.98,
            max_steering_angle: 0.04,
            steering_speed: 0.004,
            steering_return: 0.006,
            idle_policy: IdlePolicy::Asymptotic,
            hover: Some(HoverBob::default()),
        }
    }
}

impl VehicleParams {
    /// The plain driving model: no hover, snaps to rest when coasting.
    pub fn plain() -> Self {
        Self {
            idle_policy: IdlePolicy::SnapToRest,
            hover: None,
            ..Self::default()
        }
    }

    pub fn min_speed(&self) -> f32 {
        -self.max_speed * 0.5
    }
}

/// Mutable per-session vehicle state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    pub speed: f32,
    pub steering_angle: f32,
    pub heading: f32,
    pub position: Vec3,
    /// Unit facing vector, always recomputed from `heading`.
    pub direction: Vec3,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self::at(Vec3::ZERO, 0.0)
    }
}

impl VehicleState {
    pub fn at(position: Vec3, heading: f32) -> Self {
        Self {
            speed: 0.0,
            steering_angle: 0.0,
            heading,
            position,
            direction: facing(heading),
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_heading(self.position, self.heading)
    }

    /// Advance one frame. `delta` is in seconds and must already be capped;
    /// `time` is the session clock, used only by the hover bob.
    pub fn integrate(&mut self, params: &VehicleParams, flags: &ControlFlags, delta: f32, time: f64) {
        let k = frame_scale(delta);

        if flags.forward {
            self.speed += params.acceleration * k;
        }
        if flags.backward {
            if self.speed > 0.0 {
                self.speed -= params.brake_strength * k;
            } else {
                self.speed -= params.acceleration * 0.5 * k;
            }
        }

        self.speed *= params.friction.powf(k);

        let coasting = !flags.forward && !flags.backward;
        if coasting
            && params.idle_policy == IdlePolicy::SnapToRest
            && self.speed.abs() < params.deceleration * k
        {
            self.speed = 0.0;
        }

        self.speed = self.speed.clamp(params.min_speed(), params.max_speed);

        self.steer(params, flags, k);

        if params.max_speed > 0.0 && self.speed != 0.0 {
            let turn = self.steering_angle * self.speed.abs() / params.max_speed;
            self.heading += turn * self.speed.signum() * k;
        }
        self.direction = facing(self.heading);
        self.position += self.direction * self.speed * k;

        if let Some(hover) = params.hover {
            self.position.y = hover.height_at(time);
        }

        tracing::trace!(
            speed = self.speed,
            steering = self.steering_angle,
            heading = self.heading,
            "vehicle integrated"
        );
    }

    fn steer(&mut self, params: &VehicleParams, flags: &ControlFlags, k: f32) {
        if flags.left {
            self.steering_angle += params.steering_speed * k;
        }
        if flags.right {
            self.steering_angle -= params.steering_speed * k;
        }
        if !flags.left && !flags.right {
            let step = params.steering_return * k;
            if self.steering_angle > 0.0 {
                self.steering_angle = (self.steering_angle - step).max(0.0);
            } else if self.steering_angle < 0.0 {
                self.steering_angle = (self.steering_angle + step).min(0.0);
            }
        }
        self.steering_angle = self
            .steering_angle
            .clamp(-params.max_steering_angle, params.max_steering_angle);
    }
}
