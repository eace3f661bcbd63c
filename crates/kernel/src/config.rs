//! Tuning for both games. Defaults are the built-in constants; a JSON file
//! may override any subset of fields.

use std::path::Path;

use arcadia_vehicle::{CannonParams, VehicleParams};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Errors from loading or validating a config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Longest frame the clock will integrate, in seconds.
    pub max_delta: f32,
    pub drive: DriveConfig,
    pub arena: ArenaConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_delta: 0.1,
            drive: DriveConfig::default(),
            arena: ArenaConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub vehicle: VehicleParams,
    pub cannon: CannonParams,
    pub start_position: Vec3,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            vehicle: VehicleParams::default(),
            cannon: CannonParams::default(),
            start_position: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub player_max_health: f32,
    /// Units per 60 Hz frame.
    pub player_speed: f32,
    /// Radians per 60 Hz frame.
    pub player_turn_rate: f32,
    pub melee_range: f32,
    pub melee_damage: f32,
    /// Seconds between two swings.
    pub melee_cooldown: f64,
    pub kill_score: u32,
    /// Seconds between timed spawns.
    pub spawn_interval: f64,
    pub spawn_min_radius: f32,
    pub spawn_max_radius: f32,
    pub initial_enemies: usize,
    pub max_enemies: usize,
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            player_max_health: 100.0,
            player_speed: 0.1,
            player_turn_rate: 0.05,
            melee_range: 3.0,
            melee_damage: 25.0,
            melee_cooldown: 0.5,
            kill_score: 10,
            spawn_interval: 5.0,
            spawn_min_radius: 20.0,
            spawn_max_radius: 30.0,
            initial_enemies: 5,
            max_enemies: 12,
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_reader(std::fs::File::open(path.as_ref())?)?;
        config.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("max_delta", self.max_delta)?;

        let v = &self.drive.vehicle;
        positive("drive.vehicle.max_speed", v.max_speed)?;
        if !(v.friction > 0.0 && v.friction <= 1.0) {
            return Err(invalid(
                "drive.vehicle.friction",
                format!("{} is outside (0, 1]", v.friction),
            ));
        }
        non_negative("drive.vehicle.acceleration", v.acceleration)?;
        non_negative("drive.vehicle.deceleration", v.deceleration)?;
        non_negative("drive.vehicle.brake_strength", v.brake_strength)?;
        non_negative("drive.vehicle.max_steering_angle", v.max_steering_angle)?;
        non_negative("drive.vehicle.steering_speed", v.steering_speed)?;
        non_negative("drive.vehicle.steering_return", v.steering_return)?;

        let c = &self.drive.cannon;
        non_negative("drive.cannon.reload_time", c.reload_time)?;
        positive("drive.cannon.max_lifetime", c.max_lifetime)?;
        non_negative("drive.cannon.impact_lifetime", c.impact_lifetime)?;

        let a = &self.arena;
        positive("arena.player_max_health", a.player_max_health)?;
        non_negative("arena.melee_range", a.melee_range)?;
        non_negative("arena.melee_cooldown", a.melee_cooldown)?;
        positive("arena.spawn_interval", a.spawn_interval)?;
        non_negative("arena.spawn_min_radius", a.spawn_min_radius)?;
        if a.spawn_min_radius > a.spawn_max_radius {
            return Err(invalid(
                "arena.spawn_min_radius",
                format!(
                    "ring [{}, {}] is empty",
                    a.spawn_min_radius, a.spawn_max_radius
                ),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: impl Into<f64>) -> Result<(), ConfigError> {
    let value = value.into();
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}
