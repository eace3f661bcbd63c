//! Vehicle Motion Model: scalar speed, steering and heading integrated from
//! control flags, plus the hover tank's cannon.
//!
//! # Invariants
//! - `-max_speed * 0.5 <= speed <= max_speed` after every integration.
//! - `|steering_angle| <= max_steering_angle` after every integration.
//! - Integration is a pure function of state, params, flags, delta and clock.

pub mod cannon;
pub mod motion;

pub use cannon::{Cannon, CannonParams, Impact, Projectile, ProjectileFate};
pub use motion::{HoverBob, IdlePolicy, VehicleParams, VehicleState};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
