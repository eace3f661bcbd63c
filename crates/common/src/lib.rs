//! Shared types for the arcadia workspace: entity ids, transforms and the
//! ground-plane helpers both game cores are written against.
//!
//! # Conventions
//! - The ground plane is XZ; +Y is up.
//! - A heading of `0` faces +Z and increases counter-clockwise seen from above,
//!   so the facing vector is `(sin h, 0, cos h)`.
//! - Per-frame constants are tuned at 60 Hz and scaled with [`frame_scale`].

mod types;

pub use types::{
    EntityId, REFERENCE_HZ, Transform, facing, frame_scale, heading_towards, planar_distance,
};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
