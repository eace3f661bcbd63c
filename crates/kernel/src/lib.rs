//! Session kernel: owns game state for one play session and advances it
//! through an explicit `step(delta)`.
//!
//! # Invariants
//! - All session state is mutated inside a frame step or an explicit
//!   operation (attack, strike, restart); nothing else writes it.
//! - Time is simulated: every timer polls the session clock, so a run is
//!   reproducible from its inputs, deltas and seed. Arena ids are drawn
//!   from the seed as well, so even event ids match between runs.
//! - Sessions append to an event log on every step; whoever drives a
//!   session directly must drain it through [`Session::drain_events`].
//! - The scene mirrors the session and never feeds back into it.

pub mod arena;
pub mod clock;
pub mod config;
pub mod drive;
pub mod event;
pub mod frame;

pub use arena::ArenaSession;
pub use clock::{SimClock, SplitMix64};
pub use config::{ArenaConfig, ConfigError, DriveConfig, GameConfig};
pub use drive::DriveSession;
pub use event::SessionEvent;
pub use frame::{FrameLoop, FrameOutcome, Session};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
