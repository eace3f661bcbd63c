//! Enemy Aggro State Machine and the melee rules around it.
//!
//! # Invariants
//! - Aggro is a pure function of distance to the player, recomputed every
//!   frame; there is no hysteresis band.
//! - Enemy health never increases; an enemy is dead iff its health is 0.
//! - Two strikes from one enemy are more than [`ATTACK_COOLDOWN`] apart.

pub mod combat;
pub mod enemy;

pub use combat::{BLOCK_FACTOR, MELEE_ARC_HALF_ANGLE, PlayerVitals, within_arc};
pub use enemy::{
    ATTACK_COOLDOWN, AggroState, Decision, Enemy, EnemyKind, EnemyProfile, Strike, Temperament,
};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
