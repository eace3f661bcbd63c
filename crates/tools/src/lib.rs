//! Developer tooling: read-only session inspector and event tallies.
//!
//! # Invariants
//! - Tools never mutate a session; every query takes `&` access.

pub mod inspector;

pub use inspector::{ArenaSummary, DriveSummary, EnemyInfo, EventTally, SessionInspector};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().starts_with("arcadia-tools v"));
    }
}
