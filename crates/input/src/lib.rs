//! Input mapping: raw keyboard/mouse events folded into [`ControlFlags`].
//!
//! # Invariants
//! - The simulation consumes flags, never raw events.
//! - Flags are level-triggered; edge detection belongs to the consumer.

pub mod action;

pub use action::{
    ControlFlags, ControlScheme, Edge, Handled, InputError, InputEvent, Key, MouseButton,
};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
