//! Scene boundary: an opaque handle that can add and remove visual objects
//! and read or write their transforms.
//!
//! # Invariants
//! - The scene never mutates session state; it only mirrors it.
//! - Object ids are the session's entity ids.
//!
//! [`TextScene`] is the in-process implementation used headlessly and in
//! tests. A real renderer implements [`SceneGraph`] without changing callers.

mod graph;

pub use graph::{SceneError, SceneGraph, SceneObject, TextScene};

/// Package name and version, printed by `arcadia-cli info`.
pub fn crate_info() -> &'static str {
    concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"))
}
