//! Recording data loaders.
//!
//! This module parses the text-table, JSON and YAML formats the
//! recording pipeline produces and assembles them into the crate's
//! internal representation.

pub mod recording;
pub mod scene;
pub mod tables;

pub use recording::*;
pub use scene::*;
pub use tables::*;
