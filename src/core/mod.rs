// Thermograph - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or any network crate.

pub mod export;
pub mod filter;
pub mod model;
pub mod normalize;
pub mod raw;
pub mod source;
pub mod stats;
pub mod style;
