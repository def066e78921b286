// Thermograph - platform/mod.rs
//
// Platform abstraction layer: config directories, filesystem and network
// access. Must NOT depend on: app, ui.

pub mod config;
pub mod fetch;
pub mod fs;
