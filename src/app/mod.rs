// Thermograph - app/mod.rs
//
// Application layer: load orchestration and state management.
// Dependencies: core, platform.
// Must NOT depend on: ui.

pub mod load;
pub mod state;
