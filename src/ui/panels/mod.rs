// Thermograph - ui/panels/mod.rs

pub mod about;
pub mod chart;
pub mod preview;
pub mod selection;
pub mod sidebar;
pub mod stats;
