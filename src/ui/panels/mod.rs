// FleetLens - ui/panels/mod.rs

pub mod about;
pub mod charts;
pub mod filters;
pub mod incidents;
pub mod kpis;
