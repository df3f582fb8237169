// FleetLens - app/mod.rs
//
// Application layer: load orchestration and session state management.
// Dependencies: core layer, platform readers and config.
// Must NOT depend on: ui.

pub mod loader;
pub mod state;
