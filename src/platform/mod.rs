// FleetLens - platform/mod.rs
//
// Platform abstraction layer: file readers and configuration.
// Dependencies: core (table types only), csv, calamine, directories.
// Must NOT depend on: app, ui.

pub mod config;
pub mod fs;
