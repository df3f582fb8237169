// FleetLens - core/mod.rs
//
// Core business logic layer.
// Dependencies: standard library, chrono, serde.
// Must NOT depend on: ui, platform, app, or any file-format crate directly.

pub mod aggregate;
pub mod filter;
pub mod model;
pub mod report;
pub mod schema;
pub mod table;
