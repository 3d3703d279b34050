// rtail - core/mod.rs
//
// Core logic layer.
// Dependencies: standard library and chrono only.
// Must NOT depend on: app, platform.

pub mod header;
pub mod locator;
pub mod model;
