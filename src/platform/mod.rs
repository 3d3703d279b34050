// rtail - platform/mod.rs
//
// Platform abstraction layer.
// Dependencies: standard library, chrono.
// Must NOT depend on: core, app.

pub mod fs;
