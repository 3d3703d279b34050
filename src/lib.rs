// rtail - lib.rs
//
// Library entry point, exposing the tail engine for integration testing.
// The CLI surface lives in `main.rs`.

pub mod app;
pub mod core;
pub mod platform;
pub mod util;
