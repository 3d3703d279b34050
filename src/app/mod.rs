// rtail - app/mod.rs
//
// Application layer: session orchestration, follow loop, cancellation.
// Dependencies: core, platform, util.

pub mod cancel;
pub mod session;
pub mod tail;
