//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard set, pointer scaling, one-shot events)
//! - Storage (LocalStorage on web, in-memory on native)
//! - Frame pacing (fixed-step tick scheduling)

pub mod dom;
pub mod input;
pub mod stepper;
pub mod storage;

pub use input::{InputState, Key};
pub use stepper::FixedStep;
