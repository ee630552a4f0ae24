//! Shake Control Module
//!
//! Motion samples can come from anywhere: a sensor thread, a replay file,
//! the keyboard or a mouse drag. They all land in the `MotionInbox`, which
//! the frame loop drains once per update and runs through the `ShakeGate`.
//! Only the frame loop ever calls into the `RollController`.

mod state;
mod systems;

pub use state::*;
pub use systems::*;
