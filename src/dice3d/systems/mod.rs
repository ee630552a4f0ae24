//! Systems module for dice3d
//!
//! - `setup`: Scene initialization (camera, lights, die, UI)
//! - `dice`: Controller ticking and die posing
//! - `display`: Score and instruction text

mod dice;
mod display;
mod setup;

pub use dice::{advance_roll, apply_die_orientation};
pub use display::{log_completed_rolls, update_instruction_text, update_score_display};
pub use setup::{setup, spawn_die};
