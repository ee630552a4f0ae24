//! Bevy-facing type definitions for the shake-to-roll die
//!
//! This module is organized into submodules:
//! - `dice` - Die components and the roll completion message
//! - `ui` - Score and instruction text markers, score flicker state
//! - `camera` - Camera-related components
//! - `settings` - Roll calibration settings and persistence

pub mod camera;
pub mod dice;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use camera::*;
pub use dice::*;
pub use settings::*;
pub use ui::*;
