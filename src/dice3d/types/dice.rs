//! Die-related components and messages

use bevy::prelude::*;

use crate::dice3d::roll::{FaceValue, RollOutcome};

/// Component attached to the die entity
#[derive(Component, Debug, Clone, Copy)]
pub struct Die {
    /// Edge length of the cube, in world units.
    pub edge: f32,
}

impl Default for Die {
    fn default() -> Self {
        Self { edge: 1.8 }
    }
}

/// One pip disc on a die face.
#[derive(Component, Debug, Clone, Copy)]
pub struct DiePip {
    pub face: FaceValue,
}

/// Written once when a roll has fully settled on its face.
#[derive(Message, Clone, Copy, Debug)]
pub struct DieRollCompletedEvent {
    pub outcome: RollOutcome,
}

impl DieRollCompletedEvent {
    pub fn face(&self) -> FaceValue {
        self.outcome.face
    }
}

/// Scene colors.
pub mod palette {
    use bevy::prelude::Color;

    pub const BACKGROUND: Color = Color::srgb(0.102, 0.102, 0.180); // #1a1a2e
    pub const DIE_BODY: Color = Color::srgb(0.941, 0.941, 0.941); // #f0f0f0
    pub const PIP: Color = Color::srgb(0.102, 0.102, 0.180); // #1a1a2e
    pub const SCORE: Color = Color::srgb(0.0, 0.831, 1.0); // #00d4ff
    pub const INSTRUCTION: Color = Color::srgb(0.75, 0.75, 0.8);
}
