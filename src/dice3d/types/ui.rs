//! UI-related types and components
//!
//! The score widget at the top shows the face value, the instruction line at
//! the bottom tells the user what to do next.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::settings::RollSettings;
use crate::dice3d::roll::{FaceValue, RollPhase};

/// Marker for the score text
#[derive(Component)]
pub struct ScoreText;

/// Marker for the instruction text
#[derive(Component)]
pub struct InstructionText;

pub const IDLE_INSTRUCTION: &str = "Shake to roll";
pub const ROLLING_INSTRUCTION: &str = "Rolling...";

pub fn instruction_for(phase: RollPhase) -> &'static str {
    if phase.is_active() {
        ROLLING_INSTRUCTION
    } else {
        IDLE_INSTRUCTION
    }
}

/// Cosmetic face cycling on the score display while a roll is in flight.
///
/// Never feeds back into the controller: once the flicker budget is spent
/// (or the roll ends) the display shows the controller's face.
#[derive(Resource, Debug, Clone)]
pub struct ScoreFlicker {
    rng: StdRng,
    shown: FaceValue,
    since_change: f32,
    changes: u32,
    active: bool,
}

impl Default for ScoreFlicker {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl ScoreFlicker {
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            shown: FaceValue::ONE,
            since_change: 0.0,
            changes: 0,
            active: false,
        }
    }

    pub fn shown(&self) -> FaceValue {
        self.shown
    }

    pub fn changes(&self) -> u32 {
        self.changes
    }

    /// Advance by `dt` and return the face the score should display.
    pub fn update(
        &mut self,
        dt: f32,
        rolling: bool,
        face: FaceValue,
        settings: &RollSettings,
    ) -> FaceValue {
        if !rolling || !settings.score_flicker {
            self.active = false;
            self.shown = face;
            return face;
        }

        if !self.active {
            self.active = true;
            self.since_change = 0.0;
            self.changes = 0;
        }

        if dt.is_finite() && dt > 0.0 {
            self.since_change += dt;
        }
        while self.since_change >= settings.score_flicker_interval
            && self.changes < settings.score_flicker_count
        {
            self.since_change -= settings.score_flicker_interval;
            self.changes += 1;
            let index = self.rng.gen_range(0..FaceValue::ALL.len());
            self.shown = FaceValue::ALL[index];
        }
        if self.changes >= settings.score_flicker_count {
            self.shown = face;
        }
        self.shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_shows_controller_face() {
        let mut flicker = ScoreFlicker::seeded(1);
        let four = FaceValue::new(4).unwrap();
        assert_eq!(flicker.update(0.5, false, four, &RollSettings::default()), four);
    }

    #[test]
    fn test_flicker_is_bounded_then_shows_face() {
        let settings = RollSettings::default();
        let mut flicker = ScoreFlicker::seeded(2);
        let three = FaceValue::new(3).unwrap();
        for _ in 0..200 {
            flicker.update(1.0 / 60.0, true, three, &settings);
        }
        assert_eq!(flicker.changes(), settings.score_flicker_count);
        assert_eq!(flicker.shown(), three);
    }

    #[test]
    fn test_changes_follow_interval() {
        let settings = RollSettings::default();
        let mut flicker = ScoreFlicker::seeded(3);
        flicker.update(0.05, true, FaceValue::SIX, &settings);
        assert_eq!(flicker.changes(), 0);
        flicker.update(0.05, true, FaceValue::SIX, &settings);
        assert_eq!(flicker.changes(), 1);
        flicker.update(0.17, true, FaceValue::SIX, &settings);
        assert_eq!(flicker.changes(), 3);
    }

    #[test]
    fn test_disabled_flicker_never_changes() {
        let settings = RollSettings {
            score_flicker: false,
            ..Default::default()
        };
        let mut flicker = ScoreFlicker::seeded(4);
        for _ in 0..60 {
            assert_eq!(flicker.update(0.1, true, FaceValue::ONE, &settings), FaceValue::ONE);
        }
        assert_eq!(flicker.changes(), 0);
    }

    #[test]
    fn test_new_roll_restarts_budget() {
        let settings = RollSettings::default();
        let mut flicker = ScoreFlicker::seeded(5);
        flicker.update(10.0, true, FaceValue::ONE, &settings);
        assert_eq!(flicker.changes(), settings.score_flicker_count);
        flicker.update(0.0, false, FaceValue::ONE, &settings);
        flicker.update(0.1, true, FaceValue::ONE, &settings);
        assert_eq!(flicker.changes(), 1);
    }

    #[test]
    fn test_instruction_text() {
        assert_eq!(instruction_for(RollPhase::Idle), IDLE_INSTRUCTION);
        assert_eq!(instruction_for(RollPhase::Rolling), ROLLING_INSTRUCTION);
        assert_eq!(instruction_for(RollPhase::Settling), ROLLING_INSTRUCTION);
    }
}
