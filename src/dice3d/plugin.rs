//! Plugins wiring the roll model into a Bevy app.
//!
//! `ShakeRollPlugin` needs nothing but a `Time` resource, so it runs under
//! `MinimalPlugins` for headless replays and tests. `ShakeRollScenePlugin`
//! adds the window-side pieces on top of it.

use bevy::prelude::*;

use crate::dice3d::roll::{RollController, ShakeDetector, ShakeGate};
use crate::dice3d::shake_control::{
    handle_cancel_key, pump_motion_inbox, synthesize_keyboard_shake, synthesize_pointer_shake,
    MotionInbox, PointerShakeTracker,
};
use crate::dice3d::systems::{
    advance_roll, apply_die_orientation, log_completed_rolls, setup, update_instruction_text,
    update_score_display,
};
use crate::dice3d::types::{palette, DieRollCompletedEvent, RollSettings, ScoreFlicker};

/// Per-frame ordering of the roll pipeline.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RollSystems {
    /// Motion sources push samples into the inbox.
    Collect,
    /// The inbox is drained through the shake gate.
    Gate,
    /// The controller is ticked.
    Advance,
    /// Everything reading the controller's state.
    Present,
}

#[derive(Debug, Clone, Default)]
pub struct ShakeRollPlugin {
    pub settings: RollSettings,
    /// Fixed seed for reproducible rolls; entropy when `None`.
    pub seed: Option<u64>,
}

impl ShakeRollPlugin {
    pub fn new(settings: RollSettings) -> Self {
        Self {
            settings,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Plugin for ShakeRollPlugin {
    fn build(&self, app: &mut App) {
        let controller = match self.seed {
            Some(seed) => RollController::with_seed(&self.settings, seed),
            None => RollController::new(&self.settings),
        };

        app.insert_resource(self.settings.clone())
            .insert_resource(controller)
            .insert_resource(ShakeGate::new(ShakeDetector::from_settings(&self.settings)))
            .init_resource::<MotionInbox>()
            .add_message::<DieRollCompletedEvent>()
            .configure_sets(
                Update,
                (
                    RollSystems::Collect,
                    RollSystems::Gate,
                    RollSystems::Advance,
                    RollSystems::Present,
                )
                    .chain(),
            )
            .add_systems(Update, pump_motion_inbox.in_set(RollSystems::Gate))
            .add_systems(Update, advance_roll.in_set(RollSystems::Advance))
            .add_systems(Update, log_completed_rolls.in_set(RollSystems::Present));
    }
}

/// Camera, lights, die, text and local input for the windowed app.
pub struct ShakeRollScenePlugin;

impl Plugin for ShakeRollScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(palette::BACKGROUND))
            .init_resource::<ScoreFlicker>()
            .init_resource::<PointerShakeTracker>()
            .add_systems(Startup, setup)
            .add_systems(
                Update,
                (
                    synthesize_keyboard_shake,
                    synthesize_pointer_shake,
                    handle_cancel_key,
                )
                    .in_set(RollSystems::Collect),
            )
            .add_systems(
                Update,
                (
                    apply_die_orientation,
                    update_score_display,
                    update_instruction_text,
                )
                    .in_set(RollSystems::Present),
            );
    }
}
