//! Score and instruction text systems

use bevy::prelude::*;

use crate::dice3d::roll::RollController;
use crate::dice3d::types::*;

/// Show the controller's face, flickering through random faces while rolling.
pub fn update_score_display(
    time: Res<Time>,
    controller: Res<RollController>,
    settings: Res<RollSettings>,
    mut flicker: ResMut<ScoreFlicker>,
    mut text_query: Query<&mut Text, With<ScoreText>>,
) {
    let rolling = controller.current_phase().is_active();
    let shown = flicker.update(
        time.delta_secs(),
        rolling,
        controller.current_face(),
        &settings,
    );
    for mut text in text_query.iter_mut() {
        let label = shown.to_string();
        if text.0 != label {
            text.0 = label;
        }
    }
}

pub fn update_instruction_text(
    controller: Res<RollController>,
    mut text_query: Query<&mut Text, With<InstructionText>>,
) {
    let label = instruction_for(controller.current_phase());
    for mut text in text_query.iter_mut() {
        if text.0 != label {
            text.0 = label.to_string();
        }
    }
}

/// Log every finished roll.
pub fn log_completed_rolls(mut completed: MessageReader<DieRollCompletedEvent>) {
    for event in completed.read() {
        debug!(
            "Die settled on {} {}",
            event.face().glyph(),
            event.face()
        );
    }
}
