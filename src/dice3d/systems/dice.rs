//! Roll advancement systems
//!
//! `advance_roll` is the frame clock for the controller; `apply_die_orientation`
//! poses the die from the controller's current orientation.

use bevy::prelude::*;

use crate::dice3d::roll::RollController;
use crate::dice3d::types::*;

/// Tick the controller by the frame delta and publish the completion.
pub fn advance_roll(
    time: Res<Time>,
    mut controller: ResMut<RollController>,
    mut completed: MessageWriter<DieRollCompletedEvent>,
) {
    if let Some(outcome) = controller.tick(time.delta_secs()) {
        completed.write(DieRollCompletedEvent { outcome });
    }
}

/// Copy the controller's orientation onto every die.
pub fn apply_die_orientation(
    controller: Res<RollController>,
    mut dice_query: Query<&mut Transform, With<Die>>,
) {
    let rotation = controller.current_orientation().to_quat();
    for mut transform in dice_query.iter_mut() {
        transform.rotation = rotation;
    }
}
