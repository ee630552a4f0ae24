//! Shake Control Systems
//!
//! Feed the inbox from local input and run queued samples through the gate.

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use super::state::*;
use crate::dice3d::roll::{MotionSample, RollController, ShakeGate};
use crate::dice3d::types::RollSettings;

/// Drain queued samples in timestamp order; every accepted shake asks the
/// controller for a roll.
pub fn pump_motion_inbox(
    inbox: Res<MotionInbox>,
    mut gate: ResMut<ShakeGate>,
    mut controller: ResMut<RollController>,
) {
    for sample in inbox.drain() {
        if !gate.offer(&sample) {
            continue;
        }
        if controller.request_roll() {
            debug!("Shake at {:.3}s started a roll", sample.timestamp);
        } else {
            debug!(
                "Shake at {:.3}s ignored while {:?}",
                sample.timestamp,
                controller.current_phase()
            );
        }
    }
}

/// SPACE stands in for a shake on machines without an accelerometer.
pub fn synthesize_keyboard_shake(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    inbox: Res<MotionInbox>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        let sample = MotionSample::new(
            KEYBOARD_SHAKE.x,
            KEYBOARD_SHAKE.y,
            KEYBOARD_SHAKE.z,
            time.elapsed_secs_f64(),
        );
        inbox.push(sample);
    }
}

/// Dragging with the left mouse button shakes the die.
pub fn synthesize_pointer_shake(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    time: Res<Time>,
    settings: Res<RollSettings>,
    mut tracker: ResMut<PointerShakeTracker>,
    inbox: Res<MotionInbox>,
) {
    let dragging = mouse.pressed(MouseButton::Left);
    if let Some(sample) = tracker.track(
        motion.delta,
        time.delta_secs(),
        dragging,
        settings.gravity_g,
        time.elapsed_secs_f64(),
    ) {
        inbox.push(sample);
    }
}

/// R abandons the roll in flight.
pub fn handle_cancel_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut controller: ResMut<RollController>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        controller.cancel();
    }
}
