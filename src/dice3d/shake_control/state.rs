//! Shake Control State
//!
//! The cross-thread sample inbox and the pointer-drag shake synthesizer.

use bevy::prelude::*;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::dice3d::roll::MotionSample;

/// Synthetic sample pushed by the keyboard shortcut; about 3g total.
pub const KEYBOARD_SHAKE: Vec3 = Vec3::new(2.5, -1.0, 1.5);

/// Thread-safe queue of motion samples waiting for the frame loop.
///
/// Cloning yields another handle to the same queue, so a sensor or file
/// reader thread can hold one while the app holds the resource.
#[derive(Resource, Clone, Default)]
pub struct MotionInbox {
    samples: Arc<Mutex<Vec<MotionSample>>>,
}

impl MotionInbox {
    fn lock(&self) -> MutexGuard<'_, Vec<MotionSample>> {
        // A producer that panicked mid-push leaves the Vec valid.
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, sample: MotionSample) {
        self.lock().push(sample);
    }

    pub fn push_all(&self, samples: impl IntoIterator<Item = MotionSample>) {
        self.lock().extend(samples);
    }

    /// Take everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<MotionSample> {
        let mut samples = std::mem::take(&mut *self.lock());
        samples.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
        samples
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns a mouse drag into accelerometer-like samples.
///
/// Pointer velocity is differentiated once per frame; the change in velocity
/// over the frame, scaled by `pixels_per_g`, becomes the sample's x/y. The
/// screen's y axis points down, so it is flipped.
#[derive(Resource, Debug, Clone)]
pub struct PointerShakeTracker {
    pub pixels_per_g: f32,
    last_velocity: Option<Vec2>,
}

impl Default for PointerShakeTracker {
    fn default() -> Self {
        Self {
            pixels_per_g: 2500.0,
            last_velocity: None,
        }
    }
}

impl PointerShakeTracker {
    /// Feed one frame of pointer motion. Returns a sample once two
    /// consecutive dragging frames are available.
    pub fn track(
        &mut self,
        delta: Vec2,
        dt: f32,
        dragging: bool,
        gravity_g: f32,
        now: f64,
    ) -> Option<MotionSample> {
        if !dragging || !dt.is_finite() || dt <= 0.0 || !delta.is_finite() {
            self.last_velocity = None;
            return None;
        }

        let velocity = delta / dt;
        let previous = self.last_velocity.replace(velocity)?;
        let accel = (velocity - previous) / dt / self.pixels_per_g;
        Some(MotionSample::new(accel.x, -gravity_g - accel.y, 0.0, now))
    }

    pub fn reset(&mut self) {
        self.last_velocity = None;
    }
}
