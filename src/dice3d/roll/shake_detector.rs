//! Shake detection over raw accelerometer samples.
//!
//! `ShakeDetector::evaluate` is a pure predicate; `ShakeGate` wraps it with
//! the one piece of state the debounce needs (the last accepted trigger).

use bevy::log::debug;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::dice3d::types::RollSettings;

/// One accelerometer reading, in g, stamped in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub timestamp: f64,
}

impl MotionSample {
    pub fn new(x: f32, y: f32, z: f32, timestamp: f64) -> Self {
        Self { x, y, z, timestamp }
    }

    /// A device lying still: gravity on -Y only.
    pub fn at_rest(gravity_g: f32, timestamp: f64) -> Self {
        Self::new(0.0, -gravity_g, 0.0, timestamp)
    }

    pub fn magnitude(&self) -> f32 {
        Vec3::new(self.x, self.y, self.z).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.timestamp.is_finite()
    }
}

/// Threshold plus debounce window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeDetector {
    pub threshold_g: f32,
    pub gravity_g: f32,
    pub min_interval: f64,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::from_settings(&RollSettings::default())
    }
}

impl ShakeDetector {
    pub fn from_settings(settings: &RollSettings) -> Self {
        Self {
            threshold_g: settings.shake_threshold_g,
            gravity_g: settings.gravity_g,
            min_interval: settings.debounce_seconds,
        }
    }

    /// Acceleration beyond what gravity alone explains.
    pub fn excess(&self, sample: &MotionSample) -> f32 {
        (sample.magnitude() - self.gravity_g).abs()
    }

    /// True when `sample` is strong enough and the debounce window since
    /// `last_trigger` has elapsed at `now`.
    pub fn evaluate(&self, sample: &MotionSample, last_trigger: Option<f64>, now: f64) -> bool {
        if !sample.is_finite() || !now.is_finite() {
            return false;
        }
        if let Some(last) = last_trigger {
            if now - last < self.min_interval {
                return false;
            }
        }
        self.excess(sample) > self.threshold_g
    }
}

/// Stateful debounce around a `ShakeDetector`, fed in sample order.
#[derive(Resource, Debug, Clone, Default)]
pub struct ShakeGate {
    detector: ShakeDetector,
    last_trigger: Option<f64>,
    triggers: u64,
}

impl ShakeGate {
    pub fn new(detector: ShakeDetector) -> Self {
        Self {
            detector,
            last_trigger: None,
            triggers: 0,
        }
    }

    pub fn detector(&self) -> &ShakeDetector {
        &self.detector
    }

    pub fn last_trigger(&self) -> Option<f64> {
        self.last_trigger
    }

    /// Number of samples accepted as shakes so far.
    pub fn triggers(&self) -> u64 {
        self.triggers
    }

    /// Offer a sample, using its own timestamp as "now". Returns true if it
    /// fires a trigger.
    pub fn offer(&mut self, sample: &MotionSample) -> bool {
        if !sample.is_finite() {
            debug!("Ignoring malformed motion sample {:?}", sample);
            return false;
        }
        if !self
            .detector
            .evaluate(sample, self.last_trigger, sample.timestamp)
        {
            return false;
        }
        self.last_trigger = Some(sample.timestamp);
        self.triggers += 1;
        true
    }

    pub fn reset(&mut self) {
        self.last_trigger = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> ShakeDetector {
        ShakeDetector {
            threshold_g: 1.0,
            gravity_g: 1.0,
            min_interval: 0.4,
        }
    }

    #[test]
    fn test_rest_does_not_trigger() {
        let d = detector();
        assert!(!d.evaluate(&MotionSample::at_rest(1.0, 0.0), None, 0.0));
    }

    #[test]
    fn test_strong_sample_triggers() {
        let d = detector();
        let shake = MotionSample::new(2.5, -1.0, 0.5, 1.0);
        assert!(d.evaluate(&shake, None, 1.0));
    }

    #[test]
    fn test_debounce_rejects_regardless_of_magnitude() {
        let d = detector();
        let huge = MotionSample::new(50.0, 50.0, 50.0, 1.2);
        assert!(!d.evaluate(&huge, Some(1.0), 1.2));
        assert!(d.evaluate(&huge, Some(1.0), 1.5));
    }

    #[test]
    fn test_malformed_sample_never_triggers() {
        let d = detector();
        let bad = MotionSample::new(f32::NAN, 10.0, 0.0, 0.0);
        assert!(!d.evaluate(&bad, None, 0.0));
        let inf = MotionSample::new(f32::INFINITY, 0.0, 0.0, 0.0);
        assert!(!d.evaluate(&inf, None, 0.0));
    }

    #[test]
    fn test_gate_fires_once_per_window() {
        let mut gate = ShakeGate::new(detector());
        let burst: Vec<MotionSample> = (0..10)
            .map(|i| MotionSample::new(3.0, 0.0, 0.0, i as f64 * 0.02))
            .collect();
        let fired = burst.iter().filter(|s| gate.offer(s)).count();
        assert_eq!(fired, 1);
        assert_eq!(gate.triggers(), 1);
        assert_eq!(gate.last_trigger(), Some(0.0));

        assert!(gate.offer(&MotionSample::new(3.0, 0.0, 0.0, 0.5)));
        assert_eq!(gate.triggers(), 2);
    }
}
