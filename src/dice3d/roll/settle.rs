//! Settle phase: ease-out toward the chosen face's target pose.
//!
//! Every reference tick closes `lerp` of the remaining distance on each axis
//! (along the shorter arc). Over an arbitrary step `h` the remaining distance
//! is multiplied by `(1 - lerp)^(h · reference_hz)`, the continuous form of
//! the same per-tick rule. Once every axis is inside `tolerance` the pose
//! snaps exactly onto the target.

use super::angles::Orientation;
use crate::dice3d::types::RollSettings;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleConfig {
    pub lerp: f32,
    pub tolerance: f32,
    pub reference_hz: f32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        Self::from_settings(&RollSettings::default())
    }
}

impl SettleConfig {
    pub fn from_settings(settings: &RollSettings) -> Self {
        Self {
            lerp: settings.settle_lerp,
            tolerance: settings.settle_tolerance,
            reference_hz: settings.reference_tick_hz,
        }
    }

    /// Fraction of the remaining distance still left after `dt` seconds.
    pub fn retention(&self, dt: f32) -> f32 {
        (1.0 - self.lerp).powf(dt * self.reference_hz)
    }

    /// Upper bound, in reference ticks, on a settle starting at most π away
    /// on every axis: `⌈ln(tolerance / π) / ln(1 - lerp)⌉`.
    pub fn max_ticks(&self) -> u32 {
        if self.tolerance >= PI {
            return 1;
        }
        ((self.tolerance / PI).ln() / (1.0 - self.lerp).ln()).ceil() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettleInterpolator {
    current: Orientation,
    target: Orientation,
    converged: bool,
    config: SettleConfig,
}

impl SettleInterpolator {
    pub fn start(from: Orientation, target: Orientation, config: SettleConfig) -> Self {
        Self {
            current: from,
            target,
            converged: false,
            config,
        }
    }

    pub fn current(&self) -> Orientation {
        self.current
    }

    pub fn target(&self) -> Orientation {
        self.target
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    fn within_tolerance(&self) -> bool {
        self.current.max_axis_distance(&self.target) < self.config.tolerance
    }

    /// Advance by `dt` seconds and run the convergence check.
    ///
    /// Returns true only on the step that snaps onto the target; later calls
    /// return false. A zero `dt` still performs the check.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.converged {
            return false;
        }

        let keep = self.config.retention(dt.max(0.0));
        let remaining = self.current.arc_to(&self.target);
        self.current = self.current.rotated_by(remaining * (1.0 - keep));

        if self.within_tolerance() {
            self.current = self.target;
            self.converged = true;
            return true;
        }
        false
    }
}
