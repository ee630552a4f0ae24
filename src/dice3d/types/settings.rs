//! Roll calibration settings and persistence
//!
//! These values form a single calibration artifact: the shake threshold,
//! spin/settle constants and the presentation flicker all live together so a
//! tuning pass against a new die model only touches one file. Settings are
//! stored as RON and every field falls back to its default when missing.

use bevy::log::info;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunable constants for shake detection, spin, settle and score display.
///
/// Per-tick constants (`*_speed`, `spin_damping`, `settle_lerp`) are defined
/// at `reference_tick_hz` and converted to continuous-time rates by the roll
/// model, so the animation looks the same at any frame rate.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollSettings {
    /// Gravity-removed acceleration (in g) a sample must exceed to count as a shake.
    pub shake_threshold_g: f32,
    /// Magnitude of a device at rest (in g).
    pub gravity_g: f32,
    /// Minimum time between accepted shakes.
    pub debounce_seconds: f64,

    /// Lower bound of each axis' initial spin speed (rad/tick).
    pub min_spin_speed: f32,
    /// Upper bound of each axis' initial spin speed (rad/tick).
    pub max_spin_speed: f32,
    /// Multiplicative damping applied to the spin every tick.
    pub spin_damping: f32,
    /// Summed |velocity| (rad/tick) below which the spin ends.
    pub spin_stop_speed: f32,
    /// Hard upper bound on the spin phase.
    pub max_spin_seconds: f32,

    /// Fraction of the remaining distance to the target closed every tick.
    pub settle_lerp: f32,
    /// Per-axis distance (rad) at which the die snaps onto its target.
    pub settle_tolerance: f32,

    /// Tick rate the per-tick constants above are expressed in.
    pub reference_tick_hz: f32,

    /// Cycle random faces on the score display while rolling.
    pub score_flicker: bool,
    pub score_flicker_interval: f32,
    pub score_flicker_count: u32,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            shake_threshold_g: 1.2,
            gravity_g: 1.0,
            debounce_seconds: 0.4,
            min_spin_speed: 0.15,
            max_spin_speed: 0.4,
            spin_damping: 0.97,
            spin_stop_speed: 0.05,
            max_spin_seconds: 1.5,
            settle_lerp: 0.15,
            settle_tolerance: 0.01,
            reference_tick_hz: 60.0,
            score_flicker: true,
            score_flicker_interval: 0.08,
            score_flicker_count: 8,
        }
    }
}

impl RollSettings {
    /// Load settings from a RON file and validate them.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings {}: {e}", path.display()))?;
        let settings = Self::from_ron(&text)
            .map_err(|e| format!("Failed to parse settings {}: {e}", path.display()))?;
        info!("Loaded roll settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_ron(text: &str) -> Result<Self, String> {
        let settings: RollSettings = ron::from_str(text).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_ron(&self) -> Result<String, String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| format!("Failed to serialize settings: {e}"))
    }

    /// Check that every constant keeps the roll model convergent.
    pub fn validate(&self) -> Result<(), String> {
        let floats = [
            ("shake_threshold_g", self.shake_threshold_g),
            ("gravity_g", self.gravity_g),
            ("min_spin_speed", self.min_spin_speed),
            ("max_spin_speed", self.max_spin_speed),
            ("spin_damping", self.spin_damping),
            ("spin_stop_speed", self.spin_stop_speed),
            ("max_spin_seconds", self.max_spin_seconds),
            ("settle_lerp", self.settle_lerp),
            ("settle_tolerance", self.settle_tolerance),
            ("reference_tick_hz", self.reference_tick_hz),
            ("score_flicker_interval", self.score_flicker_interval),
        ];
        for (name, value) in floats {
            if !value.is_finite() {
                return Err(format!("{name} must be finite, got {value}"));
            }
        }
        if !self.debounce_seconds.is_finite() || self.debounce_seconds <= 0.0 {
            return Err(format!(
                "debounce_seconds must be positive, got {}",
                self.debounce_seconds
            ));
        }

        if self.shake_threshold_g <= 0.0 {
            return Err("shake_threshold_g must be positive".to_string());
        }
        if self.gravity_g < 0.0 {
            return Err("gravity_g must not be negative".to_string());
        }
        if self.min_spin_speed <= 0.0 || self.min_spin_speed > self.max_spin_speed {
            return Err(format!(
                "spin speed range is invalid: min {} max {}",
                self.min_spin_speed, self.max_spin_speed
            ));
        }
        if !(self.spin_damping > 0.0 && self.spin_damping < 1.0) {
            return Err(format!(
                "spin_damping must be in (0, 1), got {}",
                self.spin_damping
            ));
        }
        if self.spin_stop_speed <= 0.0 {
            return Err("spin_stop_speed must be positive".to_string());
        }
        if self.max_spin_seconds <= 0.0 {
            return Err("max_spin_seconds must be positive".to_string());
        }
        if !(self.settle_lerp > 0.0 && self.settle_lerp < 1.0) {
            return Err(format!(
                "settle_lerp must be in (0, 1), got {}",
                self.settle_lerp
            ));
        }
        if self.settle_tolerance <= 0.0 {
            return Err("settle_tolerance must be positive".to_string());
        }
        if self.reference_tick_hz <= 0.0 {
            return Err("reference_tick_hz must be positive".to_string());
        }
        if self.score_flicker_interval <= 0.0 {
            return Err("score_flicker_interval must be positive".to_string());
        }

        Ok(())
    }
}
