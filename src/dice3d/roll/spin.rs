//! Spin phase: free tumbling with exponential damping.
//!
//! The tuning constants are per reference tick (velocity in rad/tick,
//! damping per tick). They are turned into a continuous decay rate
//! `λ = -ln(damping) * reference_hz` and integrated exactly, so any sequence of
//! `step` calls whose durations add up to the same total lands on the same
//! pose regardless of frame rate:
//!
//! ```text
//! ω(t)  = ω0 · e^(-λt)                       (rad/s, ω0 = velocity · hz)
//! Δθ(h) = ω · (1 - e^(-λh)) / λ
//! ```
//!
//! The spin ends when the summed speed decays to `stop_speed`, which happens
//! at `T = ln(|ω0|₁ / stop_speed) / λ`; `max_seconds` caps it.

use super::angles::{AngularVelocity, Orientation};
use crate::dice3d::types::RollSettings;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinConfig {
    pub min_speed: f32,
    pub max_speed: f32,
    pub damping: f32,
    pub stop_speed: f32,
    pub max_seconds: f32,
    pub reference_hz: f32,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self::from_settings(&RollSettings::default())
    }
}

impl SpinConfig {
    pub fn from_settings(settings: &RollSettings) -> Self {
        Self {
            min_speed: settings.min_spin_speed,
            max_speed: settings.max_spin_speed,
            damping: settings.spin_damping,
            stop_speed: settings.spin_stop_speed,
            max_seconds: settings.max_spin_seconds,
            reference_hz: settings.reference_tick_hz,
        }
    }

    /// Continuous decay rate λ, per second.
    pub fn decay_rate(&self) -> f32 {
        -self.damping.ln() * self.reference_hz
    }

    /// How long a spin starting at `velocity` lasts, in seconds.
    pub fn duration_for(&self, velocity: AngularVelocity) -> f32 {
        let speed = velocity.speed();
        if speed <= self.stop_speed {
            return 0.0;
        }
        let natural = (speed / self.stop_speed).ln() / self.decay_rate();
        natural.min(self.max_seconds)
    }

    /// Upper bound, in reference ticks, on any spin this config can start.
    ///
    /// `n = ⌈ln(3·max_speed / stop_speed) / -ln(damping)⌉`, or the
    /// `max_seconds` cap if that is shorter.
    pub fn max_ticks(&self) -> u32 {
        let worst = 3.0 * self.max_speed;
        let capped = (self.max_seconds * self.reference_hz).ceil();
        if worst <= self.stop_speed {
            return 0;
        }
        let natural = ((worst / self.stop_speed).ln() / -self.damping.ln()).ceil();
        natural.min(capped) as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinDynamics {
    orientation: Orientation,
    velocity: AngularVelocity,
    elapsed: f32,
    duration: f32,
    config: SpinConfig,
}

impl SpinDynamics {
    pub fn start(from: Orientation, velocity: AngularVelocity, config: SpinConfig) -> Self {
        Self {
            orientation: from,
            velocity,
            elapsed: 0.0,
            duration: config.duration_for(velocity),
            config,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Current velocity in rad/tick.
    pub fn velocity(&self) -> AngularVelocity {
        self.velocity
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total length of this spin, fixed when it started.
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by up to `dt` seconds. Returns the time actually consumed,
    /// which is less than `dt` only when the spin ends inside this step.
    pub fn step(&mut self, dt: f32) -> f32 {
        let remaining = self.remaining();
        let h = dt.min(remaining);
        if h <= 0.0 {
            if remaining <= 0.0 {
                self.elapsed = self.duration;
            }
            return 0.0;
        }

        let lambda = self.config.decay_rate();
        let decay = (-lambda * h).exp();
        let per_second = self.velocity.0 * self.config.reference_hz;
        let swept = per_second * ((1.0 - decay) / lambda);

        self.orientation = self.orientation.rotated_by(swept);
        self.velocity = self.velocity.scaled(decay);

        if h >= remaining {
            self.elapsed = self.duration;
        } else {
            self.elapsed += h;
        }
        h
    }
}
