//! Random draws for a roll: the face and the initial spin.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::angles::AngularVelocity;
use super::face::FaceValue;
use super::spin::SpinConfig;

/// Source of randomness for `RollController`.
///
/// The default is `DieRng`; tests and replays swap in their own to force a
/// face or a spin.
pub trait RollRandom {
    /// Uniform draw from 1..=6.
    fn draw_face(&mut self) -> FaceValue;

    /// Initial angular velocity for the spin phase.
    fn draw_spin(&mut self, config: &SpinConfig) -> AngularVelocity;
}

/// Draw one spin from any `rand` generator.
///
/// Each axis gets a magnitude in `[min_speed, max_speed]` and an independent
/// random sign, so the distribution is symmetric about zero and every roll
/// visibly tumbles.
pub fn draw_spin_with(rng: &mut impl Rng, config: &SpinConfig) -> AngularVelocity {
    let mut axis = || {
        let magnitude = if config.min_speed < config.max_speed {
            rng.gen_range(config.min_speed..=config.max_speed)
        } else {
            config.max_speed
        };
        if rng.gen_bool(0.5) {
            magnitude
        } else {
            -magnitude
        }
    };
    let x = axis();
    let y = axis();
    let z = axis();
    AngularVelocity::new(x, y, z)
}

/// Default random source backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct DieRng {
    rng: StdRng,
}

impl DieRng {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible sequence of rolls.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for DieRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RollRandom for DieRng {
    fn draw_face(&mut self) -> FaceValue {
        let index = self.rng.gen_range(0..FaceValue::ALL.len());
        FaceValue::ALL[index]
    }

    fn draw_spin(&mut self, config: &SpinConfig) -> AngularVelocity {
        draw_spin_with(&mut self.rng, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::types::RollSettings;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let mut a = DieRng::seeded(7);
        let mut b = DieRng::seeded(7);
        for _ in 0..20 {
            assert_eq!(a.draw_face(), b.draw_face());
        }
    }

    #[test]
    fn test_faces_cover_all_values() {
        let mut rng = DieRng::seeded(1);
        let mut counts = [0u32; 6];
        for _ in 0..6000 {
            counts[rng.draw_face().index()] += 1;
        }
        // Loose uniformity check: each face near 1000.
        for count in counts {
            assert!((800..1200).contains(&count), "counts: {counts:?}");
        }
    }

    #[test]
    fn test_spin_is_within_bounds() {
        let config = SpinConfig::from_settings(&RollSettings::default());
        let mut rng = DieRng::seeded(3);
        let mut saw_negative = false;
        for _ in 0..200 {
            let v = rng.draw_spin(&config);
            for c in v.0.to_array() {
                assert!(c.abs() >= config.min_speed - 1e-6);
                assert!(c.abs() <= config.max_speed + 1e-6);
                saw_negative |= c < 0.0;
            }
        }
        assert!(saw_negative);
    }
}
