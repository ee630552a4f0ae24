//! The roll state machine: Idle -> Rolling -> Settling -> Idle.
//!
//! `RollController` owns the die's face and orientation. It is mutated only
//! through `request_roll`, `tick` and `cancel`; everything else is a
//! read-only observer for the presentation layer.

use bevy::log::{debug, info, warn};
use bevy::prelude::*;
use std::fmt;

use super::angles::Orientation;
use super::face::FaceValue;
use super::face_orientation::FaceOrientationTable;
use super::random::{DieRng, RollRandom};
use super::settle::{SettleConfig, SettleInterpolator};
use super::spin::{SpinConfig, SpinDynamics};
use crate::dice3d::types::RollSettings;

/// Lifecycle of the die.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RollPhase {
    #[default]
    Idle,
    Rolling,
    Settling,
}

impl RollPhase {
    pub fn is_active(self) -> bool {
        self != RollPhase::Idle
    }
}

#[derive(Debug, Clone, PartialEq)]
enum RollMotion {
    Spinning(SpinDynamics),
    Settling(SettleInterpolator),
}

/// A roll in flight. Exists only while the phase is not `Idle`.
#[derive(Debug, Clone, PartialEq)]
pub struct RollSession {
    chosen_face: FaceValue,
    started_at: f64,
    motion: RollMotion,
}

impl RollSession {
    pub fn chosen_face(&self) -> FaceValue {
        self.chosen_face
    }

    /// Controller clock (seconds) when the roll started.
    pub fn started_at(&self) -> f64 {
        self.started_at
    }

    pub fn phase(&self) -> RollPhase {
        match self.motion {
            RollMotion::Spinning(_) => RollPhase::Rolling,
            RollMotion::Settling(_) => RollPhase::Settling,
        }
    }

    pub fn spin(&self) -> Option<&SpinDynamics> {
        match &self.motion {
            RollMotion::Spinning(spin) => Some(spin),
            RollMotion::Settling(_) => None,
        }
    }
}

/// Delivered exactly once per session, when settling converges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollOutcome {
    pub face: FaceValue,
    pub orientation: Orientation,
    pub started_at: f64,
    pub completed_at: f64,
}

impl RollOutcome {
    pub fn duration(&self) -> f64 {
        self.completed_at - self.started_at
    }
}

pub type RollCompleteCallback = Box<dyn FnMut(&RollOutcome) + Send + Sync>;

#[derive(Resource)]
pub struct RollController {
    table: FaceOrientationTable,
    spin_config: SpinConfig,
    settle_config: SettleConfig,
    random: Box<dyn RollRandom + Send + Sync>,
    session: Option<RollSession>,
    face: FaceValue,
    orientation: Orientation,
    clock: f64,
    completed_rolls: u64,
    on_roll_complete: Option<RollCompleteCallback>,
}

impl fmt::Debug for RollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollController")
            .field("phase", &self.current_phase())
            .field("face", &self.face)
            .field("orientation", &self.orientation)
            .field("clock", &self.clock)
            .field("completed_rolls", &self.completed_rolls)
            .finish()
    }
}

impl Default for RollController {
    fn default() -> Self {
        Self::new(&RollSettings::default())
    }
}

impl RollController {
    pub fn new(settings: &RollSettings) -> Self {
        Self::with_random(settings, Box::new(DieRng::from_entropy()))
    }

    pub fn with_seed(settings: &RollSettings, seed: u64) -> Self {
        Self::with_random(settings, Box::new(DieRng::seeded(seed)))
    }

    pub fn with_random(settings: &RollSettings, random: Box<dyn RollRandom + Send + Sync>) -> Self {
        let table = FaceOrientationTable::standard();
        let face = FaceValue::ONE;
        Self {
            orientation: table.target_for(face),
            table,
            spin_config: SpinConfig::from_settings(settings),
            settle_config: SettleConfig::from_settings(settings),
            random,
            session: None,
            face,
            clock: 0.0,
            completed_rolls: 0,
            on_roll_complete: None,
        }
    }

    /// Swap in a table calibrated for a different die model.
    pub fn with_table(mut self, table: FaceOrientationTable) -> Self {
        self.table = table;
        if self.session.is_none() {
            self.orientation = table.target_for(self.face);
        }
        self
    }

    /// Register the completion callback, replacing any previous one.
    pub fn set_on_roll_complete(&mut self, callback: impl FnMut(&RollOutcome) + Send + Sync + 'static) {
        self.on_roll_complete = Some(Box::new(callback));
    }

    /// Start a roll if idle. A request while a roll is in flight is ignored,
    /// not queued. Returns whether a roll started.
    pub fn request_roll(&mut self) -> bool {
        if let Some(session) = &self.session {
            debug!(
                "Roll request ignored: already {:?} toward {}",
                session.phase(),
                session.chosen_face
            );
            return false;
        }

        let face = self.random.draw_face();
        let velocity = self.random.draw_spin(&self.spin_config);
        let spin = SpinDynamics::start(self.orientation, velocity, self.spin_config);
        info!(
            "Roll started: face {} spin {:?} for {:.2}s",
            face,
            velocity.0,
            spin.duration()
        );

        self.face = face;
        self.session = Some(RollSession {
            chosen_face: face,
            started_at: self.clock,
            motion: RollMotion::Spinning(spin),
        });
        true
    }

    /// Advance the active phase by `dt` seconds.
    ///
    /// Returns the outcome on the single tick where settling converges.
    /// Non-finite or negative `dt` is ignored.
    pub fn tick(&mut self, dt: f32) -> Option<RollOutcome> {
        if !dt.is_finite() || dt < 0.0 {
            warn!("Ignoring roll tick with invalid delta {dt}");
            return None;
        }
        self.clock += f64::from(dt);

        let session = self.session.as_mut()?;
        let mut remaining = dt;
        let converged = loop {
            match &mut session.motion {
                RollMotion::Spinning(spin) => {
                    remaining -= spin.step(remaining);
                    self.orientation = spin.orientation();
                    if !spin.is_finished() {
                        break false;
                    }

                    let target = self.table.target_for(session.chosen_face);
                    debug!(
                        "Spin finished after {:.2}s, settling toward face {}",
                        spin.elapsed(),
                        session.chosen_face
                    );
                    session.motion = RollMotion::Settling(SettleInterpolator::start(
                        self.orientation,
                        target,
                        self.settle_config,
                    ));
                    if remaining <= 0.0 {
                        break false;
                    }
                }
                RollMotion::Settling(settle) => {
                    let done = settle.step(remaining);
                    self.orientation = settle.current();
                    break done;
                }
            }
        };

        if !converged {
            return None;
        }

        let session = self.session.take()?;
        debug_assert_eq!(
            self.orientation,
            self.table.target_for(session.chosen_face),
            "settled pose must be the chosen face's target"
        );
        let outcome = RollOutcome {
            face: session.chosen_face,
            orientation: self.orientation,
            started_at: session.started_at,
            completed_at: self.clock,
        };
        self.completed_rolls += 1;
        info!(
            "Roll complete: face {} after {:.2}s",
            outcome.face,
            outcome.duration()
        );
        if let Some(callback) = self.on_roll_complete.as_mut() {
            callback(&outcome);
        }
        Some(outcome)
    }

    /// Abandon the roll in flight without a completion signal.
    ///
    /// The die is put straight onto the chosen face so an idle controller
    /// never shows an in-between pose.
    pub fn cancel(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.orientation = self.table.target_for(session.chosen_face);
        info!("Roll cancelled during {:?}", session.phase());
        true
    }

    pub fn current_orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn current_phase(&self) -> RollPhase {
        self.session
            .as_ref()
            .map_or(RollPhase::Idle, RollSession::phase)
    }

    /// The chosen face of the current roll, or of the last one when idle.
    pub fn current_face(&self) -> FaceValue {
        self.face
    }

    pub fn is_idle(&self) -> bool {
        self.session.is_none()
    }

    pub fn session(&self) -> Option<&RollSession> {
        self.session.as_ref()
    }

    /// Seconds of ticks seen so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn completed_rolls(&self) -> u64 {
        self.completed_rolls
    }

    pub fn table(&self) -> &FaceOrientationTable {
        &self.table
    }

    pub fn spin_config(&self) -> &SpinConfig {
        &self.spin_config
    }

    pub fn settle_config(&self) -> &SettleConfig {
        &self.settle_config
    }

    /// Worst-case length of a roll, spin plus settle, in seconds.
    pub fn max_roll_seconds(&self) -> f32 {
        let hz = self.spin_config.reference_hz;
        (self.spin_config.max_ticks() + self.settle_config.max_ticks() + 1) as f32 / hz
    }
}
