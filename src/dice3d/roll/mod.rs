//! Engine-agnostic roll model.
//!
//! - `shake_detector` - debounced shake predicate over motion samples
//! - `face_orientation` - face value to resting pose calibration table
//! - `spin` - damped free spin
//! - `settle` - ease-out onto the chosen face
//! - `controller` - the Idle/Rolling/Settling state machine tying them together

pub mod angles;
pub mod controller;
pub mod face;
pub mod face_orientation;
pub mod random;
pub mod settle;
pub mod shake_detector;
pub mod spin;

pub use angles::{shortest_arc, wrap_angle, AngularVelocity, Orientation};
pub use controller::{RollCompleteCallback, RollController, RollOutcome, RollPhase, RollSession};
pub use face::FaceValue;
pub use face_orientation::FaceOrientationTable;
pub use random::{draw_spin_with, DieRng, RollRandom};
pub use settle::{SettleConfig, SettleInterpolator};
pub use shake_detector::{MotionSample, ShakeDetector, ShakeGate};
pub use spin::{SpinConfig, SpinDynamics};
