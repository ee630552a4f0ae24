//! Face value -> resting orientation lookup.
//!
//! The die mesh uses the face normals +Y=6, -Y=1, +X=3, -X=4, +Z=2, -Z=5 and
//! the camera looks down -Z, so a face "faces the viewer" once its normal has
//! been rotated onto +Z. Opposite faces are exactly one half-turn about the
//! world Y axis apart: `target(7 - f) = Ry(π) * target(f)`.
//!
//! This table is calibration for that specific mesh. A different model with
//! a different local frame needs a new table.

use bevy::math::{Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, PI};

use super::angles::Orientation;
use super::face::FaceValue;

/// World axis used to relate opposite faces.
pub const HALF_TURN_AXIS: Vec3 = Vec3::Y;

/// Direction from the die towards the camera.
pub const VIEW_AXIS: Vec3 = Vec3::Z;

/// Two targets closer than this (radians of rotation) are treated as the same pose.
pub const MIN_TARGET_SEPARATION: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceOrientationTable {
    targets: [Orientation; 6],
}

impl Default for FaceOrientationTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FaceOrientationTable {
    /// Targets for the built-in d6 mesh.
    pub fn standard() -> Self {
        Self {
            targets: [
                Orientation::new(3.0 * FRAC_PI_2, PI, 0.0), // 1: -Y, half-turn of 6
                Orientation::new(0.0, 0.0, 0.0),            // 2: +Z already faces the camera
                Orientation::new(0.0, 3.0 * FRAC_PI_2, 0.0), // 3: +X
                Orientation::new(0.0, FRAC_PI_2, 0.0),      // 4: -X, half-turn of 3
                Orientation::new(0.0, PI, 0.0),             // 5: -Z, half-turn of 2
                Orientation::new(FRAC_PI_2, 0.0, 0.0),      // 6: +Y
            ],
        }
    }

    /// Build a custom table, rejecting any two faces that share a pose.
    pub fn from_targets(targets: [Orientation; 6]) -> Result<Self, String> {
        let table = Self { targets };
        let separation = table.min_separation();
        if separation < MIN_TARGET_SEPARATION {
            return Err(format!(
                "Face targets are not distinct: two faces are only {separation:.4} rad apart"
            ));
        }
        Ok(table)
    }

    pub fn target_for(&self, face: FaceValue) -> Orientation {
        self.targets[face.index()]
    }

    /// Smallest rotation angle between any two face targets.
    pub fn min_separation(&self) -> f32 {
        let mut min = f32::MAX;
        for (i, a) in self.targets.iter().enumerate() {
            for b in &self.targets[i + 1..] {
                min = min.min(a.rotation_distance(b));
            }
        }
        min
    }

    /// Face whose target pose is closest to `orientation`.
    pub fn nearest_face(&self, orientation: &Orientation) -> FaceValue {
        let mut best = FaceValue::ONE;
        let mut best_distance = f32::MAX;
        for face in FaceValue::ALL {
            let distance = self.target_for(face).rotation_distance(orientation);
            if distance < best_distance {
                best_distance = distance;
                best = face;
            }
        }
        best
    }

    /// Rotation carrying `face`'s target onto its opposite face's target.
    pub fn half_turn() -> Quat {
        Quat::from_axis_angle(HALF_TURN_AXIS, PI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::meshes::D6_FACE_NORMALS;

    fn same_rotation(a: Quat, b: Quat) -> bool {
        a.dot(b).abs() > 1.0 - 1e-5
    }

    #[test]
    fn test_targets_are_unique() {
        let table = FaceOrientationTable::standard();
        // Distinct poses of a cube are at least a quarter-turn apart.
        assert!(table.min_separation() > FRAC_PI_2 - 0.01);
    }

    #[test]
    fn test_each_target_shows_its_face_to_the_camera() {
        let table = FaceOrientationTable::standard();
        for (normal, value) in D6_FACE_NORMALS {
            let face = FaceValue::new(value as u8).unwrap();
            let facing = table.target_for(face).to_quat() * normal;
            assert!(
                facing.distance(VIEW_AXIS) < 1e-4,
                "face {value} ends up pointing {facing:?}"
            );
        }
    }

    #[test]
    fn test_opposite_faces_are_half_turns() {
        let table = FaceOrientationTable::standard();
        for face in FaceValue::ALL {
            let turned = FaceOrientationTable::half_turn() * table.target_for(face).to_quat();
            let opposite = table.target_for(face.opposite()).to_quat();
            assert!(same_rotation(turned, opposite), "face {face}");
        }
    }

    #[test]
    fn test_nearest_face_inverts_lookup() {
        let table = FaceOrientationTable::standard();
        for face in FaceValue::ALL {
            assert_eq!(table.nearest_face(&table.target_for(face)), face);
        }
    }

    #[test]
    fn test_from_targets_rejects_collisions() {
        let mut targets = FaceOrientationTable::standard().targets;
        targets[3] = targets[0];
        assert!(FaceOrientationTable::from_targets(targets).is_err());
        assert!(FaceOrientationTable::from_targets(FaceOrientationTable::standard().targets).is_ok());
    }
}
