//! Angle helpers plus the `Orientation` and `AngularVelocity` value types.
//!
//! Orientations are three Euler angles applied in X, Y, Z order (the same
//! convention three.js and most glTF viewers use). Every angle is kept in
//! the canonical range `[0, 2π)`.

use bevy::math::{Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Signed distance from `from` to `to` along the shorter arc, in `(-π, π]`.
pub fn shortest_arc(from: f32, to: f32) -> f32 {
    let delta = (to - from).rem_euclid(TAU);
    if delta > PI {
        delta - TAU
    } else {
        delta
    }
}

/// Three Euler angles (radians) describing how the die is posed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    angles: Vec3,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation { angles: Vec3::ZERO };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            angles: Vec3::new(wrap_angle(x), wrap_angle(y), wrap_angle(z)),
        }
    }

    pub fn from_vec3(angles: Vec3) -> Self {
        Self::new(angles.x, angles.y, angles.z)
    }

    pub fn x(&self) -> f32 {
        self.angles.x
    }

    pub fn y(&self) -> f32 {
        self.angles.y
    }

    pub fn z(&self) -> f32 {
        self.angles.z
    }

    pub fn as_vec3(&self) -> Vec3 {
        self.angles
    }

    /// Add a per-axis angular displacement and re-wrap.
    pub fn rotated_by(&self, delta: Vec3) -> Self {
        Self::from_vec3(self.angles + delta)
    }

    /// Per-axis shortest-arc difference from `self` to `other`.
    pub fn arc_to(&self, other: &Orientation) -> Vec3 {
        Vec3::new(
            shortest_arc(self.angles.x, other.angles.x),
            shortest_arc(self.angles.y, other.angles.y),
            shortest_arc(self.angles.z, other.angles.z),
        )
    }

    /// Largest per-axis shortest-arc difference to `other`.
    pub fn max_axis_distance(&self, other: &Orientation) -> f32 {
        self.arc_to(other).abs().max_element()
    }

    /// Rotation as a quaternion, `Rx * Ry * Rz`.
    pub fn to_quat(&self) -> Quat {
        Quat::from_rotation_x(self.angles.x)
            * Quat::from_rotation_y(self.angles.y)
            * Quat::from_rotation_z(self.angles.z)
    }

    /// Angle (radians) of the rotation taking `self` onto `other`.
    ///
    /// Unlike `max_axis_distance` this compares the actual rotations, so two
    /// different Euler triples describing the same pose are distance zero.
    pub fn rotation_distance(&self, other: &Orientation) -> f32 {
        let dot = self.to_quat().dot(other.to_quat()).abs().min(1.0);
        2.0 * dot.acos()
    }
}

/// Per-axis spin rate, in radians per reference tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AngularVelocity(pub Vec3);

impl AngularVelocity {
    pub const ZERO: AngularVelocity = AngularVelocity(Vec3::ZERO);

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Sum of absolute components; the quantity the spin stop threshold is
    /// measured against.
    pub fn speed(&self) -> f32 {
        self.0.abs().element_sum()
    }

    pub fn scaled(&self, factor: f32) -> Self {
        Self(self.0 * factor)
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_wrap_angle_range() {
        assert_eq!(wrap_angle(0.0), 0.0);
        assert!((wrap_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-6);
        assert!((wrap_angle(TAU + 1.0) - 1.0).abs() < 1e-5);
        assert!(wrap_angle(-1e-9) < TAU);
        assert_eq!(wrap_angle(TAU), 0.0);
    }

    #[test]
    fn test_shortest_arc_picks_short_way() {
        assert!((shortest_arc(0.1, TAU - 0.1) + 0.2).abs() < 1e-5);
        assert!((shortest_arc(TAU - 0.1, 0.1) - 0.2).abs() < 1e-5);
        assert!((shortest_arc(1.0, 2.0) - 1.0).abs() < 1e-6);
        assert!(shortest_arc(0.0, PI) > 0.0);
    }

    #[test]
    fn test_orientation_is_canonical() {
        let o = Orientation::new(-FRAC_PI_2, 7.0, -TAU);
        for angle in [o.x(), o.y(), o.z()] {
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn test_rotation_distance_ignores_euler_aliasing() {
        // (π, π, π) is the identity rotation.
        let a = Orientation::new(PI, PI, PI);
        assert!(a.rotation_distance(&Orientation::IDENTITY) < 1e-2);
        assert!(a.max_axis_distance(&Orientation::IDENTITY) > 3.0);
    }

    #[test]
    fn test_angular_velocity_speed_is_l1() {
        let v = AngularVelocity::new(0.1, -0.2, 0.3);
        assert!((v.speed() - 0.6).abs() < 1e-6);
        assert!((v.scaled(0.5).speed() - 0.3).abs() < 1e-6);
    }
}
