use bevy::prelude::*;

use crate::dice3d::roll::FaceValue;

/// Outward face normals of the d6 mesh and the value printed on each.
pub const D6_FACE_NORMALS: [(Vec3, u32); 6] = [
    (Vec3::Y, 6),
    (Vec3::NEG_Y, 1),
    (Vec3::X, 3),
    (Vec3::NEG_X, 4),
    (Vec3::Z, 2),
    (Vec3::NEG_Z, 5),
];

/// Pip slots on a face, as (column, row) in a 3x3 grid centred on the face.
/// `-1` is left/top, `1` is right/bottom.
const TOP_LEFT: (i8, i8) = (-1, -1);
const TOP_RIGHT: (i8, i8) = (1, -1);
const MIDDLE_LEFT: (i8, i8) = (-1, 0);
const CENTER: (i8, i8) = (0, 0);
const MIDDLE_RIGHT: (i8, i8) = (1, 0);
const BOTTOM_LEFT: (i8, i8) = (-1, 1);
const BOTTOM_RIGHT: (i8, i8) = (1, 1);

/// Distance of an off-centre pip from the face centre, as a fraction of the edge.
/// Pips sit 15% and 42.5% in from opposite sides: `0.5 - 0.225 = 0.275`.
pub const PIP_OFFSET: f32 = 0.275;

/// Pip radius as a fraction of the edge.
pub const PIP_RADIUS: f32 = 0.08;

pub fn pip_slots(face: FaceValue) -> &'static [(i8, i8)] {
    match face.get() {
        1 => &[CENTER],
        2 => &[TOP_LEFT, BOTTOM_RIGHT],
        3 => &[TOP_LEFT, CENTER, BOTTOM_RIGHT],
        4 => &[TOP_LEFT, TOP_RIGHT, BOTTOM_LEFT, BOTTOM_RIGHT],
        5 => &[TOP_LEFT, TOP_RIGHT, CENTER, BOTTOM_LEFT, BOTTOM_RIGHT],
        _ => &[
            TOP_LEFT,
            TOP_RIGHT,
            MIDDLE_LEFT,
            MIDDLE_RIGHT,
            BOTTOM_LEFT,
            BOTTOM_RIGHT,
        ],
    }
}

/// Right and up directions spanning the face with outward `normal`.
fn face_basis(normal: Vec3) -> (Vec3, Vec3) {
    let up = if normal.y.abs() > 0.5 {
        Vec3::new(0.0, 0.0, -normal.y.signum())
    } else {
        Vec3::Y
    };
    let right = up.cross(normal);
    (right, up)
}

/// Pip centres on the face with outward `normal`, in mesh-local space.
pub fn pip_positions(normal: Vec3, face: FaceValue, edge: f32) -> Vec<Vec3> {
    let (right, up) = face_basis(normal);
    let centre = normal * (edge / 2.0);
    let step = edge * PIP_OFFSET;
    pip_slots(face)
        .iter()
        .map(|&(col, row)| centre + right * (f32::from(col) * step) - up * (f32::from(row) * step))
        .collect()
}

pub fn create_d6(edge: f32) -> (Mesh, Vec<(Vec3, u32)>) {
    let mesh = Mesh::from(Cuboid::new(edge, edge, edge));
    (mesh, D6_FACE_NORMALS.to_vec())
}
