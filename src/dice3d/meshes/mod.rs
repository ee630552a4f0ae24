pub mod d6;

pub use d6::{create_d6, pip_positions, pip_slots, D6_FACE_NORMALS, PIP_OFFSET, PIP_RADIUS};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice3d::roll::FaceValue;

    #[test]
    fn test_d6_has_6_faces() {
        let (_, face_normals) = create_d6(1.8);
        assert_eq!(face_normals.len(), 6, "D6 should have 6 face normals");
        for (_, value) in &face_normals {
            assert!(*value >= 1 && *value <= 6, "D6 face values should be 1-6");
        }
    }

    #[test]
    fn test_opposite_faces_sum_to_seven() {
        for (normal, value) in D6_FACE_NORMALS {
            let (_, opposite) = D6_FACE_NORMALS
                .iter()
                .copied()
                .find(|(n, _)| *n == -normal)
                .expect("every face has an opposite");
            assert_eq!(value + opposite, 7);
        }
    }

    #[test]
    fn test_pip_count_matches_face_value() {
        for face in FaceValue::ALL {
            assert_eq!(pip_slots(face).len(), usize::from(face.get()));
        }
    }

    #[test]
    fn test_pips_lie_on_their_face() {
        let edge = 1.8;
        for (normal, value) in D6_FACE_NORMALS {
            let face = FaceValue::new(value as u8).unwrap();
            for pip in pip_positions(normal, face, edge) {
                assert!((pip.dot(normal) - edge / 2.0).abs() < 1e-5);
                let in_plane = pip - normal * pip.dot(normal);
                assert!(in_plane.abs().max_element() <= edge * PIP_OFFSET + 1e-5);
            }
        }
    }

    #[test]
    fn test_pips_are_distinct() {
        for (normal, value) in D6_FACE_NORMALS {
            let face = FaceValue::new(value as u8).unwrap();
            let pips = pip_positions(normal, face, 1.0);
            for (i, a) in pips.iter().enumerate() {
                for b in &pips[i + 1..] {
                    assert!(a.distance(*b) > 0.1, "face {value} has overlapping pips");
                }
            }
        }
    }
}
