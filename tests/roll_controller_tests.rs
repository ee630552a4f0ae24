//! Roll controller scenarios through the public API

use shakeroll::dice3d::roll::{
    AngularVelocity, FaceOrientationTable, FaceValue, RollController, RollOutcome, RollPhase,
    RollRandom, SpinConfig,
};
use shakeroll::dice3d::types::RollSettings;
use std::sync::{Arc, Mutex};

/// Random source that always picks the same face and spin.
struct LoadedDie {
    face: FaceValue,
    spin: AngularVelocity,
}

impl RollRandom for LoadedDie {
    fn draw_face(&mut self) -> FaceValue {
        self.face
    }

    fn draw_spin(&mut self, _config: &SpinConfig) -> AngularVelocity {
        self.spin
    }
}

fn loaded_controller(face: u8) -> RollController {
    RollController::with_random(
        &RollSettings::default(),
        Box::new(LoadedDie {
            face: FaceValue::new(face).unwrap(),
            spin: AngularVelocity::new(0.3, -0.25, 0.2),
        }),
    )
}

/// Tick until idle, returning every outcome seen and the number of ticks.
fn drive(controller: &mut RollController, dt: f32, limit: usize) -> (Vec<RollOutcome>, usize) {
    let mut outcomes = Vec::new();
    for tick in 1..=limit {
        if let Some(outcome) = controller.tick(dt) {
            outcomes.push(outcome);
        }
        if controller.is_idle() {
            return (outcomes, tick);
        }
    }
    (outcomes, limit)
}

#[test]
fn test_all_face_targets_are_distinct() {
    let table = FaceOrientationTable::standard();
    for a in FaceValue::ALL {
        for b in FaceValue::ALL {
            if a != b {
                let distance = table.target_for(a).rotation_distance(&table.target_for(b));
                assert!(distance > 0.5, "faces {a} and {b} are {distance} rad apart");
            }
        }
    }
}

#[test]
fn test_loaded_die_settles_exactly_on_four() {
    let mut controller = loaded_controller(4);
    assert!(controller.request_roll());

    let (outcomes, _) = drive(&mut controller, 1.0 / 60.0, 10_000);

    let four = FaceValue::new(4).unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(controller.current_face(), four);
    assert_eq!(controller.current_phase(), RollPhase::Idle);
    assert_eq!(
        controller.current_orientation(),
        controller.table().target_for(four)
    );
    assert_eq!(outcomes[0].orientation, controller.table().target_for(four));
}

#[test]
fn test_back_to_back_requests_start_one_session() {
    let mut controller = loaded_controller(2);
    assert!(controller.request_roll());
    let session = controller.session().cloned();
    assert!(!controller.request_roll());
    assert_eq!(controller.session().cloned(), session);

    let (outcomes, _) = drive(&mut controller, 1.0 / 60.0, 10_000);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(controller.completed_rolls(), 1);
}

#[test]
fn test_requests_while_settling_are_ignored() {
    let mut controller = RollController::with_seed(&RollSettings::default(), 99);
    controller.request_roll();
    let face = controller.current_face();
    while controller.current_phase() != RollPhase::Settling {
        controller.tick(1.0 / 60.0);
    }
    assert!(!controller.request_roll());
    assert_eq!(controller.current_face(), face);

    let (outcomes, _) = drive(&mut controller, 1.0 / 60.0, 10_000);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].face, face);
}

#[test]
fn test_completion_callback_matches_returned_outcome() {
    let seen: Arc<Mutex<Vec<RollOutcome>>> = Arc::default();
    let sink = Arc::clone(&seen);
    let mut controller = RollController::with_seed(&RollSettings::default(), 5);
    controller.set_on_roll_complete(move |outcome| sink.lock().unwrap().push(*outcome));

    controller.request_roll();
    let (outcomes, _) = drive(&mut controller, 1.0 / 60.0, 10_000);

    let seen = seen.lock().unwrap();
    assert_eq!(*seen, outcomes);
    assert!(seen[0].duration() > 0.0);
}

#[test]
fn test_frame_rate_independence() {
    // 120 fps vs 30 fps: compare at every 1/30 s boundary.
    let mut fast = loaded_controller(3);
    let mut slow = loaded_controller(3);
    fast.request_roll();
    slow.request_roll();

    for _ in 0..200 {
        for _ in 0..4 {
            fast.tick(1.0 / 120.0);
        }
        slow.tick(1.0 / 30.0);

        let drift = fast
            .current_orientation()
            .max_axis_distance(&slow.current_orientation());
        assert!(drift < 0.02, "orientations drifted {drift} rad apart");
        if fast.is_idle() && slow.is_idle() {
            break;
        }
    }
    assert!(fast.is_idle() && slow.is_idle());
    assert_eq!(fast.current_orientation(), slow.current_orientation());
}

#[test]
fn test_spin_speed_never_increases() {
    let mut controller = RollController::with_seed(&RollSettings::default(), 17);
    controller.request_roll();
    let mut last = f32::MAX;
    while controller.current_phase() == RollPhase::Rolling {
        let speed = controller
            .session()
            .and_then(|session| session.spin())
            .map(|spin| spin.velocity().speed())
            .unwrap();
        assert!(speed <= last);
        last = speed;
        controller.tick(1.0 / 60.0);
    }
}

#[test]
fn test_every_roll_finishes_within_the_computed_bound() {
    let settings = RollSettings::default();
    let mut controller = RollController::with_seed(&settings, 2024);
    let bound_ticks = (controller.max_roll_seconds() * settings.reference_tick_hz).ceil() as usize;

    for _ in 0..50 {
        assert!(controller.request_roll());
        let (outcomes, ticks) = drive(&mut controller, 1.0 / 60.0, bound_ticks + 2);
        assert_eq!(outcomes.len(), 1);
        assert!(ticks <= bound_ticks + 1, "took {ticks} ticks, bound {bound_ticks}");
    }
}

#[test]
fn test_seeded_faces_are_roughly_uniform() {
    let mut controller = RollController::with_seed(&RollSettings::default(), 8);
    let mut counts = [0u32; 6];
    for _ in 0..600 {
        controller.request_roll();
        counts[controller.current_face().index()] += 1;
        controller.cancel();
    }
    for count in counts {
        assert!((60..=140).contains(&count), "counts: {counts:?}");
    }
}

#[test]
fn test_garbage_deltas_do_not_corrupt_orientation() {
    let mut controller = loaded_controller(5);
    controller.request_roll();
    controller.tick(0.25);
    let before = controller.current_orientation();
    assert!(controller.tick(f32::NAN).is_none());
    assert!(controller.tick(-1.0).is_none());
    assert_eq!(controller.current_orientation(), before);

    let (outcomes, _) = drive(&mut controller, 1.0 / 60.0, 10_000);
    assert_eq!(outcomes.len(), 1);
}
