// Host-side tests for the scroll timeline: continuity, clamping, reveal
// monotonicity and the documented start/end states.

use scrollfx_core::*;

const DELTA: f32 = 1e-4;

fn assert_close(a: SceneState, b: SceneState, tol: f32, ctx: &str) {
    let (field, jump) = a.max_jump(&b);
    assert!(jump <= tol, "{ctx}: `{field}` differs by {jump}");
}

#[test]
fn presets_pass_construction_checks() {
    assert!(SceneTimeline::new(journey_segments()).is_ok());
    assert!(SceneTimeline::new(experience_segments()).is_ok());
}

#[test]
fn journey_boundaries_match_layout() {
    let b: Vec<f32> = SceneTimeline::journey().boundaries().collect();
    assert_eq!(b, [0.15, 0.30, 0.50, 0.65, 0.85]);
    let b: Vec<f32> = SceneTimeline::experience().boundaries().collect();
    assert_eq!(b, [0.2, 0.4, 0.6, 0.8]);
}

#[test]
fn every_field_is_continuous_across_boundaries() {
    for timeline in [SceneTimeline::journey(), SceneTimeline::experience()] {
        let boundaries: Vec<f32> = timeline.boundaries().collect();
        for b in boundaries {
            let before = timeline.evaluate(b - DELTA);
            let after = timeline.evaluate(b + DELTA);
            assert_close(before, after, 1e-2, &format!("boundary {b}"));
            let at = timeline.evaluate(b);
            assert_close(before, at, 1e-2, &format!("left of {b}"));
        }
    }
}

#[test]
fn segment_ends_agree_exactly() {
    let segments = journey_segments();
    for pair in segments.windows(2) {
        let end = (pair[0].eval)(1.0);
        let start = (pair[1].eval)(0.0);
        assert_close(end, start, 1e-3, pair[1].name);
    }
}

#[test]
fn out_of_range_progress_clamps() {
    let t = SceneTimeline::journey();
    assert_eq!(t.evaluate(-1.0), t.evaluate(0.0));
    assert_eq!(t.evaluate(2.0), t.evaluate(1.0));
    assert_eq!(t.evaluate(f32::NAN), t.evaluate(0.0));
    assert_eq!(t.evaluate(f32::INFINITY), t.evaluate(1.0));
    assert_eq!(t.evaluate(f32::NEG_INFINITY), t.evaluate(0.0));
}

#[test]
fn reveal_amounts_never_decrease() {
    for timeline in [SceneTimeline::journey(), SceneTimeline::experience()] {
        let mut prev = timeline.evaluate(0.0);
        for i in 1..=2000 {
            let s = timeline.evaluate(i as f32 / 2000.0);
            assert!(s.peel_amount >= prev.peel_amount, "peel dropped at step {i}");
            assert!(s.bite_amount >= prev.bite_amount, "bite dropped at step {i}");
            assert!((0.0..=1.0).contains(&s.peel_amount));
            assert!((0.0..=1.0).contains(&s.bite_amount));
            prev = s;
        }
    }
}

#[test]
fn fall_drops_strictly_with_wobble() {
    let t = SceneTimeline::journey();
    let mut prev = t.evaluate(0.65).position_y;
    let mut deviates = false;
    for i in 1..=200 {
        let p = 0.65 + 0.2 * i as f32 / 200.0;
        let y = t.evaluate(p).position_y;
        assert!(y < prev, "position_y rose at {p}");
        let linear = -2.0 - 3.0 * (p - 0.65) / 0.2;
        if (y - linear).abs() > 0.01 {
            deviates = true;
        }
        prev = y;
    }
    assert!(deviates, "fall should carry a visible oscillation");
}

#[test]
fn initial_state_is_small_and_unrevealed() {
    let s = SceneTimeline::journey().evaluate(0.0);
    assert!((s.scale - 0.3).abs() < 1e-6);
    assert_eq!(s.position_y, 0.0);
    assert_eq!(s.rotation_z, 0.0);
    assert_eq!(s.peel_amount, 0.0);
    assert_eq!(s.bite_amount, 0.0);

    let e = SceneTimeline::experience().evaluate(0.0);
    assert!((e.scale - 0.15).abs() < 1e-6);
    assert_eq!(e.peel_amount, 0.0);
}

#[test]
fn terminal_state_is_fully_revealed_on_the_ground() {
    let t = SceneTimeline::journey();
    let s = t.evaluate(1.0);
    assert_eq!(s.peel_amount, 1.0);
    assert_eq!(s.bite_amount, 1.0);
    assert!((s.scale - 0.7).abs() < 1e-6);
    // scale holds its plateau through the ground segment
    assert_eq!(t.evaluate(0.9).scale, s.scale);
    assert!((s.position_y + 5.0).abs() < 1e-3);
}

#[test]
fn custom_tables_are_validated() {
    let broken = vec![
        Segment::new("a", 0.0, 0.5, |t| SceneState {
            scale: t,
            ..SceneState::default()
        }),
        Segment::new("b", 0.5, 1.0, |_| SceneState::default()),
    ];
    match SceneTimeline::new(broken) {
        Err(MotionError::Discontinuity { field, boundary, .. }) => {
            assert_eq!(field, "scale");
            assert_eq!(boundary, 0.5);
        }
        other => panic!("expected discontinuity, got {other:?}"),
    }
}
