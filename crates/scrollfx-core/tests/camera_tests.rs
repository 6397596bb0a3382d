// Host-side tests for the camera path and its smoothing.

use scrollfx_core::*;

const DT: f32 = NOMINAL_FRAME_DT;

fn rig(config: CameraConfig) -> CameraRig {
    let mut rig = CameraRig::new(CameraPath::journey(), config).unwrap();
    rig.reset(0.0);
    rig
}

#[test]
fn paths_are_continuous() {
    for path in [CameraPath::journey(), CameraPath::experience()] {
        for pair in path.segments().windows(2) {
            let end = (pair[0].eval)(1.0);
            let start = (pair[1].eval)(0.0);
            assert!(end.distance(start) < 1e-3, "jump entering {}", pair[1].name);
        }
    }
    assert!(CameraPath::new(CameraPath::journey().segments().to_vec()).is_ok());
}

#[test]
fn journey_targets() {
    let path = CameraPath::journey();
    assert_eq!(path.target(0.0), CameraTarget::new(0.0, 8.0));
    assert_eq!(path.target(-3.0), path.target(0.0));
    let end = path.target(1.0);
    assert!((end.y + 4.0).abs() < 1e-5);
    assert!((end.z - 7.0).abs() < 1e-5);
}

#[test]
fn lag_converges_within_thirty_frames() {
    let mut rig = rig(CameraConfig::default());
    let start = rig.current();
    let goal = rig.path().target(0.5);
    let travel = start.distance(goal);
    for _ in 0..30 {
        rig.update(0.5, DT);
    }
    assert!(rig.current().distance(goal) <= 0.01 * travel);
    for _ in 0..200 {
        rig.update(0.5, DT);
    }
    assert_eq!(rig.current(), goal);
    assert!(rig.is_settled());
}

#[test]
fn tween_converges_within_thirty_frames() {
    let mut rig = rig(CameraConfig::tween());
    let goal = rig.path().target(0.5);
    let travel = rig.current().distance(goal);
    for _ in 0..30 {
        rig.update(0.5, DT);
    }
    assert!(rig.current().distance(goal) <= 0.01 * travel);
    rig.update(0.5, DT);
    assert_eq!(rig.current(), goal);
    assert!(rig.is_settled());
}

#[test]
fn smooth_scrolling_never_jumps() {
    for config in [CameraConfig::default(), CameraConfig::tween()] {
        let mut rig = rig(config);
        let mut prev = rig.current();
        for i in 0..=600 {
            let progress = i as f32 / 600.0;
            let now = rig.update(progress, DT);
            assert!(now.distance(prev) < 0.05, "camera jumped at {progress}");
            prev = now;
        }
    }
}

#[test]
fn discrete_jump_is_spread_over_frames() {
    for config in [CameraConfig::default(), CameraConfig::tween()] {
        let mut rig = rig(config);
        let goal = rig.path().target(1.0);
        let travel = rig.current().distance(goal);
        let first = rig.update(1.0, DT);
        assert!(first.distance(goal) > 0.5 * travel);
    }
}

#[test]
fn lag_is_frame_rate_independent() {
    let mut fast = rig(CameraConfig::default());
    let mut slow = rig(CameraConfig::default());
    for _ in 0..4 {
        fast.update(0.4, 1.0 / 60.0);
    }
    slow.update(0.4, 4.0 / 60.0);
    assert!(fast.current().distance(slow.current()) < 1e-4);
}

#[test]
fn tween_retargets_from_the_current_value() {
    let mut rig = rig(CameraConfig::tween());
    for _ in 0..10 {
        rig.update(0.5, DT);
    }
    let mid = rig.current();
    let next = rig.update(0.2, DT);
    // the restarted tween begins where the camera is, so the step is small
    assert!(next.distance(mid) < 0.2);
}

#[test]
fn zero_or_invalid_dt_holds_position() {
    let mut rig = rig(CameraConfig::default());
    let before = rig.current();
    rig.update(0.7, 0.0);
    assert_eq!(rig.current(), before);
    rig.update(0.7, f32::NAN);
    assert_eq!(rig.current(), before);
}

#[test]
fn invalid_smoothing_is_rejected() {
    let lag = CameraConfig {
        smoothing: CameraSmoothing::Lag { rate: 0.0 },
    };
    assert!(CameraRig::new(CameraPath::default(), lag).is_err());
    let tween = CameraConfig {
        smoothing: CameraSmoothing::Tween {
            duration: -1.0,
            ease: Ease::Linear,
        },
    };
    assert!(tween.validate().is_err());
}
