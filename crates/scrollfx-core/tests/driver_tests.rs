// Host-side tests for the frame driver lifecycle and per-tick ordering.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use scrollfx_core::*;

#[derive(Default)]
struct Probe {
    log: Rc<RefCell<Vec<String>>>,
    dts: Vec<f32>,
    idle: bool,
}

impl FrameTask for Probe {
    fn handle_pointer(&mut self, event: PointerEvent, _size: SurfaceSize) {
        self.log.borrow_mut().push(format!("input {event:?}"));
    }

    fn update(&mut self, dt: f32) {
        self.dts.push(dt);
        self.log.borrow_mut().push("update".into());
    }

    fn draw(&mut self, _surface: &mut dyn RasterSurface) {
        self.log.borrow_mut().push("draw".into());
    }

    fn is_idle(&self) -> bool {
        self.idle
    }
}

fn driver() -> (FrameDriver<ManualScheduler, ManualClock>, ManualScheduler, ManualClock) {
    let scheduler = ManualScheduler::default();
    let clock = ManualClock::default();
    let driver = FrameDriver::with_clock(scheduler.clone(), clock.clone());
    (driver, scheduler, clock)
}

#[test]
fn start_is_idempotent() {
    let (mut d, sched, _) = driver();
    assert!(d.start());
    assert!(d.start());
    assert_eq!(sched.pending(), 1);
    assert!(d.is_running());
}

#[test]
fn stop_is_idempotent_and_cancels() {
    let (mut d, sched, _) = driver();
    d.start();
    d.stop();
    d.stop();
    assert_eq!(sched.pending(), 0);
    assert_eq!(sched.cancelled().len(), 1);
    assert_eq!(d.state(), DriverState::Stopped);
    assert!(!d.has_pending_frame());
}

#[test]
fn tick_after_stop_does_nothing() {
    let (mut d, sched, _) = driver();
    let mut task = Probe::default();
    let mut surface = DrawList::new(SurfaceSize::new(10, 10));
    d.start();
    d.stop();
    assert_eq!(d.tick(&mut task, &mut surface), TickOutcome::Ignored);
    assert!(task.dts.is_empty());
    assert_eq!(sched.pending(), 0);
}

#[test]
fn dispose_is_final() {
    let (mut d, sched, _) = driver();
    d.start();
    d.dispose();
    d.dispose();
    assert_eq!(d.state(), DriverState::Disposed);
    assert!(!d.start());
    assert_eq!(sched.pending(), 0);

    let mut task = Probe::default();
    let mut surface = DrawList::new(SurfaceSize::new(10, 10));
    d.push_input(PointerEvent::Leave);
    assert_eq!(d.tick(&mut task, &mut surface), TickOutcome::Ignored);
    assert!(task.log.borrow().is_empty());
}

#[test]
fn drop_cancels_the_pending_frame() {
    let (mut d, sched, _) = driver();
    d.start();
    assert_eq!(sched.pending(), 1);
    drop(d);
    assert_eq!(sched.pending(), 0);
    assert_eq!(sched.cancelled().len(), 1);
}

#[test]
fn input_then_update_then_draw() {
    let (mut d, sched, _) = driver();
    let mut task = Probe::default();
    let mut surface = DrawList::new(SurfaceSize::new(10, 10));
    d.start();
    d.push_input(PointerEvent::Enter(Vec2::ONE));
    d.push_input(PointerEvent::Leave);
    sched.fire();
    let out = d.tick(&mut task, &mut surface);
    assert_eq!(
        out,
        TickOutcome::Ran {
            drawn: true,
            rescheduled: true
        }
    );
    let log = task.log.borrow();
    assert_eq!(log.len(), 4);
    assert!(log[0].starts_with("input Enter"));
    assert!(log[1].starts_with("input Leave"));
    assert_eq!(log[2], "update");
    assert_eq!(log[3], "draw");
    assert_eq!(surface.count_clears(), 1);
    assert_eq!(sched.pending(), 1);
}

#[test]
fn zero_sized_surface_skips_the_draw() {
    let (mut d, sched, _) = driver();
    let mut task = Probe::default();
    let mut surface = DrawList::new(SurfaceSize::new(0, 120));
    d.start();
    sched.fire();
    let out = d.tick(&mut task, &mut surface);
    assert_eq!(
        out,
        TickOutcome::Ran {
            drawn: false,
            rescheduled: true
        }
    );
    assert_eq!(task.dts.len(), 1);
    assert!(surface.commands().is_empty());

    // next frame the surface has been sized
    surface.resize(SurfaceSize::new(80, 120));
    sched.fire();
    assert_eq!(
        d.tick(&mut task, &mut surface),
        TickOutcome::Ran {
            drawn: true,
            rescheduled: true
        }
    );
}

#[test]
fn dt_is_nominal_first_then_measured_and_clamped() {
    let (mut d, sched, clock) = driver();
    let mut task = Probe::default();
    let mut surface = DrawList::new(SurfaceSize::new(10, 10));
    d.start();
    for step in [0.0, 0.02, 5.0, -1.0] {
        clock.advance(step);
        sched.fire();
        d.tick(&mut task, &mut surface);
    }
    assert_eq!(task.dts[0], NOMINAL_FRAME_DT);
    assert!((task.dts[1] - 0.02).abs() < 1e-6);
    assert_eq!(task.dts[2], MAX_FRAME_DT);
    assert_eq!(task.dts[3], 0.0);
}

#[test]
fn idle_task_parks_the_loop_until_restarted() {
    let (mut d, sched, _) = driver();
    let mut task = Probe {
        idle: true,
        ..Probe::default()
    };
    let mut surface = DrawList::new(SurfaceSize::new(10, 10));
    d.start();
    sched.fire();
    assert_eq!(
        d.tick(&mut task, &mut surface),
        TickOutcome::Ran {
            drawn: true,
            rescheduled: false
        }
    );
    assert_eq!(d.state(), DriverState::Stopped);
    assert_eq!(sched.pending(), 0);

    assert!(d.start());
    assert_eq!(sched.pending(), 1);
}

#[test]
fn refused_frame_request_leaves_driver_stopped() {
    let (mut d, sched, _) = driver();
    sched.set_refuse(true);
    assert!(!d.start());
    assert_eq!(d.state(), DriverState::Stopped);
    sched.set_refuse(false);
    assert!(d.start());
}

#[test]
fn ripple_field_runs_to_idle_under_the_driver() {
    let (mut d, sched, clock) = driver();
    let mut field = RippleField::new(RippleConfig::default(), 4).unwrap();
    let mut surface = DrawList::new(SurfaceSize::new(300, 200));
    d.push_input(PointerEvent::Enter(Vec2::new(10.0, 100.0)));
    d.start();
    let mut frames = 0;
    while sched.fire().is_some() {
        clock.advance(NOMINAL_FRAME_DT as f64);
        d.tick(&mut field, &mut surface);
        frames += 1;
        assert!(frames < 1000, "driver never parked");
    }
    assert!(field.is_empty());
    assert_eq!(d.state(), DriverState::Stopped);
    // the last frame cleared the surface and drew nothing
    let cmds = surface.take();
    assert_eq!(cmds.last(), Some(&DrawCommand::Clear));
}
