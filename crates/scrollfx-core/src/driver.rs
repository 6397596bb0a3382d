//! Per-frame tick loop with an owned, cancelable scheduler handle.
//!
//! A [`FrameDriver`] runs at most one loop per field instance. The host
//! supplies the scheduler (e.g. `requestAnimationFrame`) and a clock; the
//! driver guarantees input → update → draw ordering inside every tick and
//! never leaves a callback pending after `stop`, `dispose` or drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;

use crate::constants::{MAX_FRAME_DT, NOMINAL_FRAME_DT};
use crate::pointer::{InputQueue, PointerEvent};
use crate::surface::{RasterSurface, SurfaceSize};

/// Work driven once per frame.
pub trait FrameTask {
    /// Called for every buffered pointer event before `update`.
    fn handle_pointer(&mut self, _event: PointerEvent, _size: SurfaceSize) {}
    fn update(&mut self, dt: f32);
    /// The surface has already been cleared and has a non-zero size.
    fn draw(&mut self, surface: &mut dyn RasterSurface);
    /// An idle task lets the loop stop after the current frame.
    fn is_idle(&self) -> bool {
        false
    }
}

pub trait FrameScheduler {
    type Handle;
    /// Schedule the next tick. `None` when the platform refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

pub trait FrameClock {
    /// Monotonic seconds since an arbitrary origin.
    fn now_sec(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl Default for InstantClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl FrameClock for InstantClock {
    fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Hand-advanced clock; clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn advance(&self, dt: f64) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set(&self, t: f64) {
        self.now.set(t);
    }
}

impl FrameClock for ManualClock {
    fn now_sec(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Default)]
struct ManualSchedulerState {
    next_handle: u64,
    pending: Vec<u64>,
    cancelled: Vec<u64>,
    refuse: bool,
}

/// Scheduler that only records requests. Clones share state so a test can
/// keep one end while the driver owns the other.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    state: Rc<RefCell<ManualSchedulerState>>,
}

impl ManualScheduler {
    /// Pops the oldest pending request, as if the platform fired it.
    pub fn fire(&self) -> Option<u64> {
        let mut s = self.state.borrow_mut();
        if s.pending.is_empty() {
            None
        } else {
            Some(s.pending.remove(0))
        }
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    pub fn cancelled(&self) -> Vec<u64> {
        self.state.borrow().cancelled.clone()
    }

    /// Make subsequent requests fail.
    pub fn set_refuse(&self, refuse: bool) {
        self.state.borrow_mut().refuse = refuse;
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        let mut s = self.state.borrow_mut();
        if s.refuse {
            return None;
        }
        s.next_handle += 1;
        let h = s.next_handle;
        s.pending.push(h);
        Some(h)
    }

    fn cancel_frame(&mut self, handle: u64) {
        let mut s = self.state.borrow_mut();
        s.pending.retain(|&h| h != handle);
        s.cancelled.push(handle);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Stopped,
    Running,
    Disposed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The driver was stopped or disposed; nothing ran.
    Ignored,
    /// `drawn` is false when the surface had no area.
    Ran { drawn: bool, rescheduled: bool },
}

pub struct FrameDriver<S: FrameScheduler, C: FrameClock = InstantClock> {
    scheduler: S,
    clock: C,
    pending: Option<S::Handle>,
    state: DriverState,
    last_tick: Option<f64>,
    input: InputQueue,
}

impl<S: FrameScheduler> FrameDriver<S, InstantClock> {
    pub fn new(scheduler: S) -> Self {
        Self::with_clock(scheduler, InstantClock::default())
    }
}

impl<S: FrameScheduler, C: FrameClock> FrameDriver<S, C> {
    pub fn with_clock(scheduler: S, clock: C) -> Self {
        Self {
            scheduler,
            clock,
            pending: None,
            state: DriverState::Stopped,
            last_tick: None,
            input: InputQueue::default(),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Buffer a pointer event for the next tick. Ignored once disposed.
    pub fn push_input(&mut self, event: PointerEvent) {
        if self.state != DriverState::Disposed {
            self.input.push(event);
        }
    }

    /// Begin ticking. Idempotent; returns whether the loop is running.
    pub fn start(&mut self) -> bool {
        match self.state {
            DriverState::Running => true,
            DriverState::Disposed => false,
            DriverState::Stopped => {
                self.state = DriverState::Running;
                self.last_tick = None;
                log::debug!("frame driver started");
                self.schedule()
            }
        }
    }

    /// Stop ticking and cancel the pending frame. Idempotent.
    pub fn stop(&mut self) {
        if self.state == DriverState::Running {
            self.state = DriverState::Stopped;
            log::debug!("frame driver stopped");
        }
        self.cancel_pending();
    }

    /// Stop for good. Further `start` calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == DriverState::Disposed {
            return;
        }
        self.stop();
        self.input.clear();
        self.state = DriverState::Disposed;
        log::debug!("frame driver disposed");
    }

    /// Run one frame. Call this from the scheduled callback.
    pub fn tick(&mut self, task: &mut dyn FrameTask, surface: &mut dyn RasterSurface) -> TickOutcome {
        // the handle that invoked us has fired
        self.pending = None;
        if self.state != DriverState::Running {
            return TickOutcome::Ignored;
        }

        let now = self.clock.now_sec();
        let dt = match self.last_tick {
            None => NOMINAL_FRAME_DT,
            Some(prev) => ((now - prev) as f32).clamp(0.0, MAX_FRAME_DT),
        };
        self.last_tick = Some(now);

        let size = surface.size();
        for event in self.input.drain() {
            task.handle_pointer(event, size);
        }
        task.update(dt);

        let drawn = if size.is_empty() {
            log::trace!("surface has no area; skipping draw");
            false
        } else {
            surface.clear();
            task.draw(surface);
            true
        };

        let rescheduled = if task.is_idle() {
            self.state = DriverState::Stopped;
            log::trace!("task idle; frame driver parked");
            false
        } else {
            self.schedule()
        };
        TickOutcome::Ran { drawn, rescheduled }
    }

    fn schedule(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        match self.scheduler.request_frame() {
            Some(handle) => {
                self.pending = Some(handle);
                true
            }
            None => {
                log::warn!("frame request refused; driver stopped");
                self.state = DriverState::Stopped;
                false
            }
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

impl<S: FrameScheduler, C: FrameClock> Drop for FrameDriver<S, C> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
