//! Binds one frame task to a container element, a canvas and the browser's
//! frame clock.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use scrollfx_core::{FrameDriver, FrameTask, RasterSurface, SurfaceSize};
use wasm_bindgen::closure::Closure;
use web_sys as web;

use crate::canvas::Canvas2dSurface;
use crate::events::{Listener, SizeObserver};
use crate::input;
use crate::scheduler::{FrameSlot, RafScheduler};

const POINTER_EVENTS: [&str; 3] = ["pointerenter", "pointermove", "pointerleave"];

/// Runs after every tick with the task's fresh state.
pub type AfterFrame<T> = Box<dyn FnMut(&T)>;

struct Host<T: FrameTask> {
    driver: FrameDriver<RafScheduler>,
    task: T,
    surface: Canvas2dSurface,
    container: web::Element,
    resized: bool,
    visible: bool,
    after_frame: Option<AfterFrame<T>>,
}

impl<T: FrameTask> Host<T> {
    /// Off-screen hosts stay parked until `set_visible(true)`.
    fn wake(&mut self) {
        if self.visible {
            self.driver.start();
        }
    }

    fn mark_resized(&mut self) {
        self.resized = true;
        // redraw at the new size even if the task is idle
        self.wake();
    }

    fn frame(&mut self) {
        if self.resized {
            self.surface.sync_size(&self.container);
            self.resized = false;
        }
        let Host {
            driver,
            task,
            surface,
            after_frame,
            ..
        } = self;
        driver.tick(task, surface);
        if let Some(after) = after_frame {
            after(task);
        }
    }
}

pub struct EffectHost<T: FrameTask + 'static> {
    host: Rc<RefCell<Host<T>>>,
    slot: FrameSlot,
    listeners: Vec<Listener>,
    size_observer: Option<SizeObserver>,
}

impl<T: FrameTask + 'static> EffectHost<T> {
    pub fn attach(
        container: web::HtmlElement,
        canvas: web::HtmlCanvasElement,
        task: T,
        after_frame: Option<AfterFrame<T>>,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let mut surface = Canvas2dSurface::new(canvas)?;
        let container: web::Element = container.into();
        surface.sync_size(&container);

        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler::new(window.clone(), slot.clone());
        let host = Rc::new(RefCell::new(Host {
            driver: FrameDriver::new(scheduler),
            task,
            surface,
            container: container.clone(),
            resized: false,
            visible: true,
            after_frame,
        }));

        let weak = Rc::downgrade(&host);
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            with_host(&weak, Host::frame);
        }) as Box<dyn FnMut()>));

        let mut listeners = Vec::with_capacity(POINTER_EVENTS.len() + 1);
        for kind in POINTER_EVENTS {
            let weak = Rc::downgrade(&host);
            let el = container.clone();
            listeners.push(Listener::new(&container, kind, move |ev| {
                let Some(event) = input::pointer_event(kind, &ev, &el) else {
                    return;
                };
                with_host(&weak, |h| {
                    h.driver.push_input(event);
                    h.wake();
                });
            })?);
        }
        let weak = Rc::downgrade(&host);
        listeners.push(Listener::new(&window, "resize", move |_| {
            with_host(&weak, Host::mark_resized);
        })?);
        let weak = Rc::downgrade(&host);
        let size_observer = SizeObserver::new(&container, move || {
            with_host(&weak, Host::mark_resized);
        })?;

        log::info!("effect attached");
        Ok(Self {
            host,
            slot,
            listeners,
            size_observer: Some(size_observer),
        })
    }

    pub fn with_task<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.host.try_borrow().ok().map(|h| f(&h.task))
    }

    pub fn with_task_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut h = self.host.try_borrow_mut().ok()?;
        let out = f(&mut h.task);
        // state changes may need frames even without pointer input
        h.wake();
        Some(out)
    }

    /// Park the loop while the element is off screen; resume when it returns.
    pub fn set_visible(&self, visible: bool) {
        let Ok(mut h) = self.host.try_borrow_mut() else {
            return;
        };
        h.visible = visible;
        if visible {
            h.mark_resized();
        } else {
            h.driver.stop();
        }
    }

    /// CSS size the canvas was last synced to.
    pub fn surface_size(&self) -> Option<SurfaceSize> {
        self.host.try_borrow().ok().map(|h| h.surface.size())
    }

    pub fn is_running(&self) -> bool {
        self.host
            .try_borrow()
            .map(|h| h.driver.is_running())
            .unwrap_or(false)
    }

    /// Stop the loop, detach listeners and clear the canvas. Idempotent.
    pub fn dispose(&mut self) {
        if self.listeners.is_empty() && self.slot.borrow().is_none() {
            return;
        }
        let Ok(mut h) = self.host.try_borrow_mut() else {
            log::warn!("dispose called from inside a frame; ignored");
            return;
        };
        self.listeners.clear();
        self.size_observer = None;
        h.driver.dispose();
        h.surface.clear();
        h.driver.scheduler_mut().release();
        log::info!("effect disposed");
    }
}

impl<T: FrameTask + 'static> Drop for EffectHost<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn with_host<T: FrameTask>(weak: &Weak<RefCell<Host<T>>>, f: impl FnOnce(&mut Host<T>)) {
    let Some(host) = weak.upgrade() else {
        return;
    };
    match host.try_borrow_mut() {
        Ok(mut h) => f(&mut h),
        Err(_) => log::trace!("host busy; event dropped"),
    };
}
