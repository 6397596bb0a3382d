//! `requestAnimationFrame` scheduling for the frame driver.

use std::cell::RefCell;
use std::rc::Rc;

use scrollfx_core::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The callback every requested frame invokes. Shared with the owner so it
/// can be installed after the host exists and released on dispose.
pub type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct RafScheduler {
    window: web::Window,
    slot: FrameSlot,
}

impl RafScheduler {
    pub fn new(window: web::Window, slot: FrameSlot) -> Self {
        Self { window, slot }
    }

    /// Drop the callback. The pending frame must already be cancelled.
    pub fn release(&mut self) {
        self.slot.borrow_mut().take();
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        let slot = self.slot.borrow();
        let callback = slot.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                log::warn!("requestAnimationFrame failed: {e:?}");
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::debug!("cancelAnimationFrame failed: {e:?}");
        }
    }
}
