use glam::Vec2;
use scrollfx_core::PointerEvent;
use web_sys as web;

/// Pointer position in CSS px relative to the element's top-left corner.
#[inline]
pub fn pointer_local_px(ev: &web::MouseEvent, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    )
}

/// Map a DOM pointer event type onto the core event, if it is one we track.
pub fn pointer_event(kind: &str, ev: &web::Event, el: &web::Element) -> Option<PointerEvent> {
    use wasm_bindgen::JsCast;
    let mouse = ev.dyn_ref::<web::MouseEvent>()?;
    match kind {
        "pointerenter" => Some(PointerEvent::Enter(pointer_local_px(mouse, el))),
        "pointermove" => Some(PointerEvent::Move(pointer_local_px(mouse, el))),
        "pointerleave" => Some(PointerEvent::Leave),
        _ => None,
    }
}
