use scrollfx_core::SurfaceSize;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn device_pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

/// Size the canvas backing store to the container's CSS box times the device
/// pixel ratio. Returns the CSS size the surface should report.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    container: &web::Element,
    dpr: f64,
) -> SurfaceSize {
    let rect = container.get_bounding_client_rect();
    let css_w = rect.width().max(0.0);
    let css_h = rect.height().max(0.0);
    let w_px = (css_w * dpr) as u32;
    let h_px = (css_h * dpr) as u32;
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    SurfaceSize::new(css_w as u32, css_h as u32)
}

pub fn set_attr(el: &web::Element, name: &str, value: &str) {
    if let Err(e) = el.set_attribute(name, value) {
        log::debug!("set_attribute({name}) failed: {e:?}");
    }
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::debug!("style {property} failed: {e:?}");
    }
}
