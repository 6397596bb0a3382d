#![cfg(target_arch = "wasm32")]
// Browser tests for the canvas surface and effect lifecycle.

use glam::Vec2;
use scrollfx_core::{BlendMode, Color, Paint, RasterSurface, RippleConfig, RippleField};
use scrollfx_web::canvas::Canvas2dSurface;
use scrollfx_web::host::EffectHost;
use scrollfx_web::{dom, staggered_reveal, RippleBorder};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(width: u32, height: u32) -> (web::HtmlElement, web::HtmlCanvasElement) {
    let document = dom::window_document().unwrap();
    let container: web::HtmlElement = document.create_element("div").unwrap().dyn_into().unwrap();
    dom::set_style(&container, "width", &format!("{width}px"));
    dom::set_style(&container, "height", &format!("{height}px"));
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .unwrap()
        .dyn_into()
        .unwrap();
    container.append_child(&canvas).unwrap();
    document.body().unwrap().append_child(&container).unwrap();
    (container, canvas)
}

async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

fn ripple_host(width: u32, height: u32) -> (web::HtmlElement, EffectHost<RippleField>) {
    let (container, canvas) = fixture(width, height);
    let field = RippleField::new(RippleConfig::default(), 3).unwrap();
    let host = EffectHost::attach(container.clone(), canvas, field, None).unwrap();
    (container, host)
}

#[wasm_bindgen_test]
fn surface_reports_css_size_and_scales_backing_store() {
    let (container, canvas) = fixture(120, 80);
    let mut surface = Canvas2dSurface::new(canvas.clone()).unwrap();
    surface.sync_size(&container);
    let size = surface.size();
    assert_eq!((size.width, size.height), (120, 80));
    let dpr = dom::device_pixel_ratio();
    assert_eq!(canvas.width(), (120.0 * dpr) as u32);
    assert_eq!(canvas.height(), (80.0 * dpr) as u32);
}

#[wasm_bindgen_test]
fn surface_accepts_every_paint_kind() {
    let (container, canvas) = fixture(200, 100);
    let mut surface = Canvas2dSurface::new(canvas).unwrap();
    surface.sync_size(&container);
    surface.clear();
    surface.set_blend(BlendMode::Screen);
    surface.fill_circle(
        Vec2::new(50.0, 50.0),
        10.0,
        &Paint::Solid(Color::hsla(48.0, 100.0, 60.0, 0.5)),
    );
    // a negative radius must not throw out of the surface
    surface.stroke_circle(
        Vec2::new(50.0, 50.0),
        -4.0,
        2.0,
        &Paint::Solid(Color::rgba(255, 255, 255, 1.0)),
    );
    surface.fill_polygon(&[Vec2::ZERO, Vec2::X], &Paint::Solid(Color::TRANSPARENT));
    surface.set_blend(BlendMode::SourceOver);

    let mut field = RippleField::new(RippleConfig::default(), 1).unwrap();
    field.spawn(Vec2::new(20.0, 20.0));
    field.tick(0.3);
    field.draw(&mut surface);
}

#[wasm_bindgen_test]
fn ripple_border_attaches_and_disposes() {
    let (container, canvas) = fixture(160, 90);
    let mut border = RippleBorder::attach(container, canvas, None, None, 7).unwrap();
    assert_eq!(border.live_ripples(), 0);
    border.dispose();
    border.dispose();
}

#[wasm_bindgen_test]
fn ripple_border_writes_its_filter_nodes() {
    let (container, canvas) = fixture(160, 90);
    let document = dom::window_document().unwrap();
    let turbulence = document.create_element("feTurbulence").unwrap();
    let displacement = document.create_element("feDisplacementMap").unwrap();
    let border = RippleBorder::attach(
        container,
        canvas,
        Some(turbulence),
        Some(displacement),
        9,
    )
    .unwrap();
    let filter = border.border_filter().to_vec();
    assert_eq!(filter.len(), 3);
    assert_eq!(filter[2], 4.0);
}

#[wasm_bindgen_test]
async fn container_resize_without_window_resize_syncs_the_canvas() {
    let (container, host) = ripple_host(120, 80);
    let size = host.surface_size().unwrap();
    assert_eq!((size.width, size.height), (120, 80));

    dom::set_style(&container, "width", "200px");
    dom::set_style(&container, "height", "60px");
    for _ in 0..3 {
        next_frame().await;
    }
    let size = host.surface_size().unwrap();
    assert_eq!((size.width, size.height), (200, 60));
}

#[wasm_bindgen_test]
fn hidden_host_ignores_pointer_wakeups() {
    let (container, host) = ripple_host(160, 90);
    host.set_visible(false);
    assert!(!host.is_running());

    let enter = web::MouseEvent::new("pointerenter").unwrap();
    container.dispatch_event(&enter).unwrap();
    assert!(!host.is_running());
    host.with_task_mut(|field| field.set_active(true));
    assert!(!host.is_running());

    host.set_visible(true);
    assert!(host.is_running());
}

#[wasm_bindgen_test]
fn staggered_reveal_is_exported_for_the_page() {
    assert_eq!(staggered_reveal(0.25, 0.30, 0.20, 0, 0.2, 3.0), 0.0);
    let first = staggered_reveal(0.36, 0.30, 0.20, 0, 0.2, 3.0);
    let second = staggered_reveal(0.36, 0.30, 0.20, 1, 0.2, 3.0);
    assert!(first > second);
    assert_eq!(staggered_reveal(0.50, 0.30, 0.20, 1, 0.2, 3.0), 1.0);
}
