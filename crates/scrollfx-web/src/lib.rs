#![cfg(target_arch = "wasm32")]
//! Browser bindings: scroll-driven scene props for the JS renderer, plus the
//! canvas ripple border and wave card effects.

pub mod canvas;
pub mod dom;
pub mod events;
pub mod host;
pub mod input;
pub mod scheduler;

use js_sys::Float32Array;
use scrollfx_core::{
    CameraConfig, CameraPath, CameraRig, RippleConfig, RippleField, SceneProps,
    SceneTimeline, SectionLayout, TiltConfig, TurbulenceParams, WaveCardFx, WaveFieldConfig,
};
use wasm_bindgen::prelude::*;
use web_sys as web;

use crate::host::EffectHost;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("scrollfx-web starting");
    Ok(())
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Scroll choreography for one scene: timeline, smoothed camera and
/// section fades.
#[wasm_bindgen]
pub struct ScrollScene {
    timeline: SceneTimeline,
    rig: CameraRig,
    sections: SectionLayout,
    section_buf: Vec<f32>,
}

#[wasm_bindgen]
impl ScrollScene {
    /// `experience` selects the single-section timeline; otherwise the
    /// full-page journey.
    #[wasm_bindgen(constructor)]
    pub fn new(experience: bool) -> Result<ScrollScene, JsValue> {
        let (timeline, path) = if experience {
            (SceneTimeline::experience(), CameraPath::experience())
        } else {
            (SceneTimeline::journey(), CameraPath::journey())
        };
        let mut rig = CameraRig::new(path, CameraConfig::default()).map_err(js_err)?;
        rig.reset(0.0);
        let sections = SectionLayout::site();
        let section_buf = vec![0.0; sections.len()];
        log::info!(
            "scroll scene ready ({})",
            if experience { "experience" } else { "journey" }
        );
        Ok(Self {
            timeline,
            rig,
            sections,
            section_buf,
        })
    }

    /// Snap the camera to `progress`, e.g. after a page reload mid-scroll.
    pub fn reset(&mut self, progress: f32) {
        self.rig.reset(progress);
    }

    /// Packed scene props for this frame; see `ScenePropsPacked` for layout.
    pub fn frame(&mut self, progress: f32, elapsed: f32, dt: f32) -> Float32Array {
        let state = self.timeline.evaluate(progress);
        let camera = self.rig.update(progress, dt);
        let props = SceneProps::compose(&state, camera, progress, elapsed);
        Float32Array::from(props.pack().as_floats())
    }

    pub fn section_opacities(&mut self, progress: f32) -> Float32Array {
        self.sections.opacities_into(progress, &mut self.section_buf);
        Float32Array::from(&self.section_buf[..])
    }
}

#[wasm_bindgen]
pub fn page_progress(scroll_y: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    scrollfx_core::page_progress(scroll_y, scroll_height, viewport_height)
}

#[wasm_bindgen]
pub fn section_progress(rect_top: f32, section_height: f32, viewport_height: f32) -> f32 {
    scrollfx_core::section_progress(rect_top, section_height, viewport_height)
}

/// Opacity of the `index`-th staggered item in a section spanning
/// `[start, start + len]`.
#[wasm_bindgen]
pub fn staggered_reveal(
    progress: f32,
    start: f32,
    len: f32,
    index: u32,
    stagger: f32,
    gain: f32,
) -> f32 {
    scrollfx_core::staggered_reveal(progress, start, len, index as usize, stagger, gain)
}

fn write_filter(
    filter: &TurbulenceParams,
    turbulence: Option<&web::Element>,
    displacement: Option<&web::Element>,
) {
    if let Some(el) = turbulence {
        dom::set_attr(el, "baseFrequency", &filter.frequency_attr());
    }
    if let Some(el) = displacement {
        dom::set_attr(el, "scale", &format!("{:.3}", filter.scale));
    }
}

fn filter_floats(f: TurbulenceParams) -> Float32Array {
    Float32Array::from(&[f.base_frequency[0], f.base_frequency[1], f.scale][..])
}

/// Golden ripples spawned along the border of a hovered element.
#[wasm_bindgen]
pub struct RippleBorder {
    inner: EffectHost<RippleField>,
}

#[wasm_bindgen]
impl RippleBorder {
    /// `turbulence` and `displacement` are the border's `feTurbulence` and
    /// `feDisplacementMap` nodes; both are optional.
    pub fn attach(
        container: web::HtmlElement,
        canvas: web::HtmlCanvasElement,
        turbulence: Option<web::Element>,
        displacement: Option<web::Element>,
        seed: u32,
    ) -> Result<RippleBorder, JsValue> {
        let field = RippleField::new(RippleConfig::default(), seed as u64).map_err(js_err)?;
        let after: Option<host::AfterFrame<RippleField>> =
            if turbulence.is_some() || displacement.is_some() {
                Some(Box::new(move |field: &RippleField| {
                    write_filter(
                        &field.border_filter(),
                        turbulence.as_ref(),
                        displacement.as_ref(),
                    );
                }))
            } else {
                None
            };
        let inner = EffectHost::attach(container, canvas, field, after).map_err(js_err)?;
        Ok(Self { inner })
    }

    pub fn set_active(&mut self, active: bool) {
        self.inner.with_task_mut(|field| field.set_active(active));
    }

    pub fn set_visible(&self, visible: bool) {
        self.inner.set_visible(visible);
    }

    pub fn live_ripples(&self) -> usize {
        self.inner.with_task(|field| field.len()).unwrap_or(0)
    }

    /// `[base_frequency_x, base_frequency_y, scale]` for the border filter.
    pub fn border_filter(&self) -> Float32Array {
        let f = self
            .inner
            .with_task(|field| field.border_filter())
            .unwrap_or(TurbulenceParams::OFF);
        filter_floats(f)
    }

    pub fn dispose(&mut self) {
        self.inner.dispose();
    }
}

/// Hover card with wave overlay, pointer tilt and SVG displacement.
#[wasm_bindgen]
pub struct WaveCard {
    inner: EffectHost<WaveCardFx>,
}

#[wasm_bindgen]
impl WaveCard {
    /// `turbulence` and `displacement` are the card's `feTurbulence` and
    /// `feDisplacementMap` nodes; both are optional.
    pub fn attach(
        container: web::HtmlElement,
        canvas: web::HtmlCanvasElement,
        turbulence: Option<web::Element>,
        displacement: Option<web::Element>,
        seed: u32,
    ) -> Result<WaveCard, JsValue> {
        let card = WaveCardFx::new(WaveFieldConfig::default(), TiltConfig::default(), seed as u64)
            .map_err(js_err)?;
        let target = container.clone();
        let after: host::AfterFrame<WaveCardFx> = Box::new(move |card: &WaveCardFx| {
            write_filter(
                &card.image_filter(),
                turbulence.as_ref(),
                displacement.as_ref(),
            );
            let pose = card.pose();
            dom::set_style(
                &target,
                "transform",
                &format!(
                    "perspective(1000px) rotateX({:.3}deg) rotateY({:.3}deg)",
                    pose.rotate_x, pose.rotate_y
                ),
            );
        });
        let inner = EffectHost::attach(container, canvas, card, Some(after)).map_err(js_err)?;
        Ok(Self { inner })
    }

    pub fn set_visible(&self, visible: bool) {
        self.inner.set_visible(visible);
    }

    /// `[rotate_x_deg, rotate_y_deg, wave_intensity]`.
    pub fn tilt(&self) -> Float32Array {
        let pose = self.inner.with_task(|card| card.pose()).unwrap_or_default();
        Float32Array::from(&[pose.rotate_x, pose.rotate_y, pose.wave_intensity][..])
    }

    /// `[base_frequency_x, base_frequency_y, scale]` for the card content filter.
    pub fn card_filter(&self) -> Float32Array {
        let f = self
            .inner
            .with_task(|card| card.card_filter())
            .unwrap_or(TurbulenceParams::OFF);
        filter_floats(f)
    }

    pub fn dispose(&mut self) {
        self.inner.dispose();
    }
}

