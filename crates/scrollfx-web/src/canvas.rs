//! `RasterSurface` over a 2D canvas context.
//!
//! The backing store is sized in device pixels and the context carries a
//! `dpr` scale transform, so callers work in CSS pixels throughout.

use std::f64::consts::TAU;

use anyhow::anyhow;
use glam::Vec2;
use scrollfx_core::{BlendMode, Paint, RasterSurface, Stops, SurfaceSize};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::dom;

pub struct Canvas2dSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    size: SurfaceSize,
    dpr: f64,
    blend: BlendMode,
}

impl Canvas2dSurface {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow!(format!("{:?}", e)))?
            .ok_or_else(|| anyhow!("canvas has no 2d context"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow!(format!("{:?}", e)))?;
        Ok(Self {
            canvas,
            ctx,
            size: SurfaceSize::default(),
            dpr: 1.0,
            blend: BlendMode::SourceOver,
        })
    }

    /// Match the backing store to `container`. Resizing a canvas resets its
    /// context state, so the transform is reapplied every time.
    pub fn sync_size(&mut self, container: &web::Element) {
        let dpr = dom::device_pixel_ratio();
        let size = dom::sync_canvas_backing_size(&self.canvas, container, dpr);
        if let Err(e) = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0) {
            log::debug!("setTransform failed: {e:?}");
        }
        if size != self.size || dpr != self.dpr {
            log::debug!(
                "canvas surface {}x{} css px at dpr {dpr}",
                size.width,
                size.height
            );
        }
        self.size = size;
        self.dpr = dpr;
        self.blend = BlendMode::SourceOver;
    }

    fn style(&self, paint: &Paint) -> Result<JsValue, JsValue> {
        match paint {
            Paint::Solid(color) => Ok(JsValue::from_str(&color.css())),
            Paint::Radial(g) => {
                let grad = self.ctx.create_radial_gradient(
                    g.inner_center.x as f64,
                    g.inner_center.y as f64,
                    g.inner_radius.max(0.0) as f64,
                    g.outer_center.x as f64,
                    g.outer_center.y as f64,
                    g.outer_radius.max(0.0) as f64,
                )?;
                add_stops(&grad, &g.stops)?;
                Ok(grad.into())
            }
            Paint::Linear(g) => {
                let grad = self.ctx.create_linear_gradient(
                    g.from.x as f64,
                    g.from.y as f64,
                    g.to.x as f64,
                    g.to.y as f64,
                );
                add_stops(&grad, &g.stops)?;
                Ok(grad.into())
            }
        }
    }

    fn arc(&self, center: Vec2, radius: f32) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            TAU,
        )
    }

    fn try_stroke_circle(
        &mut self,
        center: Vec2,
        radius: f32,
        width: f32,
        paint: &Paint,
    ) -> Result<(), JsValue> {
        let style = self.style(paint)?;
        self.ctx.set_stroke_style(&style);
        self.ctx.set_line_width(width as f64);
        self.arc(center, radius)?;
        self.ctx.stroke();
        Ok(())
    }

    fn try_fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) -> Result<(), JsValue> {
        let style = self.style(paint)?;
        self.ctx.set_fill_style(&style);
        self.arc(center, radius)?;
        self.ctx.fill();
        Ok(())
    }

    fn try_fill_polygon(&mut self, points: &[Vec2], paint: &Paint) -> Result<(), JsValue> {
        let style = self.style(paint)?;
        self.ctx.set_fill_style(&style);
        self.ctx.begin_path();
        let (first, rest) = match points.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.fill();
        Ok(())
    }
}

fn add_stops(grad: &web::CanvasGradient, stops: &Stops) -> Result<(), JsValue> {
    for stop in stops {
        grad.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.css())?;
    }
    Ok(())
}

impl RasterSurface for Canvas2dSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.size.width as f64,
            self.size.height as f64,
        );
    }

    fn set_blend(&mut self, mode: BlendMode) {
        if mode == self.blend {
            return;
        }
        match self.ctx.set_global_composite_operation(mode.css_name()) {
            Ok(()) => self.blend = mode,
            Err(e) => log::debug!("globalCompositeOperation failed: {e:?}"),
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, paint: &Paint) {
        if let Err(e) = self.try_stroke_circle(center, radius, width, paint) {
            log::debug!("stroke_circle failed: {e:?}");
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        if let Err(e) = self.try_fill_circle(center, radius, paint) {
            log::debug!("fill_circle failed: {e:?}");
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], paint: &Paint) {
        if points.len() < 3 {
            return;
        }
        if let Err(e) = self.try_fill_polygon(points, paint) {
            log::debug!("fill_polygon failed: {e:?}");
        }
    }
}
