//! Time-driven wave layers drawn over a hovered card.
//!
//! Unlike ripples, the layers are not event driven: every active frame the
//! waterline of each layer is recomputed from elapsed time alone. Pointer
//! motion only adds short-lived disturbances that bend the waterline.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::{smallvec, SmallVec};

use crate::constants::*;
use crate::driver::FrameTask;
use crate::error::{MotionError, MotionResult};
use crate::pointer::{to_uv, PointerEvent};
use crate::surface::{
    Color, ColorStop, LinearGradient, Paint, RadialGradient, RasterSurface, SurfaceSize,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveLayer {
    /// Resting waterline as a fraction of the surface height.
    pub base_y_frac: f32,
    pub amplitude: f32,
    /// Radians per pixel.
    pub frequency: f32,
    /// Phase speed multiplier applied to the field clock.
    pub speed: f32,
    pub alpha: f32,
}

impl WaveLayer {
    pub const fn new(base_y_frac: f32, amplitude: f32, frequency: f32, speed: f32, alpha: f32) -> Self {
        Self {
            base_y_frac,
            amplitude,
            frequency,
            speed,
            alpha,
        }
    }

    /// Three-term harmonic sum at `x` for phase clock `tau`.
    #[inline]
    pub fn displacement(&self, x: f32, tau: f32) -> f32 {
        let (f, s, a) = (self.frequency, self.speed * tau, self.amplitude);
        (x * f + s).sin() * a
            + (x * f * 0.5 + s * 0.7).sin() * a * 0.5
            + (x * f * 1.5 + s * 1.3).sin() * a * 0.3
    }
}

pub const DEFAULT_WAVE_LAYERS: [WaveLayer; 4] = [
    WaveLayer::new(0.70, 15.0, 0.020, 1.5, 0.15),
    WaveLayer::new(0.75, 12.0, 0.025, 2.0, 0.20),
    WaveLayer::new(0.80, 10.0, 0.030, 2.5, 0.25),
    WaveLayer::new(0.85, 8.0, 0.035, 3.0, 0.30),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveDisturbance {
    pub center_uv: Vec2,
    pub age: f32,
    pub intensity: f32,
}

impl WaveDisturbance {
    /// Vertical offset this disturbance adds at pixel `p`.
    #[inline]
    pub fn offset(&self, p: Vec2, size: Vec2, gain: f32) -> f32 {
        let d = p.distance(self.center_uv * size);
        (d * 0.05 - self.age * 8.0).sin() * (-self.age * 2.0).exp() * self.intensity * gain
    }
}

/// Parameters for an SVG `feTurbulence` + `feDisplacementMap` pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurbulenceParams {
    pub base_frequency: [f32; 2],
    pub scale: f32,
}

impl TurbulenceParams {
    pub const OFF: TurbulenceParams = TurbulenceParams {
        base_frequency: [0.0, 0.0],
        scale: 0.0,
    };

    /// Continuous modulation driven by the filter clock `s`.
    pub fn image(s: f32) -> Self {
        Self {
            base_frequency: [
                0.008 + (s * 0.5).sin() * 0.003,
                0.012 + (s * 0.7).cos() * 0.004,
            ],
            scale: 20.0 + (s * 1.2).sin() * 8.0 + (s * 0.8).cos() * 5.0,
        }
    }

    /// Card distortion: frequency and scale loop through fixed keyframes.
    pub fn card(elapsed: f32, hovered: bool) -> Self {
        if !hovered {
            return Self::OFF;
        }
        let f = keyframes(&[0.01, 0.02, 0.015, 0.025, 0.01], 4.0, elapsed);
        Self {
            base_frequency: [f, f],
            scale: keyframes(&[5.0, 10.0, 8.0, 12.0, 5.0], 3.0, elapsed),
        }
    }

    /// Border shimmer: stronger displacement while hovered.
    pub fn border(elapsed: f32, hovered: bool) -> Self {
        Self {
            base_frequency: [
                keyframes(&[0.01, 0.02, 0.01], 8.0, elapsed),
                keyframes(&[0.01, 0.015, 0.01], 8.0, elapsed),
            ],
            scale: if hovered { 8.0 } else { 4.0 },
        }
    }

    /// `baseFrequency` attribute value.
    pub fn frequency_attr(&self) -> String {
        format!("{:.5} {:.5}", self.base_frequency[0], self.base_frequency[1])
    }
}

/// Evenly spaced keyframes looped over `period` seconds, linearly blended.
pub fn keyframes(values: &[f32], period: f32, t: f32) -> f32 {
    match values {
        [] => 0.0,
        [v] => *v,
        _ => {
            if period <= ZERO_SPAN_EPSILON || !t.is_finite() {
                return values[0];
            }
            let spans = (values.len() - 1) as f32;
            let phase = (t / period).rem_euclid(1.0) * spans;
            let i = (phase.floor() as usize).min(values.len() - 2);
            let local = phase - i as f32;
            values[i] + (values[i + 1] - values[i]) * local
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveFieldConfig {
    pub layers: SmallVec<[WaveLayer; 4]>,
    /// Phase units per second.
    pub time_scale: f32,
    pub sample_step: f32,
    pub reflection_radius: f32,
    pub filter_time_scale: f32,
    pub max_disturbances: usize,
    pub disturbance_lifetime: f32,
    pub spawn_chance: f64,
    pub disturbance_gain: f32,
    pub hue: f32,
}

impl Default for WaveFieldConfig {
    fn default() -> Self {
        Self {
            layers: SmallVec::from_slice(&DEFAULT_WAVE_LAYERS),
            time_scale: WAVE_TIME_SCALE,
            sample_step: WAVE_SAMPLE_STEP,
            reflection_radius: WAVE_REFLECTION_RADIUS,
            filter_time_scale: WAVE_FILTER_TIME_SCALE,
            max_disturbances: WAVE_DISTURBANCE_MAX,
            disturbance_lifetime: WAVE_DISTURBANCE_LIFETIME_SEC,
            spawn_chance: WAVE_DISTURBANCE_SPAWN_CHANCE,
            disturbance_gain: WAVE_DISTURBANCE_GAIN,
            hue: RIPPLE_HUE,
        }
    }
}

impl WaveFieldConfig {
    pub fn validate(&self) -> MotionResult<()> {
        if self.layers.is_empty() {
            return Err(MotionError::config("wave field needs at least one layer"));
        }
        if self.sample_step < 1.0 {
            return Err(MotionError::config(format!(
                "wave sample step must be >= 1 px, got {}",
                self.sample_step
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(MotionError::config("disturbance spawn chance must be in [0, 1]"));
        }
        if self.disturbance_lifetime <= 0.0 {
            return Err(MotionError::config("disturbance lifetime must be positive"));
        }
        Ok(())
    }
}

pub struct WaveLayerField {
    config: WaveFieldConfig,
    rng: StdRng,
    active: bool,
    elapsed: f32,
    filter_time: f32,
    disturbances: SmallVec<[WaveDisturbance; 8]>,
    scratch: Vec<Vec2>,
}

impl WaveLayerField {
    pub fn new(config: WaveFieldConfig, seed: u64) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            active: false,
            elapsed: 0.0,
            filter_time: 0.0,
            disturbances: SmallVec::new(),
            scratch: Vec::new(),
        })
    }

    pub fn config(&self) -> &WaveFieldConfig {
        &self.config
    }

    /// Hover gate. Deactivation drops every disturbance.
    pub fn set_active(&mut self, active: bool) {
        if self.active == active {
            return;
        }
        self.active = active;
        if !active {
            self.disturbances.clear();
        }
        log::debug!("wave field {}", if active { "activated" } else { "deactivated" });
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Pointer moved to `uv`; occasionally seeds a disturbance there.
    pub fn pointer_move(&mut self, uv: Vec2) {
        if !self.active || !self.rng.gen_bool(self.config.spawn_chance) {
            return;
        }
        if self.disturbances.len() >= self.config.max_disturbances {
            self.disturbances.remove(0);
        }
        let intensity = 0.5 + self.rng.gen::<f32>() * 0.5;
        self.disturbances.push(WaveDisturbance {
            center_uv: uv.clamp(Vec2::ZERO, Vec2::ONE),
            age: 0.0,
            intensity,
        });
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.elapsed += dt;
        self.filter_time += dt * self.config.filter_time_scale;
        let lifetime = self.config.disturbance_lifetime;
        for d in self.disturbances.iter_mut() {
            d.age += dt;
        }
        self.disturbances.retain(|d| d.age < lifetime);
    }

    /// Phase clock fed to [`WaveLayer::displacement`].
    pub fn tau(&self) -> f32 {
        self.elapsed * self.config.time_scale
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn disturbances(&self) -> &[WaveDisturbance] {
        &self.disturbances
    }

    pub fn turbulence(&self) -> TurbulenceParams {
        if self.active {
            TurbulenceParams::image(self.filter_time)
        } else {
            TurbulenceParams::OFF
        }
    }

    /// Waterline height of `layer` at `x` including disturbances.
    pub fn waterline_y(&self, layer: &WaveLayer, x: f32, size: Vec2) -> f32 {
        waterline_y(layer, x, size, self.tau(), &self.disturbances, self.config.disturbance_gain)
    }

    /// Reflection highlight centre; drifts slowly with the phase clock.
    pub fn reflection_center(&self, size: Vec2) -> Vec2 {
        let tau = self.tau();
        Vec2::new(
            size.x * 0.3 + (tau * 0.5).sin() * 20.0,
            size.y * 0.3 + (tau * 0.7).cos() * 15.0,
        )
    }

    /// Closed polygon for `layer`, written into the reused scratch buffer.
    pub fn layer_outline(&mut self, index: usize, size: Vec2) -> &[Vec2] {
        self.scratch.clear();
        let Some(layer) = self.config.layers.get(index).copied() else {
            return &self.scratch;
        };
        let tau = self.tau();
        let gain = self.config.disturbance_gain;
        let step = self.config.sample_step;
        self.scratch.push(Vec2::new(0.0, size.y));
        let mut x = 0.0;
        while x <= size.x {
            let y = waterline_y(&layer, x, size, tau, &self.disturbances, gain);
            self.scratch.push(Vec2::new(x, y));
            x += step;
        }
        self.scratch.push(Vec2::new(size.x, size.y));
        &self.scratch
    }

    pub fn draw(&mut self, surface: &mut dyn RasterSurface) {
        if !self.active {
            return;
        }
        let size = surface.size().as_vec2();
        let hue = self.config.hue;
        for i in 0..self.config.layers.len() {
            let layer = self.config.layers[i];
            let base = layer.base_y_frac * size.y;
            let paint = Paint::Linear(LinearGradient {
                from: Vec2::new(0.0, base - layer.amplitude),
                to: Vec2::new(0.0, size.y),
                stops: smallvec![
                    ColorStop::new(0.0, Color::hsla(hue, 100.0, 50.0, layer.alpha * 0.8)),
                    ColorStop::new(0.5, Color::hsla(hue, 100.0, 45.0, layer.alpha * 0.5)),
                    ColorStop::new(1.0, Color::hsla(hue, 100.0, 40.0, layer.alpha * 0.1)),
                ],
            });
            let outline = self.layer_outline(i, size);
            surface.fill_polygon(outline, &paint);
        }

        let center = self.reflection_center(size);
        let radius = self.config.reflection_radius;
        let reflection = Paint::Radial(RadialGradient::concentric(
            center,
            0.0,
            radius,
            smallvec![
                ColorStop::new(0.0, Color::rgba(255, 221, 0, 0.2)),
                ColorStop::new(0.5, Color::rgba(255, 221, 0, 0.05)),
                ColorStop::new(1.0, Color::rgba(255, 221, 0, 0.0)),
            ],
        ));
        surface.fill_circle(center, radius, &reflection);
    }
}

fn waterline_y(
    layer: &WaveLayer,
    x: f32,
    size: Vec2,
    tau: f32,
    disturbances: &[WaveDisturbance],
    gain: f32,
) -> f32 {
    let y = layer.base_y_frac * size.y + layer.displacement(x, tau);
    let p = Vec2::new(x, y);
    y + disturbances
        .iter()
        .map(|d| d.offset(p, size, gain))
        .sum::<f32>()
}

impl FrameTask for WaveLayerField {
    fn handle_pointer(&mut self, event: PointerEvent, size: SurfaceSize) {
        match event {
            PointerEvent::Enter(_) => self.set_active(true),
            PointerEvent::Move(p) => self.pointer_move(to_uv(p, size.as_vec2())),
            PointerEvent::Leave => self.set_active(false),
        }
    }

    fn update(&mut self, dt: f32) {
        self.tick(dt);
    }

    fn draw(&mut self, surface: &mut dyn RasterSurface) {
        WaveLayerField::draw(self, surface);
    }

    fn is_idle(&self) -> bool {
        !self.active
    }
}
