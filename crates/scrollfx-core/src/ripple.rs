//! Pointer-driven ripples along an element's border.
//!
//! Ripples live in a dense `Vec` and are removed with `swap_remove`, so a
//! frame never allocates once the vector has grown to its working size.
//! Render order does not matter because the rings are composited with
//! `screen` blending.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::smallvec;

use crate::constants::*;
use crate::driver::FrameTask;
use crate::error::{MotionError, MotionResult};
use crate::pointer::{is_near_border, PointerEvent};
use crate::surface::{
    BlendMode, Color, ColorStop, Paint, RadialGradient, RasterSurface, SurfaceSize,
};
use crate::waves::TurbulenceParams;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub center: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub opacity: f32,
    /// Pixels per reference frame.
    pub growth_speed: f32,
    pub layer: usize,
    /// Spawn order; lower is older.
    pub seq: u64,
}

impl Ripple {
    #[inline]
    pub fn is_expired(&self, opacity_epsilon: f32) -> bool {
        self.opacity < opacity_epsilon || self.radius > self.max_radius
    }

    /// Upper bound on reference frames until removal, whichever of the
    /// radius or opacity limit is hit first.
    pub fn frames_to_expire(&self, decay: f32, opacity_epsilon: f32) -> u32 {
        let by_radius = ((self.max_radius - self.radius) / self.growth_speed).ceil() + 1.0;
        let by_opacity = if self.opacity < opacity_epsilon {
            0.0
        } else {
            ((opacity_epsilon / self.opacity).ln() / decay.ln()).ceil() + 1.0
        };
        by_radius.min(by_opacity).max(0.0) as u32
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RippleConfig {
    pub layers: usize,
    pub base_max_radius: f32,
    pub max_radius_per_layer: f32,
    pub max_radius_jitter: f32,
    pub base_opacity: f32,
    pub opacity_per_layer: f32,
    pub base_speed: f32,
    pub speed_per_layer: f32,
    pub speed_jitter: f32,
    /// Opacity multiplier per reference frame.
    pub decay: f32,
    pub opacity_epsilon: f32,
    pub border_padding: f32,
    pub min_spawn_distance: f32,
    pub enter_burst: usize,
    pub enter_stagger_sec: f32,
    pub enter_jitter: f32,
    pub max_live: usize,
    pub max_pending: usize,
    pub hue: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            layers: RIPPLE_LAYERS,
            base_max_radius: RIPPLE_BASE_MAX_RADIUS,
            max_radius_per_layer: RIPPLE_MAX_RADIUS_PER_LAYER,
            max_radius_jitter: RIPPLE_MAX_RADIUS_JITTER,
            base_opacity: RIPPLE_BASE_OPACITY,
            opacity_per_layer: RIPPLE_OPACITY_PER_LAYER,
            base_speed: RIPPLE_BASE_SPEED,
            speed_per_layer: RIPPLE_SPEED_PER_LAYER,
            speed_jitter: RIPPLE_SPEED_JITTER,
            decay: RIPPLE_DECAY_PER_FRAME,
            opacity_epsilon: RIPPLE_OPACITY_EPSILON,
            border_padding: RIPPLE_BORDER_PADDING,
            min_spawn_distance: RIPPLE_MIN_SPAWN_DISTANCE,
            enter_burst: RIPPLE_ENTER_BURST,
            enter_stagger_sec: RIPPLE_ENTER_STAGGER_SEC,
            enter_jitter: RIPPLE_ENTER_JITTER,
            max_live: RIPPLE_MAX_LIVE,
            max_pending: RIPPLE_MAX_PENDING,
            hue: RIPPLE_HUE,
        }
    }
}

impl RippleConfig {
    /// Same tuning with every random amplitude set to zero.
    pub fn without_jitter(self) -> Self {
        Self {
            max_radius_jitter: 0.0,
            speed_jitter: 0.0,
            enter_jitter: 0.0,
            ..self
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        let bad = |msg: String| Err(MotionError::config(msg));
        if self.layers == 0 {
            return bad("ripple layers must be at least 1".into());
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return bad(format!("ripple decay must be in (0, 1), got {}", self.decay));
        }
        if self.opacity_epsilon <= 0.0 {
            return bad("ripple opacity epsilon must be positive".into());
        }
        let outer = self.layers as f32 - 1.0;
        if self.base_opacity - self.opacity_per_layer * outer <= 0.0 || self.base_opacity > 1.0 {
            return bad("ripple layer opacities must stay in (0, 1]".into());
        }
        if self.base_speed <= 0.0 || self.base_speed + self.speed_per_layer * outer <= 0.0 {
            return bad("ripple growth speed must be positive for every layer".into());
        }
        if self.base_max_radius <= 0.0 {
            return bad("ripple max radius must be positive".into());
        }
        let jitters = [self.max_radius_jitter, self.speed_jitter, self.enter_jitter];
        if jitters.iter().any(|j| *j < 0.0 || !j.is_finite()) {
            return bad("ripple jitter amplitudes must be finite and >= 0".into());
        }
        if self.max_live < self.layers {
            return bad(format!(
                "ripple cap {} cannot hold one {}-layer spawn",
                self.max_live, self.layers
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct PendingSpawn {
    due: f32,
    center: Vec2,
}

pub struct RippleField {
    config: RippleConfig,
    rng: StdRng,
    ripples: Vec<Ripple>,
    pending: Vec<PendingSpawn>,
    next_seq: u64,
    clock: f32,
    last_spawn: Option<Vec2>,
    hovered: bool,
    active: bool,
    evicted: u64,
}

impl RippleField {
    pub fn new(config: RippleConfig, seed: u64) -> MotionResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            ripples: Vec::with_capacity(config.max_live),
            pending: Vec::with_capacity(config.max_pending),
            next_seq: 0,
            clock: 0.0,
            last_spawn: None,
            hovered: false,
            active: true,
            evicted: 0,
        })
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    /// Emit one multi-layer ripple at `center`. Outer layers are larger,
    /// fainter and faster.
    pub fn spawn(&mut self, center: Vec2) {
        let c = self.config;
        for layer in 0..c.layers {
            let i = layer as f32;
            let max_radius = c.base_max_radius
                + i * c.max_radius_per_layer
                + self.rng.gen::<f32>() * c.max_radius_jitter;
            let growth_speed =
                c.base_speed + i * c.speed_per_layer + self.rng.gen::<f32>() * c.speed_jitter;
            let ripple = Ripple {
                center,
                radius: 0.0,
                max_radius,
                opacity: c.base_opacity - i * c.opacity_per_layer,
                growth_speed,
                layer,
                seq: self.next_seq,
            };
            self.next_seq += 1;
            self.push(ripple);
        }
    }

    fn push(&mut self, ripple: Ripple) {
        if self.ripples.len() >= self.config.max_live {
            let oldest = self
                .ripples
                .iter()
                .enumerate()
                .min_by_key(|(_, r)| r.seq)
                .map(|(i, _)| i);
            if let Some(i) = oldest {
                self.ripples.swap_remove(i);
                self.evicted += 1;
            }
        }
        self.ripples.push(ripple);
    }

    /// Entry burst: the first ripple now, the rest staggered, each jittered
    /// around the entry point.
    pub fn pointer_enter(&mut self, p: Vec2) {
        self.hovered = true;
        if !self.active {
            return;
        }
        for i in 0..self.config.enter_burst {
            let center = p + self.jitter();
            let delay = i as f32 * self.config.enter_stagger_sec;
            if delay <= 0.0 {
                self.spawn(center);
            } else {
                self.queue(PendingSpawn {
                    due: self.clock + delay,
                    center,
                });
            }
        }
    }

    /// Spawns when `p` is inside the border zone and the pointer has moved
    /// far enough since the last border spawn.
    pub fn pointer_move(&mut self, p: Vec2, size: Vec2) {
        if !self.active || !is_near_border(p, size, self.config.border_padding) {
            return;
        }
        let far_enough = self
            .last_spawn
            .map_or(true, |last| last.distance(p) > self.config.min_spawn_distance);
        if far_enough {
            self.spawn(p);
            self.last_spawn = Some(p);
        }
    }

    /// Live ripples keep running out; pending burst entries still fire.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.last_spawn = None;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Border displacement filter at the field's clock.
    pub fn border_filter(&self) -> TurbulenceParams {
        TurbulenceParams::border(self.clock, self.hovered)
    }

    /// Inactive fields ignore pointer input. Existing ripples finish.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.pending.clear();
        }
    }

    fn jitter(&mut self) -> Vec2 {
        let j = self.config.enter_jitter;
        Vec2::new(
            (self.rng.gen::<f32>() * 2.0 - 1.0) * j,
            (self.rng.gen::<f32>() * 2.0 - 1.0) * j,
        )
    }

    fn queue(&mut self, spawn: PendingSpawn) {
        if self.pending.len() >= self.config.max_pending {
            self.pending.remove(0);
        }
        self.pending.push(spawn);
    }

    /// Advance by `dt` seconds: fire due spawns, grow, decay and cull.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.clock += dt;

        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= self.clock {
                let due = self.pending.swap_remove(i);
                self.spawn(due.center);
            } else {
                i += 1;
            }
        }

        let steps = dt * REFERENCE_FPS;
        let fade = self.config.decay.powf(steps);
        let eps = self.config.opacity_epsilon;
        let mut i = 0;
        while i < self.ripples.len() {
            let r = &mut self.ripples[i];
            r.radius += r.growth_speed * steps;
            r.opacity *= fade;
            if r.is_expired(eps) {
                self.ripples.swap_remove(i);
            } else {
                i += 1;
            }
        }
    }

    pub fn for_each_live(&self, mut visit: impl FnMut(&Ripple)) {
        self.ripples.iter().for_each(|r| visit(r));
    }

    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Ripples dropped by the live-set cap since creation.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn clear(&mut self) {
        self.ripples.clear();
        self.pending.clear();
        self.last_spawn = None;
    }

    pub fn draw(&self, surface: &mut dyn RasterSurface) {
        if self.ripples.is_empty() {
            return;
        }
        surface.set_blend(BlendMode::Screen);
        let hue = self.config.hue;
        for r in &self.ripples {
            for w in 0..RIPPLE_RINGS {
                let ring_radius = r.radius - w as f32 * RIPPLE_RING_SPACING;
                if ring_radius <= 0.0 {
                    continue;
                }
                let o = r.opacity * (1.0 - w as f32 * RIPPLE_RING_FADE);
                let paint = Paint::Radial(RadialGradient::concentric(
                    r.center,
                    (ring_radius - RIPPLE_RING_HALF_WIDTH).max(0.0),
                    ring_radius + RIPPLE_RING_HALF_WIDTH,
                    smallvec![
                        ColorStop::new(0.0, Color::hsla(hue, 100.0, 50.0, 0.0)),
                        ColorStop::new(0.3, Color::hsla(hue, 100.0, 60.0, o * 0.4)),
                        ColorStop::new(0.5, Color::hsla(hue, 100.0, 70.0, o * 0.7)),
                        ColorStop::new(0.7, Color::hsla(hue, 100.0, 60.0, o * 0.4)),
                        ColorStop::new(1.0, Color::hsla(hue, 100.0, 50.0, 0.0)),
                    ],
                ));
                surface.stroke_circle(
                    r.center,
                    ring_radius,
                    RIPPLE_STROKE_BASE + r.layer as f32,
                    &paint,
                );
            }

            // off-centre highlight
            let highlight = Paint::Radial(RadialGradient {
                inner_center: r.center - Vec2::splat(r.radius * 0.3),
                inner_radius: 0.0,
                outer_center: r.center,
                outer_radius: r.radius * 0.6,
                stops: smallvec![
                    ColorStop::new(0.0, Color::hsla(hue, 100.0, 90.0, r.opacity * 0.3)),
                    ColorStop::new(1.0, Color::hsla(hue, 100.0, 50.0, 0.0)),
                ],
            });
            surface.fill_circle(r.center, r.radius * 0.4, &highlight);
        }
        surface.set_blend(BlendMode::SourceOver);
    }
}

impl FrameTask for RippleField {
    fn handle_pointer(&mut self, event: PointerEvent, size: SurfaceSize) {
        match event {
            PointerEvent::Enter(p) => self.pointer_enter(p),
            PointerEvent::Move(p) => self.pointer_move(p, size.as_vec2()),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    fn update(&mut self, dt: f32) {
        self.tick(dt);
    }

    fn draw(&mut self, surface: &mut dyn RasterSurface) {
        RippleField::draw(self, surface);
    }

    fn is_idle(&self) -> bool {
        self.ripples.is_empty() && self.pending.is_empty()
    }
}
