//! Hover card: wave overlay plus pointer tilt, driven as one frame task.

use glam::Vec2;

use crate::driver::FrameTask;
use crate::error::MotionResult;
use crate::pointer::{to_uv, PointerEvent};
use crate::surface::{RasterSurface, SurfaceSize};
use crate::tilt::{CardTilt, TiltConfig, TiltPose};
use crate::waves::{TurbulenceParams, WaveFieldConfig, WaveLayerField};

pub struct WaveCardFx {
    waves: WaveLayerField,
    tilt: CardTilt,
    hovered: bool,
    /// Seconds since the last hover began; drives the card filter keyframes.
    hover_time: f32,
}

impl WaveCardFx {
    pub fn new(waves: WaveFieldConfig, tilt: TiltConfig, seed: u64) -> MotionResult<Self> {
        Ok(Self {
            waves: WaveLayerField::new(waves, seed)?,
            tilt: CardTilt::new(tilt)?,
            hovered: false,
            hover_time: 0.0,
        })
    }

    pub fn waves(&self) -> &WaveLayerField {
        &self.waves
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn pose(&self) -> TiltPose {
        self.tilt.pose()
    }

    /// Distortion applied to the card content.
    pub fn card_filter(&self) -> TurbulenceParams {
        TurbulenceParams::card(self.hover_time, self.hovered)
    }

    /// Distortion applied to the card image.
    pub fn image_filter(&self) -> TurbulenceParams {
        self.waves.turbulence()
    }

    fn enter(&mut self, uv: Vec2) {
        self.hovered = true;
        self.hover_time = 0.0;
        self.waves.set_active(true);
        self.tilt.set_hovered(true);
        self.tilt.set_pointer_uv(uv);
    }

    fn leave(&mut self) {
        self.hovered = false;
        self.waves.set_active(false);
        self.tilt.set_hovered(false);
    }
}

impl FrameTask for WaveCardFx {
    fn handle_pointer(&mut self, event: PointerEvent, size: SurfaceSize) {
        let size = size.as_vec2();
        match event {
            PointerEvent::Enter(p) => self.enter(to_uv(p, size)),
            PointerEvent::Move(p) => {
                let uv = to_uv(p, size);
                if !self.hovered {
                    self.enter(uv);
                }
                self.tilt.set_pointer_uv(uv);
                self.waves.pointer_move(uv);
            }
            PointerEvent::Leave => self.leave(),
        }
    }

    fn update(&mut self, dt: f32) {
        if self.hovered {
            self.hover_time += dt;
        }
        self.waves.tick(dt);
        self.tilt.step(dt);
    }

    fn draw(&mut self, surface: &mut dyn RasterSurface) {
        self.waves.draw(surface);
    }

    /// Keeps running after hover ends until the tilt has settled.
    fn is_idle(&self) -> bool {
        !self.waves.is_active() && self.tilt.is_settled()
    }
}
