//! Spring-damped 3D card tilt that follows the pointer.

use glam::Vec2;

use crate::constants::*;
use crate::error::{MotionError, MotionResult};

/// Damped harmonic oscillator pulled toward `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring1D {
    pub value: f32,
    pub velocity: f32,
    pub target: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring1D {
    pub fn new(value: f32, stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping,
            mass,
        }
    }

    /// Semi-implicit Euler in sub-steps no longer than
    /// [`SPRING_MAX_SUBSTEP_SEC`] so stiff springs stay stable at low frame rates.
    /// `dt` is capped at [`MAX_FRAME_DT`].
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) || self.is_settled() {
            return;
        }
        let dt = dt.min(MAX_FRAME_DT);
        let n = (dt / SPRING_MAX_SUBSTEP_SEC).ceil().max(1.0);
        let h = dt / n;
        for _ in 0..n as u32 {
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SPRING_REST_EPSILON
            && self.velocity.abs() < SPRING_REST_EPSILON
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Maximum rotation in degrees at the card edges.
    pub intensity_deg: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
    pub wave_stiffness: f32,
    pub wave_damping: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            intensity_deg: TILT_INTENSITY_DEG,
            stiffness: TILT_STIFFNESS,
            damping: TILT_DAMPING,
            mass: TILT_MASS,
            wave_stiffness: WAVE_INTENSITY_STIFFNESS,
            wave_damping: WAVE_INTENSITY_DAMPING,
        }
    }
}

impl TiltConfig {
    pub fn validate(&self) -> MotionResult<()> {
        let positive = [
            self.stiffness,
            self.damping,
            self.mass,
            self.wave_stiffness,
            self.wave_damping,
        ];
        if positive.iter().any(|v| !(*v > 0.0) || !v.is_finite()) {
            return Err(MotionError::config("tilt spring parameters must be positive"));
        }
        if !self.intensity_deg.is_finite() {
            return Err(MotionError::config("tilt intensity must be finite"));
        }
        Ok(())
    }
}

/// Current card orientation, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltPose {
    pub rotate_x: f32,
    pub rotate_y: f32,
    /// Overlay strength in `[0, 1]`, springs to 1 while hovered.
    pub wave_intensity: f32,
}

#[derive(Clone, Debug)]
pub struct CardTilt {
    intensity: f32,
    rotate_x: Spring1D,
    rotate_y: Spring1D,
    wave: Spring1D,
}

impl CardTilt {
    pub fn new(config: TiltConfig) -> MotionResult<Self> {
        config.validate()?;
        let spring = || Spring1D::new(0.0, config.stiffness, config.damping, config.mass);
        Ok(Self {
            intensity: config.intensity_deg,
            rotate_x: spring(),
            rotate_y: spring(),
            wave: Spring1D::new(0.0, config.wave_stiffness, config.wave_damping, 1.0),
        })
    }

    /// Top edge tilts toward the viewer, right edge away.
    pub fn set_pointer_uv(&mut self, uv: Vec2) {
        let uv = uv.clamp(Vec2::ZERO, Vec2::ONE);
        self.rotate_x.target = self.intensity * (1.0 - 2.0 * uv.y);
        self.rotate_y.target = self.intensity * (2.0 * uv.x - 1.0);
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.wave.target = if hovered { 1.0 } else { 0.0 };
        if !hovered {
            self.set_pointer_uv(Vec2::splat(0.5));
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.rotate_x.step(dt);
        self.rotate_y.step(dt);
        self.wave.step(dt);
    }

    pub fn pose(&self) -> TiltPose {
        TiltPose {
            rotate_x: self.rotate_x.value,
            rotate_y: self.rotate_y.value,
            wave_intensity: self.wave.value.clamp(0.0, 1.0),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.rotate_x.is_settled() && self.rotate_y.is_settled() && self.wave.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_full_intensity() {
        let mut tilt = CardTilt::new(TiltConfig::default()).unwrap();
        tilt.set_pointer_uv(Vec2::new(1.0, 0.0));
        assert_eq!(tilt.rotate_x.target, TILT_INTENSITY_DEG);
        assert_eq!(tilt.rotate_y.target, TILT_INTENSITY_DEG);
        tilt.set_pointer_uv(Vec2::new(0.0, 1.0));
        assert_eq!(tilt.rotate_x.target, -TILT_INTENSITY_DEG);
        assert_eq!(tilt.rotate_y.target, -TILT_INTENSITY_DEG);
    }

    #[test]
    fn spring_survives_a_long_frame() {
        let mut s = Spring1D::new(0.0, TILT_STIFFNESS, TILT_DAMPING, TILT_MASS);
        s.target = 10.0;
        s.step(0.25);
        assert!(s.value.is_finite());
        assert!(s.value.abs() < 20.0);
    }

    #[test]
    fn huge_steps_are_capped_to_one_long_frame() {
        let mut capped = Spring1D::new(0.0, TILT_STIFFNESS, TILT_DAMPING, TILT_MASS);
        let mut huge = capped;
        capped.target = 10.0;
        huge.target = 10.0;
        capped.step(MAX_FRAME_DT);
        huge.step(1.0e6);
        assert_eq!(huge, capped);
        huge.step(f32::INFINITY);
        assert!(huge.value.is_finite());
    }

    #[test]
    fn rejects_zero_mass() {
        let cfg = TiltConfig {
            mass: 0.0,
            ..TiltConfig::default()
        };
        assert!(CardTilt::new(cfg).is_err());
    }
}
