//! Camera target from scroll progress, plus the smoothed value actually
//! applied to the scene each frame.

use glam::Vec2;

use crate::constants::{
    CAMERA_LAG_RATE, CAMERA_RETARGET_EPSILON, CAMERA_SNAP_EPSILON, CAMERA_TWEEN_SEC,
    REFERENCE_FPS,
};
use crate::ease::Ease;
use crate::error::{MotionError, MotionResult};
use crate::piecewise::{Piecewise, Segment, TrackValue};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraTarget {
    pub y: f32,
    pub z: f32,
}

impl CameraTarget {
    pub const fn new(y: f32, z: f32) -> Self {
        Self { y, z }
    }

    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    /// Chebyshev distance; both axes share units.
    #[inline]
    pub fn distance(self, other: Self) -> f32 {
        (self.y - other.y).abs().max((self.z - other.z).abs())
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.y, self.z)
    }
}

impl TrackValue for CameraTarget {
    fn max_jump(&self, other: &Self) -> (&'static str, f32) {
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        if dy >= dz {
            ("camera_y", dy)
        } else {
            ("camera_z", dz)
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraPath {
    track: Piecewise<CameraTarget>,
}

impl CameraPath {
    pub fn new(segments: Vec<Segment<CameraTarget>>) -> MotionResult<Self> {
        Ok(Self {
            track: Piecewise::new(segments)?,
        })
    }

    /// Dolly in, descend with the object, pull back while it falls, settle.
    pub fn journey() -> Self {
        Self {
            track: Piecewise::new_unchecked(vec![
                Segment::new("dolly", 0.0, 0.15, |t| CameraTarget::new(0.0, 8.0 - 1.5 * t)),
                Segment::new("descend", 0.15, 0.50, |t| {
                    CameraTarget::new(-1.05 * t, 6.5 - 0.5 * t)
                }),
                Segment::new("follow", 0.50, 0.85, |t| {
                    CameraTarget::new(-1.05 - 2.8 * t, 6.0 + 0.7 * t)
                }),
                Segment::new("settle", 0.85, 1.0, |t| {
                    CameraTarget::new(-3.85 - 0.15 * t, 6.7 + 0.3 * t)
                }),
            ]),
        }
    }

    pub fn experience() -> Self {
        Self {
            track: Piecewise::new_unchecked(vec![
                Segment::new("dolly", 0.0, 0.2, |t| CameraTarget::new(0.0, 6.0 - t)),
                Segment::new("descend", 0.2, 0.6, |t| CameraTarget::new(-0.6 * t, 5.0)),
                Segment::new("follow", 0.6, 0.8, |t| CameraTarget::new(-0.6 - 0.4 * t, 5.0)),
                Segment::new("exit", 0.8, 1.0, |t| {
                    CameraTarget::new(-1.0 - 3.0 * t, 5.0 + 2.0 * t)
                }),
            ]),
        }
    }

    pub fn target(&self, progress: f32) -> CameraTarget {
        self.track.sample(progress)
    }

    pub fn segments(&self) -> &[Segment<CameraTarget>] {
        self.track.segments()
    }
}

impl Default for CameraPath {
    fn default() -> Self {
        Self::journey()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraSmoothing {
    /// Move `rate` of the remaining distance per reference frame.
    Lag { rate: f32 },
    /// Restart a fixed-length eased tween whenever the target moves.
    Tween { duration: f32, ease: Ease },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    pub smoothing: CameraSmoothing,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: CameraSmoothing::Lag {
                rate: CAMERA_LAG_RATE,
            },
        }
    }
}

impl CameraConfig {
    pub fn tween() -> Self {
        Self {
            smoothing: CameraSmoothing::Tween {
                duration: CAMERA_TWEEN_SEC,
                ease: Ease::OutQuad,
            },
        }
    }

    pub fn validate(&self) -> MotionResult<()> {
        match self.smoothing {
            CameraSmoothing::Lag { rate } if !(rate > 0.0 && rate <= 1.0) => Err(
                MotionError::config(format!("camera lag rate must be in (0, 1], got {rate}")),
            ),
            CameraSmoothing::Tween { duration, .. } if !(duration >= 0.0 && duration.is_finite()) => {
                Err(MotionError::config(format!(
                    "camera tween duration must be finite and >= 0, got {duration}"
                )))
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    from: CameraTarget,
    to: CameraTarget,
    elapsed: f32,
}

/// Owns the smoothed camera value. Call [`CameraRig::update`] once per frame.
#[derive(Clone, Debug)]
pub struct CameraRig {
    path: CameraPath,
    config: CameraConfig,
    current: CameraTarget,
    target: CameraTarget,
    tween: Option<Tween>,
}

impl CameraRig {
    pub fn new(path: CameraPath, config: CameraConfig) -> MotionResult<Self> {
        config.validate()?;
        let start = path.target(0.0);
        Ok(Self {
            path,
            config,
            current: start,
            target: start,
            tween: None,
        })
    }

    /// Jump straight to the target for `progress` (initial placement).
    pub fn reset(&mut self, progress: f32) {
        self.target = self.path.target(progress);
        self.current = self.target;
        self.tween = None;
    }

    pub fn update(&mut self, progress: f32, dt: f32) -> CameraTarget {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let target = self.path.target(progress);
        match self.config.smoothing {
            CameraSmoothing::Lag { rate } => {
                let steps = dt * REFERENCE_FPS;
                let alpha = 1.0 - (1.0 - rate).powf(steps);
                self.current = self.current.lerp(target, alpha);
                if self.current.distance(target) < CAMERA_SNAP_EPSILON {
                    self.current = target;
                }
            }
            CameraSmoothing::Tween { duration, ease } => {
                let retarget = target.distance(self.target) > CAMERA_RETARGET_EPSILON;
                if retarget || (self.tween.is_none() && self.current != target) {
                    self.tween = Some(Tween {
                        from: self.current,
                        to: target,
                        elapsed: 0.0,
                    });
                }
                if let Some(tw) = self.tween.as_mut() {
                    tw.elapsed += dt;
                    let u = if duration <= 0.0 {
                        1.0
                    } else {
                        tw.elapsed / duration
                    };
                    if u >= 1.0 {
                        self.current = tw.to;
                        self.tween = None;
                    } else {
                        self.current = tw.from.lerp(tw.to, ease.apply(u));
                    }
                }
            }
        }
        self.target = target;
        self.current
    }

    pub fn current(&self) -> CameraTarget {
        self.current
    }

    pub fn target(&self) -> CameraTarget {
        self.target
    }

    pub fn is_settled(&self) -> bool {
        self.tween.is_none() && self.current == self.target
    }

    pub fn path(&self) -> &CameraPath {
        &self.path
    }
}
