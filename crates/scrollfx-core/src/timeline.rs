//! Scroll progress → hero object animation state.
//!
//! The journey is a table of named segments (Entry, Growth, Peel, Bite,
//! Fall, Ground). Every formula is written so the value at the end of one
//! segment equals the value at the start of the next; [`Piecewise::new`]
//! verifies this when the table is built.

use std::f32::consts::PI;

use crate::error::MotionResult;
use crate::piecewise::{Piecewise, Segment, TrackValue};

/// Animation parameters for one progress value. Recomputed on every call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneState {
    pub scale: f32,
    pub position_y: f32,
    pub rotation_z: f32,
    /// Peel reveal in `[0, 1]`, never decreases with progress.
    pub peel_amount: f32,
    /// Bite reveal in `[0, 1]`, never decreases with progress.
    pub bite_amount: f32,
}

impl SceneState {
    pub const FIELDS: [&'static str; 5] = [
        "scale",
        "position_y",
        "rotation_z",
        "peel_amount",
        "bite_amount",
    ];

    #[inline]
    pub fn fields(&self) -> [f32; 5] {
        [
            self.scale,
            self.position_y,
            self.rotation_z,
            self.peel_amount,
            self.bite_amount,
        ]
    }
}

impl TrackValue for SceneState {
    fn max_jump(&self, other: &Self) -> (&'static str, f32) {
        let a = self.fields();
        let b = other.fields();
        let mut worst = (Self::FIELDS[0], 0.0_f32);
        for i in 0..a.len() {
            let d = (a[i] - b[i]).abs();
            if d > worst.1 {
                worst = (Self::FIELDS[i], d);
            }
        }
        worst
    }
}

// Fall segment: vertical drop with a wobble that dies out and is zero at
// both ends, so it never breaks boundary continuity.
const FALL_WOBBLE_AMPLITUDE: f32 = 0.15;
const FALL_WOBBLE_DECAY: f32 = 3.0;

#[inline]
fn decaying_wobble(t: f32, cycles: f32) -> f32 {
    FALL_WOBBLE_AMPLITUDE * (-FALL_WOBBLE_DECAY * t).exp() * (t * PI * cycles).sin()
}

#[derive(Clone, Debug)]
pub struct SceneTimeline {
    track: Piecewise<SceneState>,
}

impl SceneTimeline {
    pub fn new(segments: Vec<Segment<SceneState>>) -> MotionResult<Self> {
        Ok(Self {
            track: Piecewise::new(segments)?,
        })
    }

    /// Page-level journey with boundaries at 0.15 / 0.30 / 0.50 / 0.65 / 0.85.
    pub fn journey() -> Self {
        Self {
            track: Piecewise::new_unchecked(journey_segments()),
        }
    }

    /// Section-level variant with boundaries at 0.2 / 0.4 / 0.6 / 0.8.
    pub fn experience() -> Self {
        Self {
            track: Piecewise::new_unchecked(experience_segments()),
        }
    }

    pub fn evaluate(&self, progress: f32) -> SceneState {
        self.track.sample(progress)
    }

    pub fn segments(&self) -> &[Segment<SceneState>] {
        self.track.segments()
    }

    pub fn boundaries(&self) -> impl Iterator<Item = f32> + '_ {
        self.track.boundaries()
    }
}

impl Default for SceneTimeline {
    fn default() -> Self {
        Self::journey()
    }
}

pub fn journey_segments() -> Vec<Segment<SceneState>> {
    vec![
        Segment::new("entry", 0.0, 0.15, |t| SceneState {
            scale: 0.3 + t * 0.5,
            ..SceneState::default()
        }),
        Segment::new("growth", 0.15, 0.30, |t| SceneState {
            scale: 0.8 + t * 0.4,
            position_y: -0.5 * t,
            rotation_z: 0.3 * t,
            ..SceneState::default()
        }),
        Segment::new("peel", 0.30, 0.50, |t| SceneState {
            scale: 1.2,
            position_y: -0.5 - t,
            rotation_z: 0.3 + t * 0.2,
            peel_amount: t,
            bite_amount: 0.0,
        }),
        Segment::new("bite", 0.50, 0.65, |t| SceneState {
            scale: 1.2 - t * 0.2,
            position_y: -1.5 - t * 0.5,
            rotation_z: 0.5 - t * 0.3,
            peel_amount: 1.0,
            bite_amount: t,
        }),
        Segment::new("fall", 0.65, 0.85, |t| SceneState {
            scale: 1.0 - t * 0.3,
            position_y: -2.0 - t * 3.0 + decaying_wobble(t, 4.0),
            rotation_z: 0.2 + (t * PI * 4.0).sin() * 0.1,
            peel_amount: 1.0,
            bite_amount: 1.0,
        }),
        Segment::new("ground", 0.85, 1.0, |t| SceneState {
            scale: 0.7,
            position_y: -5.0 + (t * PI).sin() * 0.2,
            rotation_z: 0.2 - t * 0.1,
            peel_amount: 1.0,
            bite_amount: 1.0,
        }),
    ]
}

pub fn experience_segments() -> Vec<Segment<SceneState>> {
    vec![
        Segment::new("entry", 0.0, 0.2, |t| SceneState {
            scale: 0.15 + t * 0.35,
            ..SceneState::default()
        }),
        Segment::new("growth", 0.2, 0.4, |t| SceneState {
            scale: 0.5 + t * 0.5,
            position_y: -0.3 * t,
            rotation_z: 0.2 * t,
            ..SceneState::default()
        }),
        Segment::new("peel", 0.4, 0.6, |t| SceneState {
            scale: 1.0,
            position_y: -0.3 - t * 0.4,
            rotation_z: 0.2 + t * 0.15,
            peel_amount: t,
            bite_amount: 0.0,
        }),
        Segment::new("bite", 0.6, 0.8, |t| SceneState {
            scale: 1.0 - t * 0.1,
            position_y: -0.7 - t * 0.3,
            rotation_z: 0.35 - t * 0.2,
            peel_amount: 1.0,
            bite_amount: t,
        }),
        Segment::new("exit", 0.8, 1.0, |t| SceneState {
            scale: 0.9 * (1.0 - t * 0.5),
            position_y: -1.0 - t * 4.0 + decaying_wobble(t, 3.0),
            rotation_z: 0.15 + (t * PI * 3.0).sin() * 0.1,
            peel_amount: 1.0,
            bite_amount: 1.0,
        }),
    ]
}
