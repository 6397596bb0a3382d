/// Easing curves over `t ∈ [0, 1]`. Inputs outside the range are clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    /// Decelerating quadratic, the usual "power2.out".
    OutQuad,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}
