pub type MotionResult<T> = Result<T, MotionError>;

/// Construction-time failures. Per-frame paths never return these; they
/// clamp or skip instead.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MotionError {
    #[error("segment table is empty")]
    EmptyTrack,

    #[error("segment table must cover [0, 1], got [{start}, {end}]")]
    Coverage { start: f32, end: f32 },

    #[error("segment {index} is out of order or leaves a gap ({prev_end} -> {start})")]
    Gap {
        index: usize,
        prev_end: f32,
        start: f32,
    },

    #[error("`{field}` jumps by {jump} at boundary {boundary}")]
    Discontinuity {
        field: &'static str,
        boundary: f32,
        jump: f32,
    },

    #[error("invalid opacity window: {0}")]
    InvalidWindow(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl MotionError {
    pub fn window(msg: impl Into<String>) -> Self {
        Self::InvalidWindow(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
