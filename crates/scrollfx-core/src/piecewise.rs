//! Ordered segment tables over the normalized progress domain.
//!
//! A [`Piecewise`] track partitions `[0, 1]` into contiguous segments, each
//! with its own evaluator over a local parameter `t ∈ [0, 1]`. Tables are
//! validated once at construction (coverage, ordering, boundary continuity)
//! so sampling is a branch-free lookup plus one evaluator call.

use crate::constants::{CONTINUITY_TOLERANCE, ZERO_SPAN_EPSILON};
use crate::error::{MotionError, MotionResult};

/// Values produced by a segment evaluator.
pub trait TrackValue: Copy {
    /// Largest per-field absolute difference and the name of that field.
    fn max_jump(&self, other: &Self) -> (&'static str, f32);
}

/// One `[start, end)` slice of the progress domain.
#[derive(Clone, Copy)]
pub struct Segment<T> {
    pub name: &'static str,
    pub start: f32,
    pub end: f32,
    pub eval: fn(f32) -> T,
}

impl<T> Segment<T> {
    pub const fn new(name: &'static str, start: f32, end: f32, eval: fn(f32) -> T) -> Self {
        Self {
            name,
            start,
            end,
            eval,
        }
    }

    /// Local parameter for `progress`; a zero-length segment is a step.
    #[inline]
    pub fn local_t(&self, progress: f32) -> f32 {
        let span = self.end - self.start;
        if span <= ZERO_SPAN_EPSILON {
            return 1.0;
        }
        ((progress - self.start) / span).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn sample(&self, progress: f32) -> T {
        (self.eval)(self.local_t(progress))
    }
}

impl<T> std::fmt::Debug for Segment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Segment")
            .field("name", &self.name)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

/// Clamp progress into `[0, 1]`; NaN maps to the start of the track.
#[inline]
pub fn sanitize_progress(progress: f32) -> f32 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug)]
pub struct Piecewise<T> {
    segments: Vec<Segment<T>>,
}

impl<T: TrackValue> Piecewise<T> {
    pub fn new(segments: Vec<Segment<T>>) -> MotionResult<Self> {
        validate(&segments)?;
        Ok(Self { segments })
    }

    /// Build a table the caller has already proven valid (built-in presets,
    /// covered by tests). Validation still runs in debug builds.
    pub(crate) fn new_unchecked(segments: Vec<Segment<T>>) -> Self {
        debug_assert!(validate(&segments).is_ok(), "invalid built-in segment table");
        Self { segments }
    }

    pub fn sample(&self, progress: f32) -> T {
        let p = sanitize_progress(progress);
        self.segments[self.segment_index(p)].sample(p)
    }

    /// Index of the segment containing `progress` (already clamped). The
    /// final segment is closed so that `1.0` lands inside it.
    pub fn segment_index(&self, progress: f32) -> usize {
        let i = self.segments.partition_point(|s| s.end <= progress);
        i.min(self.segments.len() - 1)
    }

    pub fn segments(&self) -> &[Segment<T>] {
        &self.segments
    }

    /// Interior boundaries, in order.
    pub fn boundaries(&self) -> impl Iterator<Item = f32> + '_ {
        self.segments.iter().skip(1).map(|s| s.start)
    }
}

fn validate<T: TrackValue>(segments: &[Segment<T>]) -> MotionResult<()> {
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return Err(MotionError::EmptyTrack),
    };
    if first.start.abs() > ZERO_SPAN_EPSILON || (last.end - 1.0).abs() > ZERO_SPAN_EPSILON {
        return Err(MotionError::Coverage {
            start: first.start,
            end: last.end,
        });
    }
    for (i, pair) in segments.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        if prev.end < prev.start || (next.start - prev.end).abs() > ZERO_SPAN_EPSILON {
            return Err(MotionError::Gap {
                index: i + 1,
                prev_end: prev.end,
                start: next.start,
            });
        }
        let (field, jump) = (prev.eval)(1.0).max_jump(&(next.eval)(0.0));
        if jump > CONTINUITY_TOLERANCE {
            return Err(MotionError::Discontinuity {
                field,
                boundary: next.start,
                jump,
            });
        }
    }
    if last.end < last.start {
        return Err(MotionError::Gap {
            index: segments.len() - 1,
            prev_end: last.start,
            start: last.end,
        });
    }
    Ok(())
}
