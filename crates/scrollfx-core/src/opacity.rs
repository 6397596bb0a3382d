//! Section visibility as a function of scroll progress.

use crate::constants::ZERO_SPAN_EPSILON;
use crate::error::{MotionError, MotionResult};

/// Trapezoid fade over the half-open window `[start, end)`: 0 before
/// `start`, ramp up over `fade_in`, hold at 1, ramp down over `fade_out`,
/// 0 from `end` on.
///
/// When the window is narrower than `fade_in + fade_out` the plateau is
/// skipped and the result is the lower of the two ramps, which keeps the
/// curve continuous and inside `[0, 1]`. A zero-length fade is a step.
#[inline]
pub fn opacity(progress: f32, start: f32, end: f32, fade_in: f32, fade_out: f32) -> f32 {
    if progress.is_nan() || progress < start || progress >= end {
        return 0.0;
    }
    let ramp_in = ramp(progress - start, fade_in);
    let ramp_out = ramp(end - progress, fade_out);
    ramp_in.min(ramp_out).clamp(0.0, 1.0)
}

#[inline]
fn ramp(distance: f32, fade: f32) -> f32 {
    if fade <= ZERO_SPAN_EPSILON {
        // step: fully visible anywhere inside the window
        1.0
    } else {
        distance / fade
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpacityWindow {
    pub start: f32,
    pub end: f32,
    pub fade_in: f32,
    pub fade_out: f32,
}

impl OpacityWindow {
    pub fn new(start: f32, end: f32, fade_in: f32, fade_out: f32) -> MotionResult<Self> {
        let w = Self {
            start,
            end,
            fade_in,
            fade_out,
        };
        w.validate()?;
        Ok(w)
    }

    /// Symmetric window with the same fade on both sides.
    pub fn symmetric(start: f32, end: f32, fade: f32) -> MotionResult<Self> {
        Self::new(start, end, fade, fade)
    }

    pub fn validate(&self) -> MotionResult<()> {
        let values = [self.start, self.end, self.fade_in, self.fade_out];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(MotionError::window("bounds and fades must be finite"));
        }
        if self.end < self.start {
            return Err(MotionError::window(format!(
                "end {} precedes start {}",
                self.end, self.start
            )));
        }
        if self.fade_in < 0.0 || self.fade_out < 0.0 {
            return Err(MotionError::window("fades must be non-negative"));
        }
        Ok(())
    }

    #[inline]
    pub fn opacity(&self, progress: f32) -> f32 {
        opacity(progress, self.start, self.end, self.fade_in, self.fade_out)
    }

    /// True when the fades overlap and the plateau never reaches 1.
    pub fn is_degenerate(&self) -> bool {
        self.end - self.fade_out < self.start + self.fade_in
    }
}

/// Default fade used by the page sections.
pub const SECTION_FADE: f32 = 0.03;

/// Visibility windows of the page sections, in scroll order.
#[derive(Clone, Debug)]
pub struct SectionLayout {
    windows: Vec<OpacityWindow>,
}

impl SectionLayout {
    pub fn new(windows: Vec<OpacityWindow>) -> MotionResult<Self> {
        for w in &windows {
            w.validate()?;
        }
        Ok(Self { windows })
    }

    /// Hero, about, services, cases, universe, contact. Windows overlap so
    /// one section fades out while the next fades in. The hero starts fully
    /// visible and the last window runs past 1 so the footer never fades.
    pub fn site() -> Self {
        let f = SECTION_FADE;
        let w = |start, end, fade_in| OpacityWindow {
            start,
            end,
            fade_in,
            fade_out: f,
        };
        Self {
            windows: vec![
                w(0.0, 0.18, 0.0),
                w(0.12, 0.33, f),
                w(0.27, 0.53, f),
                w(0.47, 0.68, f),
                w(0.62, 0.88, f),
                w(0.82, 1.05, f),
            ],
        }
    }

    pub fn windows(&self) -> &[OpacityWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Writes one opacity per section into `out` (truncated to the shorter).
    pub fn opacities_into(&self, progress: f32, out: &mut [f32]) {
        for (slot, w) in out.iter_mut().zip(&self.windows) {
            *slot = w.opacity(progress);
        }
    }

    pub fn opacities(&self, progress: f32) -> Vec<f32> {
        self.windows.iter().map(|w| w.opacity(progress)).collect()
    }
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self::site()
    }
}

/// Staggered reveal of the `index`-th item inside a section that spans
/// `[start, start + len]`: each item starts `stagger` (in section-local
/// units) after the previous one and reaches full opacity after `1/gain`.
#[inline]
pub fn staggered_reveal(
    progress: f32,
    start: f32,
    len: f32,
    index: usize,
    stagger: f32,
    gain: f32,
) -> f32 {
    if progress.is_nan() {
        return 0.0;
    }
    let local = if len <= ZERO_SPAN_EPSILON {
        if progress >= start {
            1.0
        } else {
            0.0
        }
    } else {
        (progress - start) / len
    };
    ((local - index as f32 * stagger) * gain).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_fade_is_a_step_inside_the_window() {
        assert_eq!(opacity(0.0, 0.0, 0.5, 0.0, 0.1), 1.0);
        assert_eq!(opacity(0.25, 0.0, 0.5, 0.0, 0.0), 1.0);
        assert_eq!(opacity(0.6, 0.0, 0.5, 0.0, 0.0), 0.0);
        assert_eq!(opacity(0.5, 0.0, 0.5, 0.0, 0.0), 0.0);
    }

    #[test]
    fn rejects_inverted_windows() {
        assert!(OpacityWindow::new(0.5, 0.4, 0.0, 0.0).is_err());
        assert!(OpacityWindow::new(0.1, 0.4, -0.1, 0.0).is_err());
        assert!(OpacityWindow::new(0.1, f32::INFINITY, 0.0, 0.0).is_err());
    }

    #[test]
    fn staggered_items_appear_in_order() {
        let a = staggered_reveal(0.36, 0.30, 0.20, 0, 0.2, 3.0);
        let b = staggered_reveal(0.36, 0.30, 0.20, 1, 0.2, 3.0);
        assert!(a > b);
        assert_eq!(staggered_reveal(0.50, 0.30, 0.20, 3, 0.2, 3.0), 1.0);
        assert_eq!(staggered_reveal(0.20, 0.30, 0.20, 0, 0.2, 3.0), 0.0);
    }
}
