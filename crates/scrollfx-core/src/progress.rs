//! Scroll metrics → normalized progress.

use crate::piecewise::sanitize_progress;

/// Whole-page progress. A page that cannot scroll reports 0.
#[inline]
pub fn page_progress(scroll_y: f32, scroll_height: f32, viewport_height: f32) -> f32 {
    let range = scroll_height - viewport_height;
    if !(range > 0.0) {
        return 0.0;
    }
    sanitize_progress(scroll_y / range)
}

/// Progress of a section through the viewport: 0 when its top edge enters
/// at the bottom, 1 when its bottom edge leaves at the top.
#[inline]
pub fn section_progress(rect_top: f32, section_height: f32, viewport_height: f32) -> f32 {
    let total = section_height + viewport_height;
    if !(total > 0.0) {
        return 0.0;
    }
    sanitize_progress((viewport_height - rect_top) / total)
}
