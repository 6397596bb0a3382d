//! Pointer input relative to a tracked element, buffered between frames.

use std::collections::VecDeque;

use glam::Vec2;

use crate::constants::INPUT_QUEUE_CAPACITY;

/// Pointer position in the tracked element's local pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter(Vec2),
    Move(Vec2),
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            Self::Enter(p) | Self::Move(p) => Some(p),
            Self::Leave => None,
        }
    }
}

/// True when `p` lies within `padding` of any edge of a `size` box.
/// Points outside the box count as near.
#[inline]
pub fn is_near_border(p: Vec2, size: Vec2, padding: f32) -> bool {
    p.x < padding || p.x > size.x - padding || p.y < padding || p.y > size.y - padding
}

/// Pointer position as `[0, 1]` UV, centred when the box has no area.
#[inline]
pub fn to_uv(p: Vec2, size: Vec2) -> Vec2 {
    if size.x > 0.0 && size.y > 0.0 {
        (p / size).clamp(Vec2::ZERO, Vec2::ONE)
    } else {
        Vec2::splat(0.5)
    }
}

/// Bounded FIFO of pointer events. When full, consecutive moves collapse
/// into the newest one and otherwise the oldest event is dropped.
#[derive(Clone, Debug)]
pub struct InputQueue {
    events: VecDeque<PointerEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::with_capacity(INPUT_QUEUE_CAPACITY)
    }
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn push(&mut self, event: PointerEvent) {
        if self.events.len() >= self.capacity {
            if let (Some(PointerEvent::Move(_)), PointerEvent::Move(_)) =
                (self.events.back(), event)
            {
                if let Some(last) = self.events.back_mut() {
                    *last = event;
                }
                return;
            }
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = PointerEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_zone() {
        let size = Vec2::new(400.0, 300.0);
        assert!(is_near_border(Vec2::new(10.0, 150.0), size, 40.0));
        assert!(is_near_border(Vec2::new(200.0, 290.0), size, 40.0));
        assert!(!is_near_border(Vec2::new(200.0, 150.0), size, 40.0));
        assert!(is_near_border(Vec2::new(-5.0, 150.0), size, 40.0));
    }

    #[test]
    fn uv_is_clamped_and_centred_for_empty_boxes() {
        assert_eq!(to_uv(Vec2::new(50.0, 25.0), Vec2::new(100.0, 100.0)), Vec2::new(0.5, 0.25));
        assert_eq!(to_uv(Vec2::new(500.0, -5.0), Vec2::new(100.0, 100.0)), Vec2::new(1.0, 0.0));
        assert_eq!(to_uv(Vec2::ONE, Vec2::ZERO), Vec2::splat(0.5));
    }

    #[test]
    fn queue_is_bounded() {
        let mut q = InputQueue::with_capacity(2);
        q.push(PointerEvent::Enter(Vec2::ZERO));
        q.push(PointerEvent::Move(Vec2::ONE));
        q.push(PointerEvent::Move(Vec2::splat(2.0)));
        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 0);
        q.push(PointerEvent::Leave);
        assert_eq!(q.len(), 2);
        assert_eq!(q.dropped(), 1);
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, [PointerEvent::Move(Vec2::splat(2.0)), PointerEvent::Leave]);
        assert!(q.is_empty());
    }
}
