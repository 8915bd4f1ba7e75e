use std::collections::VecDeque;

use super::{Policy, ReplacementPolicy};

/// Least-recently-used eviction over a recency list of resident frames:
/// head is the least recently touched frame, tail the most recent.
#[derive(Debug, Clone)]
pub struct Lru {
    frames: usize,
    order: VecDeque<u32>,
}

impl Lru {
    pub fn new(frames: usize) -> Self {
        assert!(frames > 0, "LRU needs at least one frame");
        Self {
            frames,
            order: VecDeque::with_capacity(frames),
        }
    }

    /// Frames from least to most recently touched.
    pub fn order(&self) -> impl Iterator<Item = u32> + '_ {
        self.order.iter().copied()
    }
}

impl ReplacementPolicy for Lru {
    fn choose_victim(&mut self, resident_count: usize) -> u32 {
        // Nothing touched yet: fall back to allocation order.
        self.order
            .front()
            .copied()
            .unwrap_or((resident_count % self.frames) as u32)
    }

    fn on_touch(&mut self, frame: u32) {
        if let Some(position) = self.order.iter().position(|f| *f == frame) {
            self.order.remove(position);
        }
        self.order.push_back(frame);
        debug_assert!(self.order.len() <= self.frames);
        log::trace!("LRU order: {:?}", self.order);
    }

    fn kind(&self) -> Policy {
        Policy::Lru
    }
}
