use super::{Policy, ReplacementPolicy};

/// Evicts frames in allocation order. The only state is the frame count:
/// the allocation counter kept by the translator already says whose turn it is.
#[derive(Debug, Clone)]
pub struct Fifo {
    frames: usize,
}

impl Fifo {
    pub fn new(frames: usize) -> Self {
        assert!(frames > 0, "FIFO needs at least one frame");
        Self { frames }
    }
}

impl ReplacementPolicy for Fifo {
    fn choose_victim(&mut self, resident_count: usize) -> u32 {
        (resident_count % self.frames) as u32
    }

    fn on_touch(&mut self, _frame: u32) {}

    fn kind(&self) -> Policy {
        Policy::Fifo
    }
}
