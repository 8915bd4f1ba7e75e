mod fifo;
mod lru;

use std::{fmt, str::FromStr};

pub use fifo::Fifo;
pub use lru::Lru;

/// Chooses which resident frame gives way when physical memory is full.
pub trait ReplacementPolicy: fmt::Debug {
    /// Frame to evict. `resident_count` is the number of frame allocations
    /// served so far, which is at least the frame capacity when this is called.
    fn choose_victim(&mut self, resident_count: usize) -> u32;

    /// Records that `frame` satisfied a translation.
    fn on_touch(&mut self, frame: u32);

    fn kind(&self) -> Policy;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Policy {
    #[default]
    Fifo,
    Lru,
}

impl Policy {
    pub fn build(self, frames: usize) -> Box<dyn ReplacementPolicy> {
        match self {
            Policy::Fifo => Box::new(Fifo::new(frames)),
            Policy::Lru => Box::new(Lru::new(frames)),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Fifo => write!(f, "fifo"),
            Policy::Lru => write!(f, "lru"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown replacement policy `{0}`, expected `fifo` or `lru`")]
pub struct UnknownPolicy(String);

impl FromStr for Policy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(Policy::Fifo),
            "lru" => Ok(Policy::Lru),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
