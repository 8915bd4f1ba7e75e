use thiserror::Error;

use crate::replacement::Policy;

pub const FRAME_SIZE: usize = 256;
pub const FRAMES: usize = 128;
pub const PAGES: usize = 256;
pub const TLB_ENTRIES: usize = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("frame size {0} is not a power of 2")]
    FrameSizeNotPowerOfTwo(usize),
    #[error("page count {0} is not a power of 2")]
    PageCountNotPowerOfTwo(usize),
    #[error("physical memory needs at least one frame")]
    NoFrames,
    #[error("the TLB needs at least one entry")]
    NoTlbEntries,
    #[error("{pages} pages of {frame_size} bytes do not fit a 32-bit address")]
    AddressSpaceTooLarge { pages: usize, frame_size: usize },
}

/// Geometry and policy of one translation context. Fixed once the context is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MmuConfig {
    pub frame_size: usize,
    /// Physical memory capacity in frames.
    pub frames: usize,
    /// Logical page count, one page table entry each.
    pub pages: usize,
    pub tlb_entries: usize,
    pub policy: Policy,
}

impl Default for MmuConfig {
    fn default() -> Self {
        Self {
            frame_size: FRAME_SIZE,
            frames: FRAMES,
            pages: PAGES,
            tlb_entries: TLB_ENTRIES,
            policy: Policy::Fifo,
        }
    }
}

impl MmuConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.frame_size.is_power_of_two() {
            return Err(ConfigError::FrameSizeNotPowerOfTwo(self.frame_size));
        }
        if !self.pages.is_power_of_two() {
            return Err(ConfigError::PageCountNotPowerOfTwo(self.pages));
        }
        if self.frames == 0 {
            return Err(ConfigError::NoFrames);
        }
        if self.tlb_entries == 0 {
            return Err(ConfigError::NoTlbEntries);
        }
        let too_large = |count: usize| {
            count
                .checked_mul(self.frame_size)
                .map_or(true, |bytes| bytes as u64 > 1 << 32)
        };
        if too_large(self.pages) || too_large(self.frames) {
            return Err(ConfigError::AddressSpaceTooLarge {
                pages: self.pages.max(self.frames),
                frame_size: self.frame_size,
            });
        }
        Ok(())
    }
}
