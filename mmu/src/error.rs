use disk::DiskError;
use memory::MemoryError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum MmuError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(
        "backing store holds {blocks} blocks of {block_size} bytes, \
         expected {pages} pages of {frame_size} bytes"
    )]
    BackingStoreMismatch {
        blocks: usize,
        block_size: usize,
        pages: usize,
        frame_size: usize,
    },
    #[error("backing store read failed: {0}")]
    Disk(#[from] DiskError),
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// A broken consistency rule between the page table and the TLB.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("frame {frame} is mapped by both page {first} and page {second}")]
    FrameAliased { frame: u32, first: u32, second: u32 },
    #[error("TLB maps page {page} to frame {tlb_frame}, page table has {table_frame:?}")]
    StaleTlbEntry {
        page: u32,
        tlb_frame: u32,
        table_frame: Option<u32>,
    },
    #[error("page {page} is mapped to frame {frame}, past the {frames}-frame memory")]
    FrameOutOfRange { page: u32, frame: u32, frames: usize },
}
