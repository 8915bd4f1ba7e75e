use std::path::PathBuf;

use clap::Parser;
use mmu::{
    config::{FRAMES, FRAME_SIZE, PAGES, TLB_ENTRIES},
    MmuConfig, Policy,
};

use crate::{simulation::RUN_LENGTH, verify::MISMATCH_THRESHOLD};

/// Replays a stream of logical addresses through a TLB, a page table and a
/// demand-paged physical memory, checking every translated byte.
#[derive(Debug, Clone, Parser)]
#[command(name = "vmsim", version)]
pub struct Args {
    /// Logical addresses, one per line
    #[arg(long, default_value = "addresses.txt")]
    pub addresses: PathBuf,

    /// Expected translations, one record per line
    #[arg(long, default_value = "correct.txt")]
    pub oracle: PathBuf,

    /// Page contents, `pages * frame-size` bytes
    #[arg(long, default_value = "BACKING_STORE.bin")]
    pub backing_store: PathBuf,

    /// Physical memory capacity in frames
    #[arg(long, default_value_t = FRAMES)]
    pub frames: usize,

    /// Bytes per page and per frame
    #[arg(long, default_value_t = FRAME_SIZE)]
    pub frame_size: usize,

    /// Logical pages in the address space
    #[arg(long, default_value_t = PAGES)]
    pub pages: usize,

    #[arg(long, default_value_t = TLB_ENTRIES)]
    pub tlb_entries: usize,

    /// Frame replacement policy: fifo or lru
    #[arg(long, default_value_t = Policy::Fifo)]
    pub policy: Policy,

    /// Mismatches tolerated before the run is aborted
    #[arg(long, default_value_t = MISMATCH_THRESHOLD)]
    pub mismatch_threshold: usize,

    /// Addresses to translate, bounded by the shorter input
    #[arg(long, default_value_t = RUN_LENGTH)]
    pub run_length: usize,

    /// Only print the summary
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn mmu_config(&self) -> MmuConfig {
        MmuConfig {
            frame_size: self.frame_size,
            frames: self.frames,
            pages: self.pages,
            tlb_entries: self.tlb_entries,
            policy: self.policy,
        }
    }
}
