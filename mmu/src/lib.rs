//! Address translation for a single-level paged memory: a round-robin TLB
//! in front of a page table, FIFO or LRU frame replacement, and a physical
//! memory filled from a backing store on page faults.

pub mod address;
pub mod config;
pub mod error;
pub mod page_table;
pub mod replacement;
pub mod tlb;
pub mod translator;

pub use address::AddressLayout;
pub use config::{ConfigError, MmuConfig};
pub use error::{InvariantViolation, MmuError};
pub use replacement::{Policy, ReplacementPolicy};
pub use translator::{Access, Eviction, Mmu, Stats, Translation};
