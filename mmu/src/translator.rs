use std::{
    fs::File,
    io::{Read, Seek},
};

use disk::Disk;
use log::debug;
use memory::PhysicalMemory;

use crate::{
    address::AddressLayout,
    config::MmuConfig,
    error::{InvariantViolation, MmuError},
    page_table::PageTable,
    replacement::ReplacementPolicy,
    tlb::Tlb,
};

/// Where a translation was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    TlbHit,
    TableHit,
    PageFault,
}

/// A frame taken away from its previous page to serve a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eviction {
    pub frame: u32,
    /// Page that held the frame, if any page table entry still pointed at it.
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub address: u32,
    pub page: u32,
    pub offset: u32,
    pub frame: u32,
    pub physical_address: u32,
    pub access: Access,
    pub eviction: Option<Eviction>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub tlb_hits: usize,
    pub table_hits: usize,
    pub page_faults: usize,
}

impl Stats {
    pub fn total(&self) -> usize {
        self.tlb_hits + self.table_hits + self.page_faults
    }

    fn record(&mut self, access: Access) {
        match access {
            Access::TlbHit => self.tlb_hits += 1,
            Access::TableHit => self.table_hits += 1,
            Access::PageFault => self.page_faults += 1,
        }
    }
}

/// One address-translation context: page table, TLB, replacement policy and
/// physical memory, backed by a block store holding every page.
///
/// Lookups go TLB, then page table, then the fault handler. Every resolved
/// translation is reported to the replacement policy.
#[derive(Debug)]
pub struct Mmu<S = File> {
    config: MmuConfig,
    layout: AddressLayout,
    page_table: PageTable,
    tlb: Tlb,
    policy: Box<dyn ReplacementPolicy>,
    memory: PhysicalMemory,
    backing_store: Disk<S>,
    // Frame allocations served so far. Memory is full once it reaches the
    // frame count; FIFO keeps counting past that to pick victims.
    allocations: usize,
    stats: Stats,
}

impl<S: Read + Seek> Mmu<S> {
    pub fn new(config: MmuConfig, backing_store: Disk<S>) -> Result<Self, MmuError> {
        config.validate()?;
        if backing_store.block_size() != config.frame_size
            || backing_store.blocks() != config.pages
        {
            return Err(MmuError::BackingStoreMismatch {
                blocks: backing_store.blocks(),
                block_size: backing_store.block_size(),
                pages: config.pages,
                frame_size: config.frame_size,
            });
        }
        Ok(Self {
            layout: AddressLayout::new(config.frame_size, config.pages),
            page_table: PageTable::init(config.pages),
            tlb: Tlb::new(config.tlb_entries),
            policy: config.policy.build(config.frames),
            memory: PhysicalMemory::new(config.frames, config.frame_size),
            backing_store,
            allocations: 0,
            stats: Stats::default(),
            config,
        })
    }

    pub fn translate(&mut self, address: u32) -> Result<Translation, MmuError> {
        let (page, offset) = self.layout.split(address);

        let (frame, access, eviction) = if let Some(frame) = self.tlb.lookup(page) {
            (frame, Access::TlbHit, None)
        } else if let Some(frame) = self.page_table.get_frame(page) {
            self.tlb.insert(page, frame);
            (frame, Access::TableHit, None)
        } else {
            let (frame, eviction) = self.handle_page_fault(page)?;
            (frame, Access::PageFault, eviction)
        };

        self.policy.on_touch(frame);
        self.stats.record(access);

        Ok(Translation {
            address,
            page,
            offset,
            frame,
            physical_address: self.layout.physical(frame, offset),
            access,
            eviction,
        })
    }

    /// Translates `address` and reads the byte it resolves to.
    pub fn read(&mut self, address: u32) -> Result<(Translation, i8), MmuError> {
        let translation = self.translate(address)?;
        let value = self.read_byte(&translation)?;
        Ok((translation, value))
    }

    fn handle_page_fault(&mut self, page: u32) -> Result<(u32, Option<Eviction>), MmuError> {
        let is_full = self.allocations >= self.config.frames;

        let (frame, eviction) = if is_full {
            let victim = self.policy.choose_victim(self.allocations);
            let invalidated = self.tlb.invalidate_frame(victim);
            let evicted = self.page_table.unmap_frame(victim);
            debug!(
                "Memory full, evicting page {:?} from frame {} ({} TLB entries dropped)",
                evicted, victim, invalidated
            );
            (
                victim,
                Some(Eviction {
                    frame: victim,
                    page: evicted,
                }),
            )
        } else {
            (self.allocations as u32, None)
        };

        let buf = self.memory.frame_mut(frame)?;
        self.backing_store.read_block_into(page as usize, buf)?;

        self.page_table.map_to_frame(page, frame);
        self.tlb.insert(page, frame);
        self.allocations += 1;
        debug!("Page {} loaded into frame {}", page, frame);

        debug_assert_eq!(self.check_invariants(), Ok(()));
        Ok((frame, eviction))
    }
}

impl<S> Mmu<S> {
    pub fn read_byte(&self, translation: &Translation) -> Result<i8, MmuError> {
        Ok(self
            .memory
            .read_i8(u64::from(translation.physical_address))?)
    }

    pub fn config(&self) -> &MmuConfig {
        &self.config
    }

    pub fn layout(&self) -> &AddressLayout {
        &self.layout
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    pub fn tlb(&self) -> &Tlb {
        &self.tlb
    }

    pub fn memory(&self) -> &PhysicalMemory {
        &self.memory
    }

    pub fn policy(&self) -> &dyn ReplacementPolicy {
        self.policy.as_ref()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn resident_frames(&self) -> usize {
        self.allocations.min(self.config.frames)
    }

    /// Checks that no frame backs two present pages and that every valid
    /// TLB entry agrees with the page table.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut owners: Vec<Option<u32>> = vec![None; self.config.frames];
        for entry in self.page_table.iter() {
            let frame = entry.get_frame_number();
            let owner =
                owners
                    .get_mut(frame as usize)
                    .ok_or(InvariantViolation::FrameOutOfRange {
                        page: entry.page_number(),
                        frame,
                        frames: self.config.frames,
                    })?;
            if let Some(first) = owner.replace(entry.page_number()) {
                return Err(InvariantViolation::FrameAliased {
                    frame,
                    first,
                    second: entry.page_number(),
                });
            }
        }

        for entry in self.tlb.iter() {
            let table_frame = self.page_table.get_frame(entry.page_number);
            if table_frame != Some(entry.frame_number) {
                return Err(InvariantViolation::StaleTlbEntry {
                    page: entry.page_number,
                    tlb_frame: entry.frame_number,
                    table_frame,
                });
            }
        }
        Ok(())
    }

    /// Drops every mapping and all counters, as if freshly constructed.
    pub fn reset(&mut self) {
        self.page_table.reset();
        self.tlb.flush();
        self.memory.clear();
        self.policy = self.config.policy.build(self.config.frames);
        self.allocations = 0;
        self.stats = Stats::default();
    }
}
