mod iter;
mod page_table_entry;

pub use iter::PageTableIterator;
pub use page_table_entry::PageTableEntry;

/// Single-level page table with one entry per logical page.
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    pub fn init(pages: usize) -> Self {
        let entries = (0..pages as u32).map(PageTableEntry::new).collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get_entry(&self, page_number: u32) -> Option<&PageTableEntry> {
        self.entries.get(page_number as usize)
    }

    /// The frame holding `page_number`, if that page is present.
    pub fn get_frame(&self, page_number: u32) -> Option<u32> {
        self.get_entry(page_number)?.frame()
    }

    pub fn map_to_frame(&mut self, page_number: u32, frame_number: u32) {
        self.entries[page_number as usize].map_to_frame(frame_number);
    }

    /// Clears every present entry mapped to `frame_number` and returns the
    /// last page that was cleared.
    pub fn unmap_frame(&mut self, frame_number: u32) -> Option<u32> {
        let mut cleared = None;
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.frame() == Some(frame_number))
        {
            cleared = Some(entry.page_number());
            entry.clear();
        }
        cleared
    }

    pub fn resident_pages(&self) -> usize {
        self.iter().count()
    }

    pub fn reset(&mut self) {
        self.entries.iter_mut().for_each(PageTableEntry::clear);
    }

    pub fn iter(&self) -> PageTableIterator<'_> {
        PageTableIterator::new(&self.entries)
    }
}
