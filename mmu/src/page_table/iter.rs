use super::PageTableEntry;

/// Walks the resident entries of a page table in page order.
pub struct PageTableIterator<'a> {
    entries: std::slice::Iter<'a, PageTableEntry>,
}

impl<'a> PageTableIterator<'a> {
    pub(super) fn new(entries: &'a [PageTableEntry]) -> Self {
        Self {
            entries: entries.iter(),
        }
    }
}

impl<'a> Iterator for PageTableIterator<'a> {
    type Item = &'a PageTableEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.find(|entry| entry.is_present())
    }
}
