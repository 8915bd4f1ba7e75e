#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TlbEntry {
    pub page_number: u32,
    pub frame_number: u32,
    pub present: bool,
}

/// Fixed-capacity translation cache scanned linearly.
///
/// Slots are reused round-robin: every insert overwrites the slot under the
/// write cursor and advances it, whatever was stored there.
#[derive(Debug, Clone)]
pub struct Tlb {
    entries: Vec<TlbEntry>,
    cursor: usize,
}

impl Tlb {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "TLB capacity must not be zero");
        Self {
            entries: vec![TlbEntry::default(); capacity],
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Slot the next insert will overwrite.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn lookup(&self, page_number: u32) -> Option<u32> {
        self.entries
            .iter()
            .find(|entry| entry.present && entry.page_number == page_number)
            .map(|entry| entry.frame_number)
    }

    /// Writes the mapping at the cursor and returns the slot it went into.
    pub fn insert(&mut self, page_number: u32, frame_number: u32) -> usize {
        let slot = self.cursor;
        self.entries[slot] = TlbEntry {
            page_number,
            frame_number,
            present: true,
        };
        self.cursor = (self.cursor + 1) % self.entries.len();
        slot
    }

    /// Invalidates every entry pointing at `frame_number`; returns how many were valid.
    pub fn invalidate_frame(&mut self, frame_number: u32) -> usize {
        let mut invalidated = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|entry| entry.frame_number == frame_number)
        {
            if entry.present {
                invalidated += 1;
            }
            *entry = TlbEntry::default();
        }
        invalidated
    }

    pub fn flush(&mut self) {
        self.entries.fill(TlbEntry::default());
        self.cursor = 0;
    }

    /// Valid entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &TlbEntry> {
        self.entries.iter().filter(|entry| entry.present)
    }
}
