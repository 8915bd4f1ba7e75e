/// Maps one logical page to the physical frame currently holding it.
/// The frame number is only meaningful while the entry is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTableEntry {
    page_number: u32,
    frame_number: u32,
    present: bool,
    recently_used: bool,
}

impl PageTableEntry {
    pub(super) fn new(page_number: u32) -> Self {
        PageTableEntry {
            page_number,
            frame_number: 0,
            present: false,
            recently_used: false,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn get_frame_number(&self) -> u32 {
        self.frame_number
    }

    /// The frame holding this page, if it is resident.
    pub fn frame(&self) -> Option<u32> {
        self.present.then_some(self.frame_number)
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn is_recently_used(&self) -> bool {
        self.recently_used
    }

    pub(super) fn map_to_frame(&mut self, frame_number: u32) {
        self.frame_number = frame_number;
        self.present = true;
        self.recently_used = true;
    }

    pub(super) fn clear(&mut self) {
        *self = PageTableEntry::new(self.page_number);
    }
}
