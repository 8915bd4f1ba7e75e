/// Splits logical addresses into (page, offset) and joins (frame, offset)
/// back into physical addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressLayout {
    offset_bits: u32,
    offset_mask: u32,
    page_mask: u32,
}

impl AddressLayout {
    /// Both arguments must be powers of two.
    pub fn new(frame_size: usize, pages: usize) -> Self {
        debug_assert!(frame_size.is_power_of_two() && pages.is_power_of_two());
        Self {
            offset_bits: frame_size.trailing_zeros(),
            offset_mask: (frame_size - 1) as u32,
            page_mask: (pages - 1) as u32,
        }
    }

    pub fn frame_size(&self) -> u32 {
        self.offset_mask + 1
    }

    pub fn page(&self, address: u32) -> u32 {
        (address >> self.offset_bits) & self.page_mask
    }

    pub fn offset(&self, address: u32) -> u32 {
        address & self.offset_mask
    }

    pub fn split(&self, address: u32) -> (u32, u32) {
        (self.page(address), self.offset(address))
    }

    pub fn physical(&self, frame: u32, offset: u32) -> u32 {
        (frame << self.offset_bits) | (offset & self.offset_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::AddressLayout;

    #[test]
    fn reference_layout() {
        let layout = AddressLayout::new(256, 256);
        assert_eq!(layout.split(32768), (128, 0));
        assert_eq!(layout.split(511), (1, 255));
        assert_eq!(layout.split(0), (0, 0));
        assert_eq!(layout.split(65535), (255, 255));
        assert_eq!(layout.split(16916), (66, 20));
    }

    #[test]
    fn bits_above_the_address_space_are_masked() {
        let layout = AddressLayout::new(256, 256);
        assert_eq!(layout.split(65536 + 511), (1, 255));
    }

    #[test]
    fn physical_address() {
        let layout = AddressLayout::new(256, 256);
        assert_eq!(layout.physical(0, 20), 20);
        assert_eq!(layout.physical(3, 255), 3 * 256 + 255);
        assert_eq!(layout.frame_size(), 256);
    }

    #[test]
    fn small_layout() {
        let layout = AddressLayout::new(16, 8);
        assert_eq!(layout.split(0x7f), (7, 15));
        assert_eq!(layout.split(0x80), (0, 0));
        assert_eq!(layout.physical(2, 5), 37);
    }
}
