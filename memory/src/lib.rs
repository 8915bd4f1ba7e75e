use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryError {
    #[error("address {0} is past the end of physical memory")]
    OverCapacity(u64),
    #[error("frame {frame} does not exist, memory holds {frames} frames")]
    InvalidFrame { frame: u32, frames: usize },
}

/// Physical memory: `frames` frames of `frame_size` bytes each.
#[derive(Debug, Clone)]
pub struct PhysicalMemory {
    frame_size: usize,
    frames: usize,
    buffer: Box<[u8]>,
}

impl PhysicalMemory {
    pub fn new(frames: usize, frame_size: usize) -> Self {
        assert!(
            frame_size.is_power_of_two(),
            "Frame size {} is not a power of 2",
            frame_size
        );
        Self {
            frame_size,
            frames,
            buffer: vec![0; frames * frame_size].into_boxed_slice(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn check_address(&self, address: u64) -> Result<(), MemoryError> {
        if address >= self.capacity() as u64 {
            return Err(MemoryError::OverCapacity(address));
        }
        Ok(())
    }

    pub fn read_u8(&self, address: u64) -> Result<u8, MemoryError> {
        self.check_address(address)?;
        Ok(self.buffer[address as usize])
    }

    pub fn read_i8(&self, address: u64) -> Result<i8, MemoryError> {
        Ok(self.read_u8(address)? as i8)
    }

    fn frame_range(&self, frame: u32) -> Result<std::ops::Range<usize>, MemoryError> {
        let index = frame as usize;
        if index >= self.frames {
            return Err(MemoryError::InvalidFrame {
                frame,
                frames: self.frames,
            });
        }
        Ok(index * self.frame_size..(index + 1) * self.frame_size)
    }

    pub fn frame(&self, frame: u32) -> Result<&[u8], MemoryError> {
        let range = self.frame_range(frame)?;
        Ok(&self.buffer[range])
    }

    pub fn frame_mut(&mut self, frame: u32) -> Result<&mut [u8], MemoryError> {
        let range = self.frame_range(frame)?;
        Ok(&mut self.buffer[range])
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }
}
