use std::{
    fs::File,
    io::{Read, Seek, SeekFrom, Write},
    path::Path,
};

use log::trace;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiskError {
    #[error("block {block_number} is past the end of a {blocks}-block disk")]
    OverCapacity { block_number: usize, blocks: usize },
    #[error("expected a {expected}-byte block, got {actual} bytes")]
    IncorrectBlockSize { expected: usize, actual: usize },
    #[error("block size must not be zero")]
    ZeroBlockSize,
    #[error("disk image is {actual} bytes, not a multiple of the {block_size}-byte block size")]
    IncorrectCapacity { actual: u64, block_size: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A block device over a seekable byte source.
///
/// Block `n` lives at byte offset `n * block_size`; there is no header.
#[derive(Debug)]
pub struct Disk<S = File> {
    source: S,
    block_size: usize,
    capacity: u64,
}

impl Disk<File> {
    pub fn create<P: AsRef<Path>>(
        path: P,
        block_size: usize,
        blocks: usize,
    ) -> Result<Self, DiskError> {
        if block_size == 0 {
            return Err(DiskError::ZeroBlockSize);
        }
        let file = File::options()
            .truncate(true)
            .write(true)
            .read(true)
            .create(true)
            .open(path)?;
        file.set_len((block_size * blocks) as u64)?;
        Self::from_source(file, block_size)
    }

    pub fn connect<P: AsRef<Path>>(path: P, block_size: usize) -> Result<Self, DiskError> {
        let file = File::options().read(true).open(path)?;
        Self::from_source(file, block_size)
    }
}

impl<S: Seek> Disk<S> {
    pub fn from_source(mut source: S, block_size: usize) -> Result<Self, DiskError> {
        if block_size == 0 {
            return Err(DiskError::ZeroBlockSize);
        }
        let capacity = source.seek(SeekFrom::End(0))?;
        if capacity % block_size as u64 != 0 {
            return Err(DiskError::IncorrectCapacity {
                actual: capacity,
                block_size,
            });
        }
        Ok(Self {
            source,
            block_size,
            capacity,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn blocks(&self) -> usize {
        (self.capacity / self.block_size as u64) as usize
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn seek_block(&mut self, block_number: usize, len: usize) -> Result<(), DiskError> {
        if len != self.block_size {
            return Err(DiskError::IncorrectBlockSize {
                expected: self.block_size,
                actual: len,
            });
        }
        if block_number >= self.blocks() {
            return Err(DiskError::OverCapacity {
                block_number,
                blocks: self.blocks(),
            });
        }
        self.source
            .seek(SeekFrom::Start((block_number * self.block_size) as u64))?;
        Ok(())
    }
}

impl<S: Read + Seek> Disk<S> {
    /// Reads block `block_number` straight into `buf`, which must be exactly one block long.
    pub fn read_block_into(
        &mut self,
        block_number: usize,
        buf: &mut [u8],
    ) -> Result<(), DiskError> {
        self.seek_block(block_number, buf.len())?;
        trace!("Reading block[{}]", block_number);
        self.source.read_exact(buf)?;
        Ok(())
    }

    pub fn read_block(&mut self, block_number: usize) -> Result<Vec<u8>, DiskError> {
        let mut buf = vec![0; self.block_size];
        self.read_block_into(block_number, &mut buf)?;
        Ok(buf)
    }
}

impl<S: Write + Seek> Disk<S> {
    pub fn write_block(&mut self, block_number: usize, block: &[u8]) -> Result<(), DiskError> {
        self.seek_block(block_number, block.len())?;
        trace!("Writing block[{}]", block_number);
        self.source.write_all(block)?;
        self.source.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serial_test::serial;
    use std::{fs::remove_file, io::Cursor};

    fn image_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("DISK_IMAGE_{}", name.replace('-', "_")))
    }

    #[test]
    #[serial]
    fn test_create() {
        let path = image_path("test_create");
        let disk = Disk::create(&path, 256, 4).unwrap();
        assert_eq!(disk.blocks(), 4);
        assert_eq!(disk.block_size(), 256);
        remove_file(path).unwrap();
    }

    #[test]
    #[serial]
    fn test_connect() {
        let path = image_path("test_connect");
        let mut disk = Disk::create(&path, 256, 4).unwrap();
        disk.write_block(3, &[7; 256]).unwrap();
        drop(disk);

        let mut disk = Disk::connect(&path, 256).unwrap();
        assert_eq!(disk.blocks(), 4);
        assert_eq!(disk.read_block(3).unwrap(), vec![7; 256]);
        remove_file(path).unwrap();
    }

    #[test]
    fn test_connect_missing_file() {
        let err = Disk::connect(image_path("test_connect_missing_file"), 256).unwrap_err();
        assert!(matches!(err, DiskError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_read_write() {
        let mut disk = Disk::from_source(Cursor::new(vec![0u8; 1024]), 512).unwrap();
        let mut block = vec![0; 512];
        block[0] = 1;
        block[511] = 2;
        disk.write_block(1, &block).unwrap();
        let read = disk.read_block(1).unwrap();
        assert_eq!(read[0], 1);
        assert_eq!(read[511], 2);
        assert_eq!(disk.read_block(0).unwrap(), vec![0; 512]);
    }

    #[test]
    fn test_read_into_slice() {
        let bytes: Vec<u8> = (0..=255).collect();
        let mut disk = Disk::from_source(Cursor::new(bytes), 64).unwrap();
        let mut buf = [0u8; 64];
        disk.read_block_into(2, &mut buf).unwrap();
        assert_eq!(buf[0], 128);
        assert_eq!(buf[63], 191);
    }

    #[test]
    fn test_read_write_over_capacity() {
        let mut disk = Disk::from_source(Cursor::new(vec![0u8; 1024]), 512).unwrap();
        let block = vec![1; 512];
        assert!(matches!(
            disk.write_block(2, &block),
            Err(DiskError::OverCapacity {
                block_number: 2,
                blocks: 2
            })
        ));
        assert!(matches!(
            disk.read_block(2),
            Err(DiskError::OverCapacity { .. })
        ));
    }

    #[test]
    fn test_read_write_incorrect_block_size() {
        let mut disk = Disk::from_source(Cursor::new(vec![0u8; 1024]), 512).unwrap();
        assert!(matches!(
            disk.write_block(0, &[1; 256]),
            Err(DiskError::IncorrectBlockSize {
                expected: 512,
                actual: 256
            })
        ));
        let mut buf = [0; 1024];
        assert!(matches!(
            disk.read_block_into(0, &mut buf),
            Err(DiskError::IncorrectBlockSize { .. })
        ));
    }

    #[test]
    fn test_incorrect_capacity() {
        let err = Disk::from_source(Cursor::new(vec![0u8; 1000]), 512).unwrap_err();
        assert!(matches!(
            err,
            DiskError::IncorrectCapacity {
                actual: 1000,
                block_size: 512
            }
        ));
    }

    #[test]
    #[serial]
    fn test_zero_block_size() {
        let err = Disk::from_source(Cursor::new(vec![0u8; 256]), 0).unwrap_err();
        assert!(matches!(err, DiskError::ZeroBlockSize));

        let path = image_path("test_zero_block_size");
        let err = Disk::create(&path, 0, 4).unwrap_err();
        assert!(matches!(err, DiskError::ZeroBlockSize));
        assert!(!path.exists());
    }

    #[test]
    fn test_short_source_is_an_io_error() {
        // Capacity is measured up front, so a source truncated later fails the read.
        let mut disk = Disk::from_source(Cursor::new(vec![0u8; 512]), 256).unwrap();
        disk.get_mut().get_mut().truncate(300);
        assert!(matches!(disk.read_block(1), Err(DiskError::Io(_))));
    }
}
