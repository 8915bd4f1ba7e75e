use std::{
    fs::File,
    io::{self, BufRead, BufReader, Lines},
    path::Path,
};

use crate::error::ParseError;

/// Logical addresses, one per non-blank line.
pub struct AddressSource<R> {
    lines: Lines<R>,
    line: usize,
}

impl AddressSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> AddressSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for AddressSource<R> {
    type Item = Result<u32, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(err.into())),
            };
            self.line += 1;
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            return Some(text.parse().map_err(|_| ParseError::InvalidAddress {
                line: self.line,
                text: text.to_string(),
            }));
        }
    }
}
