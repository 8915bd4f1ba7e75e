use std::{
    fs::File,
    io::{self, BufRead, BufReader, Lines},
    path::Path,
};

use crate::error::ParseError;

/// What a correct translation of one address looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OracleRecord {
    pub virtual_address: u32,
    pub physical_address: u32,
    pub value: i8,
}

/// Parses one record. Only the numeric tokens matter, so
/// `Virtual address: 16916 Physical address: 20 Value: 0` and `16916 20 0`
/// read the same.
pub fn parse_record(line: usize, text: &str) -> Result<OracleRecord, ParseError> {
    let numbers: Vec<i64> = text
        .split_whitespace()
        .filter_map(|token| token.parse().ok())
        .collect();
    let &[virtual_address, physical_address, value] = numbers.as_slice() else {
        return Err(ParseError::MalformedRecord {
            line,
            found: numbers.len(),
        });
    };
    let address = |value: i64| {
        u32::try_from(value).map_err(|_| ParseError::AddressOutOfRange { line, value })
    };
    Ok(OracleRecord {
        virtual_address: address(virtual_address)?,
        physical_address: address(physical_address)?,
        value: i8::try_from(value).map_err(|_| ParseError::ValueOutOfRange { line, value })?,
    })
}

pub struct OracleSource<R> {
    lines: Lines<R>,
    line: usize,
}

impl OracleSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> OracleSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for OracleSource<R> {
    type Item = Result<OracleRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(err.into())),
            };
            self.line += 1;
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_record(self.line, &text));
        }
    }
}
