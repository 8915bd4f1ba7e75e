use std::{io, path::PathBuf, process::ExitCode};

use disk::DiskError;
use mmu::{ConfigError, MmuError};
use thiserror::Error;

/// Exit status when one of the inputs cannot be opened.
pub const FILE_ERROR: u8 = 2;
/// Exit status when too many translated bytes disagree with the oracle.
pub const ABORTED: u8 = 255;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: `{text}` is not an address")]
    InvalidAddress { line: usize, text: String },
    #[error(
        "line {line}: expected a virtual address, a physical address and a value, \
         found {found} numbers"
    )]
    MalformedRecord { line: usize, found: usize },
    #[error("line {line}: address {value} is out of range")]
    AddressOutOfRange { line: usize, value: i64 },
    #[error("line {line}: value {value} does not fit a signed byte")]
    ValueOutOfRange { line: usize, value: i64 },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Could not open {name} '{}': {source}", path.display())]
    MissingCollaborator {
        name: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    #[error("{name}: {source}")]
    Parse {
        name: &'static str,
        source: ParseError,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("backing store: {0}")]
    BackingStore(DiskError),
    #[error(transparent)]
    Mmu(#[from] MmuError),
}

impl SimError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            SimError::MissingCollaborator { .. } => ExitCode::from(FILE_ERROR),
            _ => ExitCode::FAILURE,
        }
    }
}
