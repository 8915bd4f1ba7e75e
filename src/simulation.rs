use std::{
    fs::File,
    io::{self, BufReader, Read, Seek},
    path::Path,
};

use disk::{Disk, DiskError};
use log::{error, info, warn};
use mmu::{Mmu, Stats, Translation};

use crate::{
    addresses::AddressSource,
    error::{ParseError, SimError},
    oracle::{OracleRecord, OracleSource},
    verify::{Verdict, Verifier},
};

/// Addresses translated per run unless the inputs run out first.
pub const RUN_LENGTH: usize = 1000;

/// The three inputs of a run, opened and ready.
pub struct Inputs {
    pub addresses: AddressSource<BufReader<File>>,
    pub oracle: OracleSource<BufReader<File>>,
    pub backing_store: Disk,
}

impl Inputs {
    /// Opens every input up front, so a missing one stops the run before any translation.
    pub fn open(
        addresses: &Path,
        oracle: &Path,
        backing_store: &Path,
        frame_size: usize,
    ) -> Result<Self, SimError> {
        let addresses = AddressSource::open(addresses)
            .map_err(|source| missing("address file", addresses, source))?;
        let oracle =
            OracleSource::open(oracle).map_err(|source| missing("oracle file", oracle, source))?;
        let backing_store = Disk::connect(backing_store, frame_size).map_err(|err| match err {
            DiskError::Io(source) => missing("backing store", backing_store, source),
            other => SimError::BackingStore(other),
        })?;
        Ok(Self {
            addresses,
            oracle,
            backing_store,
        })
    }
}

fn missing(name: &'static str, path: &Path, source: io::Error) -> SimError {
    SimError::MissingCollaborator {
        name,
        path: path.to_path_buf(),
        source,
    }
}

/// Everything known about one translated address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub translation: Translation,
    pub value: i8,
    pub expected: OracleRecord,
    pub verdict: Verdict,
}

impl Step {
    /// Whether the oracle record was written for the address that was translated.
    pub fn oracle_in_sync(&self) -> bool {
        self.expected.virtual_address == self.translation.address
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub stats: Stats,
    pub mismatches: usize,
}

impl Summary {
    fn percentage(&self, count: usize) -> f64 {
        if self.processed == 0 {
            return 0.0;
        }
        count as f64 / self.processed as f64 * 100.0
    }

    pub fn page_fault_percentage(&self) -> f64 {
        self.percentage(self.stats.page_faults)
    }

    pub fn tlb_hit_percentage(&self) -> f64 {
        self.percentage(self.stats.tlb_hits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(Summary),
    /// The mismatch count went past the threshold while checking address `index`.
    Aborted { index: usize, mismatches: usize },
}

/// Drives one translation context over an address stream, checking every
/// byte against the oracle.
pub struct Simulation<S = File> {
    mmu: Mmu<S>,
    verifier: Verifier,
    run_length: usize,
}

impl<S: Read + Seek> Simulation<S> {
    pub fn new(mmu: Mmu<S>, verifier: Verifier, run_length: usize) -> Self {
        Self {
            mmu,
            verifier,
            run_length,
        }
    }

    pub fn mmu(&self) -> &Mmu<S> {
        &self.mmu
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    /// Runs from a freshly reset context. `observer` sees every step, including
    /// the one that makes the run fatal, before the outcome is decided.
    pub fn run<A, O, F>(
        &mut self,
        addresses: A,
        oracle: O,
        mut observer: F,
    ) -> Result<RunOutcome, SimError>
    where
        A: IntoIterator<Item = Result<u32, ParseError>>,
        O: IntoIterator<Item = Result<OracleRecord, ParseError>>,
        F: FnMut(&Step),
    {
        self.mmu.reset();
        self.verifier.reset();

        let mut processed = 0;
        let records = addresses.into_iter().zip(oracle).take(self.run_length);
        for (index, (address, expected)) in records.enumerate() {
            let address = address.map_err(|source| SimError::Parse {
                name: "address file",
                source,
            })?;
            let expected = expected.map_err(|source| SimError::Parse {
                name: "oracle file",
                source,
            })?;
            if expected.virtual_address != address {
                warn!(
                    "Record {}: oracle expects address {}, translating {}",
                    index, expected.virtual_address, address
                );
            }

            let (translation, value) = self.mmu.read(address)?;
            let verdict = self.verifier.check(value, expected.value);
            let step = Step {
                index,
                translation,
                value,
                expected,
                verdict,
            };
            observer(&step);

            if verdict.fatal {
                error!(
                    "{} mismatches by address #{}, giving up",
                    self.verifier.mismatches(),
                    index
                );
                return Ok(RunOutcome::Aborted {
                    index,
                    mismatches: self.verifier.mismatches(),
                });
            }
            processed += 1;
        }

        if processed < self.run_length {
            info!(
                "Inputs ran out after {} of {} addresses",
                processed, self.run_length
            );
        }
        Ok(RunOutcome::Completed(Summary {
            processed,
            stats: self.mmu.stats(),
            mismatches: self.verifier.mismatches(),
        }))
    }
}
