pub mod addresses;
pub mod config;
pub mod error;
pub mod oracle;
pub mod report;
pub mod simulation;
pub mod verify;

pub use error::{ParseError, SimError};
pub use simulation::{Inputs, RunOutcome, Simulation, Step, Summary};
pub use verify::Verifier;
