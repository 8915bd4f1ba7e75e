use std::process::ExitCode;

use clap::Parser;
use mmu::Mmu;
use vmsim::{
    config::Args,
    error::ABORTED,
    report::{SummaryReport, TraceLine},
    Inputs, RunOutcome, SimError, Simulation, Verifier,
};

fn run(args: &Args) -> Result<ExitCode, SimError> {
    let config = args.mmu_config();
    config.validate()?;
    let inputs = Inputs::open(
        &args.addresses,
        &args.oracle,
        &args.backing_store,
        args.frame_size,
    )?;
    let mmu = Mmu::new(config, inputs.backing_store)?;
    let mut simulation = Simulation::new(
        mmu,
        Verifier::new(args.mismatch_threshold),
        args.run_length,
    );

    let outcome = simulation.run(inputs.addresses, inputs.oracle, |step| {
        if !args.quiet {
            print!("{}", TraceLine(step));
        }
    })?;

    match outcome {
        RunOutcome::Completed(summary) => {
            println!("{}", SummaryReport(&summary));
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Aborted { index, mismatches } => {
            eprintln!(
                "Aborting after address #{}: {} translated values did not match",
                index, mismatches
            );
            Ok(ExitCode::from(ABORTED))
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{}", err);
            err.exit_code()
        }
    }
}
