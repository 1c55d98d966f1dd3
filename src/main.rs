mod cli;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use pii_redact::config::RunConfig;
use pii_redact::error::RedactError;
use pii_redact::logging::init_logger;
use pii_redact::pipeline::{run, BatchResult};

use crate::cli::Cli;

fn execute(config: &RunConfig) -> Result<BatchResult> {
    run(config).with_context(|| {
        format!(
            "failed to redact {} into {}",
            config.input.display(),
            config.output.display()
        )
    })
}

fn main() -> ExitCode {
    init_logger();
    let config = Cli::parse().into_run_config();

    match execute(&config) {
        Ok(_) => {
            println!("Wrote {}", config.output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            let redact_err = err.downcast_ref::<RedactError>();
            if let Some(RedactError::InputNotFound(path)) = redact_err {
                eprintln!("Input file not found: {}", path.display());
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(redact_err.map_or(1, RedactError::exit_code))
        }
    }
}
