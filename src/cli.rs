use clap::Parser;
use std::path::PathBuf;

use pii_redact::config::{ReconciliationMode, RunConfig, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(
    name = "pii-redact",
    version,
    about = "Detect and mask PII in CSV records with embedded JSON payloads"
)]
pub struct Cli {
    /// Input CSV path
    pub input_csv: PathBuf,

    /// Output CSV path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Only roll back email and partial-name masks on non-PII records,
    /// leaving address and device masks in place
    #[arg(long)]
    pub legacy_reconciliation: bool,
}

impl Cli {
    pub fn into_run_config(self) -> RunConfig {
        let mode = if self.legacy_reconciliation {
            ReconciliationMode::Legacy
        } else {
            ReconciliationMode::Consistent
        };
        RunConfig::new(self.input_csv, self.output).with_reconciliation(mode)
    }
}
