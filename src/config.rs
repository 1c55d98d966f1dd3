//! Run and engine configuration.

use std::path::PathBuf;

/// Default output path when none is given.
pub const DEFAULT_OUTPUT: &str = "redacted_output.csv";

/// Accepted identifier column names, first non-empty wins.
pub const ID_ALIASES: &[&str] = &["record_id", "recordId", "id"];

/// Accepted payload column names, first non-empty wins.
pub const PAYLOAD_ALIASES: &[&str] = &["Data_json", "data_json", "Data", "data"];

/// What to roll back when a record turns out not to be PII.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReconciliationMode {
    /// Restore every field masked while gathering weak signals: email,
    /// names, address and pin code, device id and IP address.
    #[default]
    Consistent,
    /// Restore only email fields, a one-word `name`, and a lone
    /// `first_name` or `last_name`. Address and device masks stay.
    Legacy,
}

impl ReconciliationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationMode::Consistent => "consistent",
            ReconciliationMode::Legacy => "legacy",
        }
    }
}

/// Settings for the detection engine.
#[derive(Debug, Default, Clone)]
pub struct EngineConfig {
    pub reconciliation: ReconciliationMode,
}

/// Settings for one batch run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub id_aliases: Vec<String>,
    pub payload_aliases: Vec<String>,
    pub engine: EngineConfig,
}

impl RunConfig {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            id_aliases: ID_ALIASES.iter().map(|s| s.to_string()).collect(),
            payload_aliases: PAYLOAD_ALIASES.iter().map(|s| s.to_string()).collect(),
            engine: EngineConfig::default(),
        }
    }

    pub fn with_reconciliation(mut self, mode: ReconciliationMode) -> Self {
        self.engine.reconciliation = mode;
        self
    }
}
