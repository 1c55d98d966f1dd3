//! pii-redact - PII detection and masking for tabular records
//!
//! Each CSV row carries a JSON payload. The engine decides whether the
//! payload holds personally identifiable information and produces a masked
//! copy that keeps enough of each value (prefixes, suffixes, domains) to
//! stay auditable.
//!
//! A record is PII when it has a standalone identifier (phone, national ID,
//! passport, UPI handle) or at least two weak signals together (name,
//! email, address, device/IP).
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `detection` - Fixed recognizer patterns and per-kind maskers
//! - `engine` - Ordered classification rules, verdict, rollback and finalization
//! - `record` - Payload parsing, truthiness, known field names
//! - `pipeline` - Batch orchestrator over the CSV envelope
//! - `output` - Payload re-serialization and verdict text
//! - `config` - Run and engine settings
//! - `error` - Batch-level errors
//! - `logging` - Structured logging with batch/record context

pub mod config;
pub mod detection;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod record;

pub use config::{EngineConfig, ReconciliationMode, RunConfig};
pub use engine::{detect_and_mask, Evidence, MaskOutcome, Verdict};
pub use error::RedactError;
pub use record::Record;
