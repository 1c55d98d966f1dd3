//! Structured logging with batch and record context.
//!
//! Log lines carry batch_id and record_id so a single record can be
//! followed through the run. Field values are never logged.

pub mod structured;

pub use structured::*;
