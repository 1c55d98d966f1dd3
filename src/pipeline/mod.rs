//! Pipeline orchestration module.
//!
//! Batch pipeline that coordinates:
//! - CSV reading and column alias resolution
//! - Payload parsing with the single-quote fallback
//! - Detection and masking per record
//! - Output CSV writing

pub mod context;
pub mod ingestion;

pub use context::*;
pub use ingestion::*;
