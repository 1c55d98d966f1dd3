//! Pipeline context management.
//!
//! Provides batch context for logging and per-record log prefixes.

use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for one batch run.
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub batch_id: String,
}

impl BatchContext {
    pub fn new() -> Self {
        let batch_id = format!("batch-{}", &Uuid::new_v4().to_string()[..8]);
        Self { batch_id }
    }

    pub fn log_context(&self) -> LogContext {
        LogContext::new(&self.batch_id)
    }

    /// Log context for a single record within this batch.
    ///
    /// Always carries the 1-based row number; the record id only when the
    /// row has one.
    pub fn record_context(&self, record_id: &str, row: usize) -> LogContext {
        let ctx = self.log_context().with_row(row);
        if record_id.is_empty() {
            ctx
        } else {
            ctx.with_record(record_id)
        }
    }
}

impl Default for BatchContext {
    fn default() -> Self {
        Self::new()
    }
}
