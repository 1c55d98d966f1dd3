//! Structured logging utilities.
//!
//! Provides context-aware logging with batch_id, the CSV row number and
//! record_id included in every log message.

use std::fmt;

/// Logging context for a batch, optionally narrowed to one CSV row.
#[derive(Debug, Clone)]
pub struct LogContext {
    pub batch_id: String,
    /// 1-based data row in the input CSV (the header row is not counted).
    pub row: Option<usize>,
    pub record_id: Option<String>,
}

impl LogContext {
    pub fn new(batch_id: &str) -> Self {
        Self {
            batch_id: batch_id.to_string(),
            row: None,
            record_id: None,
        }
    }

    pub fn with_row(&self, row: usize) -> Self {
        Self {
            row: Some(row),
            ..self.clone()
        }
    }

    pub fn with_record(&self, record_id: &str) -> Self {
        Self {
            record_id: Some(record_id.to_string()),
            ..self.clone()
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[batch={}]", self.batch_id)?;
        if let Some(row) = self.row {
            write!(f, " [row={}]", row)?;
        }
        if let Some(rid) = &self.record_id {
            write!(f, " [record={}]", rid)?;
        }
        Ok(())
    }
}

/// Initialize the process-wide logger.
///
/// Defaults to `info`; `RUST_LOG` overrides.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp_millis()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_context_display() {
        let ctx = LogContext::new("batch-123");
        assert_eq!(format!("{}", ctx), "[batch=batch-123]");

        let ctx_with_record = ctx.with_record("rec-456");
        assert_eq!(
            format!("{}", ctx_with_record),
            "[batch=batch-123] [record=rec-456]"
        );

        let ctx_with_row = ctx.with_row(7).with_record("rec-456");
        assert_eq!(
            format!("{}", ctx_with_row),
            "[batch=batch-123] [row=7] [record=rec-456]"
        );
        assert_eq!(format!("{}", ctx.with_row(3)), "[batch=batch-123] [row=3]");
    }
}
