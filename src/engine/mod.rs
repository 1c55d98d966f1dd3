//! Detection-and-masking engine.
//!
//! One record in, one masked record and a verdict out:
//! 1. Scan: run the ordered rules, masking as they go
//! 2. Verdict: standalone evidence, or two or more weak signals
//! 3. Negative verdict: roll back speculative masks
//! 4. Positive verdict: re-run standalone substitutions over every field
//!
//! Records are independent; nothing is shared between calls.

pub mod evidence;
pub mod policy;
pub mod reconcile;

pub use evidence::*;
pub use reconcile::{finalize, reconcile};

use crate::config::EngineConfig;
use crate::logging::structured::LogContext;
use crate::record::Record;

use policy::Scan;

/// Masked copy of a record plus what was found in it.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskOutcome {
    pub masked: Record,
    pub evidence: Evidence,
    pub verdict: Verdict,
}

impl MaskOutcome {
    pub fn is_pii(&self) -> bool {
        self.verdict.is_pii()
    }
}

/// Classify a record and produce its masked copy.
pub fn detect_and_mask(record: &Record, config: &EngineConfig, ctx: &LogContext) -> MaskOutcome {
    let (mut masked, evidence) = Scan::new(record, ctx).run();
    let verdict = evidence.verdict();

    if verdict.is_pii() {
        let changed = finalize(&mut masked);
        log::info!(
            "{} PII_DETECTED verdict={} standalone={} name={} email={} address={} device={}",
            ctx,
            verdict.as_str(),
            evidence.standalone_found,
            evidence.name_present,
            evidence.email_present,
            evidence.address_present,
            evidence.device_present
        );
        log::debug!("{} FINALIZE_COMPLETE fields_changed={}", ctx, changed);
    } else {
        let restored = reconcile(record, &mut masked, config.reconciliation);
        if restored > 0 {
            log::debug!(
                "{} RECONCILE_RESTORED fields={} mode={}",
                ctx,
                restored,
                config.reconciliation.as_str()
            );
        }
        log::debug!(
            "{} RECORD_CLEAN weak_signals={}",
            ctx,
            evidence.combinatorial_count()
        );
    }

    MaskOutcome {
        masked,
        evidence,
        verdict,
    }
}
