//! Evidence gathered while scanning a record, and the verdict derived from it.

/// Minimum number of weak signals that together make a record PII.
pub const COMBINATORIAL_THRESHOLD: usize = 2;

/// Classification signals for a single record.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Evidence {
    /// A strong identifier (phone, national ID, passport, UPI) matched.
    pub standalone_found: bool,
    pub name_present: bool,
    pub email_present: bool,
    pub address_present: bool,
    pub device_present: bool,
}

impl Evidence {
    pub fn combinatorial_count(&self) -> usize {
        [
            self.name_present,
            self.email_present,
            self.address_present,
            self.device_present,
        ]
        .iter()
        .filter(|flag| **flag)
        .count()
    }

    pub fn verdict(&self) -> Verdict {
        if self.standalone_found {
            Verdict::Standalone
        } else if self.combinatorial_count() >= COMBINATORIAL_THRESHOLD {
            Verdict::Combinatorial
        } else {
            Verdict::Clean
        }
    }

    pub fn is_pii(&self) -> bool {
        self.verdict().is_pii()
    }
}

/// Outcome of classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// At least one strong identifier.
    Standalone,
    /// Two or more weak signals together.
    Combinatorial,
    /// Not PII.
    Clean,
}

impl Verdict {
    pub fn is_pii(&self) -> bool {
        !matches!(self, Verdict::Clean)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Standalone => "standalone",
            Verdict::Combinatorial => "combinatorial",
            Verdict::Clean => "clean",
        }
    }
}
