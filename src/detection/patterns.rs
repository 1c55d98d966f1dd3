//! Fixed recognizer set.
//!
//! Each recognizer is a single compiled pattern. Patterns are evaluated
//! independently and may overlap: `john@example.com` is both an email and
//! (up to the first dot) a UPI handle.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::maskers;

lazy_static! {
    /// Mobile number: exactly ten digits, word-bounded.
    static ref PHONE_PATTERN: Regex = Regex::new(r"\b(\d{10})\b").unwrap();

    /// Aadhaar-style national ID: exactly twelve digits, word-bounded.
    static ref NATIONAL_ID_PATTERN: Regex = Regex::new(r"\b(\d{12})\b").unwrap();

    /// Passport: one letter followed by seven digits (e.g. P1234567).
    pub(crate) static ref PASSPORT_PATTERN: Regex = Regex::new(r"(?i)\b([A-Z]\d{7})\b").unwrap();

    /// Email: local part, `@`, dotted domain with a 2+ letter suffix.
    pub(crate) static ref EMAIL_PATTERN: Regex = Regex::new(
        r"\b([A-Za-z0-9._%+-]+)@([A-Za-z0-9.-]+\.[A-Za-z]{2,})\b"
    ).unwrap();

    /// UPI handle: `user@host`, host made of alphanumerics only.
    pub(crate) static ref UPI_PATTERN: Regex = Regex::new(
        r"(?i)\b([A-Za-z0-9._%-]{2,})@([A-Za-z0-9]{2,})\b"
    ).unwrap();

    /// IPv4: four dot-separated groups of 1-3 digits, no range check.
    pub(crate) static ref IPV4_PATTERN: Regex = Regex::new(
        r"\b((?:\d{1,3}\.){3}\d{1,3})\b"
    ).unwrap();

    /// Anything that is not a digit, for digit-count checks.
    pub(crate) static ref NON_DIGIT: Regex = Regex::new(r"\D").unwrap();
}

/// The kinds of value the engine recognizes by pattern alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiiKind {
    Phone,
    NationalId,
    Passport,
    Email,
    Upi,
    Ipv4,
}

impl PiiKind {
    /// Kinds re-applied to every field once a record is known to be PII.
    pub const FINALIZE_ORDER: [PiiKind; 5] = [
        PiiKind::Phone,
        PiiKind::NationalId,
        PiiKind::Passport,
        PiiKind::Email,
        PiiKind::Ipv4,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiKind::Phone => "phone",
            PiiKind::NationalId => "national_id",
            PiiKind::Passport => "passport",
            PiiKind::Email => "email",
            PiiKind::Upi => "upi",
            PiiKind::Ipv4 => "ipv4",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            PiiKind::Phone => &*PHONE_PATTERN,
            PiiKind::NationalId => &*NATIONAL_ID_PATTERN,
            PiiKind::Passport => &*PASSPORT_PATTERN,
            PiiKind::Email => &*EMAIL_PATTERN,
            PiiKind::Upi => &*UPI_PATTERN,
            PiiKind::Ipv4 => &*IPV4_PATTERN,
        }
    }

    /// True if `text` contains at least one occurrence of this kind.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern().is_match(text)
    }

    /// Mask a single value of this kind.
    ///
    /// Falls back to [`maskers::REDACTED`] when the value does not parse.
    pub fn mask(&self, value: &str) -> String {
        match self {
            PiiKind::Phone => maskers::mask_phone(value),
            PiiKind::NationalId => maskers::mask_national_id(value),
            PiiKind::Passport => maskers::mask_passport(value),
            PiiKind::Email => maskers::mask_email(value),
            PiiKind::Upi => maskers::mask_upi(value),
            PiiKind::Ipv4 => maskers::mask_ip(value),
        }
    }

    /// Mask the first occurrence in `text`, discarding the surrounding text.
    ///
    /// Returns `None` if nothing matches.
    pub fn mask_first(&self, text: &str) -> Option<String> {
        self.pattern().find(text).map(|m| self.mask(m.as_str()))
    }

    /// Replace every occurrence in `text` with its masked form, leaving the
    /// surrounding text intact.
    pub fn substitute(&self, text: &str) -> String {
        self.pattern()
            .replace_all(text, |caps: &Captures| self.mask(&caps[0]))
            .into_owned()
    }
}

/// Text after the first `@`, if any.
pub fn host_segment(text: &str) -> Option<&str> {
    text.split_once('@').map(|(_, rhs)| rhs)
}

/// Count of digit characters in `text`.
pub fn digit_count(text: &str) -> usize {
    NON_DIGIT.replace_all(text, "").chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_requires_exactly_ten_digits() {
        assert!(PiiKind::Phone.is_match("9876543210"));
        assert!(PiiKind::Phone.is_match("call 9876543210 now"));
        assert!(!PiiKind::Phone.is_match("98765432101"));
        assert!(!PiiKind::Phone.is_match("987654321"));
        assert!(!PiiKind::Phone.is_match("x9876543210"));
    }

    #[test]
    fn test_national_id_is_word_bounded() {
        assert!(PiiKind::NationalId.is_match("123456789012"));
        assert!(!PiiKind::NationalId.is_match("1234567890123"));
        assert!(!PiiKind::NationalId.is_match("9876543210"));
    }

    #[test]
    fn test_passport_is_case_insensitive() {
        assert!(PiiKind::Passport.is_match("P1234567"));
        assert!(PiiKind::Passport.is_match("passport p1234567"));
        assert!(!PiiKind::Passport.is_match("PP1234567"));
        assert!(!PiiKind::Passport.is_match("P123456"));
    }

    #[test]
    fn test_email_needs_dotted_domain() {
        assert!(PiiKind::Email.is_match("john.smith@example.com"));
        assert!(!PiiKind::Email.is_match("john@okaxis"));
        assert!(!PiiKind::Email.is_match("john@example.c"));
    }

    #[test]
    fn test_upi_overlaps_email() {
        assert!(PiiKind::Upi.is_match("user123@paytm"));
        // The host stops at the dot, so emails match too.
        assert!(PiiKind::Upi.is_match("john@example.com"));
        assert!(!PiiKind::Upi.is_match("a@paytm"));
    }

    #[test]
    fn test_ipv4_has_no_range_validation() {
        assert!(PiiKind::Ipv4.is_match("192.168.1.10"));
        assert!(PiiKind::Ipv4.is_match("999.999.999.999"));
        assert!(!PiiKind::Ipv4.is_match("192.168.1"));
    }

    #[test]
    fn test_substitute_preserves_surrounding_text() {
        assert_eq!(
            PiiKind::Phone.substitute("Call 9876543210 or 9123456780."),
            "Call 98XXXXXX10 or 91XXXXXX80."
        );
        assert_eq!(
            PiiKind::Ipv4.substitute("from 10.0.0.1 via 10.0.0.254"),
            "from 10.0.0.XXX via 10.0.0.XXX"
        );
    }

    #[test]
    fn test_mask_first_drops_context() {
        assert_eq!(
            PiiKind::Upi.mask_first("pay rahul99@okicici please"),
            Some("raXXXXX@okicici".to_string())
        );
        assert_eq!(PiiKind::Upi.mask_first("no handle"), None);
    }

    #[test]
    fn test_helpers() {
        assert_eq!(host_segment("a@b@c"), Some("b@c"));
        assert_eq!(host_segment("plain"), None);
        assert_eq!(digit_count("560 001"), 6);
        assert_eq!(digit_count("abc"), 0);
    }
}
