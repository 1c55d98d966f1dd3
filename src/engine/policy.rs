//! Classification rules.
//!
//! Rules run in a fixed order over one record. Each rule detects on the
//! original values, writes into the working copy, and may raise evidence.
//! Weak-signal rules (email, name, address, device) mask speculatively;
//! [`super::reconcile`] decides later whether those masks stay.

use serde_json::Value;

use crate::detection::{
    digit_count, host_segment, mask_device, mask_ip, mask_name, mask_phone, mask_pin_code,
    PiiKind, REDACTED_ADDRESS,
};
use crate::logging::structured::LogContext;
use crate::record::{
    get_truthy, string_fields, value_to_string, Record, ADDRESS_FIELD, CITY_FIELD, DEVICE_FIELD,
    FIRST_NAME_FIELD, IP_FIELD, LAST_NAME_FIELD, NAME_FIELD, PHONE_FIELDS, PIN_CODE_FIELD,
    UPI_FIELD,
};

use super::evidence::Evidence;

/// Minimum digits a pin code needs for the address rule to fire.
pub const MIN_PIN_DIGITS: usize = 5;

/// Working state for one pass over a record.
pub(crate) struct Scan<'a> {
    original: &'a Record,
    masked: Record,
    evidence: Evidence,
    ctx: &'a LogContext,
}

impl<'a> Scan<'a> {
    pub(crate) fn new(original: &'a Record, ctx: &'a LogContext) -> Self {
        Self {
            original,
            masked: original.clone(),
            evidence: Evidence::default(),
            ctx,
        }
    }

    /// Run every rule and hand back the working copy and the evidence.
    pub(crate) fn run(mut self) -> (Record, Evidence) {
        self.known_phone_fields();
        self.embedded_phones();
        self.substitute_standalone(PiiKind::NationalId);
        self.substitute_standalone(PiiKind::Passport);
        self.upi_handles();
        self.emails();
        self.names();
        self.address();
        self.device();
        (self.masked, self.evidence)
    }

    fn set(&mut self, key: &str, value: String) {
        self.masked.insert(key.to_string(), Value::String(value));
    }

    fn hit(&mut self, kind: PiiKind, key: &str) {
        log::debug!("{} PATTERN_DETECTED type={} field={}", self.ctx, kind.as_str(), key);
        self.evidence.standalone_found = true;
    }

    /// `phone` / `contact`: whole value replaced by the masked number.
    fn known_phone_fields(&mut self) {
        let original = self.original;
        for &field in PHONE_FIELDS {
            let Some(value) = get_truthy(original, field) else {
                continue;
            };
            let text = value_to_string(value);
            if PiiKind::Phone.is_match(&text) {
                self.set(field, mask_phone(&text));
                self.hit(PiiKind::Phone, field);
            }
        }
    }

    /// Ten-digit runs anywhere, unless the field already carries an `X`.
    fn embedded_phones(&mut self) {
        let original = self.original;
        for (key, text) in string_fields(original) {
            if !PiiKind::Phone.is_match(text) {
                continue;
            }
            let already_masked = self
                .masked
                .get(key)
                .map_or(false, |current| value_to_string(current).contains('X'));
            if !already_masked {
                self.set(key, PiiKind::Phone.substitute(text));
                self.hit(PiiKind::Phone, key);
            }
        }
    }

    fn substitute_standalone(&mut self, kind: PiiKind) {
        let original = self.original;
        for (key, text) in string_fields(original) {
            if kind.is_match(text) {
                self.set(key, kind.substitute(text));
                self.hit(kind, key);
            }
        }
    }

    /// A dedicated `upi_id` field takes precedence over scanning.
    fn upi_handles(&mut self) {
        let original = self.original;
        if let Some(value) = get_truthy(original, UPI_FIELD) {
            if let Some(masked) = PiiKind::Upi.mask_first(&value_to_string(value)) {
                self.set(UPI_FIELD, masked);
                self.hit(PiiKind::Upi, UPI_FIELD);
            }
            return;
        }

        for (key, text) in string_fields(original) {
            // A dotted host is an email, not a handle.
            let dotless_host = host_segment(text).map_or(false, |host| !host.contains('.'));
            if dotless_host && PiiKind::Upi.is_match(text) {
                self.set(key, PiiKind::Upi.substitute(text));
                self.hit(PiiKind::Upi, key);
            }
        }
    }

    fn emails(&mut self) {
        let original = self.original;
        for (key, text) in string_fields(original) {
            if PiiKind::Email.is_match(text) {
                self.evidence.email_present = true;
                self.set(key, PiiKind::Email.substitute(text));
            }
        }
    }

    fn names(&mut self) {
        let original = self.original;
        let first = get_truthy(original, FIRST_NAME_FIELD);
        let last = get_truthy(original, LAST_NAME_FIELD);
        let full = get_truthy(original, NAME_FIELD).map(value_to_string);

        let split_pair = first.is_some() && last.is_some();
        let multi_word = full
            .as_deref()
            .map_or(false, |name| name.split_whitespace().count() >= 2);
        if !(split_pair || multi_word) {
            return;
        }

        self.evidence.name_present = true;
        if let (Some(first), Some(last)) = (first, last) {
            self.set(FIRST_NAME_FIELD, mask_name(&value_to_string(first)));
            self.set(LAST_NAME_FIELD, mask_name(&value_to_string(last)));
        }
        if let Some(full) = full {
            self.set(NAME_FIELD, mask_name(&full));
        }
    }

    /// Address, city and a pin code of at least five digits, jointly.
    fn address(&mut self) {
        let original = self.original;
        let (Some(_), Some(_), Some(pin)) = (
            get_truthy(original, ADDRESS_FIELD),
            get_truthy(original, CITY_FIELD),
            get_truthy(original, PIN_CODE_FIELD),
        ) else {
            return;
        };

        let pin = value_to_string(pin);
        if digit_count(&pin) >= MIN_PIN_DIGITS {
            self.evidence.address_present = true;
            self.set(ADDRESS_FIELD, REDACTED_ADDRESS.to_string());
            self.set(PIN_CODE_FIELD, mask_pin_code(&pin));
        }
    }

    fn device(&mut self) {
        let original = self.original;
        if let Some(device) = get_truthy(original, DEVICE_FIELD) {
            self.evidence.device_present = true;
            self.set(DEVICE_FIELD, mask_device(&value_to_string(device)));
        }
        if let Some(ip) = get_truthy(original, IP_FIELD) {
            self.evidence.device_present = true;
            self.set(IP_FIELD, mask_ip(&value_to_string(ip)));
        }
    }
}
