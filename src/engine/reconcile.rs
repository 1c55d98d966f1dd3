//! Post-verdict passes.
//!
//! A negative verdict rolls speculative masks back to the original values.
//! A positive verdict re-runs the standalone substitutions over every field
//! to catch anything the targeted rules missed.

use serde_json::Value;

use crate::config::ReconciliationMode;
use crate::detection::PiiKind;
use crate::record::{
    get_truthy, string_fields, value_to_string, Record, ADDRESS_FIELD, DEVICE_FIELD,
    FIRST_NAME_FIELD, IP_FIELD, LAST_NAME_FIELD, NAME_FIELD, PIN_CODE_FIELD,
};

/// Fields the weak-signal rules may overwrite.
const SPECULATIVE_FIELDS: &[&str] = &[
    FIRST_NAME_FIELD,
    LAST_NAME_FIELD,
    NAME_FIELD,
    ADDRESS_FIELD,
    PIN_CODE_FIELD,
    DEVICE_FIELD,
    IP_FIELD,
];

/// Restore `key` from `original`. Returns true if the value changed.
fn restore(original: &Record, masked: &mut Record, key: &str) -> bool {
    match original.get(key) {
        Some(value) if masked.get(key) != Some(value) => {
            masked.insert(key.to_string(), value.clone());
            true
        }
        _ => false,
    }
}

/// Undo speculative masking for a record judged not to be PII.
///
/// Returns the number of fields restored.
pub fn reconcile(original: &Record, masked: &mut Record, mode: ReconciliationMode) -> usize {
    let mut keys: Vec<&str> = string_fields(original)
        .filter(|(_, text)| PiiKind::Email.is_match(text))
        .map(|(key, _)| key)
        .collect();

    match mode {
        ReconciliationMode::Consistent => keys.extend(SPECULATIVE_FIELDS),
        ReconciliationMode::Legacy => {
            let short_name = get_truthy(original, NAME_FIELD)
                .map_or(false, |name| value_to_string(name).split_whitespace().count() < 2);
            if short_name {
                keys.push(NAME_FIELD);
            }

            let first = get_truthy(original, FIRST_NAME_FIELD).is_some();
            let last = get_truthy(original, LAST_NAME_FIELD).is_some();
            if first != last {
                keys.extend([FIRST_NAME_FIELD, LAST_NAME_FIELD]);
            }
        }
    }

    keys.into_iter()
        .filter(|key| restore(original, masked, key))
        .count()
}

/// Re-apply every standalone substitution to every string field.
///
/// Substitutions chain: each kind runs on the output of the previous one.
/// Returns the number of fields changed.
pub fn finalize(masked: &mut Record) -> usize {
    let mut changed = 0;
    for value in masked.values_mut() {
        let Value::String(text) = value else {
            continue;
        };
        let rewritten = PiiKind::FINALIZE_ORDER
            .iter()
            .fold(text.clone(), |acc, kind| kind.substitute(&acc));
        if rewritten != *text {
            *text = rewritten;
            changed += 1;
        }
    }
    changed
}
