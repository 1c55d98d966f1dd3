//! Partial-reveal maskers.
//!
//! Every masker is a pure function from the raw value to its redacted form.
//! Maskers never fail: input they cannot parse becomes [`REDACTED`].

use super::patterns::{EMAIL_PATTERN, IPV4_PATTERN, NON_DIGIT, PASSPORT_PATTERN, UPI_PATTERN};

/// Generic redaction token.
pub const REDACTED: &str = "[REDACTED_PII]";

/// Replacement for a whole street address.
pub const REDACTED_ADDRESS: &str = "[REDACTED_PII_ADDRESS]";

fn digits_only(value: &str) -> Vec<char> {
    NON_DIGIT.replace_all(value, "").chars().collect()
}

/// Keep `head` leading and `tail` trailing chars, `X` out the rest.
fn reveal_ends(chars: &[char], head: usize, tail: usize) -> String {
    let hidden = chars.len().saturating_sub(head + tail);
    let mut out: String = chars[..head].iter().collect();
    out.push_str(&"X".repeat(hidden));
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// `9876543210` -> `98XXXXXX10`.
pub fn mask_phone(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() == 10 {
        reveal_ends(&digits, 2, 2)
    } else {
        REDACTED.to_string()
    }
}

/// `123456789012` -> `1234XXXX9012`.
pub fn mask_national_id(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() == 12 {
        reveal_ends(&digits, 4, 4)
    } else {
        REDACTED.to_string()
    }
}

/// `P1234567` -> `PXXXXXX7`.
pub fn mask_passport(value: &str) -> String {
    match PASSPORT_PATTERN.captures(value) {
        Some(caps) if caps[1].chars().count() >= 4 => {
            let chars: Vec<char> = caps[1].chars().collect();
            reveal_ends(&chars, 1, 1)
        }
        _ => REDACTED.to_string(),
    }
}

/// Mask a `local@host` pair: two leading chars kept, at least three `X`.
fn mask_handle(local: &str, host: &str) -> String {
    let chars: Vec<char> = local.chars().collect();
    let masked_local = if chars.len() <= 2 {
        format!("{}X", chars[0])
    } else {
        let hidden = (chars.len() - 2).max(3);
        format!("{}{}", chars[..2].iter().collect::<String>(), "X".repeat(hidden))
    };
    format!("{}@{}", masked_local, host)
}

/// `john.smith@example.com` -> `joXXXXXXXX@example.com`.
pub fn mask_email(value: &str) -> String {
    match EMAIL_PATTERN.captures(value) {
        Some(caps) => mask_handle(&caps[1], &caps[2]),
        None => REDACTED.to_string(),
    }
}

/// `rahul99@okicici` -> `raXXXXX@okicici`.
pub fn mask_upi(value: &str) -> String {
    match UPI_PATTERN.captures(value) {
        Some(caps) => mask_handle(&caps[1], &caps[2]),
        None => REDACTED.to_string(),
    }
}

/// `192.168.1.10` -> `192.168.1.XXX`.
pub fn mask_ip(value: &str) -> String {
    let Some(caps) = IPV4_PATTERN.captures(value) else {
        return REDACTED.to_string();
    };
    let mut octets: Vec<&str> = caps[1].split('.').collect();
    if octets.len() != 4 {
        return REDACTED.to_string();
    }
    octets[3] = "XXX";
    octets.join(".")
}

/// `John Smith` -> `JXXX SXXXX`.
///
/// Single-word names are returned trimmed but otherwise unmasked.
pub fn mask_name(value: &str) -> String {
    let trimmed = value.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() < 2 {
        return trimmed.to_string();
    }

    parts
        .iter()
        .map(|part| {
            let mut chars = part.chars();
            match (chars.next(), chars.count()) {
                (Some(first), rest) if rest > 0 => format!("{}{}", first, "X".repeat(rest)),
                _ => "X".to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `560001` -> `56XXX`; anything of three chars or fewer -> `XXX`.
pub fn mask_pin_code(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 3 {
        format!("{}XXX", chars[..2].iter().collect::<String>())
    } else {
        "XXX".to_string()
    }
}

/// Length-preserving: every char except a newline becomes `X`.
pub fn mask_device(value: &str) -> String {
    value
        .chars()
        .map(|c| if c == '\n' { c } else { 'X' })
        .collect()
}
