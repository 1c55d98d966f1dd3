//! Record payloads.
//!
//! A record is the JSON object embedded in one CSV row. Field order is kept
//! as read so the masked payload comes back out in the same layout.

use serde_json::{Map, Value};

/// Ordered mapping of field name to JSON value.
pub type Record = Map<String, Value>;

/// Fields checked for a phone number before the general scan.
pub const PHONE_FIELDS: &[&str] = &["phone", "contact"];

pub const UPI_FIELD: &str = "upi_id";
pub const FIRST_NAME_FIELD: &str = "first_name";
pub const LAST_NAME_FIELD: &str = "last_name";
pub const NAME_FIELD: &str = "name";
pub const ADDRESS_FIELD: &str = "address";
pub const CITY_FIELD: &str = "city";
pub const PIN_CODE_FIELD: &str = "pin_code";
pub const DEVICE_FIELD: &str = "device_id";
pub const IP_FIELD: &str = "ip_address";

/// Whether a value counts as present.
///
/// Null, `false`, zero, and empty strings, arrays, and objects are absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(obj) => !obj.is_empty(),
    }
}

/// Look up `key`, returning it only if the value is present.
pub fn get_truthy<'a>(record: &'a Record, key: &str) -> Option<&'a Value> {
    record.get(key).filter(|v| is_truthy(v))
}

/// Text form of a value, used where a rule inspects non-string fields.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Null => String::new(),
        _ => value.to_string(), // Arrays and objects as JSON strings
    }
}

/// Iterate over the string-valued fields of a record.
pub fn string_fields(record: &Record) -> impl Iterator<Item = (&str, &str)> {
    record
        .iter()
        .filter_map(|(k, v)| v.as_str().map(|s| (k.as_str(), s)))
}

/// How a payload string was turned into a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedPayload {
    /// Valid JSON object.
    Strict(Record),
    /// Parsed only after swapping single quotes for double quotes.
    Relaxed(Record),
    /// Neither attempt produced a JSON object.
    Unparseable(String),
}

impl ParsedPayload {
    /// The parsed record, or an empty one if parsing failed.
    pub fn into_record(self) -> Record {
        match self {
            ParsedPayload::Strict(record) | ParsedPayload::Relaxed(record) => record,
            ParsedPayload::Unparseable(_) => Record::new(),
        }
    }

    pub fn is_parsed(&self) -> bool {
        !matches!(self, ParsedPayload::Unparseable(_))
    }
}

fn parse_object(text: &str) -> Result<Record, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(other) => Err(format!("payload is not an object: {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    }
}

/// Bare non-finite number tokens some producers emit in place of JSON numbers.
const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Rewrite bare `NaN` / `Infinity` / `-Infinity` outside string literals to
/// `null`. Returns `None` when there is nothing to rewrite.
fn null_non_finite(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut in_string = false;
    let mut escaped = false;
    let mut replaced = false;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            replaced = true;
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    replaced.then_some(out)
}

/// Parse as an object, retrying once with non-finite tokens nulled.
fn parse_object_lenient(text: &str) -> Result<Record, String> {
    parse_object(text).or_else(|e| match null_non_finite(text) {
        Some(rewritten) => parse_object(&rewritten).map_err(|_| e),
        None => Err(e),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Parse a payload: strict JSON first, then with `'` replaced by `"`.
///
/// Both attempts accept bare `NaN` / `Infinity`, read as `null`.
pub fn parse_payload(raw: &str) -> ParsedPayload {
    match parse_object_lenient(raw) {
        Ok(record) => ParsedPayload::Strict(record),
        Err(_) => match parse_object_lenient(&raw.replace('\'', "\"")) {
            Ok(record) => ParsedPayload::Relaxed(record),
            Err(e) => ParsedPayload::Unparseable(e),
        },
    }
}
