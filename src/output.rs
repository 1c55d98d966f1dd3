//! Output formatting.
//!
//! Masked payloads are written as JSON with `", "` and `": "` separators and
//! non-ASCII text left literal, e.g. `{"name": "JXXX SXXXX", "city": "Pune"}`.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::record::Record;

/// Column headers of the output CSV, in order.
pub const OUTPUT_HEADERS: [&str; 3] = ["record_id", "redacted_data_json", "is_pii"];

/// Compact JSON with a space after every separator.
#[derive(Debug, Default, Clone, Copy)]
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialize a masked record for the `redacted_data_json` column.
pub fn to_json_text(record: &Record) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, SpacedFormatter);
    record.serialize(&mut ser)?;
    // serde_json only ever emits UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Verdict text for the `is_pii` column.
pub fn verdict_text(is_pii: bool) -> &'static str {
    if is_pii {
        "True"
    } else {
        "False"
    }
}
