//! Batch pipeline.
//!
//! Coordinates the full run:
//! 1. Locate the input CSV (missing input is fatal)
//! 2. Resolve identifier and payload columns from their aliases
//! 3. Per row: parse payload, detect and mask, serialize
//! 4. Write `record_id,redacted_data_json,is_pii` rows

use std::io;

use csv::{ByteRecord, StringRecord, Terminator};

use crate::config::{EngineConfig, RunConfig};
use crate::engine::detect_and_mask;
use crate::error::RedactError;
use crate::output::{to_json_text, verdict_text, OUTPUT_HEADERS};
use crate::record::{parse_payload, ParsedPayload, Record};

use super::context::BatchContext;

/// Result of processing a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordResult {
    pub record_id: String,
    pub redacted_json: String,
    pub is_pii: bool,
    /// False when the payload was missing or could not be parsed.
    pub payload_parsed: bool,
}

/// Result of processing a batch.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub received_count: usize,
    pub pii_count: usize,
    pub clean_count: usize,
    pub parse_failures: usize,
    pub records: Vec<RecordResult>,
}

/// Header positions of the alias columns, in alias priority order.
#[derive(Debug, Clone)]
struct Columns {
    id: Vec<usize>,
    payload: Vec<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, config: &RunConfig) -> Self {
        Self {
            id: alias_positions(headers, &config.id_aliases),
            payload: alias_positions(headers, &config.payload_aliases),
        }
    }
}

/// Header position of each alias that exists. Duplicate headers: the
/// rightmost column wins.
fn alias_positions(headers: &StringRecord, aliases: &[String]) -> Vec<usize> {
    aliases
        .iter()
        .filter_map(|alias| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| *header == alias.as_str())
                .map(|(idx, _)| idx)
                .last()
        })
        .collect()
}

/// First non-empty cell among `positions`.
fn first_present<'r>(row: &'r StringRecord, positions: &[usize]) -> Option<&'r str> {
    positions
        .iter()
        .filter_map(|&idx| row.get(idx))
        .find(|cell| !cell.is_empty())
}

/// Run a whole batch: read `config.input`, write `config.output`.
pub fn run(config: &RunConfig) -> Result<BatchResult, RedactError> {
    if !config.input.is_file() {
        return Err(RedactError::InputNotFound(config.input.clone()));
    }

    let ctx = BatchContext::new();
    log::info!(
        "{} BATCH_START input={} reconciliation={}",
        ctx.log_context(),
        config.input.display(),
        config.engine.reconciliation.as_str()
    );

    let reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(&config.input)?;
    let result = process_batch(&ctx, reader, config)?;

    let writer = csv::WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_path(&config.output)?;
    write_results(writer, &result.records)?;

    Ok(result)
}

/// Process every row of `reader`.
pub fn process_batch<R: io::Read>(
    ctx: &BatchContext,
    mut reader: csv::Reader<R>,
    config: &RunConfig,
) -> Result<BatchResult, RedactError> {
    let headers = StringRecord::from_byte_record_lossy(reader.byte_headers()?.clone());
    let columns = Columns::resolve(&headers, config);
    if columns.payload.is_empty() {
        log::warn!(
            "{} PAYLOAD_COLUMN_MISSING aliases={:?}",
            ctx.log_context(),
            config.payload_aliases
        );
    }

    let mut result = BatchResult::default();
    for (idx, row) in reader.byte_records().enumerate() {
        let row = decode_row(ctx, row?, idx + 1);
        let record_id = first_present(&row, &columns.id).unwrap_or_default();
        let payload = first_present(&row, &columns.payload);

        let record = process_record(ctx, record_id, payload, &config.engine, idx + 1);

        result.received_count += 1;
        if record.is_pii {
            result.pii_count += 1;
        } else {
            result.clean_count += 1;
        }
        if !record.payload_parsed {
            result.parse_failures += 1;
        }
        result.records.push(record);
    }

    log::info!(
        "{} BATCH_COMPLETE received={} pii={} clean={} parse_failures={}",
        ctx.log_context(),
        result.received_count,
        result.pii_count,
        result.clean_count,
        result.parse_failures
    );

    Ok(result)
}

/// Decode a raw row as UTF-8. Invalid bytes become U+FFFD so one bad
/// row cannot abort the batch.
fn decode_row(ctx: &BatchContext, row: ByteRecord, row_number: usize) -> StringRecord {
    StringRecord::from_byte_record(row).unwrap_or_else(|e| {
        log::warn!(
            "{} ROW_DECODE_FAILED error={} decoding=lossy",
            ctx.log_context().with_row(row_number),
            e.utf8_error()
        );
        StringRecord::from_byte_record_lossy(e.into_byte_record())
    })
}

/// Process one record. Never fails: bad payloads become `{}` / not PII.
pub fn process_record(
    batch_ctx: &BatchContext,
    record_id: &str,
    payload: Option<&str>,
    engine: &EngineConfig,
    row: usize,
) -> RecordResult {
    let ctx = batch_ctx.record_context(record_id, row);

    let parsed = match payload {
        Some(raw) => parse_payload(raw),
        None => ParsedPayload::Unparseable("no payload column".to_string()),
    };
    match &parsed {
        ParsedPayload::Strict(_) => {}
        ParsedPayload::Relaxed(_) => log::debug!("{} PAYLOAD_PARSE_FALLBACK quotes=single", ctx),
        ParsedPayload::Unparseable(reason) => {
            log::warn!("{} PAYLOAD_PARSE_FAILED error={}", ctx, reason)
        }
    }

    let payload_parsed = parsed.is_parsed();
    let (masked, is_pii) = if payload_parsed {
        let outcome = detect_and_mask(&parsed.into_record(), engine, &ctx);
        let is_pii = outcome.is_pii();
        (outcome.masked, is_pii)
    } else {
        (Record::new(), false)
    };

    let redacted_json = to_json_text(&masked).unwrap_or_else(|e| {
        log::warn!("{} PAYLOAD_SERIALIZE_FAILED error={}", ctx, e);
        "{}".to_string()
    });

    RecordResult {
        record_id: record_id.to_string(),
        redacted_json,
        is_pii,
        payload_parsed,
    }
}

/// Write the output CSV: header row, then one row per record.
pub fn write_results<W: io::Write>(
    mut writer: csv::Writer<W>,
    records: &[RecordResult],
) -> Result<(), RedactError> {
    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.write_record([
            record.record_id.as_str(),
            record.redacted_json.as_str(),
            verdict_text(record.is_pii),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
