//! End-to-end batch runs over real CSV files.

use std::fs;

use pii_redact::config::{ReconciliationMode, RunConfig};
use pii_redact::error::RedactError;
use pii_redact::pipeline::{run, BatchResult};

const INPUT: &str = "record_id,Data_json\n\
1,\"{\"\"phone\"\": \"\"9876543210\"\", \"\"order_value\"\": 1299}\"\n\
2,\"{\"\"name\"\": \"\"John Smith\"\", \"\"email\"\": \"\"john.smith@example.com\"\"}\"\n\
3,\"{\"\"name\"\": \"\"John Smith\"\"}\"\n\
4,\"{\"\"address\"\": \"\"12 MG Road\"\", \"\"city\"\": \"\"Bengaluru\"\", \"\"pin_code\"\": \"\"560001\"\"}\"\n\
5,this is not json\n\
6,\"{'upi_id': 'rahul99@okicici', 'city': 'मुंबई'}\"\n";

fn run_fixture(mode: ReconciliationMode) -> (Vec<Vec<String>>, BatchResult) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    fs::write(&input, INPUT).unwrap();

    let config = RunConfig::new(&input, &output).with_reconciliation(mode);
    let result = run(&config).unwrap();

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    assert_eq!(headers, vec!["record_id", "redacted_data_json", "is_pii"]);
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (rows, result)
}

#[test]
fn test_batch_output_rows() {
    let (rows, result) = run_fixture(ReconciliationMode::Consistent);

    assert_eq!(result.received_count, 6);
    assert_eq!(result.pii_count, 3);
    assert_eq!(result.clean_count, 3);
    assert_eq!(result.parse_failures, 1);

    assert_eq!(
        rows[0],
        vec!["1", r#"{"phone": "98XXXXXX10", "order_value": 1299}"#, "True"]
    );
    assert_eq!(
        rows[1],
        vec![
            "2",
            r#"{"name": "JXXX SXXXX", "email": "joXXXXXXXX@example.com"}"#,
            "True"
        ]
    );
    assert_eq!(rows[2], vec!["3", r#"{"name": "John Smith"}"#, "False"]);
    assert_eq!(
        rows[3],
        vec![
            "4",
            r#"{"address": "12 MG Road", "city": "Bengaluru", "pin_code": "560001"}"#,
            "False"
        ]
    );
    assert_eq!(rows[4], vec!["5", "{}", "False"]);
    assert_eq!(
        rows[5],
        vec![
            "6",
            r#"{"upi_id": "raXXXXX@okicici", "city": "मुंबई"}"#,
            "True"
        ]
    );
}

#[test]
fn test_legacy_reconciliation_keeps_address_mask() {
    let (rows, _) = run_fixture(ReconciliationMode::Legacy);

    assert_eq!(
        rows[3],
        vec![
            "4",
            r#"{"address": "[REDACTED_PII_ADDRESS]", "city": "Bengaluru", "pin_code": "56XXX"}"#,
            "False"
        ]
    );
    // Two-word names stay masked under the legacy rollback.
    assert_eq!(rows[2], vec!["3", r#"{"name": "JXXX SXXXX"}"#, "False"]);
}

#[test]
fn test_output_uses_crlf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");
    fs::write(&input, "id,data\nA,{}\n").unwrap();

    run(&RunConfig::new(&input, &output)).unwrap();

    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written, "record_id,redacted_data_json,is_pii\r\nA,{},False\r\n");
}

#[test]
fn test_missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.csv");
    let output = dir.path().join("output.csv");

    let err = run(&RunConfig::new(&input, &output)).unwrap_err();
    assert!(matches!(err, RedactError::InputNotFound(_)));
    assert_eq!(err.exit_code(), 2);
    assert!(!output.exists());
}

#[test]
fn test_invalid_utf8_row_is_decoded_lossily() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("output.csv");

    let mut bytes = b"record_id,Data_json\n1,\"{\"\"city\"\": \"\"Pune\"\"}\"\n".to_vec();
    bytes.extend_from_slice(b"2,\"{\"\"phone\"\": \"\"9876543210\"\", \"\"note\"\": \"\"");
    bytes.extend_from_slice(&[0xff, 0xfe]);
    bytes.extend_from_slice(b"\"\"}\"\n3,\"{\"\"ip_address\"\": \"\"10.0.0.1\"\"}\"\n");
    fs::write(&input, bytes).unwrap();

    let result = run(&RunConfig::new(&input, &output)).unwrap();
    assert_eq!(result.received_count, 3);

    let mut reader = csv::Reader::from_path(&output).unwrap();
    let rows: Vec<Vec<String>> = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["1", r#"{"city": "Pune"}"#, "False"]);
    assert_eq!(
        rows[1],
        vec![
            "2",
            "{\"phone\": \"98XXXXXX10\", \"note\": \"\u{FFFD}\u{FFFD}\"}",
            "True"
        ]
    );
    assert_eq!(rows[2], vec!["3", r#"{"ip_address": "10.0.0.1"}"#, "False"]);
}
