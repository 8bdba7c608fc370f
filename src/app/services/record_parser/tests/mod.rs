//! Test utilities for the record parser strategies

use std::io::Cursor;

use crate::app::models::Record;
use crate::config::ParserConfig;

use super::{DelimitedParser, RecordParser, RegexParser};

mod header_tests;

/// Build a config with a fields specification and everything else default
pub fn config_with_fields(fields: &str) -> ParserConfig {
    ParserConfig {
        fields: Some(fields.to_string()),
        ..Default::default()
    }
}

/// Build a delimited parser over an in-memory stream
pub fn delimited(input: &str, separator: &str, config: ParserConfig) -> DelimitedParser<Cursor<String>> {
    DelimitedParser::with_separator(Cursor::new(input.to_string()), separator, config).unwrap()
}

/// Build a regex parser over an in-memory stream
pub fn regex(input: &str, pattern: &str, config: ParserConfig) -> RegexParser<Cursor<String>> {
    RegexParser::new(Cursor::new(input.to_string()), pattern, config).unwrap()
}

/// Run a full parse session, collecting every record
pub fn collect_records<P: RecordParser>(parser: &mut P) -> crate::Result<Vec<Record>> {
    parser.initialize()?;
    let mut records = Vec::new();
    while let Some(record) = parser.next_record()? {
        records.push(record);
    }
    parser.uninitialize();
    Ok(records)
}

/// Flatten a record into `(name, value)` pairs for terse assertions
pub fn field_pairs(record: &Record) -> Vec<(String, String)> {
    record
        .fields()
        .iter()
        .map(|f| (f.name().to_string(), f.value().to_string()))
        .collect()
}

/// Assert a record's fields match the expected `(name, value)` pairs
pub fn assert_fields(record: &Record, expected: &[(&str, &str)]) {
    let actual = field_pairs(record);
    let expected: Vec<(String, String)> = expected
        .iter()
        .map(|(n, v)| (n.to_string(), v.to_string()))
        .collect();
    assert_eq!(actual, expected);
}
