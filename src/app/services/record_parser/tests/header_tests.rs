//! Tests for header validation and in-message field definitions

use super::{assert_fields, collect_records, delimited};
use crate::config::ParserConfig;
use crate::{Error, RecordParser};

#[test]
fn test_matching_header_accepted() {
    let config = ParserConfig {
        fields: Some("firstname,lastname".to_string()),
        validate_header: true,
        ..Default::default()
    };
    let mut parser = delimited("firstname,lastname\nTom,Fennelly", ",", config);

    let records = collect_records(&mut parser).unwrap();
    assert_eq!(records.len(), 1);
    assert_fields(&records[0], &[("firstname", "Tom"), ("lastname", "Fennelly")]);
}

#[test]
fn test_header_name_mismatch_rejected() {
    let config = ParserConfig {
        fields: Some("firstname,lastname".to_string()),
        validate_header: true,
        ..Default::default()
    };
    let mut parser = delimited("firstname,surname\nTom,Fennelly", ",", config);

    let error = parser.initialize().unwrap_err();
    assert!(matches!(error, Error::HeaderMismatch { .. }));
}

#[test]
fn test_header_count_mismatch_rejected() {
    let config = ParserConfig {
        fields: Some("firstname,lastname".to_string()),
        validate_header: true,
        ..Default::default()
    };
    let mut parser = delimited("firstname,lastname,gender\nTom,Fennelly,Male", ",", config);

    assert!(parser.initialize().is_err());
}

#[test]
fn test_ignored_slots_skip_name_comparison() {
    // The ignored slot's header cell may hold anything; the count and the
    // unignored names still have to line up
    let config = ParserConfig {
        fields: Some("firstname,$ignore$,email".to_string()),
        validate_header: true,
        ..Default::default()
    };
    let mut parser = delimited(
        "firstname,whatever,email\nTom,x,tom@example.org",
        ",",
        config,
    );

    let records = collect_records(&mut parser).unwrap();
    assert_fields(
        &records[0],
        &[("firstname", "Tom"), ("email", "tom@example.org")],
    );
}

#[test]
fn test_header_validation_on_empty_stream_fails() {
    let config = ParserConfig {
        fields: Some("a,b".to_string()),
        validate_header: true,
        ..Default::default()
    };
    let mut parser = delimited("", ",", config);

    let error = parser.initialize().unwrap_err();
    assert!(matches!(error, Error::HeaderMismatch { .. }));
}

#[test]
fn test_fields_in_message() {
    let config = ParserConfig {
        fields_in_message: true,
        ..Default::default()
    };
    let mut parser = delimited("firstname,lastname\nTom,Fennelly\nMike,Fennelly", ",", config);

    let records = collect_records(&mut parser).unwrap();
    assert_eq!(records.len(), 2);
    assert_fields(&records[0], &[("firstname", "Tom"), ("lastname", "Fennelly")]);
    assert_fields(&records[1], &[("firstname", "Mike"), ("lastname", "Fennelly")]);
}

#[test]
fn test_fields_in_message_supports_ignore_markers() {
    let config = ParserConfig {
        fields_in_message: true,
        ..Default::default()
    };
    let mut parser = delimited("name,$ignore$,email\nTom,x,tom@example.org", ",", config);

    let records = collect_records(&mut parser).unwrap();
    assert_fields(
        &records[0],
        &[("name", "Tom"), ("email", "tom@example.org")],
    );
}

#[test]
fn test_fields_in_message_on_empty_stream_fails() {
    let config = ParserConfig {
        fields_in_message: true,
        ..Default::default()
    };
    let mut parser = delimited("", ",", config);

    let error = parser.initialize().unwrap_err();
    assert!(matches!(error, Error::MalformedInput { .. }));
}

#[test]
fn test_skip_lines_before_header() {
    let config = ParserConfig {
        fields: Some("a,b".to_string()),
        validate_header: true,
        skip_lines: 1,
        ..Default::default()
    };
    let mut parser = delimited("some,junk\na,b\n1,2", ",", config);

    let records = collect_records(&mut parser).unwrap();
    assert_eq!(records.len(), 1);
    assert_fields(&records[0], &[("a", "1"), ("b", "2")]);
}
