//! Tests for the literal-delimiter boundary locator

use std::io::Cursor;

use super::super::LiteralBoundaryLocator;
use super::read_all_literal;

#[test]
fn test_newline_delimited_records() {
    let mut locator = LiteralBoundaryLocator::new(None, false);
    let records = read_all_literal(&mut locator, "a\nb\nc");
    assert_eq!(records, vec!["a", "b", "c"]);
}

#[test]
fn test_crlf_delimited_records() {
    let mut locator = LiteralBoundaryLocator::new(None, false);
    let records = read_all_literal(&mut locator, "a\r\nb\r\n");
    assert_eq!(records, vec!["a", "b"]);
}

#[test]
fn test_leading_newlines_skipped() {
    let mut locator = LiteralBoundaryLocator::new(None, false);
    let records = read_all_literal(&mut locator, "\n\r\na\nb");
    assert_eq!(records, vec!["a", "b"]);
}

#[test]
fn test_custom_delimiter() {
    let mut locator = LiteralBoundaryLocator::new(Some("%%".to_string()), false);
    let records = read_all_literal(&mut locator, "a%%b%%c");
    assert_eq!(records, vec!["a", "b", "c"]);
}

#[test]
fn test_delimiter_spanning_newlines() {
    // Records may contain newlines when the delimiter says so
    let mut locator = LiteralBoundaryLocator::new(Some("#".to_string()), false);
    let records = read_all_literal(&mut locator, "a\nb#c\nd");
    assert_eq!(records, vec!["a\nb", "c\nd"]);
}

#[test]
fn test_keep_delimiter() {
    let mut locator = LiteralBoundaryLocator::new(Some("%%".to_string()), true);
    let records = read_all_literal(&mut locator, "a%%b");
    assert_eq!(records, vec!["a%%", "b"]);
}

#[test]
fn test_keep_newline_delimiter() {
    let mut locator = LiteralBoundaryLocator::new(None, true);
    let mut reader = Cursor::new("a\nb".to_string());
    assert_eq!(locator.read_record(&mut reader, 1).unwrap(), "a\n");
}

#[test]
fn test_empty_stream() {
    let mut locator = LiteralBoundaryLocator::new(None, false);
    let mut reader = Cursor::new(String::new());
    assert_eq!(locator.read_record(&mut reader, 1).unwrap(), "");
}

#[test]
fn test_final_record_without_delimiter() {
    let mut locator = LiteralBoundaryLocator::new(Some("%%".to_string()), false);
    let records = read_all_literal(&mut locator, "a%%b");
    assert_eq!(records, vec!["a", "b"]);
}

#[test]
fn test_multibyte_characters() {
    let mut locator = LiteralBoundaryLocator::new(None, false);
    let records = read_all_literal(&mut locator, "søren\nmüller");
    assert_eq!(records, vec!["søren", "müller"]);
}
