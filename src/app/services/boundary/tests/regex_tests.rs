//! Tests for the regex boundary locator
//!
//! The pattern marks where records start; text consumed past a match is
//! carried as overflow into the next read.

use regex::Regex;
use std::io::Cursor;

use super::super::RegexBoundaryLocator;
use super::read_all_regex;

fn locator(pattern: &str) -> RegexBoundaryLocator {
    RegexBoundaryLocator::new(Regex::new(pattern).unwrap())
}

#[test]
fn test_start_delimited_records() {
    let mut locator = locator(r"#\d+");
    let records = read_all_regex(&mut locator, "#1 a b\n#2 c d\n#3 e f");
    assert_eq!(records, vec!["#1 a b\n", "#2 c d\n", "#3 e f"]);
}

#[test]
fn test_overflow_carried_between_reads() {
    let mut locator = locator(r"#\d+");
    let mut reader = Cursor::new("#1 a\n#2 b".to_string());

    let first = locator.read_record(&mut reader, 1).unwrap();
    assert_eq!(first, "#1 a\n");
    // The consumed start of record 2 waits in the overflow buffer
    assert_eq!(locator.overflow(), "#2");

    let second = locator.read_record(&mut reader, 2).unwrap();
    assert_eq!(second, "#2 b");
    assert_eq!(locator.overflow(), "");
}

#[test]
fn test_first_match_opens_record_one() {
    // Text before the first delimiter belongs to record 1
    let mut locator = locator(r"@");
    let records = read_all_regex(&mut locator, "@one@two");
    assert_eq!(records, vec!["@one", "@two"]);
}

#[test]
fn test_unmatched_stream_is_one_record() {
    let mut locator = locator(r"ZZZ");
    let records = read_all_regex(&mut locator, "a b c");
    assert_eq!(records, vec!["a b c"]);
}

#[test]
fn test_reset_discards_overflow() {
    let mut locator = locator(r"#\d+");
    let mut reader = Cursor::new("#1 a\n#2 b".to_string());

    locator.read_record(&mut reader, 1).unwrap();
    assert!(!locator.overflow().is_empty());

    locator.reset();
    assert_eq!(locator.overflow(), "");

    // A fresh stream parses from scratch after the reset
    let records = read_all_regex(&mut locator, "#9 z");
    assert_eq!(records, vec!["#9 z"]);
}
