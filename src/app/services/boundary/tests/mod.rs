//! Test utilities for record boundary location

use std::io::Cursor;

use super::{LiteralBoundaryLocator, RegexBoundaryLocator};

// Test modules
mod literal_tests;
mod regex_tests;

/// Read records with a literal locator until the stream is exhausted
pub fn read_all_literal(locator: &mut LiteralBoundaryLocator, input: &str) -> Vec<String> {
    let mut reader = Cursor::new(input.to_string());
    let mut records = Vec::new();
    let mut record_number = 1;

    loop {
        let record = locator.read_record(&mut reader, record_number).unwrap();
        if record.is_empty() {
            return records;
        }
        records.push(record);
        record_number += 1;
    }
}

/// Read records with a regex locator until the stream is exhausted
pub fn read_all_regex(locator: &mut RegexBoundaryLocator, input: &str) -> Vec<String> {
    let mut reader = Cursor::new(input.to_string());
    let mut records = Vec::new();
    let mut record_number = 1;

    loop {
        let record = locator.read_record(&mut reader, record_number).unwrap();
        if record.is_empty() {
            return records;
        }
        records.push(record);
        record_number += 1;
    }
}
