//! Regex parser strategy: extracts fields from a full-record pattern
//!
//! If the pattern declares capture groups, field values come from the
//! groups of a full match; otherwise the pattern splits the record text
//! into fields.

use regex::Regex;
use std::io::Read;

use super::parser::{ParserCore, RecordParser};
use crate::app::services::boundary::BoundaryLocator;
use crate::config::ParserConfig;
use crate::Result;

/// Record parser tokenizing fields by a whole-record regular expression
#[derive(Debug)]
pub struct RegexParser<R: Read> {
    core: ParserCore,
    reader: R,
    locator: BoundaryLocator,
    /// Anchored variant of the field pattern, emulating a full match
    full_pattern: Regex,
    /// Unanchored pattern used for splitting when no groups are declared
    split_pattern: Regex,
    group_count: usize,
}

impl<R: Read> RegexParser<R> {
    /// Create a parser for the given field pattern
    ///
    /// The pattern is compiled multi-line + dot-all, like regex record
    /// delimiters.
    pub fn new(reader: R, pattern: &str, config: ParserConfig) -> Result<Self> {
        let core = ParserCore::new(config)?;
        let locator = BoundaryLocator::from_delimiter(
            core.config().compile_delimiter()?,
            core.config().keep_delimiter,
        );

        let split_pattern = Regex::new(&format!("(?ms){}", pattern))?;
        let full_pattern = Regex::new(&format!(r"(?ms)\A(?:{})\z", pattern))?;
        let group_count = split_pattern.captures_len() - 1;

        Ok(Self {
            core,
            reader,
            locator,
            full_pattern,
            split_pattern,
            group_count,
        })
    }

    /// Number of capture groups declared by the field pattern
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Extract field values from the capture groups of a full match
    ///
    /// Groups that did not participate in the match contribute nothing. A
    /// record the pattern does not match at all surfaces as a single token
    /// holding the whole record text, so unmatched lines still reach the
    /// unknown-record-type path.
    fn group_values(&self, record_text: &str) -> Vec<String> {
        if let Some(captures) = self.full_pattern.captures(record_text) {
            (1..=self.group_count)
                .filter_map(|i| captures.get(i))
                .map(|m| m.as_str().to_string())
                .collect()
        } else {
            vec![record_text.to_string()]
        }
    }
}

impl<R: Read> RecordParser for RegexParser<R> {
    fn core(&self) -> &ParserCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ParserCore {
        &mut self.core
    }

    fn next_raw_tokens(&mut self) -> Result<Option<Vec<String>>> {
        let record_number = self.core.record_count() + 1;
        let raw = self.locator.read_record(&mut self.reader, record_number)?;

        if raw.is_empty() {
            return Ok(None);
        }

        let tokens = if self.group_count > 0 {
            self.group_values(&raw)
        } else {
            self.split_pattern.split(&raw).map(str::to_string).collect()
        };
        Ok(Some(tokens))
    }

    fn reset_source(&mut self) {
        self.locator.reset();
    }
}
