//! Delimited parser strategy: splits each record's raw text on a literal
//! field separator

use std::io::Read;

use super::parser::{ParserCore, RecordParser};
use crate::app::services::boundary::BoundaryLocator;
use crate::config::ParserConfig;
use crate::constants::DEFAULT_FIELD_SEPARATOR;
use crate::{Error, Result};

/// Record parser tokenizing fields by a literal separator string
///
/// Record boundaries follow the configured record delimiter (literal or
/// `regex:`-prefixed); within each record, fields are split on the
/// separator, keeping empty pieces.
#[derive(Debug)]
pub struct DelimitedParser<R: Read> {
    core: ParserCore,
    reader: R,
    locator: BoundaryLocator,
    separator: String,
}

impl<R: Read> DelimitedParser<R> {
    /// Create a parser with the default `,` field separator
    pub fn new(reader: R, config: ParserConfig) -> Result<Self> {
        Self::with_separator(reader, DEFAULT_FIELD_SEPARATOR, config)
    }

    /// Create a parser with an explicit field separator
    pub fn with_separator(reader: R, separator: &str, config: ParserConfig) -> Result<Self> {
        if separator.is_empty() {
            return Err(Error::configuration("Field separator must not be empty"));
        }

        let core = ParserCore::new(config)?;
        let locator = BoundaryLocator::from_delimiter(
            core.config().compile_delimiter()?,
            core.config().keep_delimiter,
        );

        Ok(Self {
            core,
            reader,
            locator,
            separator: separator.to_string(),
        })
    }

    /// The configured field separator
    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl<R: Read> RecordParser for DelimitedParser<R> {
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

        let tokens = raw
            .split(self.separator.as_str())
            .map(str::to_string)
            .collect();
        Ok(Some(tokens))
    }

    fn reset_source(&mut self) {
        self.locator.reset();
    }
}
