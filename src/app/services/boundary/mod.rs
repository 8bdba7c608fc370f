//! Record boundary location within a continuous character stream
//!
//! A boundary locator consumes characters one at a time from a reader and
//! decides where one record ends and the next begins. Text consumed past the
//! end of the current record ("overflow") is carried into the next read
//! against the same stream.
//!
//! Two strategies exist, selected once per parser instance: a literal
//! delimiter (or plain newline) locator, and a regex locator where the
//! configured pattern marks the *start* of each record.
//!
//! Each locator holds an explicit copy of the configuration it needs; pass
//! readers wrapped in `BufReader` since characters are pulled one at a time.

use regex::Regex;
use std::io::{self, Read};

use crate::config::RecordDelimiter;

#[cfg(test)]
pub mod tests;

/// A boundary locator of either strategy, resolved from the configured
/// record delimiter
#[derive(Debug)]
pub enum BoundaryLocator {
    Literal(LiteralBoundaryLocator),
    Pattern(RegexBoundaryLocator),
}

impl BoundaryLocator {
    /// Build the locator matching a resolved record-delimiter policy
    pub fn from_delimiter(delimiter: RecordDelimiter, keep_delimiter: bool) -> Self {
        match delimiter {
            RecordDelimiter::Literal(text) => {
                Self::Literal(LiteralBoundaryLocator::new(text, keep_delimiter))
            }
            RecordDelimiter::Pattern(pattern) => {
                Self::Pattern(RegexBoundaryLocator::new(pattern))
            }
        }
    }

    /// Read the raw text of the next record; empty means end of stream
    pub fn read_record<R: Read>(
        &mut self,
        reader: &mut R,
        record_number: usize,
    ) -> io::Result<String> {
        match self {
            Self::Literal(locator) => locator.read_record(reader, record_number),
            Self::Pattern(locator) => locator.read_record(reader, record_number),
        }
    }

    /// Discard carried-over state so the locator can scan a fresh stream
    pub fn reset(&mut self) {
        match self {
            Self::Literal(locator) => locator.reset(),
            Self::Pattern(locator) => locator.reset(),
        }
    }
}

/// Read one UTF-8 character from the reader, `None` at end of stream
fn read_char<R: Read>(reader: &mut R) -> io::Result<Option<char>> {
    let mut bytes = [0u8; 4];
    if reader.read(&mut bytes[..1])? == 0 {
        return Ok(None);
    }

    let width = utf8_width(bytes[0]).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 leading byte")
    })?;
    if width > 1 {
        reader.read_exact(&mut bytes[1..width])?;
    }

    let decoded = std::str::from_utf8(&bytes[..width])
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 sequence"))?;
    Ok(decoded.chars().next())
}

fn utf8_width(leading: u8) -> Option<usize> {
    match leading {
        0x00..=0x7f => Some(1),
        0xc0..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf7 => Some(4),
        _ => None,
    }
}

// =============================================================================
// Literal Strategy
// =============================================================================

/// Boundary locator matching a literal delimiter string, or a single
/// trailing CR/LF when no delimiter is configured
#[derive(Debug)]
pub struct LiteralBoundaryLocator {
    delimiter: Option<String>,
    keep_delimiter: bool,
    overflow: String,
}

impl LiteralBoundaryLocator {
    /// Create a literal locator; `delimiter == None` means newline-delimited
    pub fn new(delimiter: Option<String>, keep_delimiter: bool) -> Self {
        Self {
            delimiter,
            keep_delimiter,
            overflow: String::new(),
        }
    }

    /// Discard carried-over state so the locator can scan a fresh stream
    pub fn reset(&mut self) {
        self.overflow.clear();
    }

    /// Read the raw text of the next record (up to the next delimiter)
    ///
    /// An empty result with the stream exhausted signals end of stream. A
    /// single leading CR/LF is skipped only while the buffer is still empty,
    /// guarding against the trailing newline of the previous record's
    /// terminator producing a spurious empty record.
    pub fn read_record<R: Read>(
        &mut self,
        reader: &mut R,
        _record_number: usize,
    ) -> io::Result<String> {
        let mut buffer = std::mem::take(&mut self.overflow);

        while let Some(c) = read_char(reader)? {
            if buffer.is_empty() && (c == '\n' || c == '\r') {
                // A leading CR or LF... ignore...
                continue;
            }

            buffer.push(c);
            if self.at_end_of_record(&mut buffer) {
                return Ok(buffer);
            }
        }

        Ok(buffer)
    }

    fn at_end_of_record(&self, buffer: &mut String) -> bool {
        if let Some(delimiter) = &self.delimiter {
            if buffer.len() < delimiter.len() || !buffer.ends_with(delimiter.as_str()) {
                return false;
            }
            if !self.keep_delimiter {
                // Strip off the delimiter from the end before returning...
                buffer.truncate(buffer.len() - delimiter.len());
            }
            true
        } else if buffer.ends_with('\r') || buffer.ends_with('\n') {
            if !self.keep_delimiter {
                buffer.pop();
            }
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Regex Strategy
// =============================================================================

/// Boundary locator scanning the growing record buffer for a regex match
///
/// The pattern marks where records *start*: for record #1 the first match
/// found is the start delimiter and scanning continues for the next
/// occurrence, which ends record 1. For subsequent records the first match
/// found ends the record; everything from the match start onward becomes
/// overflow prepended to the next read.
#[derive(Debug)]
pub struct RegexBoundaryLocator {
    pattern: Regex,
    overflow: String,
}

impl RegexBoundaryLocator {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            overflow: String::new(),
        }
    }

    /// Discard carried-over state so the locator can scan a fresh stream
    pub fn reset(&mut self) {
        self.overflow.clear();
    }

    /// Text already consumed from the stream that belongs to the next record
    pub fn overflow(&self) -> &str {
        &self.overflow
    }

    /// Read the raw text of the next record
    pub fn read_record<R: Read>(
        &mut self,
        reader: &mut R,
        record_number: usize,
    ) -> io::Result<String> {
        let mut buffer = std::mem::take(&mut self.overflow);
        // The carried-over overflow starts with the current record's start
        // delimiter; searching resumes past it.
        let mut start_find = buffer.len();

        while let Some(c) = read_char(reader)? {
            if buffer.is_empty() && (c == '\n' || c == '\r') {
                continue;
            }

            buffer.push(c);
            if let Some(m) = self.pattern.find_at(&buffer, start_find) {
                if record_number == 1 && start_find == 0 {
                    // The first match in the first record marks where record
                    // 1 starts; the next occurrence marks where it ends.
                    start_find = m.end();
                } else {
                    self.overflow = buffer[m.start()..].to_string();
                    buffer.truncate(m.start());
                    return Ok(buffer);
                }
            }
        }

        Ok(buffer)
    }
}
