//! Parser configuration and validation
//!
//! Provides the explicit, validated configuration surface consumed by parser
//! instances: the fields specification, record delimiter (literal or
//! `regex:`-prefixed), parsing flags and the transform registry. All values
//! carry documented defaults.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::services::field_grammar::RecordMetadataSet;
use crate::app::services::transforms::TransformRegistry;
use crate::constants::{DEFAULT_RECORD_ELEMENT_NAME, REGEX_DELIMITER_PREFIX};
use crate::{Error, Result};

/// Configuration for a parser instance
///
/// Constructed once at parser build time; parsing never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Fields specification string (see the field grammar module); absent
    /// means a wildcard record with positionally-named fields
    pub fields: Option<String>,

    /// Record delimiter: a literal string (escape sequences `\n`, `\r`,
    /// `\t` and XML entities decoded), or a `regex:`-prefixed pattern.
    /// Absent means newline-delimited records.
    pub record_delimiter: Option<String>,

    /// Keep the matched delimiter at the end of each record's raw text
    pub keep_delimiter: bool,

    /// Element name for emitted records
    pub record_element_name: String,

    /// Number of leading lines to skip before parsing (negative clamps to 0)
    pub skip_lines: i32,

    /// Field names are declared by a header row inside the stream itself
    pub fields_in_message: bool,

    /// Validate the first record against the declared field names
    pub validate_header: bool,

    /// Strict mode: records with fewer unignored fields than required are
    /// dropped instead of parsed partially
    pub strict: bool,

    /// Transform registry consulted when compiling `?fn` field suffixes
    #[serde(skip)]
    pub transforms: TransformRegistry,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            fields: None,
            record_delimiter: None,
            keep_delimiter: false,
            record_element_name: DEFAULT_RECORD_ELEMENT_NAME.to_string(),
            skip_lines: 0,
            fields_in_message: false,
            validate_header: false,
            strict: false,
            transforms: TransformRegistry::with_builtins(),
        }
    }
}

impl ParserConfig {
    /// The number of lines to skip, with negative values clamped to zero
    pub fn effective_skip_lines(&self) -> usize {
        self.skip_lines.max(0) as usize
    }

    /// Compile the fields specification into a record metadata set
    pub fn compile_metadata(&self) -> Result<RecordMetadataSet> {
        let metadata = RecordMetadataSet::compile(
            &self.record_element_name,
            self.fields.as_deref(),
            &self.transforms,
        )?;
        self.validate_with(&metadata)?;
        Ok(metadata)
    }

    /// Fail fast on option combinations the engine cannot honor
    pub fn validate_with(&self, metadata: &RecordMetadataSet) -> Result<()> {
        if self.validate_header && metadata.is_multi_type() {
            return Err(Error::configuration(
                "Cannot validate the header of a multi-type record set. The fields \
                 definition declares multiple record types.",
            ));
        }
        if self.fields_in_message && metadata.is_multi_type() {
            return Err(Error::configuration(
                "In-message field definitions support a single record type only. The \
                 fields definition declares multiple record types.",
            ));
        }
        Ok(())
    }

    /// Resolve the configured record delimiter into a boundary policy
    pub fn compile_delimiter(&self) -> Result<RecordDelimiter> {
        let Some(raw) = &self.record_delimiter else {
            return Ok(RecordDelimiter::Literal(None));
        };

        if let Some(pattern) = raw.strip_prefix(REGEX_DELIMITER_PREFIX) {
            // Multi-line + dot-all, matching how full-record patterns behave
            let compiled = Regex::new(&format!("(?ms){}", pattern))?;
            return Ok(RecordDelimiter::Pattern(compiled));
        }

        let decoded = decode_entities(&decode_escapes(raw));
        debug!("Record delimiter decoded to {:?}", decoded);
        Ok(RecordDelimiter::Literal(Some(decoded)))
    }
}

/// A resolved record-boundary policy
#[derive(Debug, Clone)]
pub enum RecordDelimiter {
    /// Literal delimiter text; `None` means newline-delimited
    Literal(Option<String>),
    /// Regex marking the start of each record
    Pattern(Regex),
}

/// Decode the `\n`, `\r` and `\t` escape sequences of a literal delimiter
fn decode_escapes(input: &str) -> String {
    input
        .replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

/// Decode the predefined XML entities and numeric character references
fn decode_entities(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];

        if let Some(end) = rest.find(';') {
            if let Some(decoded) = decode_entity(&rest[1..end]) {
                out.push(decoded);
                rest = &rest[end + 1..];
                continue;
            }
        }

        out.push('&');
        rest = &rest[1..];
    }

    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let reference = entity.strip_prefix('#')?;
            if let Some(hex) = reference.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else {
                reference.parse::<u32>().ok().and_then(char::from_u32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.record_element_name, "record");
        assert_eq!(config.effective_skip_lines(), 0);
        assert!(!config.strict);
    }

    #[test]
    fn test_negative_skip_lines_clamp_to_zero() {
        let config = ParserConfig {
            skip_lines: -5,
            ..Default::default()
        };
        assert_eq!(config.effective_skip_lines(), 0);
    }

    #[test]
    fn test_delimiter_escape_decoding() {
        let config = ParserConfig {
            record_delimiter: Some("\\r\\n".to_string()),
            ..Default::default()
        };
        match config.compile_delimiter().unwrap() {
            RecordDelimiter::Literal(Some(delimiter)) => assert_eq!(delimiter, "\r\n"),
            other => panic!("expected literal delimiter, got {:?}", other),
        }
    }

    #[test]
    fn test_delimiter_entity_decoding() {
        assert_eq!(decode_entities("a&amp;b"), "a&b");
        assert_eq!(decode_entities("&#10;"), "\n");
        assert_eq!(decode_entities("&#x0A;"), "\n");
        assert_eq!(decode_entities("no entities"), "no entities");
        assert_eq!(decode_entities("dangling &amp"), "dangling &amp");
    }

    #[test]
    fn test_regex_delimiter_compiles() {
        let config = ParserConfig {
            record_delimiter: Some("regex:\\n\\r".to_string()),
            ..Default::default()
        };
        match config.compile_delimiter().unwrap() {
            RecordDelimiter::Pattern(pattern) => assert!(pattern.is_match("\n\r")),
            other => panic!("expected regex delimiter, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_header_rejected_for_multi_type() {
        let config = ParserConfig {
            fields: Some("A[x,y]|B[p,q]".to_string()),
            validate_header: true,
            ..Default::default()
        };
        let error = config.compile_metadata().unwrap_err();
        assert!(matches!(error, Error::Configuration { .. }));
    }

    #[test]
    fn test_fields_in_message_rejected_for_multi_type() {
        let config = ParserConfig {
            fields: Some("A[x,y]|B[p,q]".to_string()),
            fields_in_message: true,
            ..Default::default()
        };
        assert!(config.compile_metadata().is_err());
    }
}
