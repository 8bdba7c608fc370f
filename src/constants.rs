//! Application constants for the flatfile processor
//!
//! This module contains the grammar markers, default values and attribute
//! names used throughout the record parsing engine.

// =============================================================================
// Field-Specification Grammar
// =============================================================================

/// Marker token for a field whose raw value(s) are consumed but never emitted.
///
/// May carry a repeat-count suffix (`$ignore$3`) or `+` for "ignore to the
/// end of the record" (`$ignore$+`).
pub const IGNORE_FIELD_MARKER: &str = "$ignore$";

/// Repeat-count suffix on [`IGNORE_FIELD_MARKER`] meaning unbounded
pub const IGNORE_UNBOUNDED_SUFFIX: &str = "+";

/// Sentinel ignore count meaning "ignore all remaining fields"
pub const IGNORE_COUNT_UNBOUNDED: usize = usize::MAX;

/// Field token declaring a wildcard record (accept all fields, name by index)
pub const WILDCARD_FIELD_TOKEN: &str = "*";

/// Name prefix for positionally-named fields of wildcard records
pub const WILDCARD_FIELD_PREFIX: &str = "field_";

/// Separator between record-definition stanzas in a fields specification
pub const RECORD_DEF_SEPARATOR: char = '|';

/// Separator between a field name and its transform chain (`name?trim`)
pub const TRANSFORM_SEPARATOR: char = '?';

/// Grammar accepted by a single-record-type fields specification
pub const SINGLE_RECORD_PATTERN: &str = r"^[\w?$\-_,.+* ]+$";

/// Grammar accepted by each stanza of a multi-record-type fields
/// specification (`TypeName[field1,field2,...]`)
pub const MULTI_RECORD_PATTERN: &str = r"^([\w?$\-_*]+)\[([\w?$\-_,.+ *]+)\]$";

// =============================================================================
// Unknown Record Type
// =============================================================================

/// Record name used when multi-type dispatch cannot classify a record
pub const UNMATCHED_RECORD_NAME: &str = "UNMATCHED";

/// The single field name carried by unmatched records
pub const UNMATCHED_FIELD_NAME: &str = "value";

// =============================================================================
// Record Delimiters
// =============================================================================

/// Prefix selecting the regex record-boundary strategy for a delimiter value
pub const REGEX_DELIMITER_PREFIX: &str = "regex:";

/// Default field separator for the delimited parser strategy
pub const DEFAULT_FIELD_SEPARATOR: &str = ",";

// =============================================================================
// Output Defaults
// =============================================================================

/// Default element name for emitted records
pub const DEFAULT_RECORD_ELEMENT_NAME: &str = "record";

/// Default root element name enclosing the emitted record set
pub const DEFAULT_ROOT_ELEMENT_NAME: &str = "records";

/// Attribute carrying the 1-based record number on emitted records
pub const RECORD_NUMBER_ATTR: &str = "number";

/// Attribute flagging records with fewer fields than declared
pub const RECORD_TRUNCATED_ATTR: &str = "truncated";

// =============================================================================
// Helper Functions
// =============================================================================

/// Build the positional name for field `index` of a wildcard record
pub fn wildcard_field_name(index: usize) -> String {
    format!("{}{}", WILDCARD_FIELD_PREFIX, index)
}
