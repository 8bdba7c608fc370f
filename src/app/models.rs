//! Data models for flat-file record parsing
//!
//! This module contains the core value types produced and consumed by the
//! record parsing engine: per-field metadata compiled from the fields
//! specification, per-record-type metadata, and the immutable `Record` /
//! `Field` values handed to callers.

use serde::Serialize;
use std::sync::{Arc, LazyLock};

use crate::app::services::transforms::TransformChain;
use crate::constants::{
    IGNORE_COUNT_UNBOUNDED, IGNORE_FIELD_MARKER, IGNORE_UNBOUNDED_SUFFIX, UNMATCHED_FIELD_NAME,
    UNMATCHED_RECORD_NAME,
};
use crate::{Error, Result};

// =============================================================================
// Field Metadata
// =============================================================================

/// Metadata for a single declared field slot
///
/// Compiled from one token of the fields specification. A token equal to the
/// ignore marker (optionally suffixed with a repeat count, or `+` for
/// unbounded) or an empty token marks the slot as ignored: its raw value(s)
/// are consumed but never emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMetaData {
    name: String,
    ignore: bool,
    ignore_count: usize,
    transform: Option<TransformChain>,
}

impl FieldMetaData {
    /// Compile field metadata from a single field token (transform suffix
    /// already stripped by the grammar compiler)
    pub fn new(token: &str) -> Result<Self> {
        let name = token.trim().to_string();

        if let Some(count_str) = name.strip_prefix(IGNORE_FIELD_MARKER) {
            let ignore_count = parse_ignore_count(&name, count_str)?;
            return Ok(Self {
                name,
                ignore: true,
                ignore_count,
                transform: None,
            });
        }

        // An empty field token is an ignored slot
        let ignore = name.is_empty();
        Ok(Self {
            name,
            ignore,
            ignore_count: 1,
            transform: None,
        })
    }

    /// Create a single-slot ignore placeholder (used to pad repeat counts)
    pub fn ignore_placeholder() -> Self {
        Self {
            name: IGNORE_FIELD_MARKER.to_string(),
            ignore: true,
            ignore_count: 1,
            transform: None,
        }
    }

    /// Attach a resolved transform chain to this field
    pub fn with_transform(mut self, transform: TransformChain) -> Self {
        self.transform = Some(transform);
        self
    }

    /// The declared field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Is this slot ignored
    pub fn ignore(&self) -> bool {
        self.ignore
    }

    /// Number of consecutive raw tokens consumed by this ignore slot
    /// ([`IGNORE_COUNT_UNBOUNDED`] means "to the end of the record")
    pub fn ignore_count(&self) -> usize {
        self.ignore_count
    }

    /// The transform chain applied to this field's raw value, if any
    pub fn transform(&self) -> Option<&TransformChain> {
        self.transform.as_ref()
    }
}

fn parse_ignore_count(token: &str, count_str: &str) -> Result<usize> {
    let count_str = count_str.trim();
    if count_str.is_empty() {
        return Ok(1);
    }
    if count_str == IGNORE_UNBOUNDED_SUFFIX {
        return Ok(IGNORE_COUNT_UNBOUNDED);
    }

    let count: usize = count_str.parse().map_err(|_| {
        Error::configuration(format!(
            "Invalid ignore count '{}' in field token '{}'. Expected a positive integer or '+'.",
            count_str, token
        ))
    })?;
    if count == 0 {
        return Err(Error::configuration(format!(
            "Invalid ignore count '0' in field token '{}'. Count must be at least 1.",
            token
        )));
    }
    Ok(count)
}

// =============================================================================
// Record Metadata
// =============================================================================

/// Metadata for one record type
///
/// Holds the ordered field slots plus derived counts used by strict-mode
/// gating and the `truncated` output flag. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordMetaData {
    name: String,
    fields: Vec<FieldMetaData>,
    wildcard: bool,
    unmatched: bool,
    ignored_field_count: usize,
    unignored_field_count: usize,
    field_names: Vec<String>,
}

impl RecordMetaData {
    /// Create record metadata with the supplied field slots
    pub fn new(name: &str, fields: Vec<FieldMetaData>) -> Result<Self> {
        Self::build(name, fields, false, false)
    }

    /// Create wildcard record metadata: accept any fields and generate the
    /// field names from the field index
    pub fn new_wildcard(name: &str, fields: Vec<FieldMetaData>) -> Result<Self> {
        Self::build(name, fields, true, false)
    }

    fn build(name: &str, fields: Vec<FieldMetaData>, wildcard: bool, unmatched: bool) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::configuration(
                "Record name must be a non-empty string",
            ));
        }

        let ignored_field_count = fields.iter().filter(|f| f.ignore()).count();
        let unignored_field_count = fields.len() - ignored_field_count;
        let field_names = fields
            .iter()
            .filter(|f| !f.ignore())
            .map(|f| f.name().to_string())
            .collect();

        Ok(Self {
            name: name.to_string(),
            fields,
            wildcard,
            unmatched,
            ignored_field_count,
            unignored_field_count,
            field_names,
        })
    }

    /// The record (element) name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered field slots, ignore padding included
    pub fn fields(&self) -> &[FieldMetaData] {
        &self.fields
    }

    /// Is this a wildcard record (fields named positionally at parse time)
    pub fn is_wildcard(&self) -> bool {
        self.wildcard
    }

    /// Is this the process-wide unknown-record-type sentinel
    pub fn is_unmatched(&self) -> bool {
        self.unmatched
    }

    /// Number of ignored field slots
    pub fn ignored_field_count(&self) -> usize {
        self.ignored_field_count
    }

    /// Number of field slots that produce emitted fields
    pub fn unignored_field_count(&self) -> usize {
        self.unignored_field_count
    }

    /// Names of all unignored fields, in declaration order
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Assert that the supplied name is one of this record's field names
    pub fn assert_valid_field_name(&self, field_name: &str) -> Result<()> {
        if self.field_names.iter().any(|name| name == field_name) {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "Invalid field name '{}'. Valid names: [{}].",
                field_name,
                self.field_names.join(", ")
            )))
        }
    }
}

/// Shared metadata for records whose leading token matches no declared type.
///
/// Constructed once, never mutated, safe to share across threads. Unmatched
/// records carry a single field named `value` holding the first raw token.
pub static UNMATCHED_RECORD_TYPE: LazyLock<Arc<RecordMetaData>> = LazyLock::new(|| {
    let value_field = FieldMetaData::new(UNMATCHED_FIELD_NAME)
        .expect("unmatched sentinel field name is valid");
    let metadata = RecordMetaData::build(UNMATCHED_RECORD_NAME, vec![value_field], false, true)
        .expect("unmatched sentinel record name is valid");
    Arc::new(metadata)
});

// =============================================================================
// Parsed Records
// =============================================================================

/// One named scalar value within a parsed record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    name: String,
    value: String,
    metadata: Option<FieldMetaData>,
}

impl Field {
    /// Create a field without backing metadata (wildcard/unmatched fields)
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            metadata: None,
        }
    }

    /// Create a field carrying a back-reference to its declared metadata
    pub fn with_metadata(
        name: impl Into<String>,
        value: impl Into<String>,
        metadata: FieldMetaData,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            metadata: Some(metadata),
        }
    }

    /// The field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The declared metadata this field was extracted under, if any
    pub fn metadata(&self) -> Option<&FieldMetaData> {
        self.metadata.as_ref()
    }
}

/// One structured record parsed from the flat-file input
///
/// Created fresh per parsed record and owned solely by the caller; the
/// metadata back-reference is shared immutable state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    name: String,
    fields: Vec<Field>,
    // Shared back-reference, not part of the serialized value
    #[serde(skip)]
    metadata: Arc<RecordMetaData>,
}

impl Record {
    /// Create a record; the field list must be non-empty
    pub fn new(name: impl Into<String>, fields: Vec<Field>, metadata: Arc<RecordMetaData>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::data_validation("Record name must not be empty"));
        }
        if fields.is_empty() {
            return Err(Error::data_validation(format!(
                "Record '{}' must contain at least one field",
                name
            )));
        }
        Ok(Self {
            name,
            fields,
            metadata,
        })
    }

    /// The record name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered record fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The metadata this record was extracted under
    pub fn metadata(&self) -> &Arc<RecordMetaData> {
        &self.metadata
    }

    /// A record is truncated when it carries fewer fields than its
    /// metadata's unignored field count
    pub fn is_truncated(&self) -> bool {
        self.fields.len() < self.metadata.unignored_field_count()
    }
}
