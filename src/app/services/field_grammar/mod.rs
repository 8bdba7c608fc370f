//! Field-specification grammar compiler and record-type resolver
//!
//! Compiles the textual fields definition into a [`RecordMetadataSet`] and
//! resolves which record metadata applies to each raw record.
//!
//! Two sub-grammars are recognized:
//! - *single*: `name1[?fn],name2,...` — comma-separated field tokens, each
//!   optionally suffixed `?transform`; `*` as a token accepts all fields
//! - *multi*: `TypeName[field1,field2,...]` — one stanza per record type,
//!   `|`-separated, dispatched on each record's leading token

use regex::Regex;
use std::collections::HashMap;
use std::sync::Arc;

use crate::app::models::{FieldMetaData, RecordMetaData, UNMATCHED_RECORD_TYPE};
use crate::app::services::transforms::TransformRegistry;
use crate::constants::{
    IGNORE_COUNT_UNBOUNDED, MULTI_RECORD_PATTERN, RECORD_DEF_SEPARATOR, SINGLE_RECORD_PATTERN,
    TRANSFORM_SEPARATOR, WILDCARD_FIELD_TOKEN,
};
use crate::{Error, Result};

#[cfg(test)]
pub mod tests;

/// The compiled record metadata for a parser instance
///
/// Either exactly one record type (single-type mode) or a mapping from
/// record-type name to metadata (multi-type mode, keyed by each raw record's
/// first token). Exactly one of the two exists by construction.
#[derive(Debug, Clone)]
pub enum RecordMetadataSet {
    /// One record type applying to every record in the stream
    Single(Arc<RecordMetaData>),
    /// Multiple record types dispatched on the leading token
    Multi(HashMap<String, Arc<RecordMetaData>>),
}

impl RecordMetadataSet {
    /// Compile a fields specification into a record metadata set
    ///
    /// An absent specification produces a single wildcard record type whose
    /// fields are discovered at parse time and named positionally.
    pub fn compile(
        record_name: &str,
        fields: Option<&str>,
        transforms: &TransformRegistry,
    ) -> Result<Self> {
        let Some(fields) = fields else {
            let metadata = RecordMetaData::new_wildcard(record_name, Vec::new())?;
            return Ok(Self::Single(Arc::new(metadata)));
        };

        let single_pattern = Regex::new(SINGLE_RECORD_PATTERN)?;
        let multi_pattern = Regex::new(MULTI_RECORD_PATTERN)?;

        let record_defs: Vec<&str> = fields
            .split(RECORD_DEF_SEPARATOR)
            .map(str::trim)
            .collect();

        if record_defs.len() == 1 {
            let record_def = record_defs[0];

            if single_pattern.is_match(record_def) {
                let metadata =
                    build_record_metadata(record_name, record_def.split(','), transforms)?;
                return Ok(Self::Single(Arc::new(metadata)));
            }

            match compile_multi_stanza(&multi_pattern, record_def, transforms)? {
                Some(metadata) => {
                    let mut map = HashMap::new();
                    map.insert(metadata.name().to_string(), Arc::new(metadata));
                    Ok(Self::Multi(map))
                }
                None => Err(Error::configuration(format!(
                    "Unsupported fields definition '{}'. Must match either the single ('{}') \
                     or multi ('{}') record pattern.",
                    fields, SINGLE_RECORD_PATTERN, MULTI_RECORD_PATTERN
                ))),
            }
        } else {
            let mut map = HashMap::new();
            for record_def in record_defs {
                let metadata = compile_multi_stanza(&multi_pattern, record_def, transforms)?
                    .ok_or_else(|| {
                        Error::configuration(format!(
                            "Unsupported fields definition '{}'. Must match the multi record \
                             pattern ('{}').",
                            record_def, MULTI_RECORD_PATTERN
                        ))
                    })?;
                map.insert(metadata.name().to_string(), Arc::new(metadata));
            }
            Ok(Self::Multi(map))
        }
    }

    /// Is this a metadata set for a multi-record-type stream
    pub fn is_multi_type(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// The one record metadata of a single-type set
    pub fn single(&self) -> Option<&Arc<RecordMetaData>> {
        match self {
            Self::Single(metadata) => Some(metadata),
            Self::Multi(_) => None,
        }
    }

    /// All declared record types, in stable name order
    pub fn record_types(&self) -> Vec<&Arc<RecordMetaData>> {
        match self {
            Self::Single(metadata) => vec![metadata],
            Self::Multi(map) => {
                let mut types: Vec<&Arc<RecordMetaData>> = map.values().collect();
                types.sort_by(|a, b| a.name().cmp(b.name()));
                types
            }
        }
    }

    /// Resolve the metadata applying to a raw record
    ///
    /// Single-type sets always return their one metadata. Multi-type sets
    /// look up the record's trimmed leading token; an unknown type resolves
    /// to the shared UNMATCHED sentinel, never an error.
    pub fn resolve(&self, raw_tokens: &[String]) -> Arc<RecordMetaData> {
        match self {
            Self::Single(metadata) => metadata.clone(),
            Self::Multi(map) => {
                let type_name = raw_tokens.first().map(|token| token.trim()).unwrap_or("");
                map.get(type_name)
                    .cloned()
                    .unwrap_or_else(|| UNMATCHED_RECORD_TYPE.clone())
            }
        }
    }
}

fn compile_multi_stanza(
    multi_pattern: &Regex,
    record_def: &str,
    transforms: &TransformRegistry,
) -> Result<Option<RecordMetaData>> {
    let Some(captures) = multi_pattern.captures(record_def) else {
        return Ok(None);
    };

    let type_name = &captures[1];
    let field_tokens = captures[2].split(',');
    build_record_metadata(type_name, field_tokens, transforms).map(Some)
}

/// Compile an iterator of field tokens into record metadata
///
/// A `*` token makes the whole record wildcard and terminates compilation
/// (remaining tokens are dropped). Ignore slots with a finite repeat count
/// greater than one are padded with placeholder slots so each raw token maps
/// one-to-one to a metadata slot. Also used for in-message field definitions
/// where the header row of the stream supplies the tokens.
pub fn build_record_metadata<'a>(
    record_name: &str,
    field_tokens: impl IntoIterator<Item = &'a str>,
    transforms: &TransformRegistry,
) -> Result<RecordMetaData> {
    let mut fields = Vec::new();

    for token in field_tokens {
        let token = token.trim();

        if token == WILDCARD_FIELD_TOKEN {
            return RecordMetaData::new_wildcard(record_name, fields);
        }

        let field = compile_field_token(token, transforms)?;

        let ignore_count = field.ignore_count();
        let needs_padding = field.ignore() && ignore_count > 1 && ignore_count < IGNORE_COUNT_UNBOUNDED;
        fields.push(field);
        if needs_padding {
            // Pad out with a placeholder slot for each additionally ignored
            // token so slot indexes stay aligned with raw token indexes.
            for _ in 0..ignore_count - 1 {
                fields.push(FieldMetaData::ignore_placeholder());
            }
        }
    }

    RecordMetaData::new(record_name, fields)
}

fn compile_field_token(token: &str, transforms: &TransformRegistry) -> Result<FieldMetaData> {
    match token.split_once(TRANSFORM_SEPARATOR) {
        Some((name, transform_def)) if !transform_def.is_empty() => {
            let chain = transforms.resolve(transform_def)?;
            Ok(FieldMetaData::new(name)?.with_transform(chain))
        }
        Some((name, _)) => FieldMetaData::new(name),
        None => FieldMetaData::new(token),
    }
}
