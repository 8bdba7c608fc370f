//! Parser trait, shared state and the field-extraction algorithm
//!
//! Concrete strategies supply `next_raw_tokens`; everything downstream of
//! the raw token list (metadata resolution, strict-mode gating, ignore/skip
//! handling, wildcard naming, transforms) is shared here.

use std::sync::Arc;
use tracing::debug;

use crate::app::models::{Field, Record, RecordMetaData};
use crate::app::services::field_grammar::{self, RecordMetadataSet};
use crate::config::ParserConfig;
use crate::constants::wildcard_field_name;
use crate::{Error, Result};

/// Per-instance parser state shared by every strategy
#[derive(Debug)]
pub struct ParserCore {
    config: ParserConfig,
    metadata: RecordMetadataSet,
    line_number: usize,
    record_count: usize,
    in_message_metadata: Option<Arc<RecordMetaData>>,
}

impl ParserCore {
    /// Compile the configuration into parser state, failing fast on
    /// grammar or option errors
    pub fn new(config: ParserConfig) -> Result<Self> {
        let metadata = config.compile_metadata()?;
        Ok(Self {
            config,
            metadata,
            line_number: 0,
            record_count: 0,
            in_message_metadata: None,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn metadata(&self) -> &RecordMetadataSet {
        &self.metadata
    }

    /// Number of records extracted so far in this session
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Number of lines (raw records) read so far, skipped lines included
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Reset all per-session transient state; idempotent
    pub fn reset(&mut self) {
        self.line_number = 0;
        self.record_count = 0;
        self.in_message_metadata = None;
    }

    fn active_metadata(&self, raw_tokens: &[String]) -> Arc<RecordMetaData> {
        match &self.in_message_metadata {
            Some(metadata) => metadata.clone(),
            None => self.metadata.resolve(raw_tokens),
        }
    }

    /// The unignored-field requirement for a record, accounting for the
    /// leading type-discriminator token of multi-type record sets
    fn required_field_count(&self, metadata: &RecordMetaData) -> usize {
        if self.metadata.is_multi_type() {
            metadata.unignored_field_count() + 1
        } else {
            metadata.unignored_field_count()
        }
    }

    /// Compare a header record against the declared field names
    ///
    /// Total slot counts must match; names are compared positionally for
    /// every unignored slot.
    fn validate_header(&self, headers: &[String]) -> Result<()> {
        let Some(metadata) = self.metadata.single() else {
            return Err(Error::configuration(
                "Cannot validate the header of a multi-type record set",
            ));
        };

        let fields = metadata.fields();
        if fields.len() != headers.len() {
            return Err(Error::header_mismatch(format!(
                "Expected {} header fields [{}], found {} [{}]",
                fields.len(),
                metadata.field_names().join(", "),
                headers.len(),
                headers.join(", ")
            )));
        }

        for (n, field) in fields.iter().enumerate() {
            if field.ignore() {
                continue;
            }
            if field.name() != headers[n] {
                return Err(Error::header_mismatch(format!(
                    "Header field {} is '{}', expected '{}'",
                    n + 1,
                    headers[n],
                    field.name()
                )));
            }
        }

        Ok(())
    }

    fn compile_in_message_metadata(&mut self, header_tokens: &[String]) -> Result<()> {
        // In-message field definitions support a single record type only;
        // the compiled metadata is reused for every subsequent record.
        let metadata = field_grammar::build_record_metadata(
            &self.config.record_element_name,
            header_tokens.iter().map(String::as_str),
            &self.config.transforms,
        )?;
        self.in_message_metadata = Some(Arc::new(metadata));
        Ok(())
    }

    /// Map a raw token list onto named fields under the resolved metadata
    fn extract_record(
        &mut self,
        metadata: &Arc<RecordMetaData>,
        raw_tokens: &[String],
    ) -> Result<Record> {
        if metadata.is_unmatched() {
            let field = Field::new(metadata.fields()[0].name(), raw_tokens[0].clone());
            self.record_count += 1;
            return Record::new(metadata.name(), vec![field], metadata.clone());
        }

        // In multi-type mode the leading token is the type discriminator,
        // not a field value.
        let offset = if self.in_message_metadata.is_none() && self.metadata.is_multi_type() {
            1
        } else {
            0
        };

        let mut fields = Vec::new();
        let mut i = 0;

        while i < raw_tokens.len() {
            let token_index = i + offset;
            if token_index >= raw_tokens.len() {
                break;
            }
            if !metadata.is_wildcard() && i >= metadata.fields().len() {
                // We're done... the remaining raw tokens are dropped.
                break;
            }

            let value = raw_tokens[token_index].clone();

            if metadata.is_wildcard() {
                fields.push(Field::new(wildcard_field_name(i), value));
                i += 1;
            } else {
                let field_metadata = &metadata.fields()[i];
                if field_metadata.ignore() {
                    // Saturates on the unbounded sentinel, consuming the
                    // rest of the record.
                    i = i.saturating_add(field_metadata.ignore_count());
                } else {
                    let value = match field_metadata.transform() {
                        Some(chain) => chain.apply(&value),
                        None => value,
                    };
                    fields.push(Field::with_metadata(
                        field_metadata.name(),
                        value,
                        field_metadata.clone(),
                    ));
                    i += 1;
                }
            }
        }

        self.record_count += 1;
        Record::new(metadata.name(), fields, metadata.clone())
    }
}

/// A flat-file record parser strategy
///
/// Strategies supply [`next_raw_tokens`](RecordParser::next_raw_tokens) and
/// a transient-state reset; initialization, record iteration, strict-mode
/// gating and field extraction are shared default behavior.
pub trait RecordParser {
    /// The shared parser state
    fn core(&self) -> &ParserCore;

    fn core_mut(&mut self) -> &mut ParserCore;

    /// Produce the next record's raw token values, or `None` at end of
    /// stream
    fn next_raw_tokens(&mut self) -> Result<Option<Vec<String>>>;

    /// Discard strategy-owned transient state (boundary overflow, buffers)
    fn reset_source(&mut self);

    /// Prepare the parser for a parse session: reset transient state, move
    /// past skipped lines and consume the header record when the
    /// configuration calls for one. Idempotent.
    fn initialize(&mut self) -> Result<()> {
        self.reset_source();
        self.core_mut().reset();

        let skip_lines = self.core().config().effective_skip_lines();
        while self.core().line_number() < skip_lines {
            if self.next_tokens_counted()?.is_none() {
                break;
            }
        }

        let validate_header = self.core().config().validate_header;
        let fields_in_message = self.core().config().fields_in_message;

        if validate_header || fields_in_message {
            let header_tokens = self.next_tokens_counted()?;

            if validate_header {
                let header_tokens = header_tokens.as_deref().ok_or_else(|| {
                    Error::header_mismatch("The input ended before the header record")
                })?;
                self.core().validate_header(header_tokens)?;
            }

            if fields_in_message {
                let header_tokens = header_tokens.as_deref().ok_or_else(|| {
                    Error::malformed_input(
                        "The input ended before the in-message field definitions",
                    )
                })?;
                self.core_mut().compile_in_message_metadata(header_tokens)?;
            }
        }

        Ok(())
    }

    /// Parse the next record, or `None` when the stream is exhausted
    ///
    /// In strict mode, records with fewer raw tokens than the resolved
    /// metadata's unignored-field requirement are dropped and the next
    /// record is attempted; the skip is invisible to the caller.
    fn next_record(&mut self) -> Result<Option<Record>> {
        loop {
            let Some(raw_tokens) = self.next_tokens_counted()? else {
                return Ok(None);
            };
            if raw_tokens.is_empty() {
                return Ok(None);
            }

            let metadata = self.core().active_metadata(&raw_tokens);

            if self.core().config().strict {
                let required = self.core().required_field_count(&metadata);
                if raw_tokens.len() < required {
                    debug!(
                        "[CORRUPT] Record #{} invalid {:?}. The record should contain {} \
                         fields [{}], but contains {}. Ignoring!!",
                        self.core().record_count(),
                        raw_tokens,
                        metadata.fields().len(),
                        metadata.field_names().join(", "),
                        raw_tokens.len()
                    );
                    continue;
                }
            }

            let record = self.core_mut().extract_record(&metadata, &raw_tokens)?;
            return Ok(Some(record));
        }
    }

    /// Release the parse session; the parser may be re-initialized against
    /// the same stream state later. Idempotent.
    fn uninitialize(&mut self) {
        self.reset_source();
        self.core_mut().reset();
    }

    /// Read the next raw token list, counting the line
    fn next_tokens_counted(&mut self) -> Result<Option<Vec<String>>> {
        self.core_mut().line_number += 1;
        self.next_raw_tokens()
    }
}
