//! Flatfile Processor Library
//!
//! A Rust library for parsing flat-file text streams (CSV-like, fixed or
//! variable delimiter, single or multi record-type) into structured records
//! of named fields.
//!
//! This library provides tools for:
//! - Locating record boundaries in a character stream, by literal delimiter
//!   or regular expression, with cross-read overflow handling
//! - Compiling a compact field-specification grammar into record metadata
//!   (field names, ignore markers, repeat counts, wildcards, transforms)
//! - Dispatching raw records to the applicable metadata in multi-type
//!   record sets, with an UNMATCHED fallback for unknown types
//! - Extracting ordered, named field values honoring ignore/skip counts,
//!   wildcard expansion and per-field string transforms
//! - Emitting parsed records as an XML-style event stream via a sink trait

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod boundary;
        pub mod emitter;
        pub mod field_grammar;
        pub mod record_parser;
        pub mod transforms;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Field, FieldMetaData, Record, RecordMetaData};
pub use app::services::field_grammar::RecordMetadataSet;
pub use app::services::record_parser::{DelimitedParser, RecordParser, RegexParser};
pub use config::ParserConfig;

/// Result type alias for the flatfile processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for flat-file parsing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error (malformed field-spec grammar, unresolvable
    /// transform name, incompatible option combinations)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Declared field names do not match the header record in the stream
    #[error("Header mismatch: {message}")]
    HeaderMismatch { message: String },

    /// The configured data source cannot supply a character stream
    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    /// Data validation error
    #[error("Data validation error: {message}")]
    DataValidation { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a header mismatch error
    pub fn header_mismatch(message: impl Into<String>) -> Self {
        Self::HeaderMismatch {
            message: message.into(),
        }
    }

    /// Create a malformed input error
    pub fn malformed_input(message: impl Into<String>) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a data validation error
    pub fn data_validation(message: impl Into<String>) -> Self {
        Self::DataValidation {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(error: regex::Error) -> Self {
        Self::Configuration {
            message: format!("Invalid regular expression: {}", error),
        }
    }
}
