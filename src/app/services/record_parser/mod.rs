//! Record parser strategies and field extraction
//!
//! This module turns raw record text into [`Record`](crate::Record) values
//! with named fields. It is organized into:
//! - [`parser`] - the `RecordParser` trait, shared parser state and the
//!   field-extraction algorithm
//! - [`delimited`] - field tokenization by a literal separator string
//! - [`regex`] - field tokenization by a full-record pattern (capture
//!   groups, or pattern split when no groups are declared)
//!
//! A parser instance owns exactly one input stream and is driven pull-based,
//! one `next_record` call at a time. Instances are reusable across parse
//! sessions: `initialize` resets all per-session transient state.

pub mod delimited;
pub mod parser;
pub mod regex;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use delimited::DelimitedParser;
pub use parser::{ParserCore, RecordParser};
pub use regex::RegexParser;
