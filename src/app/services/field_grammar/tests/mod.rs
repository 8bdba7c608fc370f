//! Test utilities for the field-specification grammar
//!
//! Common helpers shared by the compiler and resolver test modules.

use crate::app::services::transforms::TransformRegistry;

use super::RecordMetadataSet;

mod resolver_tests;

/// Compile a fields specification with the built-in transforms
pub fn compile(fields: Option<&str>) -> crate::Result<RecordMetadataSet> {
    RecordMetadataSet::compile("record", fields, &TransformRegistry::with_builtins())
}

/// Turn a whitespace-friendly token list into the owned raw-token form the
/// resolver consumes
pub fn tokens(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
