//! Named string-transform functions applied to field values
//!
//! Field tokens in the fields specification may carry a `?` suffix naming a
//! transform chain (e.g. `surname?trim.upper_case`). Transform names are
//! resolved against a registry at grammar-compile time; an unknown name is a
//! configuration error, never a per-record error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{Error, Result};

/// Separator between chained transform names (`trim.upper_case`)
const CHAIN_SEPARATOR: char = '.';

/// A single named string transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StringTransform {
    /// Strip leading and trailing whitespace
    Trim,
    /// Strip leading whitespace
    TrimLeft,
    /// Strip trailing whitespace
    TrimRight,
    /// Convert to upper case
    UpperCase,
    /// Convert to lower case
    LowerCase,
    /// Capitalize the first character
    CapFirst,
    /// Lower-case the first character
    UncapFirst,
}

impl StringTransform {
    /// Apply the transform to a raw field value
    pub fn apply(&self, value: &str) -> String {
        match self {
            StringTransform::Trim => value.trim().to_string(),
            StringTransform::TrimLeft => value.trim_start().to_string(),
            StringTransform::TrimRight => value.trim_end().to_string(),
            StringTransform::UpperCase => value.to_uppercase(),
            StringTransform::LowerCase => value.to_lowercase(),
            StringTransform::CapFirst => map_first_char(value, char::to_uppercase),
            StringTransform::UncapFirst => map_first_char(value, char::to_lowercase),
        }
    }
}

fn map_first_char<I>(value: &str, f: impl Fn(char) -> I) -> String
where
    I: Iterator<Item = char>,
{
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => f(first).chain(chars).collect(),
        None => String::new(),
    }
}

/// An ordered chain of transforms applied left to right
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformChain {
    transforms: Vec<StringTransform>,
}

impl TransformChain {
    /// Apply every transform in the chain, in declaration order
    pub fn apply(&self, value: &str) -> String {
        let mut result = value.to_string();
        for transform in &self.transforms {
            result = transform.apply(&result);
        }
        result
    }

    /// The textual definition length, used for diagnostics
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Registry of transform names consulted at grammar-compile time
#[derive(Debug, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<String, StringTransform>,
}

impl TransformRegistry {
    /// Create a registry pre-populated with the built-in transform names
    pub fn with_builtins() -> Self {
        let mut transforms = HashMap::new();
        transforms.insert("trim".to_string(), StringTransform::Trim);
        transforms.insert("trim_left".to_string(), StringTransform::TrimLeft);
        transforms.insert("trim_right".to_string(), StringTransform::TrimRight);
        transforms.insert("upper_case".to_string(), StringTransform::UpperCase);
        transforms.insert("lower_case".to_string(), StringTransform::LowerCase);
        transforms.insert("cap_first".to_string(), StringTransform::CapFirst);
        transforms.insert("uncap_first".to_string(), StringTransform::UncapFirst);
        Self { transforms }
    }

    /// Register an additional name for a transform
    pub fn register(&mut self, name: impl Into<String>, transform: StringTransform) {
        self.transforms.insert(name.into(), transform);
    }

    /// Resolve a dotted transform-chain definition (e.g. `trim.upper_case`)
    ///
    /// Every segment must name a registered transform; an unresolvable name
    /// fails with a configuration error.
    pub fn resolve(&self, definition: &str) -> Result<TransformChain> {
        let mut resolved = Vec::new();
        for name in definition.split(CHAIN_SEPARATOR) {
            let name = name.trim();
            let transform = self.transforms.get(name).ok_or_else(|| {
                Error::configuration(format!(
                    "Unknown string transform '{}' in definition '{}'. Known transforms: {}",
                    name,
                    definition,
                    self.known_names().join(", ")
                ))
            })?;
            resolved.push(*transform);
        }
        Ok(TransformChain {
            transforms: resolved,
        })
    }

    /// All registered transform names, sorted for stable output
    pub fn known_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.transforms.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
