//! `name:tag` composite keys.
//!
//! Maps and extensions are addressed by humans (and by create requests)
//! through a single string that packs the two lookup columns together.
//! The string is split on the first colon, so tags may themselves
//! contain colons.

use std::fmt;
use std::str::FromStr;

/// Separator between the name and tag halves of a composite key.
pub const KEY_SEPARATOR: char = ':';

/// Errors produced while parsing a composite key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("Invalid reference '{0}': expected 'name:tag'")]
    MissingSeparator(String),

    #[error("Invalid reference '{0}': name is empty")]
    EmptyName(String),

    #[error("Invalid reference '{0}': tag is empty")]
    EmptyTag(String),
}

/// A parsed `name:tag` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub name: String,
    pub tag: String,
}

impl CompositeKey {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Parse a raw reference, rejecting anything that does not split into
    /// two non-empty halves.
    pub fn parse(raw: &str) -> Result<Self, ReferenceError> {
        let (name, tag) = raw
            .split_once(KEY_SEPARATOR)
            .ok_or_else(|| ReferenceError::MissingSeparator(raw.to_string()))?;

        if name.is_empty() {
            return Err(ReferenceError::EmptyName(raw.to_string()));
        }
        if tag.is_empty() {
            return Err(ReferenceError::EmptyTag(raw.to_string()));
        }

        Ok(Self::new(name, tag))
    }
}

impl FromStr for CompositeKey {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.name, self.tag)
    }
}

/// Format a `name:tag` summary without allocating a [`CompositeKey`].
pub fn summary(name: &str, tag: &str) -> String {
    format!("{name}{KEY_SEPARATOR}{tag}")
}
