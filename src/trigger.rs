//! Trigger and matching-discipline types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A registered trigger: the registry key and the pattern searched for in
/// each record.
///
/// Triggers are non-empty. They may contain whitespace, but a multi-word
/// trigger can only ever fire under [`MatchDiscipline::Substring`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Trigger(String);

impl Trigger {
    /// Creates a trigger, rejecting empty text.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::EmptyTrigger);
        }
        Ok(Self(text))
    }

    /// The trigger text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The trigger bytes, as searched for in a record.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns true if the trigger spans more than one whitespace-delimited word.
    #[must_use]
    pub fn is_multi_word(&self) -> bool {
        self.0.chars().any(char::is_whitespace)
    }
}

impl TryFrom<String> for Trigger {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Trigger {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Trigger> for String {
    fn from(trigger: Trigger) -> Self {
        trigger.0
    }
}

impl Borrow<str> for Trigger {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Trigger {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How triggers are located inside a record.
///
/// The two disciplines are mutually incompatible and a dispatcher uses
/// exactly one of them for its whole lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDiscipline {
    /// Split the record into whitespace-delimited words and fire on the
    /// first word (left to right) that is a registered trigger.
    ///
    /// Multi-word triggers never match.
    #[default]
    Word,

    /// Fire on the first registered trigger whose bytes occur anywhere in
    /// the record, including inside longer words.
    ///
    /// Triggers are tested in unspecified order; when several occur in the
    /// same record, which one fires is not guaranteed.
    Substring,
}

impl fmt::Display for MatchDiscipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word => f.write_str("word"),
            Self::Substring => f.write_str("substring"),
        }
    }
}
