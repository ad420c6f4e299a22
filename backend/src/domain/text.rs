//! Required free-text values and enumerated choices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when required text is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyTextError;

impl fmt::Display for EmptyTextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value must not be empty")
    }
}

impl std::error::Error for EmptyTextError {}

/// Text with at least one character.
///
/// Content is stored as given; whitespace-only values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Validate `value`.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyTextError> {
        let value = value.into();
        if value.is_empty() {
            return Err(EmptyTextError);
        }
        Ok(Self(value))
    }

    /// Borrow the text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<NonEmptyText> for String {
    fn from(value: NonEmptyText) -> Self {
        value.0
    }
}

impl TryFrom<String> for NonEmptyText {
    type Error = EmptyTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when text does not name one of a fixed set of choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoiceError {
    pub value: String,
    pub expected: &'static [&'static str],
}

impl InvalidChoiceError {
    pub(crate) fn new(value: &str, expected: &'static [&'static str]) -> Self {
        Self {
            value: value.to_owned(),
            expected,
        }
    }
}

impl fmt::Display for InvalidChoiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not one of {}",
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for InvalidChoiceError {}
