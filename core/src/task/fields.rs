use std::fmt;

use serde::Serialize;

use crate::error::ValidationError;

fn check_range(field: &'static str, value: i64, min: u8, max: u8) -> Result<u8, ValidationError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(ValidationError::out_of_range(field, value, min, max));
    }
    Ok(value as u8)
}

/// Number of variations for `generate`, 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Count(u8);

impl Count {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;
    pub const DEFAULT: Count = Count(1);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        check_range("count", value, Self::MIN, Self::MAX).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// A single image is what the tool produces anyway, so the flag is omitted.
    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for Count {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of sequential frames for `story`, 2..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Steps(u8);

impl Steps {
    pub const MIN: u8 = 2;
    pub const MAX: u8 = 8;
    pub const DEFAULT: Steps = Steps(4);

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        check_range("steps", value, Self::MIN, Self::MAX).map(Self)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Steps {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Free text that must contain something other than whitespace.
///
/// The value is kept verbatim; only the emptiness check trims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RequiredText(String);

impl RequiredText {
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty(field));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Blank optional text is treated as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
