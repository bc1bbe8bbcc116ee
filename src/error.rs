//! Error types for Phonoscope.
//!
//! All errors are strongly typed using thiserror so callers can match on
//! specific conditions. Only programmer errors surface here: parsing and
//! simulation degrade to empty results instead of failing.

use thiserror::Error;

/// Validation errors for malformed inputs (the "invalid argument" family).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Phoneme symbol cannot be empty")]
    EmptySymbol,

    #[error("Word label cannot be empty")]
    EmptyWord,

    #[error("Word ranking cannot be empty")]
    EmptyRanking,

    #[error("Word '{word}' appears more than once in the ranking")]
    DuplicateRankedWord {
        word: String,
    },

    #[error("No target phonemes registered for word '{word}'")]
    MissingTargetPhonemes {
        word: String,
    },

    #[error("Required field '{field}' is missing")]
    MissingField {
        field: String,
    },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: String,
    },
}

/// Lookups against the reference tables that the caller required to succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Word '{word}' is not part of the difficulty ranking")]
    WordNotRanked {
        word: String,
    },
}

/// Top-level error type for Phonoscope.
#[derive(Debug, Error)]
pub enum PhonoError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PhonoError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a lookup error.
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::Lookup(_))
    }

    /// Returns true if this is a configuration parse error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for Phonoscope operations.
pub type PhonoResult<T> = Result<T, PhonoError>;
