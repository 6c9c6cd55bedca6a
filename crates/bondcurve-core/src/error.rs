//! Error types for the core crate.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while building or manipulating core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A tenor could not be parsed or applied.
    #[error("Invalid tenor: {message}")]
    InvalidTenor {
        /// Description of the tenor error.
        message: String,
    },

    /// Unknown ISO currency code.
    #[error("Unknown currency code: {code}")]
    UnknownCurrency {
        /// The code that failed to parse.
        code: String,
    },

    /// An identifier was malformed.
    #[error("Invalid identifier '{value}': {reason}")]
    InvalidIdentifier {
        /// The offending text.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Calendar or business day error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid tenor error.
    #[must_use]
    pub fn invalid_tenor(message: impl Into<String>) -> Self {
        Self::InvalidTenor {
            message: message.into(),
        }
    }

    /// Creates an invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2017-02-30");
        assert_eq!(err.to_string(), "Invalid date: 2017-02-30");

        let err = CoreError::invalid_identifier("OG", "missing separator");
        assert!(err.to_string().contains("missing separator"));
    }
}
