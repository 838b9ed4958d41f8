//! Error types for the domain layer
//!
//! Value objects reject bad input with a `DomainError`, so adapters never have
//! to fall back to String or anyhow.

use thiserror::Error;

/// Error raised by domain constructors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error for a rejected value.
    ///
    /// # Example
    /// ```ignore
    /// if trainer.is_empty() {
    ///     return Err(DomainError::validation("Trainer name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("trainer cannot be empty");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: trainer cannot be empty");
    }
}
