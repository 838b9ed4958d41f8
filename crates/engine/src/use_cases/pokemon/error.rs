//! Pokemon operation errors.

use std::fmt;

use pokebattle_domain::{DomainError, PokemonId};

use crate::infrastructure::ports::RepoError;

/// Errors produced by every pokemon use case, battles included.
///
/// Closed set: the HTTP boundary matches it exhaustively.
#[derive(Debug, thiserror::Error)]
pub enum PokemonError {
    /// No record behind `id`. Each operation words `message` its own way.
    #[error("{message}")]
    NotFound { id: String, message: String },
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
    #[error("Persistence conflict: {0}")]
    PersistenceConflict(String),
    #[error("{0}")]
    Unknown(String),
}

impl PokemonError {
    /// A battle combatant does not exist. `id` is printed as requested.
    pub fn not_found(id: impl fmt::Display) -> Self {
        let id = id.to_string();
        Self::NotFound {
            message: format!("Pokémon {id} não encontrado"),
            id,
        }
    }

    /// A lookup by id found nothing.
    pub fn no_data(id: PokemonId) -> Self {
        Self::NotFound {
            id: id.to_string(),
            message: format!("No pokemon data with id: {id}"),
        }
    }
}

impl From<RepoError> for PokemonError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound { id, .. } => Self::NotFound {
                id,
                message: "Resource not found".to_string(),
            },
            RepoError::ConstraintViolation(msg) => Self::PersistenceConflict(msg),
            e @ (RepoError::Database { .. } | RepoError::Serialization(_)) => {
                Self::Unknown(e.to_string())
            }
        }
    }
}

impl From<DomainError> for PokemonError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => Self::ValidationFailed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_id() {
        let err = PokemonError::not_found(PokemonId::new(999));
        assert_eq!(err.to_string(), "Pokémon 999 não encontrado");
    }

    #[test]
    fn lookup_miss_has_its_own_wording() {
        let err = PokemonError::no_data(PokemonId::new(3));
        assert_eq!(err.to_string(), "No pokemon data with id: 3");
        assert!(matches!(err, PokemonError::NotFound { ref id, .. } if id == "3"));
    }

    #[test]
    fn repo_errors_are_classified() {
        let err: PokemonError = RepoError::not_found("Pokemon", 3).into();
        assert!(matches!(err, PokemonError::NotFound { ref id, .. } if id == "3"));
        assert_eq!(err.to_string(), "Resource not found");

        let err: PokemonError = RepoError::constraint("UNIQUE constraint failed").into();
        assert!(matches!(err, PokemonError::PersistenceConflict(_)));

        let err: PokemonError = RepoError::database("get", "disk I/O error").into();
        assert!(matches!(err, PokemonError::Unknown(ref msg) if msg.contains("disk I/O error")));
    }

    #[test]
    fn domain_validation_becomes_validation_failed() {
        let err: PokemonError = DomainError::validation("Species cannot be empty").into();
        assert!(matches!(err, PokemonError::ValidationFailed(ref msg) if msg == "Species cannot be empty"));
    }
}
