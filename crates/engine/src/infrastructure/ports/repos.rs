//! Repository port traits for database access.

use async_trait::async_trait;
use pokebattle_domain::{Pokemon, PokemonId, Species, TrainerName};

use super::error::RepoError;

// =============================================================================
// Pokemon Storage
// =============================================================================

/// Persistence for pokemon records.
///
/// Level mutations take the caller's snapshot and persist `level + 1` /
/// `level - 1` relative to it; the returned value is the stored row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepo: Send + Sync {
    // CRUD
    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, RepoError>;
    async fn list(&self) -> Result<Vec<Pokemon>, RepoError>;
    /// Insert a new pokemon at the starting level.
    async fn create(&self, species: &Species, trainer: &TrainerName)
        -> Result<Pokemon, RepoError>;
    /// Delete and return the removed snapshot. `RepoError::NotFound` if absent.
    async fn delete(&self, id: PokemonId) -> Result<Pokemon, RepoError>;
    async fn update_trainer(
        &self,
        id: PokemonId,
        trainer: &TrainerName,
    ) -> Result<Pokemon, RepoError>;

    // Levels
    async fn increment_level(&self, pokemon: &Pokemon) -> Result<Pokemon, RepoError>;
    /// Floors at level 1.
    async fn decrement_level(&self, pokemon: &Pokemon) -> Result<Pokemon, RepoError>;
}
