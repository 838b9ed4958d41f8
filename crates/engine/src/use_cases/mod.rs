//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases talk to the store through port traits only.

pub mod battle;
pub mod pokemon;

// Re-export main types
pub use battle::{BattleOutcome, BattlePokemon};
pub use pokemon::{PokemonError, PokemonUseCases, PokemonView};
