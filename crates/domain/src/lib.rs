//! Pokebattle domain.
//!
//! Pure types and rules shared by the engine: entity ids, validated names,
//! the `Pokemon` entity and the level-weighted battle odds.

pub mod battle;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use battle::{BattleOdds, LoserFate, Side};
pub use entities::{Pokemon, STARTING_LEVEL};
pub use error::DomainError;
pub use ids::{PokemonId, RequestedId};
pub use value_objects::{Species, TrainerName};
