//! Outward-facing pokemon shape.

use pokebattle_domain::{Pokemon, PokemonId};
use serde::{Deserialize, Serialize};

/// A pokemon as returned by the API: `{id, nivel, tipo, treinador}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonView {
    pub id: PokemonId,
    #[serde(rename = "nivel")]
    pub level: u32,
    #[serde(rename = "tipo")]
    pub species: String,
    #[serde(rename = "treinador")]
    pub trainer: String,
}

impl PokemonView {
    /// Project a pokemon with a level other than the stored one.
    pub fn with_level(pokemon: &Pokemon, level: u32) -> Self {
        Self {
            id: pokemon.id,
            level,
            species: pokemon.species.to_string(),
            trainer: pokemon.trainer.to_string(),
        }
    }

    /// Element-wise projection; keeps order and length.
    pub fn many(pokemons: &[Pokemon]) -> Vec<Self> {
        pokemons.iter().map(Self::from).collect()
    }
}

impl From<&Pokemon> for PokemonView {
    fn from(pokemon: &Pokemon) -> Self {
        Self::with_level(pokemon, pokemon.level)
    }
}
