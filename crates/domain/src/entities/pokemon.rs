//! Pokemon entity - A stored combatant owned by a trainer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{PokemonId, Species, TrainerName};

/// Level assigned to every newly created pokemon.
pub const STARTING_LEVEL: u32 = 7;

/// A pokemon record as held by the store.
///
/// Plain data struct: the store assigns `id` and the timestamps, and keeps
/// `level >= 1` (a pokemon that would drop to level 0 is deleted instead).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: PokemonId,
    pub species: Species,
    pub trainer: TrainerName,
    pub level: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pokemon {
    pub fn new(
        id: PokemonId,
        species: Species,
        trainer: TrainerName,
        level: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            species,
            trainer,
            level,
            created_at: now,
            updated_at: now,
        }
    }

    /// Level after winning one battle.
    pub fn level_after_win(&self) -> u32 {
        self.level.saturating_add(1)
    }

    /// Level after losing one battle. Zero means the pokemon fainted.
    pub fn level_after_loss(&self) -> u32 {
        self.level.saturating_sub(1)
    }
}
