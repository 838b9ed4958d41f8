//! Battle use case.
//!
//! Two stored pokemon fight once. The first one wins with probability
//! proportional to its share of the combined level. Afterwards:
//! 1. The winner gains a level
//! 2. The loser drops a level, or is deleted if it was already at level 1
//!
//! The returned views carry the predicted post-battle levels rather than
//! re-reading the store. This assumes the store persists exactly `level + 1`
//! and `level - 1`; a store that clamps levels would diverge from the reply.

use std::sync::Arc;

use pokebattle_domain::{BattleOdds, LoserFate, Pokemon, RequestedId, Side};
use serde::{Deserialize, Serialize};

use super::pokemon::{PokemonError, PokemonView};
use crate::infrastructure::ports::{PokemonRepo, RandomPort, RepoError};

/// Result of a battle, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    #[serde(rename = "vencedor")]
    pub winner: PokemonView,
    #[serde(rename = "perdedor")]
    pub loser: PokemonView,
}

/// Resolve a battle between two stored pokemon.
pub struct BattlePokemon {
    repo: Arc<dyn PokemonRepo>,
    random: Arc<dyn RandomPort>,
}

impl BattlePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { repo, random }
    }

    /// Execute a battle.
    ///
    /// # Returns
    /// * `Ok(BattleOutcome)` - winner at `level + 1`, loser at `level - 1`
    ///   (`0` when it fainted and was deleted)
    /// * `Err(PokemonError::NotFound)` - a combatant does not exist; the first
    ///   id is reported when both are missing, and text ids read as `NaN`
    /// * `Err(_)` - any store failure, unchanged
    pub async fn execute(
        &self,
        first_id: impl Into<RequestedId>,
        second_id: impl Into<RequestedId>,
    ) -> Result<BattleOutcome, PokemonError> {
        let (first_id, second_id) = (first_id.into(), second_id.into());
        let first = self.lookup(first_id).await?;
        let second = self.lookup(second_id).await?;

        let first = first.ok_or_else(|| PokemonError::not_found(first_id))?;
        let second = second.ok_or_else(|| PokemonError::not_found(second_id))?;

        let odds = BattleOdds::new(first.level, second.level);
        tracing::info!(
            first = %first.species,
            first_level = first.level,
            second = %second.species,
            second_level = second.level,
            first_win_probability = odds.first_win_probability(),
            "Battle started"
        );

        let draw = self.random.gen_unit();
        let (winner, loser) = match odds.decide(draw) {
            Side::First => (first, second),
            Side::Second => (second, first),
        };
        tracing::info!(
            draw,
            winner_id = %winner.id,
            winner = %winner.species,
            loser_id = %loser.id,
            "Battle decided"
        );

        self.repo.increment_level(&winner).await?;

        if let Err(e) = self.settle_loser(&loser).await {
            self.revert_win(&winner).await;
            return Err(e.into());
        }

        Ok(BattleOutcome {
            winner: PokemonView::with_level(&winner, winner.level_after_win()),
            loser: PokemonView::with_level(&loser, loser.level_after_loss()),
        })
    }

    /// Ids that are not numbers skip the store and are simply missing.
    async fn lookup(&self, id: RequestedId) -> Result<Option<Pokemon>, RepoError> {
        match id.id() {
            Some(id) => self.repo.get(id).await,
            None => Ok(None),
        }
    }

    async fn settle_loser(&self, loser: &Pokemon) -> Result<(), RepoError> {
        match LoserFate::for_level(loser.level) {
            LoserFate::Demoted { new_level } => {
                self.repo.decrement_level(loser).await?;
                tracing::debug!(pokemon_id = %loser.id, new_level, "Loser demoted");
            }
            LoserFate::Fainted => {
                tracing::warn!(
                    pokemon_id = %loser.id,
                    species = %loser.species,
                    trainer = %loser.trainer,
                    "Pokemon fainted at level 1 and is being removed"
                );
                self.repo.delete(loser.id).await?;
            }
        }
        Ok(())
    }

    /// Undo the winner's level gain after the loser update failed.
    async fn revert_win(&self, winner: &Pokemon) {
        let promoted = Pokemon {
            level: winner.level_after_win(),
            ..winner.clone()
        };
        match self.repo.decrement_level(&promoted).await {
            Ok(_) => tracing::warn!(
                pokemon_id = %winner.id,
                level = winner.level,
                "Loser update failed, winner level reverted"
            ),
            Err(e) => tracing::error!(
                pokemon_id = %winner.id,
                error = %e,
                "Loser update failed and winner level could not be reverted"
            ),
        }
    }
}
