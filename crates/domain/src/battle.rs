//! Level-weighted battle rules.
//!
//! A battle is a single Bernoulli trial: the first combatant wins with
//! probability `first_level / (first_level + second_level)`. The random draw
//! is supplied by the caller so the rule stays deterministic and testable.

use serde::{Deserialize, Serialize};

/// Which side of a battle won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// Win odds for a pairing of two levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleOdds {
    first_level: u32,
    second_level: u32,
}

impl BattleOdds {
    pub fn new(first_level: u32, second_level: u32) -> Self {
        Self {
            first_level,
            second_level,
        }
    }

    /// Probability that the first combatant wins.
    ///
    /// Stored levels are always >= 1, so the total is never zero.
    pub fn first_win_probability(&self) -> f64 {
        let total = f64::from(self.first_level) + f64::from(self.second_level);
        f64::from(self.first_level) / total
    }

    /// Decide the winner from a uniform draw in `[0, 1)`.
    ///
    /// The comparison is strict: a draw exactly equal to the probability goes
    /// to the second combatant.
    pub fn decide(&self, draw: f64) -> Side {
        if draw < self.first_win_probability() {
            Side::First
        } else {
            Side::Second
        }
    }
}

/// What happens to the loser of a battle, based on its pre-battle level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoserFate {
    /// Loser keeps playing one level lower.
    Demoted { new_level: u32 },
    /// Loser was at level 1 and is removed from the store.
    Fainted,
}

impl LoserFate {
    pub fn for_level(level: u32) -> Self {
        if level > 1 {
            Self::Demoted {
                new_level: level - 1,
            }
        } else {
            Self::Fainted
        }
    }
}
