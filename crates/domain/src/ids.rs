use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a pokemon.
///
/// Ids are positive integers handed out by the store, so `0` and negative
/// values never match a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(i64);

impl PokemonId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parse a raw path segment.
    ///
    /// Integral numbers (including `"7.0"`) are accepted; anything else,
    /// fractions included, is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(value) = trimmed.parse::<i64>() {
            return Some(Self(value));
        }
        let value = trimmed.parse::<f64>().ok()?;
        let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
        (value.is_finite() && value.fract() == 0.0 && in_range).then(|| Self(value as i64))
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for PokemonId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<PokemonId> for i64 {
    fn from(value: PokemonId) -> Self {
        value.0
    }
}

/// An id exactly as a client asked for it.
///
/// Text that is not a number never matches a record and is reported back
/// as `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestedId {
    Number(PokemonId),
    NotANumber,
}

impl RequestedId {
    pub fn coerce(raw: &str) -> Self {
        PokemonId::parse(raw).map_or(Self::NotANumber, Self::Number)
    }

    /// The id to look up, if there is one.
    pub fn id(&self) -> Option<PokemonId> {
        match self {
            Self::Number(id) => Some(*id),
            Self::NotANumber => None,
        }
    }
}

impl fmt::Display for RequestedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

impl From<PokemonId> for RequestedId {
    fn from(id: PokemonId) -> Self {
        Self::Number(id)
    }
}
