//! Application state and composition.

use std::sync::Arc;
use std::time::Duration;

use pokebattle_domain::PokemonId;

use crate::infrastructure::{
    cache::TtlCache,
    ports::{PokemonRepo, RandomPort},
};
use crate::use_cases;
use crate::use_cases::PokemonView;

/// Main application state.
///
/// Holds the use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
    /// Lookup cache shared with `GetPokemon`, present when a TTL is configured.
    pub pokemon_cache: Option<Arc<TtlCache<PokemonId, PokemonView>>>,
}

/// Container for all use cases.
pub struct UseCases {
    pub pokemon: use_cases::PokemonUseCases,
    pub battle: Arc<use_cases::BattlePokemon>,
}

impl App {
    /// Create a new App with all dependencies wired up.
    ///
    /// `cache_ttl` enables the get-by-id cache; `None` reads straight from the store.
    pub fn new(
        pokemon_repo: Arc<dyn PokemonRepo>,
        random: Arc<dyn RandomPort>,
        cache_ttl: Option<Duration>,
    ) -> Self {
        let pokemon_cache = cache_ttl.map(|ttl| Arc::new(TtlCache::new(ttl)));

        let mut get = use_cases::pokemon::GetPokemon::new(pokemon_repo.clone());
        if let Some(cache) = &pokemon_cache {
            get = get.with_cache(cache.clone());
        }

        let pokemon = use_cases::PokemonUseCases::new(
            Arc::new(use_cases::pokemon::ListPokemon::new(pokemon_repo.clone())),
            Arc::new(get),
            Arc::new(use_cases::pokemon::CreatePokemon::new(pokemon_repo.clone())),
            Arc::new(use_cases::pokemon::UpdatePokemon::new(pokemon_repo.clone())),
            Arc::new(use_cases::pokemon::DeletePokemon::new(pokemon_repo.clone())),
        );
        let battle = Arc::new(use_cases::BattlePokemon::new(pokemon_repo, random));

        Self {
            use_cases: UseCases { pokemon, battle },
            pokemon_cache,
        }
    }
}
