//! Pokemon use cases.
//!
//! Plain CRUD over the store: list, get (optionally cached), create,
//! change trainer and delete. Every result is projected to [`PokemonView`].

use std::sync::Arc;

use pokebattle_domain::{PokemonId, Species, TrainerName};

mod error;
mod view;

pub use error::PokemonError;
pub use view::PokemonView;

use crate::infrastructure::cache::TtlCache;
use crate::infrastructure::ports::PokemonRepo;

/// Container for pokemon use cases.
pub struct PokemonUseCases {
    pub list: Arc<ListPokemon>,
    pub get: Arc<GetPokemon>,
    pub create: Arc<CreatePokemon>,
    pub update: Arc<UpdatePokemon>,
    pub delete: Arc<DeletePokemon>,
}

impl PokemonUseCases {
    pub fn new(
        list: Arc<ListPokemon>,
        get: Arc<GetPokemon>,
        create: Arc<CreatePokemon>,
        update: Arc<UpdatePokemon>,
        delete: Arc<DeletePokemon>,
    ) -> Self {
        Self {
            list,
            get,
            create,
            update,
            delete,
        }
    }
}

/// List every stored pokemon.
pub struct ListPokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl ListPokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> Result<Vec<PokemonView>, PokemonError> {
        let pokemons = self.repo.list().await?;
        Ok(PokemonView::many(&pokemons))
    }
}

/// Fetch one pokemon by id.
///
/// With a cache attached, hits skip the store. Entries are never invalidated
/// on writes, so a cached view can lag the store by up to one TTL.
pub struct GetPokemon {
    repo: Arc<dyn PokemonRepo>,
    cache: Option<Arc<TtlCache<PokemonId, PokemonView>>>,
}

impl GetPokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo, cache: None }
    }

    pub fn with_cache(mut self, cache: Arc<TtlCache<PokemonId, PokemonView>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub async fn execute(&self, id: PokemonId) -> Result<PokemonView, PokemonError> {
        if let Some(cache) = &self.cache {
            if let Some(view) = cache.get(&id).await {
                tracing::debug!(pokemon_id = %id, "Pokemon found in cache");
                return Ok(view);
            }
        }

        let pokemon = self
            .repo
            .get(id)
            .await?
            .ok_or_else(|| PokemonError::no_data(id))?;
        let view = PokemonView::from(&pokemon);

        if let Some(cache) = &self.cache {
            cache.insert(id, view.clone()).await;
            tracing::debug!(pokemon_id = %id, ttl_secs = cache.ttl().as_secs(), "Pokemon cached");
        }

        Ok(view)
    }
}

/// Input for creating a pokemon, as received from the client.
#[derive(Debug, Clone)]
pub struct CreatePokemonInput {
    pub species: String,
    pub trainer: String,
}

/// Create a pokemon at the starting level.
pub struct CreatePokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl CreatePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreatePokemonInput) -> Result<PokemonView, PokemonError> {
        let species = Species::new(input.species)?;
        let trainer = TrainerName::new(input.trainer)?;

        let pokemon = self.repo.create(&species, &trainer).await?;
        Ok(PokemonView::from(&pokemon))
    }
}

/// Hand a pokemon over to another trainer.
pub struct UpdatePokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl UpdatePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        id: PokemonId,
        trainer: String,
    ) -> Result<PokemonView, PokemonError> {
        let trainer = TrainerName::new(trainer)?;
        let pokemon = self.repo.update_trainer(id, &trainer).await?;
        Ok(PokemonView::from(&pokemon))
    }
}

/// Remove a pokemon; returns the deleted record.
pub struct DeletePokemon {
    repo: Arc<dyn PokemonRepo>,
}

impl DeletePokemon {
    pub fn new(repo: Arc<dyn PokemonRepo>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: PokemonId) -> Result<PokemonView, PokemonError> {
        let pokemon = self.repo.delete(id).await?;
        Ok(PokemonView::from(&pokemon))
    }
}
