//! Shared harness for router tests.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use pokebattle_domain::{PokemonId, Species, TrainerName};
use serde_json::Value;
use tower::ServiceExt;

use crate::api;
use crate::infrastructure::clock::{FixedClock, FixedRandom};
use crate::infrastructure::pokemon_store::SqlitePokemonRepo;
use crate::infrastructure::ports::PokemonRepo;
use crate::App;

pub const API: &str = "/api/v1";

/// A running router over a throwaway database.
pub struct TestApp {
    // Keeps the database directory alive for the duration of the test.
    _dir: tempfile::TempDir,
    pub store: Arc<SqlitePokemonRepo>,
    router: Router,
}

impl TestApp {
    /// Router under `/api/v1` whose battles always draw `draw`.
    pub async fn new(draw: f64) -> Self {
        Self::with_options(draw, API, None).await
    }

    pub async fn with_options(draw: f64, prefix: &str, cache_ttl: Option<Duration>) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pokemons.db").to_string_lossy().to_string();
        let clock = FixedClock(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let store = Arc::new(
            SqlitePokemonRepo::new(&path, Arc::new(clock))
                .await
                .expect("open store"),
        );

        let repo: Arc<dyn PokemonRepo> = store.clone();
        let app = Arc::new(App::new(repo, Arc::new(FixedRandom(draw)), cache_ttl));

        Self {
            _dir: dir,
            store,
            router: api::router(app, prefix),
        }
    }

    /// Create a pokemon directly in the store and force its level.
    pub async fn seed(&self, species: &str, trainer: &str, level: u32) -> PokemonId {
        let pokemon = self
            .store
            .create(
                &Species::new(species).unwrap(),
                &TrainerName::new(trainer).unwrap(),
            )
            .await
            .expect("seed pokemon");
        self.store
            .set_level(pokemon.id, level)
            .await
            .expect("seed level");
        pokemon.id
    }

    pub async fn stored_level(&self, id: PokemonId) -> Option<u32> {
        self.store
            .get(id)
            .await
            .expect("read pokemon")
            .map(|p| p.level)
    }

    /// Send a request with an optional JSON body; returns status and parsed body.
    ///
    /// Empty bodies come back as `Value::Null`.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = match body {
            Some(json) => Body::from(serde_json::to_vec(&json).unwrap()),
            None => Body::empty(),
        };
        let (status, raw) = self
            .send_raw(method, uri, Some("application/json"), body)
            .await;
        let json = if raw.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&raw).unwrap_or(Value::String(raw))
        };
        (status, json)
    }

    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: Body,
    ) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
