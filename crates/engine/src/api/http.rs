//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pokebattle_domain::{PokemonId, RequestedId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app::App;
use crate::use_cases::pokemon::CreatePokemonInput;
use crate::use_cases::{BattleOutcome, PokemonError, PokemonView};

/// Pokemon and battle routes, relative to the API prefix.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/pokemons", get(list_pokemons).post(create_pokemon))
        .route(
            "/pokemons/{id}",
            get(get_pokemon).put(update_pokemon).delete(delete_pokemon),
        )
        .route("/battle/{id_a}/{id_b}", post(battle))
}

/// Full application router: `/health` at the root, everything else under `prefix`.
///
/// An empty prefix mounts the routes at the root.
pub fn router(app: Arc<App>, prefix: &str) -> Router {
    let api = if prefix.is_empty() {
        routes()
    } else {
        Router::new().nest(prefix, routes())
    };

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .with_state(app)
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Pokemons
// =============================================================================

#[derive(Debug, Deserialize)]
struct CreatePokemonRequest {
    #[serde(rename = "tipo")]
    species: String,
    #[serde(rename = "treinador")]
    trainer: String,
}

#[derive(Debug, Deserialize)]
struct UpdatePokemonRequest {
    #[serde(rename = "treinador")]
    trainer: String,
}

async fn list_pokemons(State(app): State<Arc<App>>) -> Result<Json<Vec<PokemonView>>, ApiError> {
    let pokemons = app.use_cases.pokemon.list.execute().await?;
    Ok(Json(pokemons))
}

async fn get_pokemon(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<PokemonView>, ApiError> {
    let pokemon = app
        .use_cases
        .pokemon
        .get
        .execute(path_id(&id)?)
        .await?;
    Ok(Json(pokemon))
}

async fn create_pokemon(
    State(app): State<Arc<App>>,
    body: Result<Json<CreatePokemonRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PokemonView>), ApiError> {
    let Json(body) = body?;
    let pokemon = app
        .use_cases
        .pokemon
        .create
        .execute(CreatePokemonInput {
            species: body.species,
            trainer: body.trainer,
        })
        .await?;

    tracing::info!(pokemon_id = %pokemon.id, species = %pokemon.species, "Pokemon created");
    Ok((StatusCode::CREATED, Json(pokemon)))
}

async fn update_pokemon(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    body: Result<Json<UpdatePokemonRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = path_id(&id)?;
    let Json(body) = body?;
    app.use_cases
        .pokemon
        .update
        .execute(id, body.trainer)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_pokemon(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = app
        .use_cases
        .pokemon
        .delete
        .execute(path_id(&id)?)
        .await?;

    tracing::info!(pokemon_id = %removed.id, "Pokemon deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `/pokemons/{id}` only accepts numeric ids.
fn path_id(raw: &str) -> Result<PokemonId, ApiError> {
    PokemonId::parse(raw).ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "Invalid input: expected number, received {raw:?} at id"
        ))
    })
}

// =============================================================================
// Battle
// =============================================================================

/// Ids here are not validated: text ids are reported back as `NaN` not found.
async fn battle(
    State(app): State<Arc<App>>,
    Path((id_a, id_b)): Path<(String, String)>,
) -> Result<Json<BattleOutcome>, ApiError> {
    let outcome = app
        .use_cases
        .battle
        .execute(RequestedId::coerce(&id_a), RequestedId::coerce(&id_b))
        .await?;
    Ok(Json(outcome))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// Request body or path id did not have the expected shape.
    InvalidInput(String),
    Pokemon(PokemonError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    field_errors: Option<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Pokemon(e) => match e {
                PokemonError::NotFound { .. } => StatusCode::NOT_FOUND,
                PokemonError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
                PokemonError::PersistenceConflict(_) => StatusCode::CONFLICT,
                PokemonError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn body(self) -> ErrorBody {
        match self {
            ApiError::InvalidInput(details)
            | ApiError::Pokemon(PokemonError::ValidationFailed(details)) => ErrorBody {
                message: "Invalid input".to_string(),
                field_errors: Some(details),
            },
            ApiError::Pokemon(e) => ErrorBody {
                message: e.to_string(),
                field_errors: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body();

        if status.is_server_error() {
            tracing::error!(status = %status, message = %body.message, "Request failed");
        } else {
            tracing::warn!(
                status = %status,
                message = %body.message,
                field_errors = body.field_errors.as_deref().unwrap_or(""),
                "Request rejected"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl From<PokemonError> for ApiError {
    fn from(e: PokemonError) -> Self {
        ApiError::Pokemon(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}
