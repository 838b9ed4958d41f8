//! SQLite-backed pokemon storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pokebattle_domain::{Pokemon, PokemonId, Species, TrainerName, STARTING_LEVEL};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, PokemonRepo, RepoError};

const COLUMNS: &str = "id, species, trainer, level, created_at, updated_at";

/// SQLite implementation of the pokemon store.
pub struct SqlitePokemonRepo {
    pool: SqlitePool,
    clock: Arc<dyn ClockPort>,
}

impl SqlitePokemonRepo {
    pub async fn new(db_path: &str, clock: Arc<dyn ClockPort>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pokemons (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                species TEXT NOT NULL,
                trainer TEXT NOT NULL,
                level INTEGER NOT NULL CHECK (level >= 1),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("schema", e))?;

        Ok(Self { pool, clock })
    }

    /// Overwrite a level directly, bypassing battle rules (tests only).
    #[cfg(test)]
    pub async fn set_level(&self, id: PokemonId, level: u32) -> Result<(), RepoError> {
        sqlx::query("UPDATE pokemons SET level = ? WHERE id = ?")
            .bind(i64::from(level))
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("set_level", e))?;
        Ok(())
    }

    async fn write_level(&self, id: PokemonId, level: u32) -> Result<Pokemon, RepoError> {
        let now = self.clock.now().to_rfc3339();
        let row = sqlx::query(&format!(
            "UPDATE pokemons SET level = ?, updated_at = ? WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(i64::from(level))
        .bind(now)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("write_level", e))?
        .ok_or_else(|| RepoError::not_found("Pokemon", id))?;

        pokemon_from_row(&row)
    }
}

#[async_trait]
impl PokemonRepo for SqlitePokemonRepo {
    async fn get(&self, id: PokemonId) -> Result<Option<Pokemon>, RepoError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM pokemons WHERE id = ?"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(pokemon_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Pokemon>, RepoError> {
        let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM pokemons ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter().map(pokemon_from_row).collect()
    }

    async fn create(
        &self,
        species: &Species,
        trainer: &TrainerName,
    ) -> Result<Pokemon, RepoError> {
        tracing::info!(species = %species, trainer = %trainer, "Creating pokemon");
        let now = self.clock.now().to_rfc3339();

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO pokemons (species, trainer, level, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(species.as_str())
        .bind(trainer.as_str())
        .bind(i64::from(STARTING_LEVEL))
        .bind(&now)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        pokemon_from_row(&row)
    }

    async fn delete(&self, id: PokemonId) -> Result<Pokemon, RepoError> {
        tracing::info!(pokemon_id = %id, "Deleting pokemon");
        let row = sqlx::query(&format!("DELETE FROM pokemons WHERE id = ? RETURNING {COLUMNS}"))
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?
            .ok_or_else(|| RepoError::not_found("Pokemon", id))?;

        pokemon_from_row(&row)
    }

    async fn update_trainer(
        &self,
        id: PokemonId,
        trainer: &TrainerName,
    ) -> Result<Pokemon, RepoError> {
        tracing::info!(pokemon_id = %id, trainer = %trainer, "Updating pokemon trainer");
        let now = self.clock.now().to_rfc3339();

        let row = sqlx::query(&format!(
            "UPDATE pokemons SET trainer = ?, updated_at = ? WHERE id = ? RETURNING {COLUMNS}"
        ))
        .bind(trainer.as_str())
        .bind(now)
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_trainer", e))?
        .ok_or_else(|| RepoError::not_found("Pokemon", id))?;

        pokemon_from_row(&row)
    }

    async fn increment_level(&self, pokemon: &Pokemon) -> Result<Pokemon, RepoError> {
        let level = pokemon.level_after_win();
        tracing::info!(pokemon_id = %pokemon.id, level, "Raising pokemon level");
        self.write_level(pokemon.id, level).await
    }

    async fn decrement_level(&self, pokemon: &Pokemon) -> Result<Pokemon, RepoError> {
        let level = pokemon.level_after_loss().max(1);
        tracing::info!(pokemon_id = %pokemon.id, level, "Lowering pokemon level");
        self.write_level(pokemon.id, level).await
    }
}

fn map_sqlx_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    if let sqlx::Error::Database(db) = &error {
        if db.is_unique_violation() || db.is_check_violation() || db.is_foreign_key_violation() {
            return RepoError::constraint(db.message());
        }
    }
    RepoError::database(operation, error)
}

fn pokemon_from_row(row: &SqliteRow) -> Result<Pokemon, RepoError> {
    let id: i64 = row.try_get("id").map_err(RepoError::serialization)?;
    let species: String = row.try_get("species").map_err(RepoError::serialization)?;
    let trainer: String = row.try_get("trainer").map_err(RepoError::serialization)?;
    let level: i64 = row.try_get("level").map_err(RepoError::serialization)?;
    let created_at: String = row.try_get("created_at").map_err(RepoError::serialization)?;
    let updated_at: String = row.try_get("updated_at").map_err(RepoError::serialization)?;

    Ok(Pokemon {
        id: PokemonId::new(id),
        species: Species::new(species).map_err(RepoError::serialization)?,
        trainer: TrainerName::new(trainer).map_err(RepoError::serialization)?,
        level: u32::try_from(level).map_err(RepoError::serialization)?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(RepoError::serialization)
}
