use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::event::{Event, EventStatus};
use crate::domain::matches::Match;
use crate::domain::repositories::{
    MatchRepository, SeasonRepository, Store, TeamRepository, UnitOfWork,
};
use crate::domain::season::Season;
use crate::domain::team::Team;

/// PostgreSQL implementation of the store
///
/// Every unit of work owns one database transaction.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgresStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn begin(&self) -> DomainResult<Box<dyn UnitOfWork>> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::store(format!("Failed to begin transaction: {}", e)))?;
        Ok(Box::new(PostgresUnitOfWork { tx }))
    }
}

/// Unit of work backed by a PostgreSQL transaction
///
/// Dropping it without commit rolls the transaction back.
pub struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[derive(sqlx::FromRow)]
struct SeasonRow {
    id: i64,
    name: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: EventStatus,
}

impl From<SeasonRow> for Season {
    fn from(r: SeasonRow) -> Self {
        Season::from_persistence(
            r.id,
            Event::from_persistence(r.name, r.start_time, r.end_time, r.status),
        )
    }
}

#[derive(sqlx::FromRow)]
struct MatchRow {
    id: i64,
    name: Option<String>,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    status: EventStatus,
    season_id: Option<i64>,
}

impl From<MatchRow> for Match {
    fn from(r: MatchRow) -> Self {
        Match::from_persistence(
            r.id,
            Event::from_persistence(r.name, r.start_time, r.end_time, r.status),
            r.season_id,
        )
    }
}

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: i64,
    name: String,
    color: Option<String>,
    season_id: i64,
}

impl From<TeamRow> for Team {
    fn from(r: TeamRow) -> Self {
        Team::from_persistence(r.id, r.name, r.color, r.season_id)
    }
}

const SEASON_COLUMNS: &str = "id, name, start_time, end_time, status";
const MATCH_COLUMNS: &str = "id, name, start_time, end_time, status, season_id";
const TEAM_COLUMNS: &str = "id, name, color, season_id";

/// Maps sqlx errors, turning unique violations into conflicts
fn map_db_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DomainError::Conflict(format!("{}: {}", context, db.message()));
        }
        if db.is_foreign_key_violation() {
            return DomainError::not_found("Season not found");
        }
        if db.is_check_violation() {
            return DomainError::Validation(format!("{}: {}", context, db.message()));
        }
    }
    DomainError::store(format!("{}: {}", context, e))
}

fn persisted_id(id: Option<i64>, entity: &str) -> DomainResult<i64> {
    id.ok_or_else(|| DomainError::store(format!("Cannot save unpersisted {}", entity)))
}

#[async_trait]
impl SeasonRepository for PostgresUnitOfWork {
    async fn find_season(&mut self, id: i64) -> DomainResult<Option<Season>> {
        let row = sqlx::query_as::<_, SeasonRow>(&format!(
            "SELECT {} FROM seasons WHERE id = $1",
            SEASON_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to find season by id", e))?;

        Ok(row.map(Season::from))
    }

    async fn list_seasons(&mut self, id: Option<i64>) -> DomainResult<Vec<Season>> {
        let rows = sqlx::query_as::<_, SeasonRow>(&format!(
            "SELECT {} FROM seasons WHERE ($1::BIGINT IS NULL OR id = $1) ORDER BY id",
            SEASON_COLUMNS
        ))
        .bind(id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to list seasons", e))?;

        Ok(rows.into_iter().map(Season::from).collect())
    }

    async fn insert_season(&mut self, season: &Season) -> DomainResult<Season> {
        let event = season.event();
        let row = sqlx::query_as::<_, SeasonRow>(&format!(
            r#"
            INSERT INTO seasons (name, start_time, end_time, status)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            SEASON_COLUMNS
        ))
        .bind(event.name())
        .bind(event.start_time())
        .bind(event.end_time())
        .bind(event.status())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to insert season", e))?;

        Ok(row.into())
    }

    async fn save_season(&mut self, season: &Season) -> DomainResult<()> {
        let id = persisted_id(season.id(), "season")?;
        let event = season.event();
        let result = sqlx::query(
            r#"
            UPDATE seasons
            SET name = $2, start_time = $3, end_time = $4, status = $5
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(event.name())
        .bind(event.start_time())
        .bind(event.end_time())
        .bind(event.status())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to save season", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Season not found: {}", id)));
        }

        Ok(())
    }

    async fn delete_season(&mut self, id: i64) -> DomainResult<bool> {
        sqlx::query("DELETE FROM matches WHERE season_id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete season matches", e))?;

        sqlx::query("DELETE FROM teams WHERE season_id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete season teams", e))?;

        let result = sqlx::query("DELETE FROM seasons WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete season", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl MatchRepository for PostgresUnitOfWork {
    async fn find_match(&mut self, id: i64) -> DomainResult<Option<Match>> {
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {} FROM matches WHERE id = $1",
            MATCH_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to find match by id", e))?;

        Ok(row.map(Match::from))
    }

    async fn list_matches(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(&format!(
            "SELECT {} FROM matches WHERE ($1::BIGINT IS NULL OR season_id = $1) ORDER BY id",
            MATCH_COLUMNS
        ))
        .bind(season_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to list matches", e))?;

        Ok(rows.into_iter().map(Match::from).collect())
    }

    async fn insert_match(&mut self, game: &Match) -> DomainResult<Match> {
        let event = game.event();
        let row = sqlx::query_as::<_, MatchRow>(&format!(
            r#"
            INSERT INTO matches (name, start_time, end_time, status, season_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MATCH_COLUMNS
        ))
        .bind(event.name())
        .bind(event.start_time())
        .bind(event.end_time())
        .bind(event.status())
        .bind(game.season_id())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to insert match", e))?;

        Ok(row.into())
    }

    async fn save_match(&mut self, game: &Match) -> DomainResult<()> {
        let id = persisted_id(game.id(), "match")?;
        let event = game.event();
        let result = sqlx::query(
            r#"
            UPDATE matches
            SET name = $2, start_time = $3, end_time = $4, status = $5, season_id = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(event.name())
        .bind(event.start_time())
        .bind(event.end_time())
        .bind(event.status())
        .bind(game.season_id())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to save match", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Match not found: {}", id)));
        }

        Ok(())
    }

    async fn delete_match(&mut self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM matches WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete match", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TeamRepository for PostgresUnitOfWork {
    async fn find_team(&mut self, id: i64) -> DomainResult<Option<Team>> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {} FROM teams WHERE id = $1",
            TEAM_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to find team by id", e))?;

        Ok(row.map(Team::from))
    }

    async fn list_teams(&mut self, season_id: Option<i64>) -> DomainResult<Vec<Team>> {
        let rows = sqlx::query_as::<_, TeamRow>(&format!(
            "SELECT {} FROM teams WHERE ($1::BIGINT IS NULL OR season_id = $1) ORDER BY id",
            TEAM_COLUMNS
        ))
        .bind(season_id)
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to list teams", e))?;

        Ok(rows.into_iter().map(Team::from).collect())
    }

    async fn insert_team(&mut self, team: &Team) -> DomainResult<Team> {
        let row = sqlx::query_as::<_, TeamRow>(&format!(
            r#"
            INSERT INTO teams (name, color, season_id)
            VALUES ($1, $2, $3)
            RETURNING {}
            "#,
            TEAM_COLUMNS
        ))
        .bind(team.name())
        .bind(team.color())
        .bind(team.season_id())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to insert team", e))?;

        Ok(row.into())
    }

    async fn save_team(&mut self, team: &Team) -> DomainResult<()> {
        let id = persisted_id(team.id(), "team")?;
        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = $2, color = $3, season_id = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(team.name())
        .bind(team.color())
        .bind(team.season_id())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| map_db_error("Failed to save team", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Team not found: {}", id)));
        }

        Ok(())
    }

    async fn delete_team(&mut self, id: i64) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| map_db_error("Failed to delete team", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn commit(self: Box<Self>) -> DomainResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DomainError::store(format!("Failed to commit transaction: {}", e)))
    }
}
