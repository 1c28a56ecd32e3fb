use sqlx::PgPool;

/// Statements dropping every object owned by the service, children first
const DROP_STATEMENTS: &[&str] = &[
    "DROP TABLE IF EXISTS teams",
    "DROP TABLE IF EXISTS matches",
    "DROP TABLE IF EXISTS seasons",
    "DROP TYPE IF EXISTS event_status",
];

/// Idempotent schema creation
const CREATE_STATEMENTS: &[&str] = &[
    r#"
    DO $$ BEGIN
        CREATE TYPE event_status AS ENUM ('pending', 'ongoing', 'completed');
    EXCEPTION
        WHEN duplicate_object THEN NULL;
    END $$
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS seasons (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        start_time TIMESTAMPTZ,
        end_time TIMESTAMPTZ,
        status event_status NOT NULL DEFAULT 'pending',
        CHECK (start_time IS NULL OR end_time IS NULL OR start_time <= end_time)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS seasons_name_idx ON seasons (name)",
    r#"
    CREATE TABLE IF NOT EXISTS matches (
        id BIGSERIAL PRIMARY KEY,
        name TEXT,
        start_time TIMESTAMPTZ,
        end_time TIMESTAMPTZ,
        status event_status NOT NULL DEFAULT 'pending',
        season_id BIGINT REFERENCES seasons (id) ON DELETE CASCADE,
        CHECK (start_time IS NULL OR end_time IS NULL OR start_time <= end_time)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS matches_name_idx ON matches (name)",
    "CREATE INDEX IF NOT EXISTS matches_season_id_idx ON matches (season_id)",
    r#"
    CREATE TABLE IF NOT EXISTS teams (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        color TEXT,
        season_id BIGINT NOT NULL REFERENCES seasons (id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS teams_season_id_idx ON teams (season_id)",
];

/// Creates the schema, dropping existing objects first when `hard` is set
///
/// Runs in a single transaction; a failure leaves the schema untouched.
pub async fn create_database(pool: &PgPool, hard: bool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    if hard {
        tracing::warn!("Hard reset requested: dropping all tournament tables");
        for statement in DROP_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
    }

    for statement in CREATE_STATEMENTS {
        sqlx::query(statement).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    tracing::info!("Database schema ready");
    Ok(())
}
