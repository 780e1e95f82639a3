use sqlx::SqlitePool;
use tracing::info;

use crate::error::AppError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS summoners (
    puuid TEXT PRIMARY KEY NOT NULL,
    summoner_name TEXT NOT NULL,
    summoner_id TEXT NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (unixepoch())
);

CREATE TABLE IF NOT EXISTS matches (
    match_id TEXT PRIMARY KEY NOT NULL,
    region TEXT NOT NULL,
    game_start_ts INTEGER NOT NULL,
    game_mode TEXT NOT NULL,
    game_type TEXT NOT NULL,
    duration INTEGER NOT NULL,
    game_end_ts INTEGER NOT NULL,
    early_surrender INTEGER NOT NULL,
    queue_id INTEGER NOT NULL,
    platform_id TEXT NOT NULL,
    game_end_local TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS match_players (
    puuid TEXT NOT NULL,
    match_id TEXT NOT NULL,
    kills INTEGER NOT NULL,
    deaths INTEGER NOT NULL,
    assists INTEGER NOT NULL,
    champion TEXT NOT NULL,
    gold_earned INTEGER NOT NULL,
    position TEXT NOT NULL,
    damage_to_champions INTEGER NOT NULL,
    minions_killed INTEGER NOT NULL,
    win INTEGER NOT NULL,
    PRIMARY KEY (match_id, puuid),
    FOREIGN KEY (match_id) REFERENCES matches(match_id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_match_players_puuid ON match_players(puuid);
"#;

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    info!("🗄️ Database migrations completed");
    Ok(())
}
