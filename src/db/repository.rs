use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::models::{MatchOutcome, MatchRecord, MatchRow, ParticipantDetail, ParticipantRow};
use crate::error::AppError;
use crate::riot::Summoner;

/// Persisted match history as seen by the report pipeline.
///
/// Writes are duplicate tolerant so two reports racing on the same match id
/// both succeed.
#[async_trait]
pub trait MatchStore: Send + Sync {
    async fn summoner_exists(&self, puuid: &str) -> Result<bool, AppError>;

    async fn add_summoner(&self, summoner: &Summoner) -> Result<(), AppError>;

    async fn match_exists(&self, match_id: &str) -> Result<bool, AppError>;

    /// Store a match and all of its participants, or nothing.
    async fn save_match(&self, record: &MatchRecord) -> Result<(), AppError>;

    /// Outcome of `puuid` in `match_id`, `None` when the pair isn't stored.
    async fn get_outcome(
        &self,
        match_id: &str,
        puuid: &str,
    ) -> Result<Option<MatchOutcome>, AppError>;

    async fn get_participant_detail(
        &self,
        match_id: &str,
        puuid: &str,
    ) -> Result<Option<ParticipantDetail>, AppError>;
}

#[derive(Clone, Debug)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    #[cfg(test)]
    pub async fn in_memory() -> Self {
        use sqlx::sqlite::SqlitePoolOptions;

        // A single never-recycled connection, each new one would open an empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        super::migrations::run_migrations(&pool).await.unwrap();
        Self::new(pool)
    }

    #[cfg(test)]
    pub async fn count_participants(&self, match_id: &str) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM match_players WHERE match_id = ?")
            .bind(match_id)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

async fn insert_match(tx: &mut Transaction<'_, Sqlite>, row: &MatchRow) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO matches (
            match_id, region, game_start_ts, game_mode, game_type, duration,
            game_end_ts, early_surrender, queue_id, platform_id, game_end_local
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&row.match_id)
    .bind(&row.region)
    .bind(row.game_start_ts)
    .bind(&row.game_mode)
    .bind(&row.game_type)
    .bind(row.duration)
    .bind(row.game_end_ts)
    .bind(row.early_surrender)
    .bind(row.queue_id)
    .bind(&row.platform_id)
    .bind(&row.game_end_local)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

async fn insert_participants(
    tx: &mut Transaction<'_, Sqlite>,
    match_id: &str,
    rows: &[ParticipantRow],
) -> Result<(), AppError> {
    for row in rows {
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO match_players (
                puuid, match_id, kills, deaths, assists, champion, gold_earned,
                position, damage_to_champions, minions_killed, win
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&row.puuid)
        .bind(match_id)
        .bind(row.kills)
        .bind(row.deaths)
        .bind(row.assists)
        .bind(&row.champion)
        .bind(row.gold_earned)
        .bind(&row.position)
        .bind(row.damage_to_champions)
        .bind(row.minions_killed)
        .bind(row.win)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}

#[async_trait]
impl MatchStore for Repository {
    async fn summoner_exists(&self, puuid: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM summoners WHERE puuid = ?")
            .bind(puuid)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    async fn add_summoner(&self, summoner: &Summoner) -> Result<(), AppError> {
        sqlx::query(
            "INSERT OR IGNORE INTO summoners (puuid, summoner_name, summoner_id) VALUES (?, ?, ?)",
        )
        .bind(&summoner.puuid)
        .bind(&summoner.name)
        .bind(&summoner.summoner_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn match_exists(&self, match_id: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM matches WHERE match_id = ?")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    async fn save_match(&self, record: &MatchRecord) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        insert_match(&mut tx, &record.info).await?;
        insert_participants(&mut tx, &record.info.match_id, &record.participants).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_outcome(
        &self,
        match_id: &str,
        puuid: &str,
    ) -> Result<Option<MatchOutcome>, AppError> {
        let row = sqlx::query_as::<_, (bool, bool)>(
            r#"
            SELECT mp.win, m.early_surrender
            FROM match_players mp
            INNER JOIN matches m ON m.match_id = mp.match_id
            WHERE mp.match_id = ? AND mp.puuid = ?
            "#,
        )
        .bind(match_id)
        .bind(puuid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(win, early_surrender)| MatchOutcome::from_flags(win, early_surrender)))
    }

    async fn get_participant_detail(
        &self,
        match_id: &str,
        puuid: &str,
    ) -> Result<Option<ParticipantDetail>, AppError> {
        let detail = sqlx::query_as::<_, ParticipantDetail>(
            r#"
            SELECT mp.kills, mp.deaths, mp.assists, mp.champion, mp.position,
                   mp.minions_killed, mp.gold_earned, mp.damage_to_champions,
                   m.game_end_local, mp.win, m.early_surrender
            FROM match_players mp
            INNER JOIN matches m ON m.match_id = mp.match_id
            WHERE mp.match_id = ? AND mp.puuid = ?
            "#,
        )
        .bind(match_id)
        .bind(puuid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(detail)
    }
}
