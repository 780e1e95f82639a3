use sqlx::FromRow;

/// One ranked game as stored in `matches`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRow {
    pub match_id: String,
    /// Regional cluster the match was fetched from.
    pub region: String,
    /// Milliseconds since UNIX epoch.
    pub game_start_ts: i64,
    pub game_mode: String,
    pub game_type: String,
    /// Seconds.
    pub duration: i64,
    /// Milliseconds since UNIX epoch.
    pub game_end_ts: i64,
    pub early_surrender: bool,
    pub queue_id: i32,
    pub platform_id: String,
    /// Game end in the configured timezone, `%Y-%m-%d %H:%M:%S`.
    pub game_end_local: String,
}

/// One player's line in a match, stored in `match_players`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRow {
    pub puuid: String,
    pub match_id: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub champion: String,
    pub gold_earned: i64,
    pub position: String,
    pub damage_to_champions: i64,
    pub minions_killed: i64,
    pub win: bool,
}

/// A match with all of its participants, persisted as one unit.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    pub info: MatchRow,
    pub participants: Vec<ParticipantRow>,
}

/// Per player detail read back for the detailed report.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ParticipantDetail {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub champion: String,
    pub position: String,
    pub minions_killed: i64,
    pub gold_earned: i64,
    pub damage_to_champions: i64,
    pub game_end_local: String,
    pub win: bool,
    pub early_surrender: bool,
}

impl ParticipantDetail {
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_flags(self.win, self.early_surrender)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Loss,
    /// Ended by early surrender, counts as neither.
    Remake,
}

impl MatchOutcome {
    pub fn from_flags(win: bool, early_surrender: bool) -> Self {
        match (early_surrender, win) {
            (true, _) => Self::Remake,
            (false, true) => Self::Win,
            (false, false) => Self::Loss,
        }
    }
}
