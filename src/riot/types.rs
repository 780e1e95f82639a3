use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    /// Platform scoped summoner id, used by League-v4.
    pub id: String,
    pub puuid: String,
}

/// A player as resolved by the profile lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summoner {
    pub name: String,
    pub puuid: String,
    pub summoner_id: String,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
}

impl LeagueEntryDto {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == "RANKED_SOLO_5x5"
    }
}

/// Current solo/duo standing of a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankInfo {
    pub tier: String,
    pub division: String,
    pub league_points: i32,
    pub wins: u32,
    pub losses: u32,
}

impl From<LeagueEntryDto> for RankInfo {
    fn from(entry: LeagueEntryDto) -> Self {
        Self {
            tier: entry.tier,
            division: entry.rank,
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
        }
    }
}

// ============================================================================
// Match-v5
// ============================================================================

/// Queue id of ranked solo/duo.
pub const SOLO_QUEUE_ID: i32 = 420;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    #[serde(default)]
    pub metadata: MetadataDto,
    #[serde(default)]
    pub info: InfoDto,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataDto {
    pub match_id: String,
}

/// Some match ids come back as an empty shell, so every field falls back to
/// its default instead of failing the decode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfoDto {
    pub game_start_timestamp: i64,
    pub game_end_timestamp: i64,
    pub game_mode: String,
    pub game_type: String,
    pub game_duration: i64,
    pub queue_id: i32,
    pub platform_id: String,
    pub participants: Vec<ParticipantDto>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantDto {
    pub puuid: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub champion_name: String,
    pub gold_earned: i64,
    pub individual_position: String,
    pub total_damage_dealt_to_champions: i64,
    pub total_minions_killed: i64,
    pub win: bool,
    pub game_ended_in_early_surrender: bool,
}
