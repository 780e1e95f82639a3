//! Win/loss counting and the detailed per game, position and champion
//! rollups.

use std::collections::HashMap;

use crate::db::{MatchOutcome, MatchStore, ParticipantDetail};
use crate::error::AppError;

/// `individualPosition` of supports as the API reports it.
const UTILITY: &str = "UTILITY";

/// Wins and losses of a player over a set of matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodStats {
    pub wins: u32,
    pub losses: u32,
}

impl PeriodStats {
    pub fn win_rate_label(&self) -> String {
        floor_win_rate(self.wins, self.losses)
    }
}

/// Truncated percentage of games won, `"0%"` without games.
pub fn floor_win_rate(wins: u32, losses: u32) -> String {
    let games = u64::from(wins) + u64::from(losses);
    if games == 0 {
        return "0%".to_string();
    }
    format!("{}%", u64::from(wins) * 100 / games)
}

/// Round to `digits` decimals, ties to even.
pub fn round_half_even(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round_ties_even() / scale
}

/// Render a rounded ratio without trailing zeros: `5`, `2.5`, `2.33`.
pub fn format_ratio(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `(kills + assists) / deaths` to two decimals, plain `kills + assists`
/// when the player never died.
pub fn kda_ratio(kills: i64, deaths: i64, assists: i64) -> f64 {
    if deaths > 0 {
        round_half_even((kills + assists) as f64 / deaths as f64, 2)
    } else {
        (kills + assists) as f64
    }
}

pub fn damage_per_gold(damage: i64, gold: i64) -> f64 {
    if gold > 0 {
        round_half_even(damage as f64 / gold as f64, 2)
    } else {
        damage as f64
    }
}

fn display_position(position: &str) -> String {
    if position == UTILITY {
        "SUPPORT".to_string()
    } else {
        position.to_string()
    }
}

/// Count wins and losses of `puuid` across the stored `match_ids`.
///
/// Remakes and ids without a stored row for the player count as neither.
pub async fn count_outcomes<S>(
    store: &S,
    match_ids: &[String],
    puuid: &str,
) -> Result<PeriodStats, AppError>
where
    S: MatchStore + ?Sized,
{
    let mut stats = PeriodStats::default();
    for match_id in match_ids {
        match store.get_outcome(match_id, puuid).await? {
            Some(MatchOutcome::Win) => stats.wins += 1,
            Some(MatchOutcome::Loss) => stats.losses += 1,
            Some(MatchOutcome::Remake) | None => {}
        }
    }
    Ok(stats)
}

/// One game of the detailed listing.
#[derive(Debug, Clone, PartialEq)]
pub struct GameLine {
    pub outcome: MatchOutcome,
    pub end_time: String,
    pub champion: String,
    pub position: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub cs: i64,
    pub gold: i64,
    pub damage: i64,
}

impl GameLine {
    fn from_detail(detail: ParticipantDetail) -> Self {
        Self {
            outcome: detail.outcome(),
            end_time: detail.game_end_local,
            champion: detail.champion,
            position: display_position(&detail.position),
            kills: detail.kills,
            deaths: detail.deaths,
            assists: detail.assists,
            cs: detail.minions_killed,
            gold: detail.gold_earned,
            damage: detail.damage_to_champions,
        }
    }

    pub fn kda_ratio(&self) -> f64 {
        kda_ratio(self.kills, self.deaths, self.assists)
    }

    pub fn damage_per_gold(&self) -> f64 {
        damage_per_gold(self.damage, self.gold)
    }
}

/// Games and summed KDA under one grouping key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub name: String,
    pub games: u32,
    pub wins: u32,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
}

impl Bucket {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn add(&mut self, game: &GameLine) {
        self.games += 1;
        if game.outcome == MatchOutcome::Win {
            self.wins += 1;
        }
        self.kills += game.kills;
        self.deaths += game.deaths;
        self.assists += game.assists;
    }

    pub fn losses(&self) -> u32 {
        self.games - self.wins
    }

    /// `round_half_even(wins / games, 2) * 100`.
    pub fn win_rate_percent(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        round_half_even(f64::from(self.wins) / f64::from(self.games), 2) * 100.0
    }

    pub fn kda_ratio(&self) -> f64 {
        kda_ratio(self.kills, self.deaths, self.assists)
    }
}

/// Everything the detailed report block shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedStats {
    pub games: Vec<GameLine>,
    pub positions: Vec<Bucket>,
    pub champions: Vec<Bucket>,
    pub total: Bucket,
}

impl DetailedStats {
    /// Build the listing in `details` order. Remakes are listed but left out
    /// of every bucket.
    pub fn from_details<I>(details: I) -> Self
    where
        I: IntoIterator<Item = ParticipantDetail>,
    {
        let games: Vec<GameLine> = details.into_iter().map(GameLine::from_detail).collect();

        let mut positions: HashMap<String, Bucket> = HashMap::new();
        let mut champions: HashMap<String, Bucket> = HashMap::new();
        let mut total = Bucket::named("Total");

        for game in games.iter().filter(|g| g.outcome != MatchOutcome::Remake) {
            positions
                .entry(game.position.clone())
                .or_insert_with(|| Bucket::named(&game.position))
                .add(game);
            champions
                .entry(game.champion.clone())
                .or_insert_with(|| Bucket::named(&game.champion))
                .add(game);
            total.add(game);
        }

        Self {
            games,
            positions: sorted(positions),
            champions: sorted(champions),
            total,
        }
    }
}

/// Most played first, ties by name.
fn sorted(buckets: HashMap<String, Bucket>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = buckets.into_values().collect();
    buckets.sort_by(|a, b| b.games.cmp(&a.games).then_with(|| a.name.cmp(&b.name)));
    buckets
}

/// Read the stored lines of `puuid` for `match_ids` and roll them up.
/// Matches the player has no stored row for are left out.
pub async fn detailed_stats<S>(
    store: &S,
    match_ids: &[String],
    puuid: &str,
) -> Result<DetailedStats, AppError>
where
    S: MatchStore + ?Sized,
{
    let mut details = Vec::with_capacity(match_ids.len());
    for match_id in match_ids {
        if let Some(detail) = store.get_participant_detail(match_id, puuid).await? {
            details.push(detail);
        }
    }
    Ok(DetailedStats::from_details(details))
}
