use std::fmt::Write;

use crate::riot::RankInfo;

use super::stats::{Bucket, DetailedStats, GameLine, PeriodStats, format_ratio};
use crate::db::MatchOutcome;

/// Longest message chunk posted to Discord, leaving room for the code fence
/// under the 2000 character limit.
pub const TRANSPORT_MAX_LEN: usize = 1950;

/// Optional detailed block appended to a report.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailSection {
    Stats(DetailedStats),
    /// Building the block failed, the report still goes out with the reason.
    Unavailable(String),
}

/// Render the text report of one check.
pub fn format_report(
    period: &str,
    summoner_name: &str,
    rank: Option<&RankInfo>,
    period_stats: &PeriodStats,
    detail: Option<&DetailSection>,
) -> String {
    let (standing, season) = match rank {
        Some(rank) => (
            format!("{} {} {}", rank.tier, rank.division, rank.league_points),
            PeriodStats {
                wins: rank.wins,
                losses: rank.losses,
            },
        ),
        None => ("Unranked".to_string(), PeriodStats::default()),
    };

    let mut out = format!(
        "Player: {summoner_name}\n\
         \n\
         {standing}\n\
         \n\
         === Period Data ===\n\
         Period: {period}\n\
         Wins: {}\n\
         Losses: {}\n\
         Win rate: {}\n\
         \n\
         === Season Data ===\n\
         Total wins: {}\n\
         Total losses: {}\n\
         Total win rate: {}",
        period_stats.wins,
        period_stats.losses,
        period_stats.win_rate_label(),
        season.wins,
        season.losses,
        season.win_rate_label(),
    );

    match detail {
        Some(DetailSection::Stats(stats)) => push_details(&mut out, stats),
        Some(DetailSection::Unavailable(reason)) => {
            let _ = write!(out, "\n\nFailed to get detail: {reason}");
        }
        None => {}
    }
    out
}

fn push_details(out: &mut String, stats: &DetailedStats) {
    out.push_str("\n\n=== Details ===\n");
    for (index, game) in stats.games.iter().enumerate() {
        push_game(out, index + 1, game);
    }

    out.push_str("*** Position Data ***\n");
    for bucket in &stats.positions {
        push_bucket(out, bucket);
    }

    out.push_str("\n*** Champion Data ***\n");
    for bucket in &stats.champions {
        push_bucket(out, bucket);
    }

    let total = &stats.total;
    let _ = write!(
        out,
        "\n*** Total Data ***\n\
         Number of games: {}\n\
         KDA: {}/{}/{}, {}",
        total.games,
        total.kills,
        total.deaths,
        total.assists,
        format_ratio(total.kda_ratio()),
    );
}

fn push_game(out: &mut String, index: usize, game: &GameLine) {
    let result = match game.outcome {
        MatchOutcome::Win => "WIN ✅",
        MatchOutcome::Loss => "LOSE ❌",
        MatchOutcome::Remake => "REMAKE ⏸️",
    };
    let _ = write!(
        out,
        "Game {index}, {result}\n\
         End time: {}\n\
         Champion: {}\n\
         Position: {}\n\
         KDA: {}/{}/{}, {}\n\
         CS: {}\n\
         Gold earned: {}\n\
         Damage to champions: {}\n\
         Damage per gold: {}\n\n",
        game.end_time,
        game.champion,
        game.position,
        game.kills,
        game.deaths,
        game.assists,
        format_ratio(game.kda_ratio()),
        game.cs,
        game.gold,
        game.damage,
        format_ratio(game.damage_per_gold()),
    );
}

fn push_bucket(out: &mut String, bucket: &Bucket) {
    let _ = write!(
        out,
        "{}\n\
         Number of games: {}\n\
         Win rate: {}/{}, {:.0}%\n\
         KDA: {}/{}/{}, {}\n\n",
        bucket.name,
        bucket.games,
        bucket.wins,
        bucket.losses(),
        bucket.win_rate_percent(),
        bucket.kills,
        bucket.deaths,
        bucket.assists,
        format_ratio(bucket.kda_ratio()),
    );
}

/// Cut `text` into chunks of at most `max_len` characters.
///
/// Cuts fall on line boundaries, newlines stay with their line and the
/// chunks concatenate back to `text`. A single line longer than `max_len`
/// is cut at character boundaries.
pub fn split_for_transport(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if current_len + line_len > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_len {
            let mut chars = line.chars().peekable();
            while chars.peek().is_some() {
                let piece: String = chars.by_ref().take(max_len).collect();
                let piece_len = piece.chars().count();
                if piece_len == max_len {
                    chunks.push(piece);
                } else {
                    current = piece;
                    current_len = piece_len;
                }
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
