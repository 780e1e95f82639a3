use chrono::{TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{debug, info, warn};

use crate::db::{MatchRecord, MatchRow, MatchStore, ParticipantRow};
use crate::error::AppError;
use crate::riot::{MatchApi, MatchDto, Region};

const LOCAL_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What a sync pass did with the ids it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Already stored, not fetched.
    pub known: usize,
    pub saved: usize,
    /// Fetched but had no participants.
    pub skipped: Vec<String>,
}

/// Fetch and persist every match of `match_ids` the store doesn't have yet.
///
/// Matches whose detail comes back without participants are logged and
/// skipped. Any other failure stops the sync.
pub async fn sync_matches<A, S>(
    api: &A,
    store: &S,
    match_ids: &[String],
    region: Region,
    tz: Tz,
) -> Result<SyncSummary, AppError>
where
    A: MatchApi + ?Sized,
    S: MatchStore + ?Sized,
{
    let mut summary = SyncSummary::default();

    for match_id in match_ids {
        if store.match_exists(match_id).await? {
            summary.known += 1;
            continue;
        }

        let detail = api.match_detail(match_id).await?;
        let Some(record) = normalize(match_id, &detail, region, tz) else {
            warn!(match_id, "💾 ⚠️ Match has no participants, skipping");
            summary.skipped.push(match_id.clone());
            continue;
        };

        store.save_match(&record).await?;
        debug!(match_id, players = record.participants.len(), "💾 Match saved");
        summary.saved += 1;
    }

    info!(
        known = summary.known,
        saved = summary.saved,
        skipped = summary.skipped.len(),
        "💾 Match history synced"
    );
    Ok(summary)
}

/// Flatten a match payload into storable rows, `None` for an empty shell.
pub fn normalize(match_id: &str, dto: &MatchDto, region: Region, tz: Tz) -> Option<MatchRecord> {
    let info = &dto.info;
    let first = info.participants.first()?;

    let game_end_local = Utc
        .timestamp_millis_opt(info.game_end_timestamp)
        .single()
        .map(|end| end.with_timezone(&tz).format(LOCAL_TIME_FORMAT).to_string())
        .unwrap_or_default();

    let participants = info
        .participants
        .iter()
        .map(|p| ParticipantRow {
            puuid: p.puuid.clone(),
            match_id: match_id.to_string(),
            kills: p.kills,
            deaths: p.deaths,
            assists: p.assists,
            champion: p.champion_name.clone(),
            gold_earned: p.gold_earned,
            position: p.individual_position.clone(),
            damage_to_champions: p.total_damage_dealt_to_champions,
            minions_killed: p.total_minions_killed,
            win: p.win,
        })
        .collect();

    Some(MatchRecord {
        info: MatchRow {
            match_id: match_id.to_string(),
            region: region.as_str().to_string(),
            game_start_ts: info.game_start_timestamp,
            game_mode: info.game_mode.clone(),
            game_type: info.game_type.clone(),
            duration: info.game_duration,
            game_end_ts: info.game_end_timestamp,
            early_surrender: first.game_ended_in_early_surrender,
            queue_id: info.queue_id,
            platform_id: info.platform_id.clone(),
            game_end_local,
        },
        participants,
    })
}
