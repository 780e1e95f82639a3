use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::AppError;
use crate::riot::{MATCH_IDS_PAGE_SIZE, MatchApi};

use super::period::TimeWindow;

/// Collect every ranked solo match id of `puuid` inside `window`.
///
/// The listing endpoint returns at most [`MATCH_IDS_PAGE_SIZE`] ids, most
/// recent first. While pages come back full, the end bound moves to the end
/// of the oldest match seen and the same start is queried again. Ids repeated
/// across page boundaries are kept; see [`dedup_preserving_order`].
pub async fn list_match_ids<A>(
    api: &A,
    puuid: &str,
    window: &TimeWindow,
) -> Result<Vec<String>, AppError>
where
    A: MatchApi + ?Sized,
{
    let start = window.start.timestamp();
    let mut end = window.end.timestamp();
    let mut ids = Vec::new();

    loop {
        let page = api.solo_ranked_match_ids(puuid, start, end).await?;
        let page_len = page.len();
        debug!(puuid, start, end, page_len, "📜 Match id page fetched");

        let oldest = page.last().cloned();
        ids.extend(page);

        if page_len < MATCH_IDS_PAGE_SIZE {
            break;
        }
        let Some(oldest) = oldest else { break };

        let next_end = api.game_end_timestamp(&oldest).await?;
        if next_end >= end {
            warn!(
                match_id = %oldest,
                end,
                next_end,
                "📜 ⚠️ End bound did not move, stopping pagination"
            );
            break;
        }
        end = next_end;
    }

    Ok(ids)
}

/// Drop repeated ids, keeping the first occurrence of each.
pub fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
