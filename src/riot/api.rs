//! Narrow views of the Riot API consumed by the report pipeline.
//!
//! [`RoutedClient`] implements them on top of [`RiotClient`] for one platform;
//! tests swap in fakes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::error::AppError;

use super::client::RiotClient;
use super::region::{Platform, Region};
use super::types::{MatchDto, RankInfo, Summoner};

#[async_trait]
pub trait SummonerApi: Send + Sync {
    /// Resolve a display name (or a `Name#TAG` Riot ID) into stable ids.
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, AppError>;
}

#[async_trait]
pub trait LeagueApi: Send + Sync {
    /// Solo/duo standing of a summoner, `None` when unranked.
    async fn solo_queue_rank(&self, summoner_id: &str) -> Result<Option<RankInfo>, AppError>;
}

#[async_trait]
pub trait MatchApi: Send + Sync {
    /// At most one page of ranked solo match ids between two UNIX timestamps
    /// (seconds), most recent first.
    async fn solo_ranked_match_ids(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError>;

    async fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError>;

    /// End of a match as a UNIX timestamp in seconds.
    async fn game_end_timestamp(&self, match_id: &str) -> Result<i64, AppError> {
        let detail = self.match_detail(match_id).await?;
        Ok(detail.info.game_end_timestamp / 1000)
    }
}

/// Everything a report needs from the Riot API.
pub trait LolApiFull: SummonerApi + LeagueApi + MatchApi {}

impl<T: SummonerApi + LeagueApi + MatchApi> LolApiFull for T {}

/// A [`RiotClient`] bound to the platform of the summoner being checked.
///
/// Details fetched to read a match end time are kept until the next
/// [`MatchApi::match_detail`] of the same id, so a page boundary match is
/// downloaded once.
#[derive(Debug, Clone)]
pub struct RoutedClient {
    client: RiotClient,
    platform: Platform,
    pending_details: Arc<Mutex<HashMap<String, MatchDto>>>,
}

impl RoutedClient {
    pub fn new(client: RiotClient, platform: Platform) -> Self {
        Self {
            client,
            platform,
            pending_details: Arc::default(),
        }
    }

    fn take_pending(&self, match_id: &str) -> Option<MatchDto> {
        self.pending_details
            .lock()
            .ok()
            .and_then(|mut pending| pending.remove(match_id))
    }

    fn region(&self) -> Region {
        self.platform.to_region()
    }
}

#[async_trait]
impl SummonerApi for RoutedClient {
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, AppError> {
        let (shown, summoner) = match name.split_once('#') {
            Some((game_name, tag_line)) => {
                let account = self
                    .client
                    .get_account_by_riot_id(self.region(), game_name, tag_line)
                    .await?;
                let summoner = self
                    .client
                    .get_summoner_by_puuid(self.platform, &account.puuid)
                    .await?;
                // Riot IDs are matched case insensitively, keep the canonical spelling
                let shown = match (account.game_name, account.tag_line) {
                    (Some(game_name), Some(tag_line)) => format!("{game_name}#{tag_line}"),
                    _ => name.to_string(),
                };
                (shown, summoner)
            }
            None => (
                name.to_string(),
                self.client.get_summoner_by_name(self.platform, name).await?,
            ),
        };
        debug!(name = %shown, puuid = %summoner.puuid, "🛰️ Summoner resolved");

        Ok(Summoner {
            name: shown,
            puuid: summoner.puuid,
            summoner_id: summoner.id,
        })
    }
}

#[async_trait]
impl LeagueApi for RoutedClient {
    async fn solo_queue_rank(&self, summoner_id: &str) -> Result<Option<RankInfo>, AppError> {
        let entries = self
            .client
            .get_league_entries_by_summoner(self.platform, summoner_id)
            .await?;

        Ok(entries
            .into_iter()
            .find(|entry| entry.is_solo_queue())
            .map(RankInfo::from))
    }
}

#[async_trait]
impl MatchApi for RoutedClient {
    async fn solo_ranked_match_ids(
        &self,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        self.client
            .get_solo_ranked_match_ids(self.region(), puuid, start_time, end_time)
            .await
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        if let Some(detail) = self.take_pending(match_id) {
            return Ok(detail);
        }
        self.client.get_match(self.region(), match_id).await
    }

    async fn game_end_timestamp(&self, match_id: &str) -> Result<i64, AppError> {
        let detail = self.match_detail(match_id).await?;
        let end = detail.info.game_end_timestamp / 1000;
        if let Ok(mut pending) = self.pending_details.lock() {
            pending.insert(match_id.to_string(), detail);
        }
        Ok(end)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn routed(server: &MockServer) -> RoutedClient {
        RoutedClient::new(
            RiotClient::with_base_url("RGAPI-TEST", server.base_url()),
            Platform::TW2,
        )
    }

    #[tokio::test]
    async fn summoner_by_name_uses_summoner_v4() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/summoner/v4/summoners/by-name/Faker");
                then.status(200)
                    .json_body(json!({ "id": "sid", "puuid": "pid", "name": "Faker" }));
            })
            .await;

        let summoner = routed(&server).summoner_by_name("Faker").await.unwrap();

        assert_eq!(
            summoner,
            Summoner {
                name: "Faker".into(),
                puuid: "pid".into(),
                summoner_id: "sid".into(),
            }
        );
    }

    #[tokio::test]
    async fn riot_id_goes_through_account_v1() {
        let server = MockServer::start_async().await;
        let account = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/riot/account/v1/accounts/by-riot-id/Faker/KR1");
                then.status(200)
                    .json_body(json!({ "puuid": "pid", "gameName": "Faker", "tagLine": "KR1" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/summoner/v4/summoners/by-puuid/pid");
                then.status(200).json_body(json!({ "id": "sid", "puuid": "pid" }));
            })
            .await;

        let summoner = routed(&server)
            .summoner_by_name("Faker#KR1")
            .await
            .unwrap();

        account.assert_async().await;
        assert_eq!(summoner.summoner_id, "sid");
    }

    #[tokio::test]
    async fn unknown_summoner_is_reported_by_name() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/summoner/v4/summoners/by-name/nobody");
                then.status(404);
            })
            .await;

        let res = routed(&server).summoner_by_name("nobody").await;

        assert!(matches!(res, Err(AppError::SummonerNotFound { ref name }) if name == "nobody"));
    }

    #[tokio::test]
    async fn solo_queue_rank_ignores_other_queues() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/league/v4/entries/by-summoner/sid");
                then.status(200).json_body(json!([
                    { "queueType": "RANKED_FLEX_SR", "tier": "GOLD", "rank": "I", "leaguePoints": 10, "wins": 1, "losses": 1 },
                    { "queueType": "RANKED_SOLO_5x5", "tier": "SILVER", "rank": "III", "leaguePoints": 42, "wins": 30, "losses": 28 }
                ]));
            })
            .await;

        let rank = routed(&server).solo_queue_rank("sid").await.unwrap().unwrap();

        assert_eq!(rank.tier, "SILVER");
        assert_eq!(rank.league_points, 42);
    }

    #[tokio::test]
    async fn boundary_match_is_downloaded_once() {
        let server = MockServer::start_async().await;
        let detail = server
            .mock_async(|when, then| {
                when.method(GET).path("/lol/match/v5/matches/TW2_7");
                then.status(200).json_body(json!({
                    "metadata": { "matchId": "TW2_7" },
                    "info": {
                        "gameEndTimestamp": 1_700_001_800_000_i64,
                        "participants": [{ "puuid": "pid", "win": true }]
                    }
                }));
            })
            .await;
        let api = routed(&server);

        let end = api.game_end_timestamp("TW2_7").await.unwrap();
        let first = api.match_detail("TW2_7").await.unwrap();
        let second = api.match_detail("TW2_7").await.unwrap();

        detail.assert_hits_async(2).await;
        assert_eq!(end, 1_700_001_800);
        assert_eq!(first.info.participants.len(), 1);
        assert_eq!(second.metadata.match_id, "TW2_7");
    }

    #[tokio::test]
    async fn riot_id_keeps_canonical_spelling() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/riot/account/v1/accounts/by-riot-id/faker/kr1");
                then.status(200)
                    .json_body(json!({ "puuid": "pid", "gameName": "Faker", "tagLine": "KR1" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/summoner/v4/summoners/by-puuid/pid");
                then.status(200).json_body(json!({ "id": "sid", "puuid": "pid" }));
            })
            .await;

        let summoner = routed(&server)
            .summoner_by_name("faker#kr1")
            .await
            .unwrap();

        assert_eq!(summoner.name, "Faker#KR1");
    }

    #[tokio::test]
    async fn unranked_summoner_has_no_rank() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/league/v4/entries/by-summoner/sid");
                then.status(200).json_body(json!([]));
            })
            .await;

        let rank = routed(&server).solo_queue_rank("sid").await.unwrap();

        assert!(rank.is_none());
    }
}
