use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Region;
use crate::riot::types::{MatchDto, SOLO_QUEUE_ID};

/// Max amount of ids Match-v5 returns in one call.
pub const MATCH_IDS_PAGE_SIZE: usize = 100;

impl RiotClient {
    /// Get ranked solo/duo match ids played between two UNIX timestamps (seconds),
    /// most recent first, at most [`MATCH_IDS_PAGE_SIZE`] of them.
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_solo_ranked_match_ids(
        &self,
        region: Region,
        puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids",
            self.region_url(region),
            puuid
        );
        let query = [
            ("queue", SOLO_QUEUE_ID.to_string()),
            ("type", "ranked".to_string()),
            ("startTime", start_time.to_string()),
            ("endTime", end_time.to_string()),
            ("count", MATCH_IDS_PAGE_SIZE.to_string()),
        ];

        self.get(&url, &query).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, region: Region, match_id: &str) -> Result<MatchDto, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.region_url(region),
            match_id
        );

        self.get(&url, &[]).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn match_ids_query_is_bounded_to_solo_queue() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/lol/match/v5/matches/by-puuid/abc/ids")
                    .query_param("queue", "420")
                    .query_param("type", "ranked")
                    .query_param("startTime", "1700000000")
                    .query_param("endTime", "1700086400")
                    .query_param("count", "100");
                then.status(200).json_body(json!(["TW2_2", "TW2_1"]));
            })
            .await;
        let client = RiotClient::with_base_url("RGAPI-TEST", server.base_url());

        let ids = client
            .get_solo_ranked_match_ids(Region::Sea, "abc", 1_700_000_000, 1_700_086_400)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(ids, vec!["TW2_2", "TW2_1"]);
    }
}
