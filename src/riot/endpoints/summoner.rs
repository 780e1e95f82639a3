use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner by display name
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_summoner_by_name(
        &self,
        platform: Platform,
        name: &str,
    ) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-name/{}",
            self.platform_url(platform),
            urlencoding::encode(name)
        );

        self.get(&url, &[]).await.map_err(|e| match e {
            AppError::RiotApi { status: 404, .. } => AppError::SummonerNotFound {
                name: name.to_string(),
            },
            e => e,
        })
    }

    /// Get summoner by PUUID
    pub async fn get_summoner_by_puuid(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url(platform),
            puuid
        );

        self.get(&url, &[]).await
    }
}
