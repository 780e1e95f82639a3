use std::{fmt, num::NonZeroU32, sync::Arc, time::Duration};

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{trace, warn};

use crate::error::AppError;

use super::region::{Platform, Region};

/// Pause between two attempts of a request answered with 429.
const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(1);

/// Riot API client shared by every command.
///
/// Cloning is cheap: the HTTP pool and the rate limiter are shared.
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    limiter: Arc<DefaultDirectRateLimiter>,
    /// Riot API Key
    key: String,
    /// Replaces every routing host, used to point the client at a mock server.
    base_url: Option<String>,
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RiotClient {
    pub fn new(key: String, requests_per_second: NonZeroU32) -> Self {
        let quota = Quota::per_second(requests_per_second);

        Self {
            http: reqwest::Client::new(),
            limiter: Arc::new(RateLimiter::direct(quota)),
            key,
            base_url: None,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(key: &str, base_url: String) -> Self {
        let mut client = Self::new(key.to_string(), NonZeroU32::MIN.saturating_add(99));
        client.base_url = Some(base_url);
        client
    }

    pub(crate) fn platform_url(&self, platform: Platform) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| platform.base_url())
    }

    pub(crate) fn region_url(&self, region: Region) -> String {
        self.base_url.clone().unwrap_or_else(|| region.base_url())
    }

    /// GET a Riot endpoint and decode its JSON body.
    ///
    /// A 429 answer is retried after [`RATE_LIMIT_BACKOFF`] for as long as the
    /// API keeps answering it; any other non-200 status fails.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        loop {
            self.limiter.until_ready().await;
            trace!(url, "🛰️ GET");

            let res = self
                .http
                .get(url)
                .header("X-Riot-Token", &self.key)
                .query(query)
                .send()
                .await?;

            match res.status() {
                StatusCode::OK => return Ok(res.json().await?),
                StatusCode::TOO_MANY_REQUESTS => {
                    warn!(url, "🛰️ ⚠️ Rate limited, retrying");
                    tokio::time::sleep(RATE_LIMIT_BACKOFF).await;
                }
                status => {
                    let message = res.text().await.unwrap_or_default();
                    return Err(AppError::RiotApi {
                        status: status.as_u16(),
                        message,
                    });
                }
            }
        }
    }
}
