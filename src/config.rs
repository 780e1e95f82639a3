use std::env;
use std::num::NonZeroU32;

use chrono_tz::Tz;

use crate::error::AppError;
use crate::report::Period;
use crate::riot::Platform;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub riot_api_key: String,
    pub database_url: String,
    /// Timezone periods are resolved in and game end times are shown in.
    pub timezone: Tz,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub defaults: CheckDefaults,
}

/// What `/check` falls back to for arguments left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckDefaults {
    pub summoner_name: Option<String>,
    pub platform: Option<Platform>,
    pub period: Period,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        const DEFAULT_RIOT_RATE_LIMIT_PER_SECOND: u32 = 20;

        let discord_token = env::var("DISCORD_TOKEN")
            .map_err(|_| AppError::Config("DISCORD_TOKEN must be set".into()))?;

        let riot_api_key = env::var("RIOT_API_KEY")
            .map_err(|_| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:soloq-report.db".into());

        let timezone = match env::var("TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| AppError::Config(format!("TIMEZONE: {e}")))?,
            Err(_) => Tz::UTC,
        };

        let riot_rate_limit_per_second = env::var("RIOT_RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|v| v.parse().ok())
            .and_then(NonZeroU32::new)
            .unwrap_or_else(|| {
                NonZeroU32::new(DEFAULT_RIOT_RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN)
            });

        let defaults = CheckDefaults::from_vars(
            env::var("DEFAULT_SUMMONER").ok(),
            env::var("DEFAULT_PLATFORM").ok(),
            env::var("DEFAULT_PERIOD").ok(),
        )?;

        Ok(Self {
            discord_token,
            riot_api_key,
            database_url,
            timezone,
            riot_rate_limit_per_second,
            defaults,
        })
    }
}

impl CheckDefaults {
    /// Build defaults from raw values, blank ones count as unset.
    pub fn from_vars(
        summoner_name: Option<String>,
        platform: Option<String>,
        period: Option<String>,
    ) -> Result<Self, AppError> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let platform = non_blank(platform)
            .map(|p| p.parse::<Platform>())
            .transpose()?;

        let period = match non_blank(period) {
            Some(token) => token
                .parse::<Period>()
                .map_err(|e| AppError::Config(format!("DEFAULT_PERIOD: {e}")))?,
            None => Period::default(),
        };

        Ok(Self {
            summoner_name: non_blank(summoner_name),
            platform,
            period,
        })
    }
}
