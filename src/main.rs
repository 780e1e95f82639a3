use std::str::FromStr;

use poise::serenity_prelude as serenity;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

mod config;
mod db;
mod discord;
mod error;
mod logging;
mod report;
mod riot;

use config::Config;
use db::{Repository, run_migrations};
use discord::{Data, create_framework};
use error::AppError;
use riot::RiotClient;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    logging::init();

    let config = Config::from_env()?;
    info!(
        timezone = %config.timezone,
        rate_limit = config.riot_rate_limit_per_second.get(),
        "🐙 Starting soloq-report"
    );

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    run_migrations(&pool).await?;

    let riot = RiotClient::new(
        config.riot_api_key.clone(),
        config.riot_rate_limit_per_second,
    );
    let data = Data::new(
        Repository::new(pool),
        riot,
        config.timezone,
        config.defaults.clone(),
    );

    let intents = serenity::GatewayIntents::non_privileged();
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(create_framework(data))
        .await?;

    info!("🌐 Connecting to Discord gateway");
    client.start().await?;

    Ok(())
}
