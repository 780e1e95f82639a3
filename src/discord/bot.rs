use chrono_tz::Tz;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::config::CheckDefaults;
use crate::db::Repository;
use crate::error::AppError;
use crate::riot::RiotClient;

use super::commands;

/// Shared data accessible in all commands
#[derive(Debug)]
pub struct Data {
    pub db: Repository,
    pub riot: RiotClient,
    pub timezone: Tz,
    /// Replaced by `/set_default`, read by every `/check`.
    pub defaults: RwLock<CheckDefaults>,
}

impl Data {
    pub fn new(db: Repository, riot: RiotClient, timezone: Tz, defaults: CheckDefaults) -> Self {
        Self {
            db,
            riot,
            timezone,
            defaults: RwLock::new(defaults),
        }
    }
}

pub type Context<'a> = poise::Context<'a, Data, AppError>;

pub fn create_framework(data: Data) -> poise::Framework<Data, AppError> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::check(),
                commands::set_default(),
                commands::show_period(),
                commands::info(),
            ],
            on_error: |error| {
                Box::pin(async move {
                    handle_error(error).await;
                })
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!(
                    bot_name = %ready.user.name,
                    guild_count = ready.guilds.len(),
                    "🎮 Bot is ready"
                );
                Ok(data)
            })
        })
        .build()
}

async fn handle_error(error: poise::FrameworkError<'_, Data, AppError>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(
                error = ?error,
                command = ctx.command().name.as_str(),
                user_id = %ctx.author().id,
                "🎮 ❌ Command execution failed"
            );
            let _ = ctx.say(format!("Error: {error}")).await;
        }
        poise::FrameworkError::ArgumentParse { error, ctx, .. } => {
            warn!(
                error = %error,
                command = ctx.command().name.as_str(),
                "🎮 ⚠️ Invalid command argument"
            );
            let _ = ctx.say(format!("Invalid argument: {error}")).await;
        }
        other => {
            error!(error = ?other, "🎮 ❌ Unhandled framework error");
        }
    }
}
