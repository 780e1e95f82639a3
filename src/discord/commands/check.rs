use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::discord::bot::Context;
use crate::error::AppError;
use crate::report::{CheckRequest, ReportMode, TRANSPORT_MAX_LEN, run_check, split_for_transport};
use crate::riot::{Platform, RoutedClient};

/// Report a player's ranked solo queue games over a period
#[poise::command(slash_command)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id))]
pub async fn check(
    ctx: Context<'_>,
    #[description = "Summoner name or Riot ID (Name#TAG), default when omitted"]
    summoner_name: Option<String>,
    #[description = "Period, see /show_period"] period: Option<String>,
    #[description = "normal or detailed"] mode: Option<ReportMode>,
    #[description = "Server, default when omitted"] platform: Option<Platform>,
) -> Result<(), AppError> {
    let defaults = ctx.data().defaults.read().await.clone();

    let Some(summoner_name) = summoner_name.or(defaults.summoner_name) else {
        ctx.say("Please specify a summoner name or set a default one")
            .await?;
        return Ok(());
    };
    let Some(platform) = platform.or(defaults.platform) else {
        ctx.say("Please specify a platform or set a default one with /set_default")
            .await?;
        return Ok(());
    };
    let period = period.unwrap_or_else(|| defaults.period.to_string());
    let mode = mode.unwrap_or_default();

    ctx.say(format!(
        "Checking {summoner_name} in {} for {period}...",
        platform.display_name()
    ))
    .await?;

    let request = CheckRequest {
        summoner_name,
        period,
        mode,
    };
    let api = RoutedClient::new(ctx.data().riot.clone(), platform);
    let db = ctx.data().db.clone();
    let timezone = ctx.data().timezone;

    let outcome = tokio::spawn(async move {
        run_check(
            &api,
            &db,
            platform.to_region(),
            timezone,
            Utc::now(),
            &request,
        )
        .await
    })
    .await?;

    let text = match outcome {
        Ok(report) => {
            info!("📝 Check completed");
            report.message().to_string()
        }
        Err(e) => {
            warn!(error = %e, "📝 ⚠️ Check failed");
            e.to_string()
        }
    };

    for chunk in split_for_transport(&text, TRANSPORT_MAX_LEN) {
        ctx.say(format!("```{chunk}```")).await?;
    }

    Ok(())
}
