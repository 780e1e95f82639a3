use tracing::{info, instrument};

use crate::config::CheckDefaults;
use crate::discord::bot::Context;
use crate::error::AppError;
use crate::report::{PERIOD_VOCABULARY, Period};
use crate::riot::Platform;

/// Set the player, server and period `/check` uses by default
#[poise::command(slash_command)]
#[instrument(skip(ctx), fields(user_id = %ctx.author().id))]
pub async fn set_default(
    ctx: Context<'_>,
    #[description = "Summoner name or Riot ID (Name#TAG)"] summoner_name: String,
    #[description = "Server"] platform: Platform,
    #[description = "Period, see /show_period"] period: String,
) -> Result<(), AppError> {
    let Ok(period) = period.parse::<Period>() else {
        ctx.say(format!(
            "Incorrect period, available: [{}]",
            PERIOD_VOCABULARY.join(", ")
        ))
        .await?;
        return Ok(());
    };

    let reply = format!(
        "Default checking parameters updated: {summoner_name} in {} for {period}.",
        platform.display_name()
    );

    *ctx.data().defaults.write().await = CheckDefaults {
        summoner_name: Some(summoner_name),
        platform: Some(platform),
        period,
    };
    info!(%platform, %period, "⚙️ Check defaults updated");

    ctx.say(reply).await?;
    Ok(())
}
