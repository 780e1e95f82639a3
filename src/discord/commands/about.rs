use crate::discord::bot::Context;
use crate::error::AppError;
use crate::report::PERIOD_VOCABULARY;

const LEGAL_BOILERPLATE: &str = "soloq-report isn't endorsed by Riot Games and doesn't reflect \
the views or opinions of Riot Games or anyone officially involved in producing or managing Riot \
Games properties. Riot Games, and all associated properties are trademarks or registered \
trademarks of Riot Games, Inc.";

/// List the periods `/check` understands
#[poise::command(slash_command)]
pub async fn show_period(ctx: Context<'_>) -> Result<(), AppError> {
    ctx.say(format!("```[{}]```", PERIOD_VOCABULARY.join(", ")))
        .await?;
    Ok(())
}

/// Show legal boilerplate
#[poise::command(slash_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), AppError> {
    ctx.say(LEGAL_BOILERPLATE).await?;
    Ok(())
}
