use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use poise::ChoiceParameter;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::db::MatchStore;
use crate::error::AppError;
use crate::riot::{LolApiFull, Region};

use super::format::{DetailSection, format_report};
use super::paginator::{dedup_preserving_order, list_match_ids};
use super::period::{PeriodError, resolve};
use super::reconciler::sync_matches;
use super::stats::{count_outcomes, detailed_stats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ChoiceParameter)]
pub enum ReportMode {
    #[default]
    #[name = "normal"]
    Normal,
    #[name = "detailed"]
    Detailed,
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Detailed => f.write_str("detailed"),
        }
    }
}

/// Pipeline step an upstream failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SummonerId,
    MatchIds,
    MatchDetails,
    WinsAndLosses,
    RankAndLp,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::SummonerId => "summoner id",
            Self::MatchIds => "match ids",
            Self::MatchDetails => "match details",
            Self::WinsAndLosses => "number of wins and losses",
            Self::RankAndLp => "rank and lp",
        })
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    #[error("{source} when getting {phase}")]
    Upstream { phase: Phase, source: AppError },

    #[error("Failed to collect database data, {0}")]
    Store(AppError),
}

fn upstream(phase: Phase) -> impl FnOnce(AppError) -> CheckError {
    move |source| CheckError::Upstream { phase, source }
}

/// One `/check` invocation with its defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub summoner_name: String,
    pub period: String,
    pub mode: ReportMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Summary(String),
    /// The player has no ranked solo game in the window.
    NoMatches,
}

impl Report {
    pub fn message(&self) -> &str {
        match self {
            Self::Summary(text) => text,
            Self::NoMatches => "No match is played in the time period",
        }
    }
}

/// Build the report of `request`.
///
/// Runs period resolution, match id listing, store sync, aggregation and
/// formatting one after the other, each step awaited before the next.
#[instrument(skip_all, fields(summoner = %request.summoner_name, period = %request.period, mode = %request.mode))]
pub async fn run_check<A, S>(
    api: &A,
    store: &S,
    region: Region,
    tz: Tz,
    now: DateTime<Utc>,
    request: &CheckRequest,
) -> Result<Report, CheckError>
where
    A: LolApiFull + ?Sized,
    S: MatchStore + ?Sized,
{
    let window = resolve(&request.period, now, tz)?;

    let summoner = api
        .summoner_by_name(&request.summoner_name)
        .await
        .map_err(upstream(Phase::SummonerId))?;

    if !store
        .summoner_exists(&summoner.puuid)
        .await
        .map_err(CheckError::Store)?
    {
        store
            .add_summoner(&summoner)
            .await
            .map_err(CheckError::Store)?;
        info!(puuid = %summoner.puuid, "📝 New summoner registered");
    }

    let match_ids = list_match_ids(api, &summoner.puuid, &window)
        .await
        .map_err(upstream(Phase::MatchIds))?;
    let match_ids = dedup_preserving_order(match_ids);
    if match_ids.is_empty() {
        info!("📝 No match in period");
        return Ok(Report::NoMatches);
    }

    sync_matches(api, store, &match_ids, region, tz)
        .await
        .map_err(upstream(Phase::MatchDetails))?;

    let period_stats = count_outcomes(store, &match_ids, &summoner.puuid)
        .await
        .map_err(upstream(Phase::WinsAndLosses))?;

    let rank = api
        .solo_queue_rank(&summoner.summoner_id)
        .await
        .map_err(upstream(Phase::RankAndLp))?;

    let detail = match request.mode {
        ReportMode::Normal => None,
        ReportMode::Detailed => Some(
            match detailed_stats(store, &match_ids, &summoner.puuid).await {
                Ok(stats) => DetailSection::Stats(stats),
                Err(e) => {
                    warn!(error = %e, "📝 ⚠️ Detailed block unavailable");
                    DetailSection::Unavailable(e.to_string())
                }
            },
        ),
    };

    info!(
        games = match_ids.len(),
        wins = period_stats.wins,
        losses = period_stats.losses,
        "📝 Report built"
    );
    Ok(Report::Summary(format_report(
        &request.period,
        &summoner.name,
        rank.as_ref(),
        &period_stats,
        detail.as_ref(),
    )))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::Asia::Seoul;

    use super::*;
    use crate::db::Repository;
    use crate::report::testing::{FakeRiot, participant, solo_match};
    use crate::riot::RankInfo;

    fn now() -> DateTime<Utc> {
        Seoul
            .with_ymd_and_hms(2024, 3, 13, 22, 0, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn request(period: &str, mode: ReportMode) -> CheckRequest {
        CheckRequest {
            summoner_name: "Faker".into(),
            period: period.into(),
            mode,
        }
    }

    fn faker_with_two_games() -> FakeRiot {
        let mut fake = FakeRiot::with_summoner("Faker", "faker-pid");
        fake.rank = Some(RankInfo {
            tier: "CHALLENGER".into(),
            division: "I".into(),
            league_points: 1337,
            wins: 200,
            losses: 100,
        });
        let end_ms = now().timestamp_millis() - 3_600_000;
        fake.add_match(solo_match(
            "KR_2",
            end_ms,
            vec![participant("faker-pid", true), participant("other", false)],
        ));
        fake.add_match(solo_match(
            "KR_1",
            end_ms - 3_600_000,
            vec![participant("faker-pid", false), participant("other", true)],
        ));
        fake.push_pages([vec!["KR_2".to_string(), "KR_1".to_string()]]);
        fake
    }

    #[tokio::test]
    async fn one_win_one_loss_today() {
        let fake = faker_with_two_games();
        let repo = Repository::in_memory().await;

        let report = run_check(
            &fake,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("today", ReportMode::Normal),
        )
        .await
        .unwrap();

        let text = report.message();
        assert!(text.contains("Player: Faker"));
        assert!(text.contains("Wins: 1"));
        assert!(text.contains("Losses: 1"));
        assert!(text.contains("Win rate: 50%"));
        assert!(text.contains("CHALLENGER I 1337"));
        assert!(text.contains("Total win rate: 66%"));
        assert!(repo.summoner_exists("faker-pid").await.unwrap());
    }

    #[tokio::test]
    async fn report_uses_the_resolved_riot_id() {
        let mut fake = faker_with_two_games();
        fake.summoner = Some(crate::riot::Summoner {
            name: "Faker#KR1".into(),
            puuid: "faker-pid".into(),
            summoner_id: "faker-sid".into(),
        });
        let repo = Repository::in_memory().await;
        let mut req = request("today", ReportMode::Normal);
        req.summoner_name = "faker#kr1".into();

        let report = run_check(&fake, &repo, Region::Asia, Seoul, now(), &req)
            .await
            .unwrap();

        assert!(report.message().starts_with("Player: Faker#KR1\n"));
    }

    #[tokio::test]
    async fn detailed_mode_appends_rollups() {
        let fake = faker_with_two_games();
        let repo = Repository::in_memory().await;

        let report = run_check(
            &fake,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("today", ReportMode::Detailed),
        )
        .await
        .unwrap();

        let text = report.message();
        assert!(text.contains("=== Details ===\nGame 1, WIN ✅\n"));
        assert!(text.contains("Game 2, LOSE ❌\n"));
        assert!(text.contains("MIDDLE\nNumber of games: 2\nWin rate: 1/1, 50%\n"));
    }

    #[tokio::test]
    async fn empty_period_is_not_an_error() {
        let fake = FakeRiot::with_summoner("Faker", "faker-pid");
        let repo = Repository::in_memory().await;

        let report = run_check(
            &fake,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("yesterday", ReportMode::Normal),
        )
        .await
        .unwrap();

        assert_eq!(report, Report::NoMatches);
        assert_eq!(report.message(), "No match is played in the time period");
    }

    #[tokio::test]
    async fn invalid_period_is_surfaced_verbatim() {
        let fake = FakeRiot::with_summoner("Faker", "faker-pid");
        let repo = Repository::in_memory().await;

        let err = run_check(
            &fake,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("last_0_days", ReportMode::Normal),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), PeriodError::NotEnoughDays.to_string());
        assert!(fake.listing_calls().is_empty());
    }

    #[tokio::test]
    async fn upstream_failures_carry_their_phase() {
        let repo = Repository::in_memory().await;

        let unknown = FakeRiot::default();
        let err = run_check(
            &unknown,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("today", ReportMode::Normal),
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Summoner not found: Faker when getting summoner id"
        );

        let listing_down = FakeRiot::with_summoner("Faker", "faker-pid");
        listing_down.fail_listing();
        let err = run_check(
            &listing_down,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("today", ReportMode::Normal),
        )
        .await
        .unwrap_err();
        assert!(err.to_string().ends_with("when getting match ids"));

        let mut rank_down = faker_with_two_games();
        rank_down.rank_fails = true;
        let err = run_check(
            &rank_down,
            &repo,
            Region::Asia,
            Seoul,
            now(),
            &request("today", ReportMode::Normal),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            CheckError::Upstream {
                phase: Phase::RankAndLp,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn matches_already_stored_are_not_fetched() {
        let fake = faker_with_two_games();
        let repo = Repository::in_memory().await;
        let req = request("today", ReportMode::Normal);

        run_check(&fake, &repo, Region::Asia, Seoul, now(), &req)
            .await
            .unwrap();
        fake.push_pages([vec!["KR_2".to_string(), "KR_1".to_string()]]);
        let again = run_check(&fake, &repo, Region::Asia, Seoul, now(), &req)
            .await
            .unwrap();

        assert!(again.message().contains("Wins: 1"));
        assert_eq!(fake.detail_calls().len(), 2);
    }
}
