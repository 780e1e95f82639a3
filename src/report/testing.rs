//! In-memory Riot API used by the report tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AppError;
use crate::riot::api::{LeagueApi, SummonerApi};
use crate::riot::types::{InfoDto, MetadataDto, ParticipantDto};
use crate::riot::{MatchApi, MatchDto, RankInfo, Summoner};

#[derive(Default)]
pub struct FakeRiot {
    pub summoner: Option<Summoner>,
    pub rank: Option<RankInfo>,
    pub rank_fails: bool,
    pages: Mutex<VecDeque<Vec<String>>>,
    end_times: Mutex<HashMap<String, i64>>,
    matches: Mutex<HashMap<String, MatchDto>>,
    listing_calls: Mutex<Vec<(i64, i64)>>,
    detail_calls: Mutex<Vec<String>>,
    listing_fails: Mutex<bool>,
}

fn upstream_error() -> AppError {
    AppError::RiotApi {
        status: 500,
        message: "Internal server error".into(),
    }
}

impl FakeRiot {
    pub fn with_summoner(name: &str, puuid: &str) -> Self {
        Self {
            summoner: Some(Summoner {
                name: name.into(),
                puuid: puuid.into(),
                summoner_id: format!("{puuid}-sid"),
            }),
            ..Self::default()
        }
    }

    pub fn push_pages<I: IntoIterator<Item = Vec<String>>>(&self, pages: I) {
        self.pages.lock().unwrap().extend(pages);
    }

    pub fn set_end_time(&self, match_id: &str, end_seconds: i64) {
        self.end_times
            .lock()
            .unwrap()
            .insert(match_id.into(), end_seconds);
    }

    pub fn add_match(&self, dto: MatchDto) {
        self.matches
            .lock()
            .unwrap()
            .insert(dto.metadata.match_id.clone(), dto);
    }

    pub fn fail_listing(&self) {
        *self.listing_fails.lock().unwrap() = true;
    }

    pub fn listing_calls(&self) -> Vec<(i64, i64)> {
        self.listing_calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SummonerApi for FakeRiot {
    async fn summoner_by_name(&self, name: &str) -> Result<Summoner, AppError> {
        self.summoner
            .clone()
            .ok_or_else(|| AppError::SummonerNotFound { name: name.into() })
    }
}

#[async_trait]
impl LeagueApi for FakeRiot {
    async fn solo_queue_rank(&self, _summoner_id: &str) -> Result<Option<RankInfo>, AppError> {
        if self.rank_fails {
            return Err(upstream_error());
        }
        Ok(self.rank.clone())
    }
}

#[async_trait]
impl MatchApi for FakeRiot {
    async fn solo_ranked_match_ids(
        &self,
        _puuid: &str,
        start_time: i64,
        end_time: i64,
    ) -> Result<Vec<String>, AppError> {
        if *self.listing_fails.lock().unwrap() {
            return Err(upstream_error());
        }
        self.listing_calls
            .lock()
            .unwrap()
            .push((start_time, end_time));
        Ok(self.pages.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn match_detail(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.detail_calls.lock().unwrap().push(match_id.into());
        self.matches
            .lock()
            .unwrap()
            .get(match_id)
            .cloned()
            .ok_or_else(|| AppError::RiotApi {
                status: 404,
                message: format!("no match {match_id}"),
            })
    }

    async fn game_end_timestamp(&self, match_id: &str) -> Result<i64, AppError> {
        let known = self.end_times.lock().unwrap().get(match_id).copied();
        match known {
            Some(end) => Ok(end),
            None => Ok(self.match_detail(match_id).await?.info.game_end_timestamp / 1000),
        }
    }
}

pub fn participant(puuid: &str, win: bool) -> ParticipantDto {
    ParticipantDto {
        puuid: puuid.into(),
        kills: 3,
        deaths: 0,
        assists: 2,
        champion_name: "Ahri".into(),
        gold_earned: 10_000,
        individual_position: "MIDDLE".into(),
        total_damage_dealt_to_champions: 25_000,
        total_minions_killed: 200,
        win,
        game_ended_in_early_surrender: false,
    }
}

/// A ranked solo match that ended at `end_ms` with the given players.
pub fn solo_match(match_id: &str, end_ms: i64, participants: Vec<ParticipantDto>) -> MatchDto {
    MatchDto {
        metadata: MetadataDto {
            match_id: match_id.into(),
        },
        info: InfoDto {
            game_start_timestamp: end_ms - 1_800_000,
            game_end_timestamp: end_ms,
            game_mode: "CLASSIC".into(),
            game_type: "MATCHED_GAME".into(),
            game_duration: 1800,
            queue_id: 420,
            platform_id: "KR".into(),
            participants,
        },
    }
}
