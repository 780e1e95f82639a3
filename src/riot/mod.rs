pub mod api;
pub mod client;
mod endpoints;
pub mod region;
pub mod types;

pub use api::{LolApiFull, MatchApi, RoutedClient};
pub use client::RiotClient;
pub use endpoints::match_v5::MATCH_IDS_PAGE_SIZE;
pub use region::{Platform, Region};
pub use types::{MatchDto, RankInfo, Summoner};
