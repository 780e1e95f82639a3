mod migrations;
mod models;
mod repository;

pub use migrations::run_migrations;
pub use models::{MatchOutcome, MatchRecord, MatchRow, ParticipantDetail, ParticipantRow};
pub use repository::{MatchStore, Repository};
