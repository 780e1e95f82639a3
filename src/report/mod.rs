//! The `/check` report pipeline: period resolution, match id pagination,
//! store sync, aggregation and formatting.

mod format;
mod paginator;
mod period;
mod pipeline;
mod reconciler;
mod stats;
#[cfg(test)]
mod testing;

pub use format::{TRANSPORT_MAX_LEN, split_for_transport};
pub use period::{PERIOD_VOCABULARY, Period};
pub use pipeline::{CheckRequest, ReportMode, run_check};
