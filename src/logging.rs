//! Tracing subscriber setup used by the application.

use std::env;

use tracing_subscriber::{EnvFilter, fmt::time::ChronoLocal};

/// Install the global subscriber.
///
/// `RUST_LOG` drives the filter (`info` when unset), `LOG_FORMAT=json`
/// switches to one JSON object per line.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let timer = ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string());

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(timer)
        .with_target(false)
        .with_level(true);

    if env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.with_ansi(true).init();
    }

    tracing::info!("logger initialized");
}
