//! Signup service for flight price alerts and newsletter subscriptions.
//!
//! Every accepted signup becomes a profile in a third-party marketing platform,
//! enriched with derived destination tags, attached to a list and followed by
//! one or two tracking events.

use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

mod app;
pub mod config;
pub mod enrichment;
mod error;
pub mod marketing_client;
pub mod signup;
pub mod web;

pub use app::{App, AppState, InternalState};
pub use error::{Error, Result};
pub use marketing_client::MarketingClient;
pub use web::serve;

/// Compact, time-less console output for local development.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .compact()
        .init();
}

pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
