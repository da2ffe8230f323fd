//! HealthMate core: symptom-intake conversation state machines, fuzzy
//! condition matching, medication aggregation, doctor referral, and
//! AI-composed responses.
//!
//! The web layer, persistence, and authentication live outside this
//! crate; an embedder constructs a [`catalog::CatalogStore`], picks a
//! [`generation::TextGenerator`], and drives an [`engine::ChatEngine`]
//! one message at a time.

pub mod catalog;
pub mod composer;
pub mod config;
pub mod conversation;
pub mod engine;
pub mod extract;
pub mod generation;
pub mod matching;
pub mod medications;
pub mod models;
pub mod referral;

#[cfg(test)]
pub(crate) mod test_support;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for embedding binaries. RUST_LOG wins over the
/// crate default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
    tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
}
