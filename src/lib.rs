pub mod api; // HTTP routes over the case pipeline
pub mod config;
pub mod db;
pub mod models;
pub mod pipeline; // Summary → history → similarity → tips

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use db::{DatabaseError, SqliteCaseRepository};
use pipeline::llm::{GeminiClient, LlmError};
use pipeline::CasePipeline;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Generative model client error: {0}")]
    Llm(#[from] LlmError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Install the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Wire the production adapters: Gemini for the model, SQLite for history.
pub fn build_pipeline(config: &AppConfig) -> Result<CasePipeline, StartupError> {
    let repo = SqliteCaseRepository::open(&config.db_path)?;
    let llm = GeminiClient::new(&config.gemini)?;
    tracing::info!(
        db = %config.db_path.display(),
        model = %config.gemini.model,
        "Pipeline ready"
    );
    Ok(CasePipeline::new(Arc::new(llm), Arc::new(repo)))
}

/// Load configuration, build the pipeline and serve until Ctrl-C.
///
/// Must be called outside any async runtime: the Gemini client is blocking
/// and is created and dropped here, not on a runtime thread.
pub fn run() -> Result<(), StartupError> {
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = AppConfig::from_env()?;
    let pipeline = Arc::new(build_pipeline(&config)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(api::serve(config.bind, pipeline.clone()))?;
    drop(runtime);

    drop(pipeline);
    Ok(())
}
