//! Quiz server binary.
//!
//! Binds a TCP listener and serves the line-oriented quiz protocol. The quiz
//! store is a JSON file (`QUIZ_DB`, default `quizzes.json` in the working
//! directory); host and port come from `QUIZ_HOST`/`QUIZ_PORT`.

use std::sync::Arc;

use anyhow::Result;

use quiz_server::server::{run_server, ServerConfig};
use quiz_server::store::{JsonStore, QuizStore};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quiz_server=info".parse()?),
        )
        .init();

    let config = ServerConfig::from_env();
    let db_path = std::env::var("QUIZ_DB").unwrap_or_else(|_| "quizzes.json".to_string());
    let store: Arc<dyn QuizStore> = Arc::new(JsonStore::open(db_path).await?);

    run_server(config, store, None).await
}
