//! Shared state handed to every request handler.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::LmsRepository;

/// Repository and configuration, injected through axum `State`.
///
/// Handlers keep nothing between requests; everything durable lives behind
/// the repository.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn LmsRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repo: Arc<dyn LmsRepository>, config: AppConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}
