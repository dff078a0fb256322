use std::future::Future;

use tracing::{debug, error, info, info_span, instrument};

use crate::error::{DigestError, Result};
use crate::model::game::Game;

/// Source of a day's game records.
pub trait GameFeed: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<Game>>> + Send;
}

/// Blocking HTTP client for the SportsData scores API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SportsDataClient;

impl SportsDataClient {
    pub fn new() -> Self {
        Self
    }

    /// Single GET, no retry. The body must be a JSON array of games.
    pub fn fetch_blocking(url: &str) -> Result<Vec<Game>> {
        let response_result = {
            let _span = info_span!("sportsdata_fetch", url = %redact_key(url)).entered();
            ureq::get(url).call()
        };
        let response = response_result.map_err(|e| {
            error!(error = %e, url = %redact_key(url), "Request to game data API failed");
            DigestError::Transport(e.to_string())
        })?;
        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read game data response body");
            DigestError::Transport(e.to_string())
        })?;
        let games = Self::parse_games(&body)?;
        info!(games = games.len(), "Fetched game data");
        Ok(games)
    }

    #[instrument(level = "info", skip(body), fields(bytes = body.len()))]
    pub fn parse_games(body: &str) -> Result<Vec<Game>> {
        match serde_json::from_str::<Vec<Game>>(body) {
            Ok(games) => {
                for game in &games {
                    debug!(game_id = ?game.game_id, status = ?game.status, "Parsed game");
                }
                Ok(games)
            }
            Err(e) => {
                error!(error = %e, "Failed to parse game data");
                Err(DigestError::Parse(e))
            }
        }
    }
}

impl GameFeed for SportsDataClient {
    async fn fetch(&self, url: &str) -> Result<Vec<Game>> {
        let url = url.to_string();
        match tokio::task::spawn_blocking(move || Self::fetch_blocking(&url)).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "Game data fetch task failed");
                Err(DigestError::Unexpected(format!("game data fetch task failed: {}", e)))
            }
        }
    }
}

/// Hide the `key` query parameter so the API key never reaches the logs.
pub fn redact_key(url: &str) -> String {
    match url.split_once('?') {
        Some((base, query)) => {
            let query = query
                .split('&')
                .map(|pair| if pair.starts_with("key=") { "key=REDACTED" } else { pair })
                .collect::<Vec<&str>>()
                .join("&");
            format!("{}?{}", base, query)
        }
        None => url.to_string(),
    }
}
