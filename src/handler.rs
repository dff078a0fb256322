use chrono::{DateTime, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::config::{Environment, ProcessEnvironment, Settings};
use crate::digest::compose_digest;
use crate::error::{DigestError, Result};
use crate::secrets::{SecretResolver, SecretStore};
use crate::sns::Notifier;
use crate::sportsdata::GameFeed;

pub const SUCCESS_MESSAGE: &str = "Data processed and sent to SNS successfully";

/// Lambda response shape: a status code and a JSON-encoded body string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessBody {
    pub message: String,
    pub timestamp: String,
    pub games_processed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct DigestSummary {
    pub games_processed: usize,
    pub message_id: String,
}

/// The notification pipeline with its collaborators injected.
pub struct DigestJob<S, F, N, E = ProcessEnvironment> {
    pub settings: Settings,
    pub store: S,
    pub feed: F,
    pub notifier: N,
    pub env: E,
}

impl<S, F, N, E> DigestJob<S, F, N, E>
where
    S: SecretStore,
    F: GameFeed,
    N: Notifier,
    E: Environment,
{
    /// Resolve config, fetch the day's games, publish the digest. Stops at the first failure.
    pub async fn run(&self, now_utc: DateTime<Utc>) -> Result<DigestSummary> {
        let resolver = SecretResolver::new(&self.store, &self.env);
        let api_key = resolver.resolve(&self.settings.api_key).await?;
        let topic_arn = resolver.resolve(&self.settings.topic_arn).await?;

        let today = self.settings.report_date(now_utc);
        info!(date = %today, "Fetching games for date");

        let url = self.settings.games_url(today, &api_key);
        let games = self.feed.fetch(&url).await?;
        let digest = compose_digest(&games);

        let message_id = self
            .notifier
            .publish(&topic_arn, &digest, &self.settings.subject(today))
            .await?;

        Ok(DigestSummary { games_processed: games.len(), message_id })
    }

    /// Run the pipeline and turn the outcome into the Lambda response.
    pub async fn respond(&self, now_utc: DateTime<Utc>) -> Response {
        match self.run(now_utc).await {
            Ok(summary) => {
                info!(
                    games_processed = summary.games_processed,
                    message_id = %summary.message_id,
                    "Digest sent"
                );
                let body = SuccessBody {
                    message: SUCCESS_MESSAGE.to_string(),
                    timestamp: now_utc.to_rfc3339(),
                    games_processed: summary.games_processed,
                };
                Response { status_code: 200, body: encode_body(&body) }
            }
            Err(e) => failure_response(&e),
        }
    }
}

pub fn failure_response(e: &DigestError) -> Response {
    let message = if e.is_service_error() {
        format!("AWS Service Error: {}", e)
    } else {
        format!("Unexpected error: {}", e)
    };
    error!(kind = ?e.kind(), error = %message, "Digest run failed");
    Response { status_code: 500, body: encode_body(&ErrorBody { error: message }) }
}

fn encode_body<T: Serialize>(body: &T) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string())
}

/// Lambda entry point. The scheduled event payload is not used.
#[instrument(skip(job, _event))]
pub async fn handler<S, F, N, E>(
    job: &DigestJob<S, F, N, E>,
    _event: LambdaEvent<serde_json::Value>,
) -> std::result::Result<Response, Error>
where
    S: SecretStore,
    F: GameFeed,
    N: Notifier,
    E: Environment,
{
    Ok(job.respond(Utc::now()).await)
}
