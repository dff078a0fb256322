#![recursion_limit = "256"]

use lambda_runtime::{service_fn, Error, LambdaEvent};
use tracing_subscriber::EnvFilter;

use nba_game_digest_lambda::config::{ProcessEnvironment, Settings};
use nba_game_digest_lambda::handler::{handler, DigestJob};
use nba_game_digest_lambda::secrets::ParameterStore;
use nba_game_digest_lambda::sns::SnsPublisher;
use nba_game_digest_lambda::sportsdata::SportsDataClient;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Structured JSON logs; CloudWatch supplies timestamps
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .try_init();

    let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let job = DigestJob {
        settings: Settings::default(),
        store: ParameterStore::new(aws_sdk_ssm::Client::new(&aws)),
        feed: SportsDataClient::new(),
        notifier: SnsPublisher::new(aws_sdk_sns::Client::new(&aws)),
        env: ProcessEnvironment,
    };

    let job = &job;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<serde_json::Value>| async move {
        handler(job, event).await
    }))
    .await
}
