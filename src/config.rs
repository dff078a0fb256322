use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};

const GAMES_BY_DATE_URL: &str =
    "https://api.sportsdata.io/v3/nba/scores/json/GamesByDate/{date}?key={key}";

/// Where a configuration value may be found. Sources are tried in list order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    Environment(String),
    Parameter(String),
}

#[derive(Debug, Clone)]
pub struct SecretSpec {
    pub name: String,
    pub sources: Vec<SecretSource>,
}

impl SecretSpec {
    /// Environment variable first, then the Parameter Store path.
    pub fn env_then_parameter(name: &str, env_var: &str, parameter: &str) -> Self {
        Self {
            name: name.to_string(),
            sources: vec![
                SecretSource::Environment(env_var.to_string()),
                SecretSource::Parameter(parameter.to_string()),
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: SecretSpec,
    pub topic_arn: SecretSpec,
    /// Endpoint with `{date}` and `{key}` placeholders.
    pub games_url_template: String,
    /// Hours subtracted from UTC to get the reporting day. No DST adjustment.
    pub utc_offset_hours: i64,
    pub subject_prefix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: SecretSpec::env_then_parameter("api key", "NBA_API_KEY", "/nba/api-key"),
            topic_arn: SecretSpec::env_then_parameter(
                "topic arn",
                "SNS_TOPIC_ARN",
                "/nba/sns-topic-arn",
            ),
            games_url_template: GAMES_BY_DATE_URL.to_string(),
            utc_offset_hours: 6,
            subject_prefix: "NBA Game Updates".to_string(),
        }
    }
}

impl Settings {
    /// The calendar day games are reported for, as of `now_utc`.
    pub fn report_date(&self, now_utc: DateTime<Utc>) -> NaiveDate {
        (now_utc - TimeDelta::hours(self.utc_offset_hours)).date_naive()
    }

    pub fn games_url(&self, date: NaiveDate, api_key: &str) -> String {
        self.games_url_template
            .replace("{date}", &date.format("%Y-%m-%d").to_string())
            .replace("{key}", api_key)
    }

    pub fn subject(&self, date: NaiveDate) -> String {
        format!("{} - {}", self.subject_prefix, date.format("%Y-%m-%d"))
    }
}

/// Read access to environment variables.
pub trait Environment: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
