use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Quarter {
    pub number: i64,
    pub away_score: Option<serde_json::Number>,
    pub home_score: Option<serde_json::Number>,
}
