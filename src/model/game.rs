use serde::Deserialize;

use crate::model::quarter::Quarter;

/// One game as returned by the SportsData "games by date" endpoint.
/// Fields the API omits or sends as `null` are `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    #[serde(rename = "GameID")]
    pub game_id: Option<i64>,
    pub status: Option<String>,
    pub away_team: Option<String>,
    pub home_team: Option<String>,
    pub away_team_score: Option<serde_json::Number>,
    pub home_team_score: Option<serde_json::Number>,
    pub date_time: Option<String>,
    pub channel: Option<String>,
    pub last_play: Option<String>,
    pub quarters: Option<Vec<Quarter>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Final,
    InProgress,
    Scheduled,
    Other,
}

impl Game {
    pub fn status(&self) -> GameStatus {
        match self.status.as_deref() {
            Some("Final") => GameStatus::Final,
            Some("InProgress") => GameStatus::InProgress,
            Some("Scheduled") => GameStatus::Scheduled,
            _ => GameStatus::Other,
        }
    }

    pub fn quarters(&self) -> &[Quarter] {
        self.quarters.as_deref().unwrap_or(&[])
    }
}
