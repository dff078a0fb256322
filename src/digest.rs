use std::fmt::Display;

use crate::model::game::{Game, GameStatus};

pub const NO_GAMES_MESSAGE: &str = "No games available for today.";
pub const GAME_SEPARATOR: &str = "\n---\n";

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

fn or_unknown(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(UNKNOWN)
}

fn or_na<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Render one game as a multi-line text block. Each line ends with `\n`.
///
/// Text fields fall back to `Unknown`; scores and the last play fall back to `N/A`.
pub fn format_game(game: &Game) -> String {
    let status = or_unknown(&game.status);
    let away_team = or_unknown(&game.away_team);
    let home_team = or_unknown(&game.home_team);
    let score = format!("{}-{}", or_na(&game.away_team_score), or_na(&game.home_team_score));
    let start_time = or_unknown(&game.date_time);
    let channel = or_unknown(&game.channel);

    match game.status() {
        GameStatus::Final => {
            let quarter_scores = game
                .quarters()
                .iter()
                .map(|q| {
                    format!("Q{}: {}-{}", q.number, or_na(&q.away_score), or_na(&q.home_score))
                })
                .collect::<Vec<String>>()
                .join(", ");
            format!(
                "Game Status: {}\n{} vs {}\nFinal Score: {}\nStart Time: {}\nChannel: {}\n\
                 Quarter Scores: {}\n",
                status, away_team, home_team, score, start_time, channel, quarter_scores
            )
        }
        GameStatus::InProgress => {
            let last_play = game.last_play.as_deref().unwrap_or(NOT_AVAILABLE);
            format!(
                "Game Status: {}\n{} vs {}\nCurrent Score: {}\nLast Play: {}\nChannel: {}\n",
                status, away_team, home_team, score, last_play, channel
            )
        }
        GameStatus::Scheduled => format!(
            "Game Status: {}\n{} vs {}\nStart Time: {}\nChannel: {}\n",
            status, away_team, home_team, start_time, channel
        ),
        GameStatus::Other => format!(
            "Game Status: {}\n{} vs {}\nDetails are unavailable at the moment.\n",
            status, away_team, home_team
        ),
    }
}

/// Join every formatted game into the notification body.
pub fn compose_digest(games: &[Game]) -> String {
    if games.is_empty() {
        return NO_GAMES_MESSAGE.to_string();
    }
    games.iter().map(format_game).collect::<Vec<String>>().join(GAME_SEPARATOR)
}
