//! Error types for the NHL fantasy analytics CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, NhlError>;

#[derive(Error, Debug)]
pub enum NhlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("Failed to parse numeric id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Invalid stored value: {value}")]
    InvalidValue { value: String },

    #[error("NHL API returned no data")]
    NoData,

    #[error("Invalid clock value: {value}")]
    InvalidClock { value: String },

    #[error("Invalid game date: {value} (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("Invalid team abbreviation: {value}")]
    InvalidTeam { value: String },

    #[error("Invalid season: {value} (expected YYYYYYYY, e.g. 20252026)")]
    InvalidSeason { value: String },

    #[error("Game not found: {game_id}")]
    GameNotFound { game_id: u32 },
}
