//! NHL Fantasy Hockey CLI Library
//!
//! A Rust library for fantasy hockey analytics over the public NHL API,
//! centered on reconstructing power-play intervals from play-by-play
//! event logs.
//!
//! ## Features
//!
//! - **Power-Play Reconstruction**: Replay penalty and goal events to recover
//!   every stretch of numerical advantage, split by strength (5v4, 5v3, 4v3)
//! - **Schedule Lookup**: List the league schedule for any date
//! - **Season Summaries**: Aggregate a team's opportunities, goals, and
//!   conversion rate over stored games
//! - **Bulk Updates**: Walk a date range and persist blocks for every
//!   final game
//! - **Response Caching**: Two-tier (memory + file) caching of NHL API
//!   payloads, plus a local SQLite database for reconstructed blocks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nhl_fantasy::{GameId, commands::pp_blocks::*};
//!
//! # async fn example() -> nhl_fantasy::Result<()> {
//! // Reconstruct one game's power-play blocks
//! let params = PpBlocksParams {
//!     game_id: GameId::new(2025020204),
//!     as_json: false,
//!     refresh: false,
//!     debug: false,
//! };
//!
//! handle_pp_blocks(params).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod nhl;
pub mod storage;
pub mod util;

// Re-export commonly used types
pub use cli::types::{GameDate, GameId, PlayerId, Season, TeamAbbrev, TeamId};
pub use error::{NhlError, Result};
pub use nhl::pp::{reconstruct_power_plays, BlockEnd, PowerPlayBlock, Strength};
