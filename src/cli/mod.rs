//! CLI argument definitions and parsing.

pub mod types;

use clap::{Parser, Subcommand};
use types::{GameDate, GameId, Season, TeamAbbrev};

/// Top-level CLI for NHL fantasy analytics utilities.
#[derive(Debug, Parser)]
#[clap(name = "nhl-fantasy", about = "Fantasy hockey analytics over the NHL API")]
pub struct Nhl {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and analyze NHL data
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Reconstruct power-play blocks for one game.
    ///
    /// Replays the game's play-by-play event log to infer when each team
    /// held a numerical advantage, then stores and prints the blocks.
    PpBlocks {
        /// NHL game ID, e.g. 2025020204
        #[clap(long, short)]
        game_id: GameId,

        /// Emit JSON instead of the human-readable listing.
        #[clap(long, short)]
        json: bool,

        /// Skip caches and re-fetch the play-by-play feed.
        #[clap(long, short)]
        refresh: bool,

        /// Print the raw play-by-play payload for debugging.
        #[clap(long)]
        debug: bool,
    },

    /// List the league schedule for one day.
    Schedule {
        /// Date in YYYY-MM-DD form.
        #[clap(long, short)]
        date: GameDate,

        /// Emit JSON instead of the human-readable listing.
        #[clap(long, short)]
        json: bool,

        /// Skip caches and re-fetch the schedule feed.
        #[clap(long, short)]
        refresh: bool,
    },

    /// Summarize a team's stored power-play blocks.
    TeamPpSummary {
        /// Team abbreviation, e.g. TOR
        #[clap(long, short)]
        team: TeamAbbrev,

        /// Season in YYYYYYYY form (defaults to the current season).
        #[clap(long, short)]
        season: Option<Season>,

        /// Emit JSON instead of the human-readable summary.
        #[clap(long, short)]
        json: bool,
    },

    /// Fetch every final game in a date range and persist its power-play blocks.
    UpdateAllData {
        /// First date to process (inclusive).
        #[clap(long)]
        start_date: GameDate,

        /// Last date to process (inclusive).
        #[clap(long)]
        end_date: GameDate,

        /// Show detailed progress information.
        #[clap(long, short)]
        verbose: bool,

        /// Skip caches and re-fetch every feed.
        #[clap(long, short)]
        refresh: bool,
    },
}
