//! Schedule listing for one day.

use reqwest::Client;

use crate::{
    nhl::types::{Schedule, ScheduleGame, TeamInfo},
    GameDate, Result,
};

use super::common::fetch_schedule_with_message;

/// Configuration parameters for the schedule command
#[derive(Debug)]
pub struct ScheduleParams {
    pub date: GameDate,
    pub as_json: bool,
    pub refresh: bool,
}

fn label(team: &TeamInfo) -> String {
    team.abbrev
        .clone()
        .unwrap_or_else(|| team.id.to_string())
}

/// List the games scheduled on one date.
///
/// The upstream feed returns a whole week; only games on the requested
/// date are shown.
pub async fn handle_schedule(params: ScheduleParams) -> Result<()> {
    let verbose = !params.as_json;
    let client = Client::new();

    let payload =
        fetch_schedule_with_message(&client, &params.date, params.refresh, verbose).await?;
    let schedule: Schedule = serde_json::from_value(payload)?;

    let games: Vec<&ScheduleGame> = schedule.games_on(params.date.as_str()).collect();

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&games)?);
        return Ok(());
    }

    if games.is_empty() {
        println!("No games on {}.", params.date);
        return Ok(());
    }

    println!("\nGames on {}:", params.date);
    for game in games {
        println!(
            "  {}  {:>4} @ {:<4} [{}]",
            game.id,
            label(&game.away_team),
            label(&game.home_team),
            game.game_state.as_deref().unwrap_or("?"),
        );
    }

    Ok(())
}
