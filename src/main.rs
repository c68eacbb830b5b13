//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use nhl_fantasy::{
    cli::{Commands, GetCmd, Nhl},
    commands::{
        pp_blocks::{handle_pp_blocks, PpBlocksParams},
        schedule::{handle_schedule, ScheduleParams},
        team_summary::{handle_team_summary, TeamSummaryParams},
        update_all_data::{handle_update_all_data, UpdateAllDataParams},
    },
    Result,
};

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    let app = Nhl::parse();

    match app.command {
        Commands::Get { cmd } => match cmd {
            GetCmd::PpBlocks {
                game_id,
                json,
                refresh,
                debug,
            } => {
                handle_pp_blocks(PpBlocksParams {
                    game_id,
                    as_json: json,
                    refresh,
                    debug,
                })
                .await?
            }

            GetCmd::Schedule {
                date,
                json,
                refresh,
            } => {
                handle_schedule(ScheduleParams {
                    date,
                    as_json: json,
                    refresh,
                })
                .await?
            }

            GetCmd::TeamPpSummary { team, season, json } => {
                handle_team_summary(TeamSummaryParams {
                    team,
                    season,
                    as_json: json,
                })
                .await?
            }

            GetCmd::UpdateAllData {
                start_date,
                end_date,
                verbose,
                refresh,
            } => {
                handle_update_all_data(UpdateAllDataParams {
                    start_date,
                    end_date,
                    verbose,
                    refresh,
                })
                .await?
            }
        },
    }

    Ok(())
}
