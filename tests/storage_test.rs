//! Integration tests for the storage layer through the public API

use nhl_fantasy::{
    storage::{GameRow, PpBlockRow, StatsDatabase},
    BlockEnd, GameId, Season, Strength, TeamId,
};
use tempfile::tempdir;

fn create_test_db() -> StatsDatabase {
    StatsDatabase::new_in_memory().unwrap()
}

fn sample_game(game_id: u32) -> GameRow {
    GameRow {
        game_id: GameId::new(game_id),
        season: Season::new(20252026),
        game_date: Some("2025-11-09".to_string()),
        game_type: 2,
        home_team_id: TeamId::new(10),
        home_abbrev: Some("TOR".to_string()),
        away_team_id: TeamId::new(1),
        away_abbrev: Some("NJD".to_string()),
    }
}

fn sample_block(game_id: u32, team_id: u32, start: u32, end: u32) -> PpBlockRow {
    PpBlockRow {
        game_id: GameId::new(game_id),
        team_id: TeamId::new(team_id),
        start_seconds: start,
        end_seconds: end,
        strength: Strength::FiveOnFour,
        goals_for: 0,
        ended_by: BlockEnd::Expired,
    }
}

#[test]
fn test_database_persists_to_disk() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("games.db");

    {
        let mut db = StatsDatabase::with_path(&db_path).unwrap();
        db.upsert_game(&sample_game(2025020204)).unwrap();
        db.replace_pp_blocks(
            GameId::new(2025020204),
            &[sample_block(2025020204, 10, 300, 420)],
        )
        .unwrap();
    }

    // Reopen and verify the data survived
    let db = StatsDatabase::with_path(&db_path).unwrap();
    let game = db.get_game(GameId::new(2025020204)).unwrap().unwrap();
    assert_eq!(game.home_abbrev.as_deref(), Some("TOR"));

    let blocks = db.get_pp_blocks(GameId::new(2025020204)).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].start_seconds, 300);
}

#[test]
fn test_blocks_ordered_by_start() {
    let mut db = create_test_db();
    db.upsert_game(&sample_game(2025020204)).unwrap();

    // Insert out of order
    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[
            sample_block(2025020204, 10, 2400, 2520),
            sample_block(2025020204, 1, 300, 420),
            sample_block(2025020204, 10, 1000, 1120),
        ],
    )
    .unwrap();

    let blocks = db.get_pp_blocks(GameId::new(2025020204)).unwrap();
    let starts: Vec<u32> = blocks.iter().map(|b| b.start_seconds).collect();
    assert_eq!(starts, vec![300, 1000, 2400]);
}

#[test]
fn test_summary_over_persisted_blocks() {
    let mut db = create_test_db();
    db.upsert_game(&sample_game(2025020204)).unwrap();
    db.upsert_game(&sample_game(2025020205)).unwrap();

    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[
            PpBlockRow {
                goals_for: 1,
                ended_by: BlockEnd::Goal,
                ..sample_block(2025020204, 10, 300, 360)
            },
            sample_block(2025020204, 10, 2000, 2120),
        ],
    )
    .unwrap();
    db.replace_pp_blocks(
        GameId::new(2025020205),
        &[sample_block(2025020205, 10, 500, 620)],
    )
    .unwrap();

    let summary = db
        .team_pp_summary(&"TOR".parse().unwrap(), Season::new(20252026))
        .unwrap()
        .unwrap();

    assert_eq!(summary.games, 2);
    assert_eq!(summary.opportunities, 3);
    assert_eq!(summary.goals, 1);
    assert_eq!(summary.total_pp_seconds, 60 + 120 + 120);
    assert!((summary.conversion_pct - 100.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_clear_all_data_through_public_api() {
    let mut db = create_test_db();
    db.upsert_game(&sample_game(2025020204)).unwrap();
    db.replace_pp_blocks(
        GameId::new(2025020204),
        &[sample_block(2025020204, 10, 300, 420)],
    )
    .unwrap();

    db.clear_all_data().unwrap();
    assert!(db.get_game(GameId::new(2025020204)).unwrap().is_none());
    assert!(db.get_pp_blocks(GameId::new(2025020204)).unwrap().is_empty());
}
