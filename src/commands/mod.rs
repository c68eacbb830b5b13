//! Command implementations for the NHL fantasy CLI

pub mod common;
pub mod pp_blocks;
pub mod schedule;
pub mod team_summary;
pub mod update_all_data;
