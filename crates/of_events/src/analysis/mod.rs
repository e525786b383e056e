//! # Analysis Module
//!
//! Queries over an event slice.
//!
//! ## Submodules
//!
//! - `queries` - stateless filter/count/average functions
//! - `tally` - single-pass grouped counters
//! - `engine` - config-aware query front and per-team summaries

pub mod engine;
pub mod queries;
pub mod tally;

pub use engine::{QueryEngine, TeamSummary};
pub use queries::{
    average_pass_length_by_team, average_pass_length_by_team_with, count_event_type_by_team,
    count_shots_by_player, count_successful_passes, count_successful_passes_with,
    filter_by_period, filter_by_team, filter_by_team_and_event_type, filter_players_by_position,
    most_common_event_type, most_common_event_type_with, unique_teams, PASS_EVENT, SHOT_EVENT,
};
pub use tally::{EventTypeTally, TeamEventTally};
