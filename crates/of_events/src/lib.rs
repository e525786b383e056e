//! # of_events - Football Event Queries
//!
//! Typed, in-memory event records (one per observed match event) and a fixed
//! set of analytical queries over them.
//!
//! ## Features
//! - Raw key-value rows converted once into [`EventRecord`]s
//! - Pure queries: unique teams, most common event type, team/event/period
//!   filters, counts, average pass length, distinct shots per player
//! - Missing columns, unparseable numbers and empty averages surface as
//!   [`EventError`]s; nothing is silently defaulted
//!
//! ## Example
//!
//! ```
//! use of_events::{average_pass_length_by_team, EventCollection, RawRecord};
//!
//! let raws: Vec<RawRecord> = serde_json::from_str(r#"[
//!     { "team_name": "A", "event_type_name": "Pass", "pass_length": "10.0" },
//!     { "team_name": "A", "event_type_name": "Pass", "pass_length": "15.0" }
//! ]"#).unwrap();
//! let events = EventCollection::from_raw_records(raws).unwrap();
//!
//! assert_eq!(average_pass_length_by_team(events.records(), "A").unwrap(), 12.5);
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod models;

pub use analysis::{
    average_pass_length_by_team, count_event_type_by_team, count_shots_by_player,
    count_successful_passes, filter_by_period, filter_by_team, filter_by_team_and_event_type,
    filter_players_by_position, most_common_event_type, unique_teams, EventTypeTally,
    QueryEngine, TeamEventTally, TeamSummary,
};
pub use config::{ConfigError, PassSuccessPolicy, QueryConfig, TieBreak};
pub use error::{EventError, Result};
pub use models::{EventCollection, EventField, EventRecord, RawRecord};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn load(value: serde_json::Value) -> EventCollection {
        let raws: Vec<RawRecord> = serde_json::from_value(value).unwrap();
        EventCollection::from_raw_records(raws).unwrap()
    }

    #[test]
    fn test_average_pass_length_example() {
        let events = load(json!([
            { "team_name": "A", "event_type_name": "Pass", "pass_length": "10.0" },
            { "team_name": "A", "event_type_name": "Pass", "pass_length": "15.0" },
        ]));
        assert_eq!(average_pass_length_by_team(events.records(), "A").unwrap(), 12.5);
        assert!(matches!(
            average_pass_length_by_team(events.records(), "B"),
            Err(EventError::NoData { .. })
        ));
    }

    #[test]
    fn test_duplicate_shot_rows_example() {
        let events = load(json!([
            { "id": "101", "event_type_name": "Shot", "player_name": "X" },
            { "id": "101", "event_type_name": "Shot", "player_name": "X" },
            { "id": "102", "event_type_name": "Shot", "player_name": "X" },
        ]));
        assert_eq!(count_shots_by_player(events.records(), "X").unwrap(), 2);
    }

    #[test]
    fn test_successful_passes_example() {
        let events = load(json!([
            { "event_type_name": "Pass", "outcome_name": "" },
            { "event_type_name": "Pass", "outcome_name": "Incomplete" },
        ]));
        assert_eq!(count_successful_passes(events.records()).unwrap(), 1);
    }

    #[test]
    fn test_collection_is_unchanged_by_queries() {
        let events = load(json!([
            { "id": "1", "team_name": "A", "event_type_name": "Pass", "pass_length": "5",
              "outcome_name": "", "period": "1" },
        ]));
        let before = events.clone();
        let engine = QueryEngine::new(&events);

        engine.filter_by_team("A").unwrap();
        engine.team_summary("A").unwrap();
        unique_teams(events.records()).unwrap();

        assert_eq!(events, before);
    }
}
