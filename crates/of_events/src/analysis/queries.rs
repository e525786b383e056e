//! # Event Queries
//!
//! Stateless functions over a slice of [`EventRecord`]s. None of them mutate
//! their input; filters hand back borrowed records in source order.
//!
//! Predicates read their columns left to right and stop early, so a column is
//! only required on the records where it is actually consulted. A missing
//! column there is an error, never a default.

use rustc_hash::FxHashSet;

use super::tally::EventTypeTally;
use crate::config::{PassSuccessPolicy, TieBreak};
use crate::error::{EventError, Result};
use crate::models::EventRecord;

pub const PASS_EVENT: &str = "Pass";
pub const SHOT_EVENT: &str = "Shot";

/// Decimal places used by [`average_pass_length_by_team`]
pub const DEFAULT_AVERAGE_DECIMALS: u32 = 1;

/// Distinct `team_name` values.
pub fn unique_teams(records: &[EventRecord]) -> Result<FxHashSet<&str>> {
    records.iter().map(EventRecord::team_name).collect()
}

/// Most frequent `event_type_name`; ties go to the first type seen.
pub fn most_common_event_type(records: &[EventRecord]) -> Result<&str> {
    most_common_event_type_with(records, TieBreak::FirstSeen)
}

pub fn most_common_event_type_with(records: &[EventRecord], tie_break: TieBreak) -> Result<&str> {
    EventTypeTally::from_records(records)?
        .most_common(tie_break)
        .map(|(event_type, _)| event_type)
        .ok_or(EventError::NoData {
            query: "most common event type",
        })
}

/// Records whose `team_name` equals `team_name`.
pub fn filter_by_team<'a>(
    records: &'a [EventRecord],
    team_name: &str,
) -> Result<Vec<&'a EventRecord>> {
    let mut matched = Vec::new();
    for record in records {
        if record.team_name()? == team_name {
            matched.push(record);
        }
    }
    Ok(matched)
}

/// Records matching both `team_name` and `event_type_name`.
pub fn filter_by_team_and_event_type<'a>(
    records: &'a [EventRecord],
    team_name: &str,
    event_type_name: &str,
) -> Result<Vec<&'a EventRecord>> {
    let mut matched = Vec::new();
    for record in records {
        if is_team_event(record, team_name, event_type_name)? {
            matched.push(record);
        }
    }
    Ok(matched)
}

/// Number of records [`filter_by_team_and_event_type`] would return.
pub fn count_event_type_by_team(
    records: &[EventRecord],
    team_name: &str,
    event_type_name: &str,
) -> Result<usize> {
    Ok(filter_by_team_and_event_type(records, team_name, event_type_name)?.len())
}

/// Mean `pass_length` over the team's passes, to one decimal place.
///
/// # Errors
/// * [`EventError::NoData`] when the team has no passes
/// * [`EventError::MissingField`] when a matching pass has no `pass_length`
///   column
/// * [`EventError::Parse`] when a matching pass has a blank length
pub fn average_pass_length_by_team(records: &[EventRecord], team_name: &str) -> Result<f64> {
    average_pass_length_by_team_with(records, team_name, DEFAULT_AVERAGE_DECIMALS)
}

pub fn average_pass_length_by_team_with(
    records: &[EventRecord],
    team_name: &str,
    decimals: u32,
) -> Result<f64> {
    let passes = filter_by_team_and_event_type(records, team_name, PASS_EVENT)?;
    let lengths = passes
        .iter()
        .map(|record| record.pass_length())
        .collect::<Result<Vec<f64>>>()?;

    mean(&lengths)
        .map(|value| round_to(value, decimals))
        .ok_or(EventError::NoData {
            query: "average pass length",
        })
}

/// Distinct `formation_player_name` values at `position_name`.
///
/// Only `formation_position_name` is consulted. The other position columns
/// (`position_name`, `player_position_name`, `freeze_frame_position_name`)
/// describe different things and stay in [`EventRecord::extra`].
pub fn filter_players_by_position<'a>(
    records: &'a [EventRecord],
    position_name: &str,
) -> Result<FxHashSet<&'a str>> {
    let mut players = FxHashSet::default();
    for record in records {
        if record.formation_position_name()? == position_name {
            players.insert(record.formation_player_name()?);
        }
    }
    Ok(players)
}

/// Passes with an empty `outcome_name`.
///
/// Every recorded pass outcome describes an incomplete pass, so an empty one
/// is read as success. A pass that lost the ball without an outcome being
/// recorded is therefore counted too.
pub fn count_successful_passes(records: &[EventRecord]) -> Result<usize> {
    count_successful_passes_with(records, PassSuccessPolicy::EmptyOutcome)
}

pub fn count_successful_passes_with(
    records: &[EventRecord],
    policy: PassSuccessPolicy,
) -> Result<usize> {
    let mut count = 0;
    for record in records {
        if record.event_type_name()? == PASS_EVENT && is_successful(record, policy)? {
            count += 1;
        }
    }
    Ok(count)
}

/// Records whose `period` equals `period` exactly. `"1"` and `"01"` differ.
pub fn filter_by_period<'a>(
    records: &'a [EventRecord],
    period: &str,
) -> Result<Vec<&'a EventRecord>> {
    let mut matched = Vec::new();
    for record in records {
        if record.period()? == period {
            matched.push(record);
        }
    }
    Ok(matched)
}

/// Distinct shot ids taken by `player_name`.
///
/// Source data repeats a shot row once per freeze-frame entry, so rows are
/// deduplicated by `id`.
pub fn count_shots_by_player(records: &[EventRecord], player_name: &str) -> Result<usize> {
    let mut ids = FxHashSet::default();
    for record in records {
        if record.event_type_name()? == SHOT_EVENT && record.player_name()? == player_name {
            ids.insert(record.id()?);
        }
    }
    Ok(ids.len())
}

pub(crate) fn is_team_event(
    record: &EventRecord,
    team_name: &str,
    event_type_name: &str,
) -> Result<bool> {
    Ok(record.team_name()? == team_name && record.event_type_name()? == event_type_name)
}

pub(crate) fn is_successful(record: &EventRecord, policy: PassSuccessPolicy) -> Result<bool> {
    match policy {
        PassSuccessPolicy::EmptyOutcome => Ok(record.outcome_name()?.is_empty()),
        PassSuccessPolicy::AnyOutcome => Ok(true),
    }
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Round the exact binary value to `decimals` places, ties to even.
///
/// Goes through fixed-precision formatting: scaling first would turn
/// 12.3499.. (the double nearest 12.35) into an exact 123.5 and round it up.
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}
