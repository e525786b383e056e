//! # Query Engine
//!
//! Config-aware front for the functions in [`super::queries`]. Holds a
//! borrowed record slice plus a [`QueryConfig`] and applies the configured
//! tie-break, pass-success policy and rounding on every call.

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::queries::{self, PASS_EVENT, SHOT_EVENT};
use crate::config::QueryConfig;
use crate::error::Result;
use crate::models::EventRecord;

#[derive(Debug, Clone)]
pub struct QueryEngine<'a> {
    records: &'a [EventRecord],
    config: QueryConfig,
}

impl<'a> QueryEngine<'a> {
    pub fn new<R: AsRef<[EventRecord]> + ?Sized>(records: &'a R) -> Self {
        Self::with_config(records, QueryConfig::default())
    }

    pub fn with_config<R: AsRef<[EventRecord]> + ?Sized>(
        records: &'a R,
        config: QueryConfig,
    ) -> Self {
        Self {
            records: records.as_ref(),
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn records(&self) -> &'a [EventRecord] {
        self.records
    }

    pub fn unique_teams(&self) -> Result<FxHashSet<&'a str>> {
        let teams = queries::unique_teams(self.records)?;
        log::debug!("unique_teams: {} teams", teams.len());
        Ok(teams)
    }

    pub fn most_common_event_type(&self) -> Result<&'a str> {
        let event_type = queries::most_common_event_type_with(self.records, self.config.tie_break)?;
        log::debug!(
            "most_common_event_type ({:?}): {}",
            self.config.tie_break,
            event_type
        );
        Ok(event_type)
    }

    pub fn filter_by_team(&self, team_name: &str) -> Result<Vec<&'a EventRecord>> {
        let matched = queries::filter_by_team(self.records, team_name)?;
        log::debug!("filter_by_team '{}': {} records", team_name, matched.len());
        Ok(matched)
    }

    pub fn filter_by_team_and_event_type(
        &self,
        team_name: &str,
        event_type_name: &str,
    ) -> Result<Vec<&'a EventRecord>> {
        let matched =
            queries::filter_by_team_and_event_type(self.records, team_name, event_type_name)?;
        log::debug!(
            "filter_by_team_and_event_type '{}'/'{}': {} records",
            team_name,
            event_type_name,
            matched.len()
        );
        Ok(matched)
    }

    pub fn count_event_type_by_team(
        &self,
        team_name: &str,
        event_type_name: &str,
    ) -> Result<usize> {
        let count = queries::count_event_type_by_team(self.records, team_name, event_type_name)?;
        log::debug!(
            "count_event_type_by_team '{}'/'{}': {}",
            team_name,
            event_type_name,
            count
        );
        Ok(count)
    }

    pub fn average_pass_length_by_team(&self, team_name: &str) -> Result<f64> {
        let average = queries::average_pass_length_by_team_with(
            self.records,
            team_name,
            self.config.average_decimals,
        )?;
        log::debug!("average_pass_length_by_team '{}': {}", team_name, average);
        Ok(average)
    }

    pub fn filter_players_by_position(&self, position_name: &str) -> Result<FxHashSet<&'a str>> {
        let players = queries::filter_players_by_position(self.records, position_name)?;
        log::debug!(
            "filter_players_by_position '{}': {} players",
            position_name,
            players.len()
        );
        Ok(players)
    }

    pub fn count_successful_passes(&self) -> Result<usize> {
        let count = queries::count_successful_passes_with(self.records, self.config.pass_success)?;
        log::debug!(
            "count_successful_passes ({:?}): {}",
            self.config.pass_success,
            count
        );
        Ok(count)
    }

    pub fn filter_by_period(&self, period: &str) -> Result<Vec<&'a EventRecord>> {
        let matched = queries::filter_by_period(self.records, period)?;
        log::debug!("filter_by_period '{}': {} records", period, matched.len());
        Ok(matched)
    }

    pub fn count_shots_by_player(&self, player_name: &str) -> Result<usize> {
        let count = queries::count_shots_by_player(self.records, player_name)?;
        log::debug!("count_shots_by_player '{}': {}", player_name, count);
        Ok(count)
    }

    /// One-pass roll-up of a team's events.
    ///
    /// A column missing from one of the team's records is an error here just
    /// as it is in the individual queries.
    pub fn team_summary(&self, team_name: &str) -> Result<TeamSummary> {
        let mut summary = TeamSummary::new(team_name);
        let mut lengths = Vec::new();
        let mut shot_ids = FxHashSet::default();

        for record in self.records {
            if record.team_name()? != team_name {
                continue;
            }
            let event_type = record.event_type_name()?;
            summary.events += 1;

            match summary
                .event_counts
                .iter()
                .position(|(name, _)| name == event_type)
            {
                Some(idx) => summary.event_counts[idx].1 += 1,
                None => summary.event_counts.push((event_type.to_string(), 1)),
            }

            if event_type == PASS_EVENT {
                summary.passes += 1;
                lengths.push(record.pass_length()?);
                if queries::is_successful(record, self.config.pass_success)? {
                    summary.successful_passes += 1;
                }
            } else if event_type == SHOT_EVENT {
                shot_ids.insert(record.id()?);
            }
        }

        summary.average_pass_length = queries::mean(&lengths)
            .map(|value| queries::round_to(value, self.config.average_decimals));
        summary.shots = shot_ids.len();

        log::debug!(
            "team_summary '{}': {} events, {} passes, {} shots",
            team_name,
            summary.events,
            summary.passes,
            summary.shots
        );
        Ok(summary)
    }
}

/// Per-team roll-up produced by [`QueryEngine::team_summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team_name: String,
    pub events: usize,
    /// `(event_type, count)` in first-seen order
    pub event_counts: Vec<(String, usize)>,
    pub passes: usize,
    pub successful_passes: usize,
    /// `None` when the team made no passes
    pub average_pass_length: Option<f64>,
    /// Distinct shot ids
    pub shots: usize,
}

impl TeamSummary {
    fn new(team_name: &str) -> Self {
        Self {
            team_name: team_name.to_string(),
            events: 0,
            event_counts: Vec::new(),
            passes: 0,
            successful_passes: 0,
            average_pass_length: None,
            shots: 0,
        }
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.event_counts
            .iter()
            .find(|(name, _)| name == event_type)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
