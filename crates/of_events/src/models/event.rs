use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{EventError, Result};

/// One source row as handed over by whatever loaded the data.
pub type RawRecord = FxHashMap<String, String>;

/// Columns the queries read. Everything else lands in [`EventRecord::extra`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Id,
    TeamName,
    EventTypeName,
    PlayerName,
    PassLength,
    OutcomeName,
    Period,
    /// Authoritative position column for player/position queries.
    FormationPositionName,
    FormationPlayerName,
}

impl EventField {
    pub const ALL: [EventField; 9] = [
        EventField::Id,
        EventField::TeamName,
        EventField::EventTypeName,
        EventField::PlayerName,
        EventField::PassLength,
        EventField::OutcomeName,
        EventField::Period,
        EventField::FormationPositionName,
        EventField::FormationPlayerName,
    ];

    /// Column name in the source data
    pub fn as_str(&self) -> &'static str {
        match self {
            EventField::Id => "id",
            EventField::TeamName => "team_name",
            EventField::EventTypeName => "event_type_name",
            EventField::PlayerName => "player_name",
            EventField::PassLength => "pass_length",
            EventField::OutcomeName => "outcome_name",
            EventField::Period => "period",
            EventField::FormationPositionName => "formation_position_name",
            EventField::FormationPlayerName => "formation_player_name",
        }
    }

    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observed match event.
///
/// Known columns are typed; `None` means the column was absent from the raw
/// record, while an empty string is kept as `Some("")`. Accessors turn an
/// absent column into [`EventError::MissingField`] so callers never see a
/// silently defaulted value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based position in the source sequence
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_name: Option<String>,
    /// Source text of the cell. Non-blank text is checked to be a valid
    /// `f64` at load; a blank cell is kept and fails when read as a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pass_length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formation_position_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formation_player_name: Option<String>,
    /// Remaining columns, untouched
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl EventRecord {
    /// Empty record at `row`; fill the fields you need.
    pub fn new(row: usize) -> Self {
        Self {
            row,
            id: None,
            team_name: None,
            event_type_name: None,
            player_name: None,
            pass_length: None,
            outcome_name: None,
            period: None,
            formation_position_name: None,
            formation_player_name: None,
            extra: BTreeMap::new(),
        }
    }

    /// Convert a raw row into a typed record.
    ///
    /// A non-blank `pass_length` must parse as `f64` here. Blank cells load
    /// fine (most non-pass rows have one) and only fail once a query reads
    /// them as a number.
    pub fn from_raw(row: usize, raw: &RawRecord) -> Result<Self> {
        let mut record = Self::new(row);

        for (key, value) in raw {
            match EventField::from_column(key) {
                Some(field) => {
                    if field == EventField::PassLength && !value.trim().is_empty() {
                        parse_pass_length(row, value)?;
                    }
                    *record.text_slot_mut(field) = Some(value.clone());
                }
                None => {
                    record.extra.insert(key.clone(), value.clone());
                }
            }
        }

        log::trace!("converted event row {}", row);
        Ok(record)
    }

    fn text_slot(&self, field: EventField) -> Option<&String> {
        match field {
            EventField::Id => self.id.as_ref(),
            EventField::TeamName => self.team_name.as_ref(),
            EventField::EventTypeName => self.event_type_name.as_ref(),
            EventField::PlayerName => self.player_name.as_ref(),
            EventField::OutcomeName => self.outcome_name.as_ref(),
            EventField::Period => self.period.as_ref(),
            EventField::FormationPositionName => self.formation_position_name.as_ref(),
            EventField::FormationPlayerName => self.formation_player_name.as_ref(),
            EventField::PassLength => self.pass_length.as_ref(),
        }
    }

    fn text_slot_mut(&mut self, field: EventField) -> &mut Option<String> {
        match field {
            EventField::Id => &mut self.id,
            EventField::TeamName => &mut self.team_name,
            EventField::EventTypeName => &mut self.event_type_name,
            EventField::PlayerName => &mut self.player_name,
            EventField::OutcomeName => &mut self.outcome_name,
            EventField::Period => &mut self.period,
            EventField::FormationPositionName => &mut self.formation_position_name,
            EventField::FormationPlayerName => &mut self.formation_player_name,
            EventField::PassLength => &mut self.pass_length,
        }
    }

    /// Builder-style setter taking the column's source text.
    pub fn with(mut self, field: EventField, value: impl Into<String>) -> Self {
        *self.text_slot_mut(field) = Some(value.into());
        self
    }

    /// Whether the column was present in the source row.
    pub fn has(&self, field: EventField) -> bool {
        self.text_slot(field).is_some()
    }

    /// Source text of a known column, or a missing-field error.
    pub fn text(&self, field: EventField) -> Result<&str> {
        self.text_slot(field)
            .map(String::as_str)
            .ok_or(EventError::MissingField {
                field,
                row: self.row,
            })
    }

    pub fn id(&self) -> Result<&str> {
        self.text(EventField::Id)
    }

    pub fn team_name(&self) -> Result<&str> {
        self.text(EventField::TeamName)
    }

    pub fn event_type_name(&self) -> Result<&str> {
        self.text(EventField::EventTypeName)
    }

    pub fn player_name(&self) -> Result<&str> {
        self.text(EventField::PlayerName)
    }

    pub fn outcome_name(&self) -> Result<&str> {
        self.text(EventField::OutcomeName)
    }

    pub fn period(&self) -> Result<&str> {
        self.text(EventField::Period)
    }

    pub fn formation_position_name(&self) -> Result<&str> {
        self.text(EventField::FormationPositionName)
    }

    pub fn formation_player_name(&self) -> Result<&str> {
        self.text(EventField::FormationPlayerName)
    }

    /// Numeric pass length. An absent column is a missing-field error, a
    /// blank or malformed cell a parse error.
    pub fn pass_length(&self) -> Result<f64> {
        let text = self.pass_length.as_deref().ok_or(EventError::MissingField {
            field: EventField::PassLength,
            row: self.row,
        })?;
        parse_pass_length(self.row, text)
    }

    /// By-name lookup over every column, typed or not, as source text.
    pub fn get(&self, column: &str) -> Option<&str> {
        match EventField::from_column(column) {
            Some(field) => self.text_slot(field).map(String::as_str),
            None => self.extra.get(column).map(String::as_str),
        }
    }
}

fn parse_pass_length(row: usize, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|source| EventError::Parse {
            field: EventField::PassLength,
            row,
            value: value.to_string(),
            source,
        })
}
