use std::num::ParseFloatError;

use thiserror::Error;

use crate::models::EventField;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Missing field '{field}' on row {row}")]
    MissingField { field: EventField, row: usize },

    #[error("Parse error on row {row}: '{value}' is not a valid {field}")]
    Parse {
        field: EventField,
        row: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("No data for {query}")]
    NoData { query: &'static str },
}

impl EventError {
    /// Field that caused the failure, if the error is tied to one.
    pub fn field(&self) -> Option<EventField> {
        match self {
            EventError::MissingField { field, .. } | EventError::Parse { field, .. } => {
                Some(*field)
            }
            EventError::NoData { .. } => None,
        }
    }

    /// Source row (1-based) the error points at.
    pub fn row(&self) -> Option<usize> {
        match self {
            EventError::MissingField { row, .. } | EventError::Parse { row, .. } => Some(*row),
            EventError::NoData { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EventError>;
