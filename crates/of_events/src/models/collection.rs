//! Event Collection
//!
//! Ordered, read-only set of [`EventRecord`]s built once from raw rows.
//! Row numbers follow the source order: the first raw record is row 1.

use serde::{Deserialize, Serialize};

use super::event::{EventField, EventRecord, RawRecord};
use crate::config::QueryConfig;
use crate::error::{EventError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventCollection {
    records: Vec<EventRecord>,
}

impl EventCollection {
    /// Wrap already-typed records. Order is kept as given.
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        Self { records }
    }

    /// Convert raw rows without any presence checks.
    ///
    /// Missing columns surface later, when a query consults them.
    pub fn from_raw_records<I>(raw_records: I) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::convert(raw_records, &[])
    }

    /// Convert raw rows and reject any row lacking one of
    /// `config.required_fields`.
    pub fn from_raw_records_with<I>(raw_records: I, config: &QueryConfig) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        Self::convert(raw_records, &config.required_fields)
    }

    fn convert<I>(raw_records: I, required: &[EventField]) -> Result<Self>
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut records = Vec::new();

        for (idx, raw) in raw_records.into_iter().enumerate() {
            let record = EventRecord::from_raw(idx + 1, &raw)?;
            if let Some(&field) = required.iter().find(|field| !record.has(**field)) {
                return Err(EventError::MissingField {
                    field,
                    row: record.row,
                });
            }
            records.push(record);
        }

        log::debug!(
            "loaded {} event records ({} required fields)",
            records.len(),
            required.len()
        );
        Ok(Self { records })
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.records.iter()
    }

    /// Record at a 1-based source row.
    ///
    /// Loaded collections hold row `n` at index `n - 1`. Records wrapped by
    /// [`from_records`](Self::from_records) may not, so a miss falls back to
    /// a scan.
    pub fn get(&self, row: usize) -> Option<&EventRecord> {
        let slot = row.checked_sub(1)?;
        match self.records.get(slot) {
            Some(record) if record.row == row => Some(record),
            _ => self.records.iter().find(|record| record.row == row),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AsRef<[EventRecord]> for EventCollection {
    fn as_ref(&self) -> &[EventRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raws(value: serde_json::Value) -> Vec<RawRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_collection_operations() {
        let collection = EventCollection::from_raw_records(raws(json!([
            { "team_name": "A", "event_type_name": "Pass" },
            { "team_name": "B", "event_type_name": "Shot" },
        ])))
        .unwrap();

        assert!(!collection.is_empty());
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(2).unwrap().team_name().unwrap(), "B");
        assert!(collection.get(3).is_none());

        let rows: Vec<usize> = collection.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![1, 2]);
    }

    #[test]
    fn test_empty_collection() {
        let collection = EventCollection::from_raw_records(Vec::new()).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.records().len(), 0);
    }

    #[test]
    fn test_conversion_error_stops_loading() {
        let err = EventCollection::from_raw_records(raws(json!([
            { "pass_length": "12.0" },
            { "pass_length": "n/a" },
        ])))
        .unwrap_err();

        assert_eq!(err.row(), Some(2));
        assert_eq!(err.field(), Some(EventField::PassLength));
    }

    #[test]
    fn test_required_fields_checked_at_load() {
        let config = QueryConfig {
            required_fields: vec![EventField::TeamName, EventField::Id],
            ..QueryConfig::default()
        };

        let err = EventCollection::from_raw_records_with(
            raws(json!([
                { "team_name": "A", "id": "1" },
                { "team_name": "A" },
            ])),
            &config,
        )
        .unwrap_err();

        assert_eq!(
            err,
            EventError::MissingField {
                field: EventField::Id,
                row: 2
            }
        );
    }

    #[test]
    fn test_required_fields_accept_empty_strings() {
        let config = QueryConfig {
            required_fields: vec![EventField::OutcomeName],
            ..QueryConfig::default()
        };

        let collection =
            EventCollection::from_raw_records_with(raws(json!([{ "outcome_name": "" }])), &config)
                .unwrap();
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_required_pass_length_accepts_blank_cell() {
        let config = QueryConfig {
            required_fields: vec![EventField::PassLength],
            ..QueryConfig::default()
        };

        let collection =
            EventCollection::from_raw_records_with(raws(json!([{ "pass_length": "" }])), &config)
                .unwrap();
        let record = collection.get(1).unwrap();
        assert!(record.has(EventField::PassLength));
        assert!(matches!(
            record.pass_length(),
            Err(EventError::Parse { row: 1, .. })
        ));
    }

    #[test]
    fn test_get_by_row() {
        let loaded = EventCollection::from_raw_records(raws(json!([
            { "id": "a" },
            { "id": "b" },
        ])))
        .unwrap();
        assert_eq!(loaded.get(2).unwrap().id().unwrap(), "b");
        assert!(loaded.get(0).is_none());
        assert!(loaded.get(3).is_none());

        let shuffled = EventCollection::from_records(vec![
            EventRecord::new(7).with(EventField::Id, "x"),
            EventRecord::new(1).with(EventField::Id, "y"),
        ]);
        assert_eq!(shuffled.get(1).unwrap().id().unwrap(), "y");
        assert_eq!(shuffled.get(7).unwrap().id().unwrap(), "x");
        assert!(shuffled.get(2).is_none());
    }
}
