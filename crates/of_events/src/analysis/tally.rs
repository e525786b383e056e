//! # Grouped Tallies
//!
//! Single-pass counters over an event slice. Keys keep first-seen order so
//! tie-breaking stays reproducible across runs.

use rustc_hash::FxHashMap;

use crate::config::TieBreak;
use crate::error::Result;
use crate::models::EventRecord;

/// Count per `event_type_name`, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct EventTypeTally<'a> {
    entries: Vec<(&'a str, usize)>,
    index: FxHashMap<&'a str, usize>,
}

impl<'a> EventTypeTally<'a> {
    pub fn from_records(records: &'a [EventRecord]) -> Result<Self> {
        let mut tally = Self::default();
        for record in records {
            tally.add(record.event_type_name()?);
        }
        Ok(tally)
    }

    fn add(&mut self, key: &'a str) {
        match self.index.get(key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, event_type: &str) -> usize {
        self.index
            .get(event_type)
            .map(|&slot| self.entries[slot].1)
            .unwrap_or(0)
    }

    /// `(event_type, count)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, usize)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-count event type, `None` on an empty tally.
    pub fn most_common(&self, tie_break: TieBreak) -> Option<(&'a str, usize)> {
        let mut best: Option<(&'a str, usize)> = None;
        for (key, count) in self.iter() {
            best = match best {
                None => Some((key, count)),
                Some((best_key, best_count)) => {
                    let replace = match tie_break {
                        // strict: earlier keys keep ties
                        TieBreak::FirstSeen => count > best_count,
                        TieBreak::Lexicographic => {
                            count > best_count || (count == best_count && key < best_key)
                        }
                    };
                    if replace {
                        Some((key, count))
                    } else {
                        Some((best_key, best_count))
                    }
                }
            };
        }
        best
    }
}

/// Count per `(team_name, event_type_name)` pair, built in one pass.
#[derive(Debug, Clone, Default)]
pub struct TeamEventTally<'a> {
    teams: Vec<&'a str>,
    by_team: FxHashMap<&'a str, EventTypeTally<'a>>,
}

impl<'a> TeamEventTally<'a> {
    pub fn from_records(records: &'a [EventRecord]) -> Result<Self> {
        let mut tally = Self::default();
        for record in records {
            let team = record.team_name()?;
            let event_type = record.event_type_name()?;

            if !tally.by_team.contains_key(team) {
                tally.teams.push(team);
            }
            tally.by_team.entry(team).or_default().add(event_type);
        }
        Ok(tally)
    }

    pub fn count(&self, team: &str, event_type: &str) -> usize {
        self.by_team
            .get(team)
            .map(|types| types.count(event_type))
            .unwrap_or(0)
    }

    /// Teams in first-seen order
    pub fn teams(&self) -> &[&'a str] {
        &self.teams
    }

    pub fn team(&self, team: &str) -> Option<&EventTypeTally<'a>> {
        self.by_team.get(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventField;

    fn event(row: usize, team: &str, event_type: &str) -> EventRecord {
        EventRecord::new(row)
            .with(EventField::TeamName, team)
            .with(EventField::EventTypeName, event_type)
    }

    #[test]
    fn test_event_type_tally_counts_in_first_seen_order() {
        let records = vec![
            event(1, "A", "Pass"),
            event(2, "B", "Shot"),
            event(3, "A", "Pass"),
            event(4, "A", "Carry"),
        ];
        let tally = EventTypeTally::from_records(&records).unwrap();

        let entries: Vec<_> = tally.iter().collect();
        assert_eq!(entries, vec![("Pass", 2), ("Shot", 1), ("Carry", 1)]);
        assert_eq!(tally.count("Pass"), 2);
        assert_eq!(tally.count("Duel"), 0);
        assert_eq!(tally.len(), 3);
    }

    #[test]
    fn test_most_common_tie_breaks() {
        let records = vec![
            event(1, "A", "Shot"),
            event(2, "A", "Pass"),
            event(3, "A", "Pass"),
            event(4, "A", "Shot"),
        ];
        let tally = EventTypeTally::from_records(&records).unwrap();

        assert_eq!(tally.most_common(TieBreak::FirstSeen), Some(("Shot", 2)));
        assert_eq!(tally.most_common(TieBreak::Lexicographic), Some(("Pass", 2)));
    }

    #[test]
    fn test_most_common_on_empty_tally() {
        let records: Vec<EventRecord> = Vec::new();
        let tally = EventTypeTally::from_records(&records).unwrap();
        assert!(tally.is_empty());
        assert_eq!(tally.most_common(TieBreak::FirstSeen), None);
    }

    #[test]
    fn test_team_event_tally() {
        let records = vec![
            event(1, "B", "Pass"),
            event(2, "A", "Pass"),
            event(3, "B", "Pass"),
            event(4, "B", "Shot"),
        ];
        let tally = TeamEventTally::from_records(&records).unwrap();

        assert_eq!(tally.teams(), &["B", "A"]);
        assert_eq!(tally.count("B", "Pass"), 2);
        assert_eq!(tally.count("A", "Shot"), 0);
        assert_eq!(tally.count("C", "Pass"), 0);
        assert_eq!(tally.team("B").unwrap().count("Shot"), 1);
    }

    #[test]
    fn test_missing_event_type_propagates() {
        let records = vec![EventRecord::new(1).with(EventField::TeamName, "A")];
        let err = TeamEventTally::from_records(&records).unwrap_err();
        assert_eq!(err.field(), Some(EventField::EventTypeName));
    }
}
