//! The ordered event list persisted as a single value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::event::{Event, EventId};

/// Events in insertion order.
///
/// Serialized as a flat JSON array. Lookups are linear scans; a single
/// user's personal calendar stays small enough that an index isn't worth it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventCollection(Vec<Event>);

impl EventCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.0.iter()
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.0.iter().find(|e| e.id == id)
    }

    /// Events on `date`, in insertion order.
    pub fn find_by_date(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.0.iter().filter(move |e| e.date == date)
    }

    /// Every calendar day that has at least one event.
    pub fn dates_with_events(&self) -> HashSet<NaiveDate> {
        self.0.iter().map(|e| e.date).collect()
    }

    pub(crate) fn max_id(&self) -> Option<EventId> {
        self.0.iter().map(|e| e.id).max()
    }

    pub(crate) fn push(&mut self, event: Event) {
        self.0.push(event);
    }

    /// Drop every event carrying `id`. Returns whether anything was removed.
    pub(crate) fn remove(&mut self, id: EventId) -> bool {
        let before = self.0.len();
        self.0.retain(|e| e.id != id);
        self.0.len() != before
    }
}

impl From<Vec<Event>> for EventCollection {
    fn from(events: Vec<Event>) -> Self {
        EventCollection(events)
    }
}

impl<'a> IntoIterator for &'a EventCollection {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn make_test_event(id: EventId, day: u32, name: &str) -> Event {
        Event {
            id,
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            name: name.to_string(),
            start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            description: String::new(),
        }
    }

    fn sample() -> EventCollection {
        EventCollection::from(vec![
            make_test_event(1, 15, "standup"),
            make_test_event(2, 16, "review"),
            make_test_event(3, 15, "lunch"),
            make_test_event(4, 1, "rent"),
            make_test_event(5, 15, "gym"),
        ])
    }

    #[test]
    fn test_find_by_date_keeps_insertion_order() {
        let events = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let names: Vec<_> = events.find_by_date(day).map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["standup", "lunch", "gym"]);
    }

    #[test]
    fn test_find_by_date_matches_exact_subset() {
        let events = sample();

        for day in 1..=31 {
            let date = NaiveDate::from_ymd_opt(2024, 3, day).unwrap();
            let found: Vec<_> = events.find_by_date(date).map(|e| e.id).collect();
            let expected: Vec<_> = events
                .iter()
                .filter(|e| e.date == date)
                .map(|e| e.id)
                .collect();
            assert_eq!(found, expected, "day {}", day);
        }
    }

    #[test]
    fn test_find_by_date_is_repeatable() {
        let events = sample();
        let day = NaiveDate::from_ymd_opt(2024, 3, 16).unwrap();

        assert_eq!(events.find_by_date(day).count(), 1);
        assert_eq!(events.find_by_date(day).count(), 1);
        assert_eq!(events, sample());
    }

    #[test]
    fn test_remove_only_touches_matching_id() {
        let mut events = sample();
        assert!(events.remove(2));
        assert_eq!(events.len(), 4);
        assert!(events.get(2).is_none());
        assert_eq!(events.get(3), sample().get(3));

        assert!(!events.remove(42));
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_dates_with_events() {
        let dates = sample().dates_with_events();
        assert_eq!(dates.len(), 3);
        assert!(dates.contains(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_max_id() {
        assert_eq!(sample().max_id(), Some(5));
        assert_eq!(EventCollection::new().max_id(), None);
    }
}
