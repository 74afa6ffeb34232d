//! Event types.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire::{self, format_clock_time};

/// Identifier assigned by the store when an event is added.
pub type EventId = u64;

/// A timed event on a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(with = "wire::calendar_date")]
    pub date: NaiveDate,
    pub name: String,
    #[serde(with = "wire::clock_time")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::clock_time")]
    pub end_time: NaiveTime,
    /// Free text, empty when the user left it blank
    #[serde(default)]
    pub description: String,
}

/// Host-supplied fields for a new event. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventInput {
    pub date: NaiveDate,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub description: String,
}

impl Event {
    pub(crate) fn from_input(id: EventId, input: EventInput) -> Self {
        Event {
            id,
            date: input.date,
            name: input.name,
            start_time: input.start_time,
            end_time: input.end_time,
            description: input.description,
        }
    }

    /// "HH:MM - HH:MM"
    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            format_clock_time(self.start_time),
            format_clock_time(self.end_time)
        )
    }

    pub fn description(&self) -> Option<&str> {
        let trimmed = self.description.trim();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.time_range())
    }
}
