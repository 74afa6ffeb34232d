//! The event store: single source of truth for events.
//!
//! Every mutation re-serializes the whole collection and overwrites the
//! durable slot, so persisting costs O(n) per add or remove.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::collection::EventCollection;
use crate::error::{DaybookError, DaybookResult};
use crate::event::{Event, EventId, EventInput};
use crate::slot::Slot;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_SLOT_KEY: &str = "events";

pub struct EventStore<S, C = SystemClock> {
    slot: S,
    key: String,
    clock: C,
    events: EventCollection,
}

impl<S: Slot> EventStore<S> {
    /// Open a store over `slot` and load whatever it holds under `key`.
    pub fn open(slot: S, key: impl Into<String>) -> Self {
        Self::with_clock(slot, key, SystemClock)
    }
}

impl<S: Slot, C: Clock> EventStore<S, C> {
    pub fn with_clock(slot: S, key: impl Into<String>, clock: C) -> Self {
        let mut store = EventStore {
            slot,
            key: key.into(),
            clock,
            events: EventCollection::new(),
        };
        store.load();
        store
    }

    /// Re-read the durable slot, replacing the in-memory collection.
    ///
    /// Never fails: a missing, unreadable or malformed value yields an empty
    /// collection.
    pub fn load(&mut self) -> &EventCollection {
        self.events = read_collection(&self.slot, &self.key);
        &self.events
    }

    /// Add an event and persist.
    ///
    /// On `DaybookError::PersistenceWrite` the event has still been appended
    /// in memory; only its durability is in doubt.
    pub fn add(&mut self, input: EventInput) -> DaybookResult<Event> {
        let event = Event::from_input(self.next_id(), input);
        self.events.push(event.clone());

        debug!(id = event.id, date = %event.date, "added event");
        self.persist()?;

        Ok(event)
    }

    /// Remove the event with `id`. Unknown ids are a no-op and leave the
    /// slot untouched.
    pub fn remove(&mut self, id: EventId) -> DaybookResult<bool> {
        if !self.events.remove(id) {
            debug!(id, "no event to remove");
            return Ok(false);
        }

        debug!(id, "removed event");
        self.persist()?;

        Ok(true)
    }

    pub fn find_by_date(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.find_by_date(date)
    }

    pub fn get(&self, id: EventId) -> Option<&Event> {
        self.events.get(id)
    }

    pub fn events(&self) -> &EventCollection {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn into_slot(self) -> S {
        self.slot
    }

    /// Millisecond timestamp, bumped past the largest existing id so two adds
    /// within the same millisecond can't collide.
    ///
    /// Once the largest id is `u64::MAX` there is nothing left above it, so
    /// the first unused id from the clock onward (wrapping to 0) is taken.
    fn next_id(&self) -> EventId {
        let now = self.clock.now_millis();
        match self.events.max_id() {
            Some(max) if max >= now => max.checked_add(1).unwrap_or_else(|| {
                warn!(max, "largest event id is exhausted, reusing a free id");
                self.first_free_id(now)
            }),
            _ => now,
        }
    }

    fn first_free_id(&self, from: EventId) -> EventId {
        (from..=EventId::MAX)
            .chain(0..from)
            .find(|id| self.events.get(*id).is_none())
            .unwrap_or(from)
    }

    fn persist(&mut self) -> DaybookResult<()> {
        let value = serde_json::to_string(&self.events)?;

        self.slot
            .write(&self.key, &value)
            .map_err(|e| DaybookError::PersistenceWrite {
                key: self.key.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            key = %self.key,
            events = self.events.len(),
            bytes = value.len(),
            "persisted events"
        );
        Ok(())
    }
}

fn read_collection<S: Slot>(slot: &S, key: &str) -> EventCollection {
    let raw = match slot.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "slot is empty");
            return EventCollection::new();
        }
        Err(e) => {
            warn!(key, error = %e, "could not read slot, starting with no events");
            return EventCollection::new();
        }
    };

    match serde_json::from_str::<EventCollection>(&raw) {
        Ok(events) => {
            debug!(key, events = events.len(), "loaded events");
            events
        }
        Err(e) => {
            warn!(key, error = %e, "slot holds malformed data, starting with no events");
            EventCollection::new()
        }
    }
}
