//! Core types for daybook.
//!
//! - `EventStore` owns the event list and persists it to a durable `Slot`
//! - `MonthGridProjector` turns a month and the events into calendar cells
//! - `DaybookConfig` wires both up from ~/.config/daybook/config.toml

pub mod clock;
pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod grid;
pub mod slot;
pub mod store;
pub mod wire;

pub use collection::EventCollection;
pub use error::{DaybookError, DaybookResult};
pub use event::{Event, EventId, EventInput};
pub use grid::{CalendarCell, GridPadding, MonthGrid, MonthGridProjector};
pub use store::EventStore;
