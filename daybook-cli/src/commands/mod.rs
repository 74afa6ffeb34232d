pub mod add;
pub mod config;
pub mod delete;
pub mod events;
pub mod show;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use daybook_core::DaybookError;
use daybook_core::wire::parse_calendar_date;

/// The current local calendar day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse an optional `--date` argument, defaulting to today.
pub fn date_or_today(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => Ok(parse_calendar_date(s)?),
        None => Ok(today()),
    }
}

/// Warning printed when a change was applied but could not be written out.
pub fn unsaved_warning(e: &DaybookError) -> String {
    format!("  Warning: {}. The change may not survive a reload.", e)
}
