use anyhow::Result;
use chrono::NaiveDate;
use daybook_core::config::DaybookConfig;
use daybook_core::wire::parse_month;
use daybook_core::MonthGridProjector;
use tracing::debug;

use super::{date_or_today, today};
use crate::render::{render_day, Render};

pub fn run(
    config: &DaybookConfig,
    month: Option<&str>,
    date: Option<&str>,
    next: u32,
    prev: u32,
) -> Result<()> {
    let selected = date_or_today(date)?;
    let month = match month {
        Some(m) => parse_month(m)?,
        None => selected,
    };
    let month = navigate(month, next, prev);

    debug!(%month, %selected, "projecting month");

    let store = config.open_store();
    let grid = config.projector().project(month, today(), selected, store.events());

    println!("{}", grid.render());
    println!();

    let events: Vec<_> = store.find_by_date(selected).collect();
    println!("{}", render_day(selected, &events));

    Ok(())
}

/// Step `next` months forward, then `prev` months back.
fn navigate(month: NaiveDate, next: u32, prev: u32) -> NaiveDate {
    let forward = (0..next).fold(month, |m, _| MonthGridProjector::next_month(m));
    (0..prev).fold(forward, |m, _| MonthGridProjector::prev_month(m))
}
