use anyhow::Result;
use daybook_core::config::DaybookConfig;
use owo_colors::OwoColorize;

use super::date_or_today;
use crate::render::{day_heading, Render};

pub fn run(config: &DaybookConfig, date: Option<&str>) -> Result<()> {
    let date = date_or_today(date)?;
    let store = config.open_store();

    println!("{}", day_heading(date).bold());

    let mut found = false;
    for event in store.find_by_date(date) {
        found = true;
        println!("  {} {}", format!("#{}", event.id).dimmed(), event.render());
    }

    if !found {
        println!("  {}", "No events for this day.".dimmed());
    }

    Ok(())
}
