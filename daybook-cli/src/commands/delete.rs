use anyhow::Result;
use daybook_core::config::DaybookConfig;
use daybook_core::{DaybookError, EventId};
use owo_colors::OwoColorize;

use super::unsaved_warning;

pub fn run(config: &DaybookConfig, id: EventId) -> Result<()> {
    let mut store = config.open_store();

    let name = match store.get(id) {
        Some(event) => event.name.clone(),
        None => {
            println!("{}", format!("No event with id {}", id).dimmed());
            return Ok(());
        }
    };

    match store.remove(id) {
        Ok(_) => println!("{}", format!("  Deleted: {}", name).red()),
        Err(e @ DaybookError::PersistenceWrite { .. }) => {
            println!("{}", format!("  Deleted: {}", name).red());
            eprintln!("{}", unsaved_warning(&e).yellow());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
