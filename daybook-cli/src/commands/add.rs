use anyhow::Result;
use chrono::NaiveTime;
use daybook_core::config::DaybookConfig;
use daybook_core::wire::parse_clock_time;
use daybook_core::{DaybookError, EventInput};
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{date_or_today, unsaved_warning};
use crate::render::long_date;

pub fn run(
    config: &DaybookConfig,
    name: Option<String>,
    date: Option<String>,
    start: Option<String>,
    end: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let interactive = name.is_none() || start.is_none() || end.is_none();
    let date = date_or_today(date.as_deref())?;

    if interactive {
        println!("{}", format!("  Add event for {}", long_date(date)).bold());
    }

    // --- Name ---
    let name = match name {
        Some(n) => validate_name(&n)?,
        None => prompt_with_retry("  Event name", validate_name)?,
    };

    // --- Times ---
    let start_time = match start {
        Some(s) => parse_time(&s)?,
        None => prompt_with_retry("  Start (HH:MM)", parse_time)?,
    };
    let end_time = match end {
        Some(s) => parse_time(&s)?,
        None => prompt_with_retry("  End (HH:MM)", parse_time)?,
    };

    // --- Description ---
    let description = match description {
        Some(d) => d,
        None if interactive => Input::new()
            .with_prompt("  Description (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?,
        None => String::new(),
    };

    let input = EventInput {
        date,
        name,
        start_time,
        end_time,
        description,
    };

    let mut store = config.open_store();

    match store.add(input) {
        Ok(event) => {
            println!("{}", format!("  Added: {} on {}", event, long_date(event.date)).green());
        }
        Err(e @ DaybookError::PersistenceWrite { .. }) => {
            eprintln!("{}", unsaved_warning(&e).yellow());
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<T, F>(prompt: &str, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

fn validate_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.is_empty() {
        anyhow::bail!("Event name is required");
    }
    Ok(name.to_string())
}

fn parse_time(input: &str) -> Result<NaiveTime> {
    Ok(parse_clock_time(input)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_trimmed() {
        assert_eq!(validate_name("  Dentist ").unwrap(), "Dentist");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_time_accepts_hh_mm() {
        assert_eq!(parse_time("07:30").unwrap(), NaiveTime::from_hms_opt(7, 30, 0).unwrap());
        assert!(parse_time("7.30pm").is_err());
    }
}
