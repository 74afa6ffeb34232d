//! TUI rendering for daybook types.
//!
//! Extension traits that add colored terminal rendering to daybook-core
//! types using owo_colors.

use chrono::{Datelike, NaiveDate, Weekday};
use daybook_core::{CalendarCell, Event, MonthGrid};
use owo_colors::{OwoColorize, Style};

/// Width of one rendered grid cell, including the separating space.
const CELL_WIDTH: usize = 4;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarCell {
    fn render(&self) -> String {
        let mut style = Style::new();
        if !self.in_month {
            style = style.dimmed();
        }
        if self.is_today {
            style = style.bold().underline();
        }
        if self.is_selected {
            style = style.reversed();
        }

        let marker = if self.has_event { "•".cyan().to_string() } else { " ".to_string() };
        format!("{}{}", cell_text(self).style(style), marker)
    }
}

impl Render for MonthGrid {
    fn render(&self) -> String {
        let width = CELL_WIDTH * 7 - 1;
        let mut lines = Vec::new();

        lines.push(format!("‹ {:^w$} ›", self.title(), w = width - 4).bold().to_string());

        if let Some(first) = self.cells().first() {
            let labels = weekday_labels(first.date.weekday())
                .iter()
                .map(|l| format!("{:>2} ", l))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(labels.trim_end().dimmed().to_string());
        }

        for week in self.weeks() {
            let row = week.iter().map(|c| c.render()).collect::<Vec<_>>().join(" ");
            lines.push(row);
        }

        lines.join("\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let range = format!("({})", self.time_range());
        let mut line = format!("{} {}", self.name.bold(), range.dimmed());
        if let Some(description) = self.description() {
            line.push_str(&format!("\n    {}", description.dimmed()));
        }
        line
    }
}

/// Render the event list shown under the grid for `date`.
pub fn render_day(date: NaiveDate, events: &[&Event]) -> String {
    let mut lines = vec![day_heading(date).bold().to_string()];

    if events.is_empty() {
        lines.push(format!("  {}", "No events for this day.".dimmed()));
    } else {
        for event in events {
            lines.push(format!("  {}", event.render()));
        }
    }

    lines.join("\n")
}

/// "Events for March 15, 2024"
pub fn day_heading(date: NaiveDate) -> String {
    format!("Events for {}", long_date(date))
}

/// "March 15, 2024"
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Right-aligned day number, without styling.
fn cell_text(cell: &CalendarCell) -> String {
    format!("{:>2}", cell.date.day())
}

/// Seven two-letter weekday labels starting at `first`.
fn weekday_labels(first: Weekday) -> Vec<&'static str> {
    let mut labels = Vec::with_capacity(7);
    let mut day = first;
    for _ in 0..7 {
        labels.push(match day {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        });
        day = day.succ();
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybook_core::{EventCollection, MonthGridProjector};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekday_labels_follow_first_day() {
        assert_eq!(weekday_labels(Weekday::Sun), vec!["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]);
        assert_eq!(weekday_labels(Weekday::Mon), vec!["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]);
    }

    #[test]
    fn test_day_heading() {
        assert_eq!(day_heading(date(2024, 3, 5)), "Events for March 5, 2024");
    }

    #[test]
    fn test_grid_renders_one_line_per_week_plus_headers() {
        let grid = MonthGridProjector::new(Weekday::Sun).project(
            date(2024, 3, 1),
            date(2024, 3, 1),
            date(2024, 3, 1),
            &EventCollection::new(),
        );

        let rendered = grid.render();
        assert_eq!(rendered.lines().count(), 2 + 6);
        assert!(rendered.contains("March 2024"));
    }

    #[test]
    fn test_saturday_grid_labels_start_on_saturday() {
        let grid = MonthGridProjector::new(Weekday::Sat).project(
            date(2024, 3, 1),
            date(2024, 3, 1),
            date(2024, 3, 1),
            &EventCollection::new(),
        );

        let rendered = grid.render();
        let labels = rendered.lines().nth(1).unwrap();
        assert!(labels.find("Sa").unwrap() < labels.find("Su").unwrap());
        assert!(labels.find("Th").unwrap() > labels.find("Mo").unwrap());
    }

    #[test]
    fn test_empty_day() {
        let rendered = render_day(date(2024, 3, 15), &[]);
        assert!(rendered.contains("Events for March 15, 2024"));
        assert!(rendered.contains("No events for this day."));
    }
}
