//! Month-grid projection.
//!
//! Turns a reference month plus the event collection into the ordered run of
//! days a calendar view displays. Pure: no state, no I/O.

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::collection::EventCollection;

/// Where the grid stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridPadding {
    /// Stop on the last day of the month, leaving the final row short.
    #[default]
    MonthEnd,
    /// Continue to the end of the last week for a rectangular grid.
    FullWeeks,
}

impl FromStr for GridPadding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month-end" => Ok(GridPadding::MonthEnd),
            "full-weeks" => Ok(GridPadding::FullWeeks),
            other => Err(format!(
                "Unknown grid padding '{}'. Expected month-end or full-weeks",
                other
            )),
        }
    }
}

impl fmt::Display for GridPadding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridPadding::MonthEnd => write!(f, "month-end"),
            GridPadding::FullWeeks => write!(f, "full-weeks"),
        }
    }
}

/// One day's display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// False for leading/trailing days borrowed from neighbouring months
    pub in_month: bool,
    pub is_selected: bool,
    pub is_today: bool,
    pub has_event: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    month: NaiveDate,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    /// First day of the projected month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    /// Rows of seven cells; the last row is short when the grid isn't padded.
    pub fn weeks(&self) -> std::slice::Chunks<'_, CalendarCell> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&CalendarCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.month.format("%B %Y").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGridProjector {
    /// Weekday that opens each grid row
    pub week_start: Weekday,
    pub padding: GridPadding,
}

impl Default for MonthGridProjector {
    fn default() -> Self {
        MonthGridProjector::new(Weekday::Sun)
    }
}

impl MonthGridProjector {
    pub fn new(week_start: Weekday) -> Self {
        MonthGridProjector {
            week_start,
            padding: GridPadding::default(),
        }
    }

    pub fn with_padding(mut self, padding: GridPadding) -> Self {
        self.padding = padding;
        self
    }

    /// Project the month containing `reference`.
    pub fn project(
        &self,
        reference: NaiveDate,
        today: NaiveDate,
        selected: NaiveDate,
        events: &EventCollection,
    ) -> MonthGrid {
        let month = first_of_month(reference);
        let month_end = last_of_month(reference);

        let grid_start = self.start_of_week(month);
        let grid_end = match self.padding {
            GridPadding::MonthEnd => month_end,
            GridPadding::FullWeeks => self
                .start_of_week(month_end)
                .checked_add_days(Days::new(6))
                .unwrap_or(month_end),
        };

        let marked = events.dates_with_events();

        let cells = grid_start
            .iter_days()
            .take_while(|date| *date <= grid_end)
            .map(|date| CalendarCell {
                date,
                in_month: first_of_month(date) == month,
                is_selected: date == selected,
                is_today: date == today,
                has_event: marked.contains(&date),
            })
            .collect();

        MonthGrid { month, cells }
    }

    /// One calendar month later, day clamped to the target month's length.
    pub fn next_month(reference: NaiveDate) -> NaiveDate {
        reference
            .checked_add_months(Months::new(1))
            .unwrap_or(reference)
    }

    /// One calendar month earlier, day clamped to the target month's length.
    pub fn prev_month(reference: NaiveDate) -> NaiveDate {
        reference
            .checked_sub_months(Months::new(1))
            .unwrap_or(reference)
    }

    fn start_of_week(&self, date: NaiveDate) -> NaiveDate {
        let offset = (7 + date.weekday().num_days_from_monday()
            - self.week_start.num_days_from_monday())
            % 7;
        date - Days::new(u64::from(offset))
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
