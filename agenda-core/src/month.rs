//! Month-grid model for the calendar view.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Months, NaiveDate};

use crate::error::AgendaError;

/// Column headers, weeks starting on Sunday.
pub const WEEKDAYS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

const MONTH_NAMES: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

/// The month the calendar view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthCursor {
    first: NaiveDate,
}

impl MonthCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| MonthCursor { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        MonthCursor {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn prev(&self) -> Self {
        MonthCursor {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn next(&self) -> Self {
        MonthCursor {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn days_in_month(&self) -> u32 {
        match self.next().first.signed_duration_since(self.first).num_days() {
            // Only the last representable month has no successor
            0 => 31,
            n => n as u32,
        }
    }

    /// Blank cells before day 1 in a Sunday-first grid.
    pub fn leading_blanks(&self) -> usize {
        self.first.weekday().num_days_from_sunday() as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Grid cells in reading order: leading blanks, then every day of the
    /// month. The last week is not padded.
    pub fn cells(&self) -> Vec<Option<NaiveDate>> {
        let blanks = std::iter::repeat_n(None, self.leading_blanks());
        let days = self.first.iter_days().take(self.days_in_month() as usize).map(Some);
        blanks.chain(days).collect()
    }

    /// Month name and year as the grid header shows it, e.g. "junho de 2024".
    pub fn title(&self) -> String {
        format!("{} de {}", MONTH_NAMES[self.first.month0() as usize], self.year())
    }
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.first.format("%Y-%m"))
    }
}

impl FromStr for MonthCursor {
    type Err = AgendaError;

    /// Parse YYYY-MM
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AgendaError::Invalid(format!("Invalid month '{}'. Expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(err)?;
        let year: i32 = year.parse().map_err(|_| err())?;
        let month: u32 = month.parse().map_err(|_| err())?;
        MonthCursor::new(year, month).ok_or_else(err)
    }
}
