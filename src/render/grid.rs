// File: src/render/grid.rs
// Normalizes an irregular Calendar into a fixed columns x 7 matrix
use crate::model::{Calendar, Week};
use chrono::NaiveDate;
use tracing::{debug, warn};

pub const DAYS_PER_WEEK: usize = 7;

/// One resolved day-cell. `date` is `None` for padding and missing days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub date: Option<String>,
    pub count: u32,
}

impl Cell {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    }
}

pub type Column = [Cell; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<Column>,
}

impl Grid {
    /// Left-pads with empty weeks or drops the oldest weeks until exactly
    /// `columns` remain, then resolves each weekday slot.
    pub fn from_calendar(calendar: &Calendar, columns: usize) -> Self {
        let weeks = normalize_weeks(&calendar.weeks, columns);
        let columns = weeks
            .into_iter()
            .map(|week| match week {
                Some(w) => resolve_week(w),
                None => Default::default(),
            })
            .collect();
        Self { columns }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.columns
            .iter()
            .enumerate()
            .flat_map(|(x, col)| col.iter().enumerate().map(move |(y, cell)| (x, y, cell)))
    }

    /// First known date in a column, used for month labels.
    pub fn first_date(&self, column: usize) -> Option<NaiveDate> {
        self.columns
            .get(column)?
            .iter()
            .find_map(|cell| cell.parsed_date())
    }
}

/// Returns exactly `columns` slots: `None` for padding, `Some` for kept weeks.
pub fn normalize_weeks(weeks: &[Week], columns: usize) -> Vec<Option<&Week>> {
    let len = weeks.len();
    if len > columns {
        debug!(dropped = len - columns, "truncating oldest weeks");
        weeks[len - columns..].iter().map(Some).collect()
    } else {
        if len < columns {
            debug!(padded = columns - len, "padding with empty weeks");
        }
        std::iter::repeat_n(None, columns - len)
            .chain(weeks.iter().map(Some))
            .collect()
    }
}

fn resolve_week(week: &Week) -> Column {
    let mut column: Column = Default::default();
    let mut filled = [false; DAYS_PER_WEEK];
    for day in &week.days {
        let row = day.weekday as usize;
        if row >= DAYS_PER_WEEK {
            warn!(date = %day.date, weekday = day.weekday, "ignoring day with out-of-range weekday");
            continue;
        }
        if filled[row] {
            warn!(date = %day.date, weekday = day.weekday, "ignoring duplicate weekday in week");
            continue;
        }
        filled[row] = true;
        column[row] = Cell {
            date: Some(day.date.clone()),
            count: day.count,
        };
    }
    column
}
