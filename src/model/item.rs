// File: ./src/model/item.rs
// Plain calendar types, built fresh from each API response
use serde::{Deserialize, Serialize};

/// Weekday stored for source values outside 0..=6.
pub const OUT_OF_RANGE_WEEKDAY: u8 = u8::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionDay {
    /// ISO `YYYY-MM-DD`, kept verbatim from the source
    pub date: String,
    pub count: u32,
    /// 0 = Sunday .. 6 = Saturday. Values above 6 are tolerated here and
    /// ignored when the grid is built.
    pub weekday: u8,
}

impl ContributionDay {
    pub fn new(date: impl Into<String>, count: u32, weekday: u8) -> Self {
        Self {
            date: date.into(),
            count,
            weekday,
        }
    }
}

/// Up to seven days, nominally ordered by weekday but neither guaranteed
/// complete nor sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Week {
    pub days: Vec<ContributionDay>,
}

impl Week {
    pub fn new(days: Vec<ContributionDay>) -> Self {
        Self { days }
    }

    /// First record for `weekday`, if any.
    pub fn day(&self, weekday: u8) -> Option<&ContributionDay> {
        self.days.iter().find(|d| d.weekday == weekday)
    }
}

/// Chronological weeks (oldest first) plus the aggregate count reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub weeks: Vec<Week>,
    pub total: u32,
}

impl Calendar {
    pub fn new(weeks: Vec<Week>, total: u32) -> Self {
        Self { weeks, total }
    }

    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.days.len()).sum()
    }
}
