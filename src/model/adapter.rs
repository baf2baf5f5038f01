// File: ./src/model/adapter.rs
// Handles GraphQL response deserialization and conversion into a Calendar
use crate::error::{Error, Result};
use crate::model::item::{Calendar, ContributionDay, OUT_OF_RANGE_WEEKDAY, Week};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct CalendarResponse {
    #[serde(default)]
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Option<Vec<serde_json::Value>>,
}

#[derive(Deserialize, Debug, Default)]
struct ResponseData {
    #[serde(default)]
    user: Option<UserNode>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    #[serde(default)]
    contributions_collection: Option<CollectionNode>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    #[serde(default)]
    contribution_calendar: Option<CalendarNode>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct CalendarNode {
    #[serde(default)]
    total_contributions: Option<u32>,
    #[serde(default)]
    weeks: Option<Vec<WeekNode>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct WeekNode {
    #[serde(default)]
    contribution_days: Option<Vec<DayNode>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DayNode {
    date: String,
    #[serde(default)]
    contribution_count: Option<i64>,
    weekday: i64,
}

impl DayNode {
    /// Negative counts read as 0. A weekday outside 0..=6 becomes
    /// `OUT_OF_RANGE_WEEKDAY`, which the grid drops.
    fn into_day(self) -> ContributionDay {
        let count = self
            .contribution_count
            .map(|c| u32::try_from(c.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0);
        let weekday = u8::try_from(self.weekday)
            .ok()
            .filter(|w| *w <= 6)
            .unwrap_or(OUT_OF_RANGE_WEEKDAY);
        ContributionDay::new(self.date, count, weekday)
    }
}

impl CalendarResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map_err(|e| Error::UnexpectedShape(format!("body is not a GraphQL response: {}", e)))
    }

    /// Serialized `errors` list, when the API sent a non-empty one.
    pub fn api_errors(&self) -> Option<String> {
        match &self.errors {
            Some(list) if !list.is_empty() => {
                Some(serde_json::to_string(list).unwrap_or_else(|_| format!("{:?}", list)))
            }
            _ => None,
        }
    }

    /// Fails with `Api` before looking at `data`, so a partial payload next to
    /// an error list is never rendered.
    pub fn into_calendar(self) -> Result<Calendar> {
        if let Some(errors) = self.api_errors() {
            return Err(Error::Api(errors));
        }

        let user = self
            .data
            .ok_or_else(|| Error::UnexpectedShape("missing `data`".to_string()))?
            .user
            .ok_or_else(|| Error::UnexpectedShape("`data.user` is null".to_string()))?;

        let calendar = user
            .contributions_collection
            .and_then(|c| c.contribution_calendar)
            .ok_or_else(|| {
                Error::UnexpectedShape("missing `contributionsCollection.contributionCalendar`".to_string())
            })?;

        let weeks = calendar
            .weeks
            .ok_or_else(|| Error::UnexpectedShape("missing `contributionCalendar.weeks`".to_string()))?
            .into_iter()
            .map(|w| {
                Week::new(
                    w.contribution_days
                        .unwrap_or_default()
                        .into_iter()
                        .map(DayNode::into_day)
                        .collect(),
                )
            })
            .collect();

        Ok(Calendar::new(weeks, calendar.total_contributions.unwrap_or(0)))
    }
}
