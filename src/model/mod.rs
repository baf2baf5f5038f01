// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod adapter;
pub mod item;

pub use adapter::CalendarResponse;
pub use item::{Calendar, ContributionDay, OUT_OF_RANGE_WEEKDAY, Week};
