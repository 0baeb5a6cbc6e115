//! ISO (year, week) grouping of planning days, for the weekly/biweekly
//! accumulation constraints (spec §4.4 C7/C8).

use chrono::{Datelike, NaiveDate};

use crate::model::types::DayRecord;

/// An ISO-8601 (year, week) key.
pub type WeekKey = (i32, u32);

/// Parses a day's `date` field (`YYYY-MM-DD`) into its ISO (year, week).
///
/// # Errors
///
/// Returns the original string if it does not parse as an ISO-8601 date.
pub fn iso_year_week(date: &str) -> Result<WeekKey, String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| date.to_string())?;
    let iso = parsed.iso_week();
    Ok((iso.year(), iso.week()))
}

/// Groups day indices by ISO (year, week), in ascending week order.
///
/// The day-index lists preserve the input day order within each week.
///
/// # Errors
///
/// Returns the offending date string if any day's date fails to parse.
pub fn group_by_week(days: &[DayRecord]) -> Result<Vec<(WeekKey, Vec<usize>)>, String> {
    let mut groups: Vec<(WeekKey, Vec<usize>)> = Vec::new();
    for (idx, day) in days.iter().enumerate() {
        let key = iso_year_week(&day.date)?;
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, idxs)) => idxs.push(idx),
            None => groups.push((key, vec![idx])),
        }
    }
    groups.sort_by_key(|(key, _)| *key);
    Ok(groups)
}
