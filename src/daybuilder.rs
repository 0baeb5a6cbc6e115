//! Expands a `[start_date, end_date]` range into the ordered [`DayRecord`]
//! sequence the solver consumes (spec §9's "day-builder external
//! collaborator", grounded on
//! `original_source/backend/src/solver/main.py::build_days`).
//!
//! Never touched by the solver core itself — `model`/`solver` only ever
//! see the normalized `Vec<DayRecord>` this module produces.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::model::types::DayRecord;

/// Per-day driver availability, accepted in either shape the request
/// document may use (spec §9: "permits `D_T`/`D_L` as either a per-date
/// mapping or a positional sequence").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability {
    /// One entry per day in range order.
    Positional(Vec<u32>),
    /// Keyed by ISO date string; missing dates default to `0`.
    ByDate(HashMap<String, u32>),
}

impl Availability {
    fn value_for(&self, date: &str, idx: usize) -> u32 {
        match self {
            Availability::Positional(values) => values.get(idx).copied().unwrap_or(0),
            Availability::ByDate(map) => map.get(date).copied().unwrap_or(0),
        }
    }
}

/// An error building the day sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A date string did not parse as `YYYY-MM-DD`.
    InvalidDate(String),
    /// `end_date` precedes `start_date`.
    EndBeforeStart,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidDate(s) => write!(f, "invalid date \"{s}\" (expected YYYY-MM-DD)"),
            BuildError::EndBeforeStart => write!(f, "end_date must be on or after start_date"),
        }
    }
}

/// Builds the ordered day sequence for `[start_date, end_date]` inclusive.
///
/// `include_weekend = false` skips Saturday and Sunday. `idx` used to index
/// positional availability counts only calendar days kept in the output
/// (weekends are skipped before indexing, matching
/// `original_source/backend/src/solver/main.py`).
///
/// # Errors
///
/// Returns [`BuildError`] if either date fails to parse or `end_date` is
/// before `start_date`.
pub fn expand_days(
    start_date: &str,
    end_date: &str,
    drivers_t: &Availability,
    drivers_l: &Availability,
    include_weekend: bool,
) -> Result<Vec<DayRecord>, BuildError> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d")
        .map_err(|_| BuildError::InvalidDate(start_date.to_string()))?;
    let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d")
        .map_err(|_| BuildError::InvalidDate(end_date.to_string()))?;
    if end < start {
        return Err(BuildError::EndBeforeStart);
    }

    let mut days = Vec::new();
    let mut cur = start;
    let mut idx = 0usize;
    while cur <= end {
        let is_weekend = matches!(cur.weekday(), Weekday::Sat | Weekday::Sun);
        if include_weekend || !is_weekend {
            let date = cur.format("%Y-%m-%d").to_string();
            days.push(DayRecord {
                drivers_t: drivers_t.value_for(&date, idx),
                drivers_l: drivers_l.value_for(&date, idx),
                date,
            });
            idx += 1;
        }
        cur = cur.succ_opt().expect("date range is bounded by end_date");
    }

    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_availability_indexes_in_range_order() {
        let days = expand_days(
            "2024-06-03",
            "2024-06-05",
            &Availability::Positional(vec![1, 2, 3]),
            &Availability::Positional(vec![0, 0, 1]),
            true,
        )
        .unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].drivers_t, 1);
        assert_eq!(days[2].drivers_t, 3);
        assert_eq!(days[2].drivers_l, 1);
    }

    #[test]
    fn by_date_availability_defaults_missing_dates_to_zero() {
        let mut map = HashMap::new();
        map.insert("2024-06-04".to_string(), 2);
        let days = expand_days(
            "2024-06-03",
            "2024-06-05",
            &Availability::ByDate(map),
            &Availability::ByDate(HashMap::new()),
            true,
        )
        .unwrap();
        assert_eq!(days[0].drivers_t, 0);
        assert_eq!(days[1].drivers_t, 2);
        assert_eq!(days[2].drivers_t, 0);
    }

    #[test]
    fn skips_weekends_when_excluded() {
        // 2024-06-07 is a Friday, 06-08/09 is Sat/Sun, 06-10 is Monday.
        let days = expand_days(
            "2024-06-07",
            "2024-06-10",
            &Availability::Positional(vec![1, 1]),
            &Availability::Positional(vec![1, 1]),
            false,
        )
        .unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, "2024-06-07");
        assert_eq!(days[1].date, "2024-06-10");
    }

    #[test]
    fn rejects_end_before_start() {
        let err = expand_days(
            "2024-06-05",
            "2024-06-01",
            &Availability::Positional(vec![]),
            &Availability::Positional(vec![]),
            true,
        )
        .unwrap_err();
        assert_eq!(err, BuildError::EndBeforeStart);
    }

    #[test]
    fn rejects_invalid_date() {
        let err = expand_days(
            "not-a-date",
            "2024-06-01",
            &Availability::Positional(vec![]),
            &Availability::Positional(vec![]),
            true,
        )
        .unwrap_err();
        assert_eq!(err, BuildError::InvalidDate("not-a-date".to_string()));
    }
}
