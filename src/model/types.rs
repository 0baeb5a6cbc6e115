//! Core scheduling types: depots, task kinds, days, and solved starts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The depot a driver belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Depot {
    /// Supply depot.
    T,
    /// Consumer depot.
    L,
}

/// The five task kinds in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Supply run, T -> L -> T.
    S,
    /// Shuttle run, T -> L.
    U,
    /// Resident trip at L.
    V,
    /// ADR trip at L.
    A,
    /// Refill at T (no driver).
    R,
}

impl TaskKind {
    /// All task kinds that require a driver, in catalog order.
    pub const DRIVEN: [TaskKind; 4] = [TaskKind::S, TaskKind::U, TaskKind::V, TaskKind::A];

    /// Every task kind, including the driverless refill.
    pub const ALL: [TaskKind; 5] = [
        TaskKind::S,
        TaskKind::U,
        TaskKind::V,
        TaskKind::A,
        TaskKind::R,
    ];

    /// The depot this task kind's driver is drawn from (`None` for `R`).
    pub fn depot(self) -> Option<Depot> {
        match self {
            TaskKind::S | TaskKind::U => Some(Depot::T),
            TaskKind::V | TaskKind::A => Some(Depot::L),
            TaskKind::R => None,
        }
    }

    /// Whether a completed start of this kind counts as a delivery (§4.5).
    pub fn is_delivery(self) -> bool {
        matches!(self, TaskKind::U | TaskKind::V | TaskKind::A)
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            TaskKind::S => 'S',
            TaskKind::U => 'U',
            TaskKind::V => 'V',
            TaskKind::A => 'A',
            TaskKind::R => 'R',
        };
        write!(f, "{c}")
    }
}

/// One planning day: ISO date plus that day's driver availability at each depot.
///
/// Built by [`crate::daybuilder::expand_days`] or supplied directly in a
/// [`crate::config::RequestDocument`]; the solver never interprets `date`
/// beyond grouping days into ISO (year, week) buckets for §4.4 C7/C8.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// ISO-8601 date, `YYYY-MM-DD`.
    pub date: String,
    /// Depot-T drivers available this day (`0..=drivers_t_base`).
    #[serde(rename = "D_T")]
    pub drivers_t: u32,
    /// Depot-L drivers available this day (`0..=drivers_l_base`).
    #[serde(rename = "D_L")]
    pub drivers_l: u32,
}

/// Inventory snapshot at one slot boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(rename = "FT")]
    pub ft: u32,
    #[serde(rename = "ET")]
    pub et: u32,
    #[serde(rename = "Tf")]
    pub tf: u32,
    #[serde(rename = "Te")]
    pub te: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depot_mapping_matches_catalog() {
        assert_eq!(TaskKind::S.depot(), Some(Depot::T));
        assert_eq!(TaskKind::U.depot(), Some(Depot::T));
        assert_eq!(TaskKind::V.depot(), Some(Depot::L));
        assert_eq!(TaskKind::A.depot(), Some(Depot::L));
        assert_eq!(TaskKind::R.depot(), None);
    }

    #[test]
    fn only_uva_count_as_deliveries() {
        assert!(!TaskKind::S.is_delivery());
        assert!(TaskKind::U.is_delivery());
        assert!(TaskKind::V.is_delivery());
        assert!(TaskKind::A.is_delivery());
        assert!(!TaskKind::R.is_delivery());
    }

    #[test]
    fn day_record_round_trips_through_json() {
        let day = DayRecord {
            date: "2024-06-03".to_string(),
            drivers_t: 2,
            drivers_l: 1,
        };
        let json = serde_json::to_string(&day).unwrap();
        assert!(json.contains("\"D_T\":2"));
        let back: DayRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }
}
