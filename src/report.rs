//! Post-solve reporting: per-day summaries and the response document.

use serde::{Deserialize, Serialize};

use crate::model::types::{InventorySnapshot, TaskKind};

/// One driver's task start, as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStart {
    /// Roster index within the driver's depot (0-based).
    pub driver: usize,
    pub task: TaskKind,
    pub slot: usize,
}

/// Per-kind start counts for one day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounts {
    pub s: u32,
    pub u: u32,
    pub v: u32,
    pub a: u32,
    pub r: u32,
}

/// One day's solved schedule summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReport {
    pub date: String,
    #[serde(rename = "D_T")]
    pub drivers_t: u32,
    #[serde(rename = "D_L")]
    pub drivers_l: u32,
    pub counts: KindCounts,
    pub starts: Vec<DriverStart>,
    pub inventory_open: InventorySnapshot,
    pub inventory_close: InventorySnapshot,
}

/// Outcome status, mirroring a CP-SAT/MIP solver's terminal states (spec §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Proven optimal within the time limit.
    Optimal,
    /// A feasible solution was found but optimality was not proven.
    Feasible,
    /// The model has no feasible solution.
    Infeasible,
    /// The request document failed validation before a model was built.
    ModelInvalid,
    /// The solver terminated without a usable result.
    Unknown,
}

/// The full response document (spec §6 "Output document").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveReport {
    pub status: SolveStatus,
    /// Total completed `U+V+A` starts across the horizon (spec §4.5 objective).
    pub objective_deliveries: u32,
    /// `objective_deliveries * liters_per_unit` (spec §4.5, P10).
    pub objective_liters: u64,
    pub days: Vec<DayReport>,
}

impl SolveReport {
    /// An empty report for a status with no solution body (`INFEASIBLE`,
    /// `MODEL_INVALID`, `UNKNOWN`).
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective_deliveries: 0,
            objective_liters: 0,
            days: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&SolveStatus::ModelInvalid).unwrap();
        assert_eq!(json, "\"MODEL_INVALID\"");
    }

    #[test]
    fn without_solution_has_no_days() {
        let report = SolveReport::without_solution(SolveStatus::Infeasible);
        assert!(report.days.is_empty());
        assert_eq!(report.objective_deliveries, 0);
        assert_eq!(report.objective_liters, 0);
    }
}
