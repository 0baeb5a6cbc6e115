//! Post-solve shift-report packing (the "turn-packer"), grounded on
//! `original_source/backend/src/solver/turns.py`.
//!
//! The solver's own per-driver start assignment is already exact; this
//! module exists for the two reporting-only shapes the original tool
//! produced: turns built directly from known per-driver starts, and a
//! first-fit approximation built from aggregate per-kind counts alone
//! (e.g. when summarizing a day for which only totals are on hand).

use serde::{Deserialize, Serialize};

use crate::model::time::TimeGrid;
use crate::model::types::TaskKind;
use crate::report::{DayReport, KindCounts};
use crate::tasks::TaskCatalog;

/// One driver's packed shift: total minutes and the task durations assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverTurn {
    pub minutes: u32,
    pub tasks: Vec<u32>,
}

/// Turns at both depots for one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTurns {
    pub tirano_drivers: u32,
    pub tirano_turns: Vec<DriverTurn>,
    pub livigno_drivers: u32,
    pub livigno_turns: Vec<DriverTurn>,
}

/// First-fit packing of task durations into `num_drivers` shifts.
///
/// Reporting-only: a duration that does not fit in any shift is appended
/// to the first driver's turn anyway, so an overloaded day is visible in
/// the output instead of silently dropped.
pub fn pack_tasks(task_durations: &[u32], num_drivers: usize, shift_minutes: u32) -> Vec<DriverTurn> {
    let mut drivers = vec![DriverTurn::default(); num_drivers.max(1)];
    for &duration in task_durations {
        let placed = drivers
            .iter_mut()
            .find(|d| d.minutes + duration <= shift_minutes);
        match placed {
            Some(d) => {
                d.minutes += duration;
                d.tasks.push(duration);
            }
            None => {
                drivers[0].minutes += duration;
                drivers[0].tasks.push(duration);
            }
        }
    }
    if num_drivers == 0 {
        Vec::new()
    } else {
        drivers
    }
}

/// Builds turns straight from a solved day's per-driver start assignment.
pub fn turns_from_report(day: &DayReport, catalog: &TaskCatalog, grid: &TimeGrid) -> DayTurns {
    let mut tirano: Vec<DriverTurn> = vec![DriverTurn::default(); day.drivers_t as usize];
    let mut livigno: Vec<DriverTurn> = vec![DriverTurn::default(); day.drivers_l as usize];

    for start in &day.starts {
        let (bucket, minutes) = match start.task {
            TaskKind::S => (tirano.get_mut(start.driver), task_minutes(catalog, grid, TaskKind::S)),
            TaskKind::U => (tirano.get_mut(start.driver), task_minutes(catalog, grid, TaskKind::U)),
            TaskKind::V => (livigno.get_mut(start.driver), task_minutes(catalog, grid, TaskKind::V)),
            TaskKind::A => (livigno.get_mut(start.driver), task_minutes(catalog, grid, TaskKind::A)),
            TaskKind::R => continue,
        };
        if let Some(turn) = bucket {
            turn.minutes += minutes;
            turn.tasks.push(minutes);
        }
    }

    DayTurns {
        tirano_drivers: day.drivers_t,
        tirano_turns: tirano,
        livigno_drivers: day.drivers_l,
        livigno_turns: livigno,
    }
}

/// Approximates turns from aggregate per-kind counts alone, via first-fit
/// packing (the mode `original_source` used when no per-driver detail was
/// available).
pub fn turns_from_counts(
    counts: &KindCounts,
    drivers_t: u32,
    drivers_l: u32,
    catalog: &TaskCatalog,
    grid: &TimeGrid,
) -> DayTurns {
    let mut tirano_tasks = vec![task_minutes(catalog, grid, TaskKind::S); counts.s as usize];
    tirano_tasks.extend(vec![task_minutes(catalog, grid, TaskKind::U); counts.u as usize]);
    let mut livigno_tasks = vec![task_minutes(catalog, grid, TaskKind::V); counts.v as usize];
    livigno_tasks.extend(vec![task_minutes(catalog, grid, TaskKind::A); counts.a as usize]);

    DayTurns {
        tirano_drivers: drivers_t,
        tirano_turns: pack_tasks(&tirano_tasks, drivers_t as usize, grid.shift_minutes),
        livigno_drivers: drivers_l,
        livigno_turns: pack_tasks(&livigno_tasks, drivers_l as usize, grid.shift_minutes),
    }
}

fn task_minutes(catalog: &TaskCatalog, grid: &TimeGrid, kind: TaskKind) -> u32 {
    catalog.get(kind).duration_slots as u32 * grid.slot_minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time::TimeGrid;
    use crate::report::DriverStart;

    fn catalog() -> TaskCatalog {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        TaskCatalog::new(&grid).unwrap()
    }

    #[test]
    fn pack_tasks_fills_first_fit() {
        let turns = pack_tasks(&[345, 240, 240], 2, 720);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].minutes, 345 + 240);
        assert_eq!(turns[1].minutes, 240);
    }

    #[test]
    fn pack_tasks_overloads_first_driver_when_nothing_fits() {
        let turns = pack_tasks(&[700, 700], 1, 720);
        assert_eq!(turns[0].minutes, 1400);
        assert_eq!(turns[0].tasks, vec![700, 700]);
    }

    #[test]
    fn turns_from_report_groups_by_driver_and_depot() {
        let day = DayReport {
            date: "2024-06-03".into(),
            drivers_t: 1,
            drivers_l: 1,
            counts: KindCounts::default(),
            starts: vec![
                DriverStart { driver: 0, task: TaskKind::S, slot: 0 },
                DriverStart { driver: 0, task: TaskKind::U, slot: 25 },
                DriverStart { driver: 0, task: TaskKind::V, slot: 0 },
            ],
            inventory_open: Default::default(),
            inventory_close: Default::default(),
        };
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        let turns = turns_from_report(&day, &catalog(), &grid);
        assert_eq!(turns.tirano_turns[0].tasks.len(), 2);
        assert_eq!(turns.livigno_turns[0].tasks.len(), 1);
    }

    #[test]
    fn turns_from_counts_matches_aggregate_totals() {
        let mut counts = KindCounts::default();
        counts.s = 2;
        counts.u = 1;
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        let turns = turns_from_counts(&counts, 2, 1, &catalog(), &grid);
        let total: u32 = turns.tirano_turns.iter().map(|t| t.minutes).sum();
        assert_eq!(total, 2 * 345 + 240);
    }
}
