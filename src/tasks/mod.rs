//! Task catalog: the five fixed-duration task-kind templates and their
//! slot-resolved form for a given time grid.

/// ADR (A) task template.
pub mod adr;
/// Refill (R) task template.
pub mod refill;
/// Resident (V) task template.
pub mod resident;
/// Shuttle (U) task template.
pub mod shuttle;
/// Supply (S) task template.
pub mod supply;
pub mod types;

pub use types::{ResolvedTask, TaskTemplate};

use crate::model::time::{NonIntegralSlotError, TimeGrid};
use crate::model::types::TaskKind;

/// Read-only catalog of the five task kinds, resolved against one [`TimeGrid`].
///
/// Built once per solve request; every decision variable and constraint
/// reads from this instead of recomputing slot offsets.
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    pub s: ResolvedTask,
    pub u: ResolvedTask,
    pub v: ResolvedTask,
    pub a: ResolvedTask,
    pub r: ResolvedTask,
}

impl TaskCatalog {
    /// Resolves every template in the catalog against `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`NonIntegralSlotError`] if any task's duration, driving
    /// window, entry anchor, or effect offset is not an integral multiple
    /// of `grid.slot_minutes` (spec §4.1's "rejects configurations" contract).
    pub fn new(grid: &TimeGrid) -> Result<Self, NonIntegralSlotError> {
        Ok(Self {
            s: ResolvedTask::resolve(&supply::Supply, grid)?,
            u: ResolvedTask::resolve(&shuttle::Shuttle, grid)?,
            v: ResolvedTask::resolve(&resident::Resident, grid)?,
            a: ResolvedTask::resolve(&adr::Adr, grid)?,
            r: ResolvedTask::resolve(&refill::Refill, grid)?,
        })
    }

    /// Looks up the resolved template for a given kind.
    pub fn get(&self, kind: TaskKind) -> &ResolvedTask {
        match kind {
            TaskKind::S => &self.s,
            TaskKind::U => &self.u,
            TaskKind::V => &self.v,
            TaskKind::A => &self.a,
            TaskKind::R => &self.r,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_resolves_all_five_kinds() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        let catalog = TaskCatalog::new(&grid).unwrap();
        assert_eq!(catalog.get(TaskKind::S).duration_slots, 23);
        assert_eq!(catalog.get(TaskKind::U).duration_slots, 16);
        assert_eq!(catalog.get(TaskKind::V).duration_slots, 18);
        assert_eq!(catalog.get(TaskKind::A).duration_slots, 39);
        assert_eq!(catalog.get(TaskKind::R).duration_slots, 2);
    }

    #[test]
    fn rejects_non_integral_slot_minutes() {
        // 345 (S duration) is not a multiple of 100.
        let grid = TimeGrid::new(100, 700, 100, 600, 300, 200).unwrap();
        assert!(TaskCatalog::new(&grid).is_err());
    }
}
