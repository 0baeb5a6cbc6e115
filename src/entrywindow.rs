//! Livigno-entry time-window gating (spec §3 "Entry-window gating", P8).
//!
//! A task with an entry anchor may only start at a slot whose anchor time
//! falls inside `[livigno_entry_start_slot, livigno_entry_end_slot]`.

use crate::model::time::TimeGrid;

/// Whether a task start at `t` is permitted by the entry window.
///
/// Tasks without an anchor (`entry_anchor_slot == None`) are always
/// allowed through this gate; fleet/driver/shift-fit gating happens
/// separately in `solver::variables`.
pub fn start_allowed(grid: &TimeGrid, t: usize, entry_anchor_slot: Option<usize>) -> bool {
    match entry_anchor_slot {
        None => true,
        Some(offset) => grid.entry_window_allows(t + offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanchored_tasks_always_allowed() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        assert!(start_allowed(&grid, 0, None));
        assert!(start_allowed(&grid, 47, None));
    }

    #[test]
    fn anchored_task_blocked_before_window_opens() {
        // Shuttle anchor offset is 8 slots (120 min); window opens at slot 8.
        let grid = TimeGrid::new(15, 720, 600, 750, 315, 270).unwrap();
        assert!(!start_allowed(&grid, 0, Some(8))); // anchor at slot 8, window starts at 40
        assert!(start_allowed(&grid, 32, Some(8))); // anchor at slot 40
    }
}
