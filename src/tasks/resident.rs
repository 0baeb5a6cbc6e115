//! Resident trip (V): a full-for-empty trailer swap at L mid-task.

use crate::model::types::TaskKind;

use super::types::TaskTemplate;

/// Resident task template: 270 min, 210 min driving, Livigno entry at +240 min.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resident;

impl TaskTemplate for Resident {
    fn kind(&self) -> TaskKind {
        TaskKind::V
    }

    fn duration_minutes(&self) -> u32 {
        270
    }

    fn driving_minutes(&self) -> u32 {
        210
    }

    fn driving_windows_minutes(&self) -> &'static [(u32, u32)] {
        &[(0, 90), (120, 240)]
    }

    fn entry_anchor_minutes(&self) -> Option<u32> {
        Some(240)
    }

    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)] {
        // +90 min: a full trailer leaves T for L. +120 min: an empty returns.
        &[(90, -1, 0, 0, 0), (120, 0, 1, 0, 0)]
    }
}
