//! Refill (R): driverless, turns a full trailer back into the empty pool.

use crate::model::types::TaskKind;

use super::types::TaskTemplate;

/// Refill task template: 30 min, no driver, no driving minutes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Refill;

impl TaskTemplate for Refill {
    fn kind(&self) -> TaskKind {
        TaskKind::R
    }

    fn duration_minutes(&self) -> u32 {
        30
    }

    fn driving_minutes(&self) -> u32 {
        0
    }

    fn driving_windows_minutes(&self) -> &'static [(u32, u32)] {
        &[]
    }

    fn entry_anchor_minutes(&self) -> Option<u32> {
        None
    }

    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)] {
        // Start: consume a full trailer and an engaged tractor (unloading).
        // End (+30, full duration): the trailer is empty and the tractor is free.
        &[(0, -1, 0, 0, -1), (30, 0, 1, 1, 0)]
    }
}
