//! Supply run (S): T -> L -> T, the only kind that round-trips through T.

use crate::model::types::TaskKind;

use super::types::TaskTemplate;

/// Supply task template: 345 min, 300 min driving, returns a full trailer at T.
#[derive(Debug, Clone, Copy, Default)]
pub struct Supply;

impl TaskTemplate for Supply {
    fn kind(&self) -> TaskKind {
        TaskKind::S
    }

    fn duration_minutes(&self) -> u32 {
        345
    }

    fn driving_minutes(&self) -> u32 {
        300
    }

    fn driving_windows_minutes(&self) -> &'static [(u32, u32)] {
        &[(0, 150), (195, 345)]
    }

    fn entry_anchor_minutes(&self) -> Option<u32> {
        None
    }

    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)] {
        // Start: consume an empty trailer and an engaged tractor.
        // End (+345, full duration): a full trailer and a free tractor return.
        &[(0, 0, -1, 0, -1), (345, 1, 0, 1, 0)]
    }
}
