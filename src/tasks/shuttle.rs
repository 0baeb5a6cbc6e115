//! Shuttle run (U): T -> L, tractor-only round trip.

use crate::model::types::TaskKind;

use super::types::TaskTemplate;

/// Shuttle task template: 240 min, 210 min driving, Livigno entry at +120 min.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shuttle;

impl TaskTemplate for Shuttle {
    fn kind(&self) -> TaskKind {
        TaskKind::U
    }

    fn duration_minutes(&self) -> u32 {
        240
    }

    fn driving_minutes(&self) -> u32 {
        210
    }

    fn driving_windows_minutes(&self) -> &'static [(u32, u32)] {
        &[(0, 120), (150, 240)]
    }

    fn entry_anchor_minutes(&self) -> Option<u32> {
        Some(120)
    }

    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)] {
        // Start: a free tractor leaves. End (+240, full duration): it returns unloaded.
        &[(0, 0, 0, -1, 0), (240, 0, 0, 1, 0)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time::TimeGrid;
    use crate::tasks::types::ResolvedTask;

    #[test]
    fn resolves_to_documented_slot_offsets() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        let resolved = ResolvedTask::resolve(&Shuttle, &grid).unwrap();
        assert_eq!(resolved.duration_slots, 16);
        assert_eq!(resolved.entry_anchor_slot, Some(8));
        assert_eq!(resolved.effects, vec![(0, 0, 0, -1, 0), (16, 0, 0, 1, 0)]);
    }
}
