//! ADR trip (A): the longest task, couples an empty trailer for the full run.

use crate::model::types::TaskKind;

use super::types::TaskTemplate;

/// ADR task template: 585 min, 510 min driving, Livigno entry at +555 min.
#[derive(Debug, Clone, Copy, Default)]
pub struct Adr;

impl TaskTemplate for Adr {
    fn kind(&self) -> TaskKind {
        TaskKind::A
    }

    fn duration_minutes(&self) -> u32 {
        585
    }

    fn driving_minutes(&self) -> u32 {
        510
    }

    fn driving_windows_minutes(&self) -> &'static [(u32, u32)] {
        &[(0, 240), (285, 555)]
    }

    fn entry_anchor_minutes(&self) -> Option<u32> {
        Some(555)
    }

    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)] {
        // +90 min: an empty trailer leaves T coupled to an ADR tractor.
        // +435 min (90 + 345 supply-equivalent): a full ADR load arrives back at T.
        &[(90, 0, -1, 0, 0), (435, 1, 0, 0, 0)]
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
        let resolved = ResolvedTask::resolve(&Adr, &grid).unwrap();
        assert_eq!(resolved.duration_slots, 39);
        assert_eq!(resolved.entry_anchor_slot, Some(37));
        assert_eq!(resolved.effects, vec![(6, 0, -1, 0, 0), (29, 1, 0, 0, 0)]);
    }
}
