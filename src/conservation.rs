//! Slot-level inventory conservation (spec §4.4 C6).
//!
//! This is the same arithmetic the solver emits as MILP equality
//! constraints over the decision variables; expressed here as a pure
//! function it is also what property tests use to check a solved
//! schedule's inventory trace end to end (P9).

use crate::model::types::InventorySnapshot;

/// Aggregated start/lagged-end counts for one slot, all in task-start units.
///
/// Each lagged field is the sum of starts `offset` slots ago, or `0` when
/// that slot index would be negative within the day (spec §4.4's "0 if the
/// shifted index is negative").
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotFlows {
    /// Supply starts this slot.
    pub s: u32,
    /// Shuttle starts this slot.
    pub u: u32,
    /// Resident starts this slot.
    pub v: u32,
    /// ADR starts this slot.
    pub a: u32,
    /// Refill starts this slot.
    pub r: u32,
    /// Supply starts `supply_end_offset` slots ago.
    pub s_end: u32,
    /// Shuttle starts `shuttle_end_offset` slots ago.
    pub u_end: u32,
    /// Refill starts `refill_end_offset` slots ago.
    pub r_end: u32,
    /// Resident starts `resident_refill_start_offset` slots ago.
    pub v_r_start: u32,
    /// Resident starts `resident_refill_end_offset` slots ago.
    pub v_r_end: u32,
    /// ADR starts `adr_refill_start_offset` slots ago.
    pub a_r_start: u32,
    /// ADR starts `adr_supply_end_offset` slots ago.
    pub a_supply_end: u32,
}

/// Computes the inventory at the next slot boundary from the current
/// inventory and this slot's flows, following spec §4.4's four equations
/// exactly.
///
/// All four output fields are `i64` internally during the computation so
/// a caller can detect a would-be-negative inventory (a modeling bug, not
/// a valid solution — P1 guarantees the solver never produces one)
/// before narrowing back to `u32`.
///
/// # Panics
///
/// Panics if any resulting counter would be negative — call sites that
/// process solver output already guarantee non-negativity (P1) and
/// should never hit this.
pub fn next_inventory(current: InventorySnapshot, flows: &SlotFlows) -> InventorySnapshot {
    let ft = i64::from(current.ft) + i64::from(flows.s_end) + i64::from(flows.a_supply_end)
        - i64::from(flows.r)
        - i64::from(flows.v_r_start);
    let et = i64::from(current.et) - i64::from(flows.s) + i64::from(flows.r_end)
        + i64::from(flows.v_r_end)
        - i64::from(flows.a_r_start);
    let tf = i64::from(current.tf) + i64::from(flows.s_end) + i64::from(flows.r_end)
        - i64::from(flows.u);
    let te =
        i64::from(current.te) - i64::from(flows.s) - i64::from(flows.r) + i64::from(flows.u_end);

    InventorySnapshot {
        ft: u32::try_from(ft).expect("FT would go negative"),
        et: u32::try_from(et).expect("ET would go negative"),
        tf: u32::try_from(tf).expect("Tf would go negative"),
        te: u32::try_from(te).expect("Te would go negative"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_completion_credits_full_trailer_and_free_tractor() {
        let current = InventorySnapshot {
            ft: 0,
            et: 0,
            tf: 1,
            te: 0,
        };
        let flows = SlotFlows {
            s_end: 1,
            ..Default::default()
        };
        let next = next_inventory(current, &flows);
        assert_eq!(next.ft, 1);
        assert_eq!(next.tf, 2);
        assert_eq!(next.et, 0);
        assert_eq!(next.te, 0);
    }

    #[test]
    fn supply_start_consumes_empty_trailer_and_engaged_tractor() {
        let current = InventorySnapshot {
            ft: 0,
            et: 1,
            tf: 1,
            te: 1,
        };
        let flows = SlotFlows {
            s: 1,
            ..Default::default()
        };
        let next = next_inventory(current, &flows);
        assert_eq!(next.et, 0);
        assert_eq!(next.te, 0);
    }

    #[test]
    fn refill_moves_full_to_empty_and_frees_tractor() {
        let current = InventorySnapshot {
            ft: 1,
            et: 0,
            tf: 0,
            te: 1,
        };
        // slot of the start
        let next = next_inventory(
            current,
            &SlotFlows {
                r: 1,
                ..Default::default()
            },
        );
        assert_eq!(next.ft, 0);
        assert_eq!(next.te, 0);
        // two slots later, the matching r_end fires
        let next2 = next_inventory(
            next,
            &SlotFlows {
                r_end: 1,
                ..Default::default()
            },
        );
        assert_eq!(next2.et, 1);
        assert_eq!(next2.tf, 1);
    }

    #[test]
    #[should_panic(expected = "ET would go negative")]
    fn negative_inventory_panics() {
        let current = InventorySnapshot {
            ft: 0,
            et: 0,
            tf: 0,
            te: 0,
        };
        next_inventory(
            current,
            &SlotFlows {
                s: 1,
                ..Default::default()
            },
        );
    }
}
