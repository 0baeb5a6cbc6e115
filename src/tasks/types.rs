//! The `TaskTemplate` contract and the slot-resolved catalog entry it produces.

use std::collections::HashSet;

use crate::model::time::{NonIntegralSlotError, TimeGrid};
use crate::model::types::{Depot, TaskKind};

/// A read-only task-kind definition, expressed in minutes (the contract;
/// see spec §4.1) and materialized into slots by [`TaskCatalog::new`].
pub trait TaskTemplate {
    /// Which of the five kinds this template describes.
    fn kind(&self) -> TaskKind;
    /// Total task duration, in minutes.
    fn duration_minutes(&self) -> u32;
    /// Total active-driving minutes within the task (0 for `R`).
    fn driving_minutes(&self) -> u32;
    /// Half-open `[start, end)` minute ranges, relative to task start,
    /// during which the driver is actively driving.
    fn driving_windows_minutes(&self) -> &'static [(u32, u32)];
    /// Minutes from task start to the Livigno-entry anchor, if gated.
    fn entry_anchor_minutes(&self) -> Option<u32>;
    /// Inventory effects as `(offset_minutes, delta_ft, delta_et, delta_tf, delta_te)`.
    fn effects_minutes(&self) -> &'static [(u32, i32, i32, i32, i32)];
}

/// A task template with every minute quantity converted to slots for a
/// specific [`TimeGrid`].
#[derive(Debug, Clone)]
pub struct ResolvedTask {
    pub kind: TaskKind,
    pub duration_slots: usize,
    pub driving_minutes: u32,
    /// Slot offsets (relative to task start) during which the driver drives.
    pub driving_offsets: HashSet<usize>,
    pub entry_anchor_slot: Option<usize>,
    /// `(offset_slots, delta_ft, delta_et, delta_tf, delta_te)`.
    pub effects: Vec<(usize, i32, i32, i32, i32)>,
    pub depot: Option<Depot>,
}

impl ResolvedTask {
    /// Resolves a `TaskTemplate` against a concrete time grid.
    ///
    /// # Errors
    ///
    /// Returns [`NonIntegralSlotError`] if any of the template's minute
    /// quantities is not an integral multiple of `grid.slot_minutes`.
    pub fn resolve(
        template: &dyn TaskTemplate,
        grid: &TimeGrid,
    ) -> Result<Self, NonIntegralSlotError> {
        let kind = template.kind();
        let duration_slots = grid.minutes_to_slots("duration_minutes", template.duration_minutes())?;

        let mut driving_offsets = HashSet::new();
        for &(start, end) in template.driving_windows_minutes() {
            let start_slot = grid.minutes_to_slots("driving_window.start", start)?;
            let end_slot = grid.minutes_to_slots("driving_window.end", end)?;
            driving_offsets.extend(start_slot..end_slot);
        }

        let entry_anchor_slot = template
            .entry_anchor_minutes()
            .map(|m| grid.minutes_to_slots("entry_anchor_minutes", m))
            .transpose()?;

        let mut effects = Vec::new();
        for &(offset_minutes, d_ft, d_et, d_tf, d_te) in template.effects_minutes() {
            let offset_slot = grid.minutes_to_slots("effect_offset_minutes", offset_minutes)?;
            effects.push((offset_slot, d_ft, d_et, d_tf, d_te));
        }

        Ok(Self {
            kind,
            duration_slots,
            driving_minutes: template.driving_minutes(),
            driving_offsets,
            entry_anchor_slot,
            effects,
            depot: kind.depot(),
        })
    }
}
