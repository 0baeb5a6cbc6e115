//! Time grid: slot size, shift length, and derived slot-indexed parameters.

use std::fmt;

/// Centralized time-grid parameters.
///
/// All task durations, driving profiles, and effect offsets are expressed
/// in minutes in the task catalog and converted to slots once here, so the
/// rest of the solver works exclusively in slot indices.
///
/// # Examples
///
/// ```
/// use fuel_logistics_solver::model::time::TimeGrid;
///
/// let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
/// assert_eq!(grid.slots_per_day, 48);
/// assert_eq!(grid.livigno_entry_start_slot, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    /// Minutes per slot.
    pub slot_minutes: u32,
    /// Minutes per shift (day length).
    pub shift_minutes: u32,
    /// Number of slots per day, `shift_minutes / slot_minutes`.
    pub slots_per_day: usize,
    /// Livigno-entry window start, in slots from shift start.
    pub livigno_entry_start_slot: usize,
    /// Livigno-entry window end, in slots from shift start (inclusive).
    pub livigno_entry_end_slot: usize,
    /// Rolling break-rule window length, in slots.
    pub break_window_slots: usize,
    /// Maximum driving slots allowed inside one break window.
    pub break_drive_cap_slots: usize,
}

/// Raised when a configured duration or offset does not divide evenly by `slot_minutes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonIntegralSlotError {
    /// Name of the quantity that failed to convert.
    pub field: &'static str,
    /// The minute value that was not an integral multiple of `slot_minutes`.
    pub minutes: u32,
    pub slot_minutes: u32,
}

impl fmt::Display for NonIntegralSlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} min) is not an integral multiple of slot_minutes ({} min)",
            self.field, self.minutes, self.slot_minutes
        )
    }
}

fn to_slots(
    field: &'static str,
    minutes: u32,
    slot_minutes: u32,
) -> Result<usize, NonIntegralSlotError> {
    if slot_minutes == 0 || minutes % slot_minutes != 0 {
        return Err(NonIntegralSlotError {
            field,
            minutes,
            slot_minutes,
        });
    }
    Ok((minutes / slot_minutes) as usize)
}

impl TimeGrid {
    /// Builds a time grid, converting every minute-denominated parameter to slots.
    ///
    /// # Errors
    ///
    /// Returns [`NonIntegralSlotError`] if any parameter is not an integral
    /// multiple of `slot_minutes`.
    pub fn new(
        slot_minutes: u32,
        shift_minutes: u32,
        livigno_entry_start_minutes: u32,
        livigno_entry_end_minutes: u32,
        break_window_minutes: u32,
        break_drive_cap_minutes: u32,
    ) -> Result<Self, NonIntegralSlotError> {
        let slots_per_day = to_slots("shift_minutes", shift_minutes, slot_minutes)?;
        let livigno_entry_start_slot = to_slots(
            "livigno_entry_start_minutes",
            livigno_entry_start_minutes,
            slot_minutes,
        )?;
        let livigno_entry_end_slot = to_slots(
            "livigno_entry_end_minutes",
            livigno_entry_end_minutes,
            slot_minutes,
        )?;
        let break_window_slots =
            to_slots("break_window_minutes", break_window_minutes, slot_minutes)?;
        let break_drive_cap_slots = to_slots(
            "break_drive_cap_minutes",
            break_drive_cap_minutes,
            slot_minutes,
        )?;

        Ok(Self {
            slot_minutes,
            shift_minutes,
            slots_per_day,
            livigno_entry_start_slot,
            livigno_entry_end_slot,
            break_window_slots,
            break_drive_cap_slots,
        })
    }

    /// Converts a minute-denominated duration or offset to slots.
    ///
    /// # Errors
    ///
    /// Returns [`NonIntegralSlotError`] if `minutes` is not an integral
    /// multiple of `slot_minutes`.
    pub fn minutes_to_slots(
        &self,
        field: &'static str,
        minutes: u32,
    ) -> Result<usize, NonIntegralSlotError> {
        to_slots(field, minutes, self.slot_minutes)
    }

    /// Whether the entry-anchor slot falls inside the Livigno-entry window.
    pub fn entry_window_allows(&self, anchor_slot: usize) -> bool {
        anchor_slot >= self.livigno_entry_start_slot && anchor_slot <= self.livigno_entry_end_slot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_spec_defaults() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        assert_eq!(grid.slots_per_day, 48);
        assert_eq!(grid.livigno_entry_start_slot, 8);
        assert_eq!(grid.livigno_entry_end_slot, 50);
        assert_eq!(grid.break_window_slots, 21);
        assert_eq!(grid.break_drive_cap_slots, 18);
    }

    #[test]
    fn rejects_non_integral_shift() {
        let err = TimeGrid::new(15, 722, 120, 750, 315, 270).unwrap_err();
        assert_eq!(err.field, "shift_minutes");
    }

    #[test]
    fn rejects_non_integral_break_window() {
        let err = TimeGrid::new(15, 720, 120, 750, 310, 270).unwrap_err();
        assert_eq!(err.field, "break_window_minutes");
    }

    #[test]
    fn entry_window_allows_boundary_inclusive() {
        let grid = TimeGrid::new(15, 720, 120, 750, 315, 270).unwrap();
        assert!(grid.entry_window_allows(grid.livigno_entry_start_slot));
        assert!(grid.entry_window_allows(grid.livigno_entry_end_slot));
        assert!(!grid.entry_window_allows(grid.livigno_entry_start_slot - 1));
        assert!(!grid.entry_window_allows(grid.livigno_entry_end_slot + 1));
    }
}
