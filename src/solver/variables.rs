//! Decision-variable construction.
//!
//! Every task-start variable lives at a fixed `(day, driver-roster-index,
//! start-slot)` coordinate. The roster index is what lets the weekly and
//! biweekly driving caps (§4.4 C7/C8) accumulate across days for "the same"
//! driver even though daily availability (`D_T`/`D_L`) varies: a driver
//! roster index that is unavailable on a given day simply has no variables
//! at all for that day, rather than variables forced to zero.

use good_lp::{variable, ProblemVariables, Variable};

use crate::model::types::DayRecord;
use crate::tasks::TaskCatalog;

/// Per-day, per-driver, per-slot task-start variables for one driven kind.
///
/// `starts[driver][slot]` is `Some(var)` exactly when that driver is on the
/// roster that day and the task fits inside the shift starting at `slot`
/// (duration, entry window, and any other static feasibility check already
/// applied); `None` otherwise.
pub type StartGrid = Vec<Vec<Vec<Option<Variable>>>>;

/// One day's slot-boundary inventory variables, `0..=slots_per_day`.
#[derive(Debug, Clone)]
pub struct InventoryVars {
    pub ft: Vec<Variable>,
    pub et: Vec<Variable>,
    pub tf: Vec<Variable>,
    pub te: Vec<Variable>,
}

/// The full decision-variable set for one solve request.
#[derive(Debug, Clone)]
pub struct VariableSet {
    /// `[day][driver_t][slot]`
    pub s: StartGrid,
    /// `[day][driver_t][slot]`
    pub u: StartGrid,
    /// `[day][driver_l][slot]`
    pub v: StartGrid,
    /// `[day][driver_l][slot]`
    pub a: StartGrid,
    /// `[day][slot]`, integer refill counts (no driver dimension).
    pub r: Vec<Vec<Option<Variable>>>,
    /// `[day]`
    pub inventory: Vec<InventoryVars>,
    /// `[day][driver_t]`, binary "worked an extended-hours day".
    pub extended_t: Vec<Vec<Option<Variable>>>,
    /// `[day][driver_l]`, binary "worked an extended-hours day".
    pub extended_l: Vec<Vec<Option<Variable>>>,
}

/// Builds one kind's start-variable grid.
fn build_start_grid(
    vars: &mut ProblemVariables,
    days: &[DayRecord],
    roster_size: u32,
    availability: impl Fn(&DayRecord) -> u32,
    grid: &crate::model::time::TimeGrid,
    task: &crate::tasks::ResolvedTask,
) -> StartGrid {
    let mut out = Vec::with_capacity(days.len());
    for day in days {
        let present = availability(day).min(roster_size) as usize;
        let mut per_driver = Vec::with_capacity(roster_size as usize);
        for i in 0..roster_size as usize {
            let mut per_slot = vec![None; grid.slots_per_day];
            if i < present && task.duration_slots <= grid.slots_per_day {
                for t in 0..=(grid.slots_per_day - task.duration_slots) {
                    let anchor_ok = match task.entry_anchor_slot {
                        None => true,
                        Some(offset) => grid.entry_window_allows(t + offset),
                    };
                    if anchor_ok {
                        per_slot[t] = Some(vars.add(variable().binary()));
                    }
                }
            }
            per_driver.push(per_slot);
        }
        out.push(per_driver);
    }
    out
}

/// Builds every decision variable for the whole horizon.
pub fn build_variables(
    vars: &mut ProblemVariables,
    days: &[DayRecord],
    grid: &crate::model::time::TimeGrid,
    catalog: &TaskCatalog,
    drivers_t_base: u32,
    drivers_l_base: u32,
    total_trailers: u32,
    total_tractors: u32,
) -> VariableSet {
    let s = build_start_grid(vars, days, drivers_t_base, |d| d.drivers_t, grid, &catalog.s);
    let u = build_start_grid(vars, days, drivers_t_base, |d| d.drivers_t, grid, &catalog.u);
    let v = build_start_grid(vars, days, drivers_l_base, |d| d.drivers_l, grid, &catalog.v);
    let a = build_start_grid(vars, days, drivers_l_base, |d| d.drivers_l, grid, &catalog.a);

    let mut r = Vec::with_capacity(days.len());
    for _day in days {
        let mut per_slot = vec![None; grid.slots_per_day];
        if catalog.r.duration_slots <= grid.slots_per_day {
            for t in 0..=(grid.slots_per_day - catalog.r.duration_slots) {
                per_slot[t] = Some(vars.add(
                    variable()
                        .integer()
                        .min(0)
                        .max(f64::from(total_trailers)),
                ));
            }
        }
        r.push(per_slot);
    }

    let mut inventory = Vec::with_capacity(days.len());
    for _day in days {
        let mk = |bound: u32| -> Vec<Variable> {
            (0..=grid.slots_per_day)
                .map(|_| vars.add(variable().integer().min(0).max(f64::from(bound))))
                .collect()
        };
        inventory.push(InventoryVars {
            ft: mk(total_trailers),
            et: mk(total_trailers),
            tf: mk(total_tractors),
            te: mk(total_tractors),
        });
    }

    let mut extended_t = Vec::with_capacity(days.len());
    let mut extended_l = Vec::with_capacity(days.len());
    for day in days {
        let present_t = day.drivers_t.min(drivers_t_base) as usize;
        let present_l = day.drivers_l.min(drivers_l_base) as usize;
        extended_t.push(
            (0..drivers_t_base as usize)
                .map(|i| {
                    if i < present_t {
                        Some(vars.add(variable().binary()))
                    } else {
                        None
                    }
                })
                .collect(),
        );
        extended_l.push(
            (0..drivers_l_base as usize)
                .map(|j| {
                    if j < present_l {
                        Some(vars.add(variable().binary()))
                    } else {
                        None
                    }
                })
                .collect(),
        );
    }

    VariableSet {
        s,
        u,
        v,
        a,
        r,
        inventory,
        extended_t,
        extended_l,
    }
}
