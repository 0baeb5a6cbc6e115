//! Decision-variable construction, constraint assembly, and the solve call.
//!
//! Built on `good_lp` with the `highs` backend: every spec §4.4 constraint
//! (C1-C8) is linear, so the mixed-integer LP HiGHS solves is an exact
//! substitute for the CP-SAT model this crate's behavior is grounded on (see
//! `DESIGN.md`).

pub mod constraints;
pub mod variables;

use std::fmt;
use std::time::{Duration, Instant};

use good_lp::{variables, Expression, ResolutionError, Solution, SolverModel};

use crate::config::{ConfigError, RequestDocument};
use crate::model::time::{NonIntegralSlotError, TimeGrid};
use crate::model::types::TaskKind;
use crate::report::{DayReport, DriverStart, KindCounts, SolveReport, SolveStatus};
use crate::tasks::TaskCatalog;

use variables::VariableSet;

/// Everything that can go wrong before or during a solve attempt.
#[derive(Debug)]
pub enum SolveError {
    /// The request document failed validation.
    Config(Vec<ConfigError>),
    /// A configured duration or offset was not an integral multiple of `slot_minutes`.
    TimeGrid(NonIntegralSlotError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Config(errors) => {
                write!(f, "invalid request: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{e}")?;
                }
                Ok(())
            }
            SolveError::TimeGrid(e) => write!(f, "invalid time grid: {e}"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Solves one request document end to end: validates, builds the model,
/// solves it, and reports the result (spec §6).
///
/// # Errors
///
/// Returns [`SolveError`] if the document fails validation or the time grid
/// cannot be constructed from its minute-denominated parameters. A model
/// that builds successfully but has no feasible schedule is not an error —
/// it is reported as `SolveStatus::Infeasible`.
pub fn solve(doc: &RequestDocument) -> Result<SolveReport, SolveError> {
    let config_errors = doc.solver.validate();
    if !config_errors.is_empty() {
        return Err(SolveError::Config(config_errors));
    }

    let days = doc.resolve_days().map_err(|e| SolveError::Config(vec![e]))?;
    if days.is_empty() {
        return Ok(SolveReport::without_solution(SolveStatus::Optimal));
    }

    let grid = TimeGrid::new(
        doc.solver.slot_minutes,
        doc.solver.shift_minutes,
        doc.solver.livigno_entry_start_minutes,
        doc.solver.livigno_entry_end_minutes,
        doc.solver.break_window_minutes,
        doc.solver.break_drive_cap_minutes,
    )
    .map_err(SolveError::TimeGrid)?;

    let catalog = TaskCatalog::new(&grid).map_err(SolveError::TimeGrid)?;
    let (total_trailers, total_tractors) = doc.fleet_totals();
    let drivers_t_base = doc.solver.drivers_t_base;
    let drivers_l_base = doc.solver.drivers_l_base;

    let mut vars = variables!();
    let var_set = variables::build_variables(
        &mut vars,
        &days,
        &grid,
        &catalog,
        drivers_t_base,
        drivers_l_base,
        total_trailers,
        total_tractors,
    );

    let objective = delivery_objective(&var_set, &days, drivers_t_base, drivers_l_base);

    let cs = constraints::build_constraints(
        &var_set,
        &days,
        &grid,
        &catalog,
        &doc.solver,
        drivers_t_base,
        drivers_l_base,
        doc.initial_state,
    );

    let mut model = vars.maximise(objective.clone()).using(good_lp::highs);
    // Spec §4.6/§5: the solve call is bounded by `time_limit_seconds` and
    // parallelized internally across `num_search_workers`; both are HiGHS's
    // own option names (https://ergo-code.github.io/HiGHS/dev/options/definitions).
    model.set_option("time_limit", doc.solver.time_limit_seconds);
    model.set_option("threads", doc.solver.num_search_workers as i32);
    for c in cs {
        model = model.with(c);
    }

    let time_limit = Duration::from_secs_f64(doc.solver.time_limit_seconds.max(0.0));
    let started = Instant::now();
    let solve_result = model.solve();
    let elapsed = started.elapsed();

    let solution = match solve_result {
        Ok(solution) => solution,
        Err(ResolutionError::Infeasible) => {
            return Ok(SolveReport::without_solution(SolveStatus::Infeasible));
        }
        Err(_) => {
            // Anything short of a proven-infeasible model that HiGHS could
            // not resolve to a solution within the time budget (spec §7.3
            // "Timeout / indeterminate") — no incumbent is available to
            // report, so this is UNKNOWN rather than a hard crate error.
            return Ok(SolveReport::without_solution(SolveStatus::Unknown));
        }
    };

    // HiGHS does not hand back "proven optimal" vs "time-limited incumbent"
    // through `good_lp`'s `Solution` trait, so the time budget itself is
    // the only signal available here: a solve that ran out its full budget
    // returned *a* solution, not necessarily the optimum (spec §4.6/§6:
    // FEASIBLE is the status for that case).
    let status = if elapsed >= time_limit {
        SolveStatus::Feasible
    } else {
        SolveStatus::Optimal
    };

    let deliveries = solution.eval(&objective).round().max(0.0) as u32;
    let liters = u64::from(deliveries) * u64::from(doc.solver.liters_per_unit);
    let days_report = build_day_reports(&solution, &var_set, &days, &grid);

    Ok(SolveReport {
        status,
        objective_deliveries: deliveries,
        objective_liters: liters,
        days: days_report,
    })
}

/// Solves a request document and always produces a [`SolveReport`] — the
/// documented output-document contract (spec §6/§7) has a status for every
/// outcome, including ones this crate would otherwise have to reject before
/// a model exists. Used by the CLI and the `api` feature's `POST /solve`
/// handler, which both only ever emit that one JSON shape.
pub fn solve_report(doc: &RequestDocument) -> SolveReport {
    match solve(doc) {
        Ok(report) => report,
        Err(_) => SolveReport::without_solution(SolveStatus::ModelInvalid),
    }
}

fn delivery_objective(
    vars: &VariableSet,
    days: &[crate::model::types::DayRecord],
    drivers_t_base: u32,
    drivers_l_base: u32,
) -> Expression {
    let mut expr = Expression::from(0.0);
    for day in 0..days.len() {
        for i in 0..drivers_t_base as usize {
            for slot in vars.u[day][i].iter().flatten() {
                expr = expr + *slot;
            }
        }
        for j in 0..drivers_l_base as usize {
            for slot in vars.v[day][j].iter().flatten() {
                expr = expr + *slot;
            }
            for slot in vars.a[day][j].iter().flatten() {
                expr = expr + *slot;
            }
        }
    }
    expr
}

fn build_day_reports(
    solution: &impl Solution,
    vars: &VariableSet,
    days: &[crate::model::types::DayRecord],
    grid: &TimeGrid,
) -> Vec<DayReport> {
    days.iter()
        .enumerate()
        .map(|(day_idx, day)| {
            let mut counts = KindCounts::default();
            let mut starts = Vec::new();

            collect_starts(solution, &vars.s, day_idx, TaskKind::S, &mut starts, &mut counts.s);
            collect_starts(solution, &vars.u, day_idx, TaskKind::U, &mut starts, &mut counts.u);
            collect_starts(solution, &vars.v, day_idx, TaskKind::V, &mut starts, &mut counts.v);
            collect_starts(solution, &vars.a, day_idx, TaskKind::A, &mut starts, &mut counts.a);

            for slot_var in vars.r[day_idx].iter().flatten() {
                let n = solution.value(*slot_var).round() as u32;
                counts.r += n;
            }

            starts.sort_by_key(|s| (s.driver, s.slot));

            let inv = &vars.inventory[day_idx];
            let inventory_open = crate::model::types::InventorySnapshot {
                ft: solution.value(inv.ft[0]).round() as u32,
                et: solution.value(inv.et[0]).round() as u32,
                tf: solution.value(inv.tf[0]).round() as u32,
                te: solution.value(inv.te[0]).round() as u32,
            };
            let inventory_close = crate::model::types::InventorySnapshot {
                ft: solution.value(inv.ft[grid.slots_per_day]).round() as u32,
                et: solution.value(inv.et[grid.slots_per_day]).round() as u32,
                tf: solution.value(inv.tf[grid.slots_per_day]).round() as u32,
                te: solution.value(inv.te[grid.slots_per_day]).round() as u32,
            };

            DayReport {
                date: day.date.clone(),
                drivers_t: day.drivers_t,
                drivers_l: day.drivers_l,
                counts,
                starts,
                inventory_open,
                inventory_close,
            }
        })
        .collect()
}

fn collect_starts(
    solution: &impl Solution,
    grid: &variables::StartGrid,
    day: usize,
    kind: TaskKind,
    starts: &mut Vec<DriverStart>,
    count: &mut u32,
) {
    for (driver, slots) in grid[day].iter().enumerate() {
        for (slot, var) in slots.iter().enumerate() {
            if let Some(v) = var {
                if solution.value(*v) > 0.5 {
                    starts.push(DriverStart { driver, task: kind, slot });
                    *count += 1;
                }
            }
        }
    }
}
