//! Constraint assembly (spec §4.4, C1-C8) over a built [`super::variables::VariableSet`].

use good_lp::{Expression, Variable};

use crate::config::SolverConfig;
use crate::model::time::TimeGrid;
use crate::model::types::InventorySnapshot;
use crate::tasks::types::ResolvedTask;
use crate::tasks::TaskCatalog;
use crate::weekly::{group_by_week, WeekKey};

use super::variables::StartGrid;
use super::variables::VariableSet;

/// Sum of starts of one kind at driver `driver` on `day` that are still
/// running at slot `t` (i.e. started at some `t0` with `t0 <= t < t0 + duration`).
fn running_sum(
    grid: &StartGrid,
    day: usize,
    driver: usize,
    t: usize,
    duration: usize,
) -> Expression {
    let slots = &grid[day][driver];
    let lo = t.saturating_sub(duration.saturating_sub(1));
    let mut expr = Expression::from(0.0);
    for t0 in lo..=t {
        if let Some(Some(v)) = slots.get(t0) {
            expr = expr + *v;
        }
    }
    expr
}

/// Sum, across every driver on `day`, of starts whose effect at `offset`
/// fires exactly at slot `t` (i.e. starts at `t0 = t - offset`).
fn effect_sum(grid: &StartGrid, day: usize, offset: usize, t: usize) -> Expression {
    let mut expr = Expression::from(0.0);
    if t < offset {
        return expr;
    }
    let t0 = t - offset;
    for driver in &grid[day] {
        if let Some(Some(v)) = driver.get(t0) {
            expr = expr + *v;
        }
    }
    expr
}

fn effect_sum_r(r_day: &[Option<Variable>], offset: usize, t: usize) -> Expression {
    if t < offset {
        return Expression::from(0.0);
    }
    let t0 = t - offset;
    match r_day.get(t0) {
        Some(Some(v)) => Expression::from(*v),
        _ => Expression::from(0.0),
    }
}

/// Sum of starts `task`'s driving offsets put at slot `t`, for one driver/day.
fn driving_indicator(grid: &StartGrid, day: usize, driver: usize, t: usize, task: &ResolvedTask) -> Expression {
    let mut expr = Expression::from(0.0);
    let slots = &grid[day][driver];
    for &offset in &task.driving_offsets {
        if t < offset {
            continue;
        }
        let t0 = t - offset;
        if let Some(Some(v)) = slots.get(t0) {
            expr = expr + *v;
        }
    }
    expr
}

fn day_start_sum(grid: &StartGrid, day: usize, driver: usize, slots_per_day: usize) -> Expression {
    let mut expr = Expression::from(0.0);
    for t in 0..slots_per_day {
        if let Some(Some(v)) = grid[day][driver].get(t) {
            expr = expr + *v;
        }
    }
    expr
}

/// Total driving minutes for one driver/day, across the two driven kinds at
/// that driver's depot (S+U at T, V+A at L).
fn daily_drive_minutes(
    vars: &VariableSet,
    day: usize,
    driver: usize,
    catalog: &TaskCatalog,
    at_t_depot: bool,
) -> Expression {
    let (first, second, first_minutes, second_minutes) = if at_t_depot {
        (&vars.s, &vars.u, catalog.s.driving_minutes, catalog.u.driving_minutes)
    } else {
        (&vars.v, &vars.a, catalog.v.driving_minutes, catalog.a.driving_minutes)
    };
    let slots_per_day = first[day][driver].len();
    let mut expr = Expression::from(0.0);
    for t in 0..slots_per_day {
        if let Some(Some(v)) = first[day][driver].get(t) {
            expr = expr + *v * f64::from(first_minutes);
        }
        if let Some(Some(v)) = second[day][driver].get(t) {
            expr = expr + *v * f64::from(second_minutes);
        }
    }
    expr
}

fn drive_cap_expr(
    vars: &VariableSet,
    day: usize,
    driver: usize,
    config: &SolverConfig,
    at_t_depot: bool,
) -> Expression {
    let extended = if at_t_depot {
        vars.extended_t[day].get(driver).copied().flatten()
    } else {
        vars.extended_l[day].get(driver).copied().flatten()
    };
    let base = f64::from(config.drive_minutes_daily);
    let upgrade = f64::from(config.drive_minutes_extended) - base;
    match extended {
        Some(bit) => Expression::from(base) + bit * upgrade,
        None => Expression::from(base),
    }
}

/// Builds every constraint in spec §4.4 (C1-C8) plus initial-state pinning.
#[allow(clippy::too_many_arguments)]
pub fn build_constraints(
    vars: &VariableSet,
    days: &[crate::model::types::DayRecord],
    grid: &TimeGrid,
    catalog: &TaskCatalog,
    config: &SolverConfig,
    drivers_t_base: u32,
    drivers_l_base: u32,
    initial_state: InventorySnapshot,
) -> Vec<good_lp::Constraint> {
    let mut cs = Vec::new();

    // C1: no-overlap per driver, at both depots.
    for day_idx in 0..days.len() {
        for i in 0..drivers_t_base as usize {
            for t in 0..grid.slots_per_day {
                let expr = running_sum(&vars.s, day_idx, i, t, catalog.s.duration_slots)
                    + running_sum(&vars.u, day_idx, i, t, catalog.u.duration_slots);
                cs.push((expr.leq(1.0)).into());
            }
        }
        for j in 0..drivers_l_base as usize {
            for t in 0..grid.slots_per_day {
                let expr = running_sum(&vars.v, day_idx, j, t, catalog.v.duration_slots)
                    + running_sum(&vars.a, day_idx, j, t, catalog.a.duration_slots);
                cs.push((expr.leq(1.0)).into());
            }
        }
    }

    // C2: daily driving-minute cap, liftable to the extended cap on days the
    // per-driver extended-day indicator is set. The indicator is fully
    // reified both ways (`¬ext ⇒ drive ≤ daily`, `ext ⇒ drive > daily`), not
    // just bounded from above — a half-reification would let the solver set
    // `ext` for free on days it isn't needed, which would misreport which
    // days actually ran long and corrupt the weekly extended-day budget.
    let reify_floor = f64::from(config.drive_minutes_daily) + 1.0;
    for day_idx in 0..days.len() {
        for i in 0..drivers_t_base as usize {
            let used = daily_drive_minutes(vars, day_idx, i, catalog, true);
            let cap = drive_cap_expr(vars, day_idx, i, config, true);
            cs.push(((used.clone() - cap).leq(0.0)).into());
            if let Some(bit) = vars.extended_t[day_idx].get(i).copied().flatten() {
                cs.push(((used - bit * reify_floor).geq(0.0)).into());
            }
        }
        for j in 0..drivers_l_base as usize {
            let used = daily_drive_minutes(vars, day_idx, j, catalog, false);
            let cap = drive_cap_expr(vars, day_idx, j, config, false);
            cs.push(((used.clone() - cap).leq(0.0)).into());
            if let Some(bit) = vars.extended_l[day_idx].get(j).copied().flatten() {
                cs.push(((used - bit * reify_floor).geq(0.0)).into());
            }
        }
    }

    // Extended-day budget: at most `max_extended_days_per_week` per driver per week.
    if config.max_extended_days_per_week >= 0 {
        if let Ok(groups) = group_by_week(days) {
            push_weekly_extended_cap(&mut cs, &groups, &vars.extended_t, drivers_t_base, config);
            push_weekly_extended_cap(&mut cs, &groups, &vars.extended_l, drivers_l_base, config);
        }
    }

    // C3: rolling break-window driving cap, at both depots.
    if grid.break_window_slots > 0 && grid.break_window_slots <= grid.slots_per_day {
        for day_idx in 0..days.len() {
            for i in 0..drivers_t_base as usize {
                push_break_window_constraints(
                    &mut cs, &vars.s, &catalog.s, &vars.u, &catalog.u, day_idx, i, grid,
                );
            }
            for j in 0..drivers_l_base as usize {
                push_break_window_constraints(
                    &mut cs, &vars.v, &catalog.v, &vars.a, &catalog.a, day_idx, j, grid,
                );
            }
        }
    }

    // C5: resource availability at slot start.
    push_resource_availability_constraints(&mut cs, vars, days, grid);

    // C4: per-day resident/ADR trip caps, and the weekly ADR cap (C7).
    for day_idx in 0..days.len() {
        if config.max_resident_trips >= 0 {
            for j in 0..drivers_l_base as usize {
                let expr = day_start_sum(&vars.v, day_idx, j, grid.slots_per_day);
                cs.push((expr.leq(config.max_resident_trips as f64)).into());
            }
        }
        if config.max_adr_trips >= 0 {
            for j in 0..drivers_l_base as usize {
                let expr = day_start_sum(&vars.a, day_idx, j, grid.slots_per_day);
                cs.push((expr.leq(config.max_adr_trips as f64)).into());
            }
        }
    }
    if config.adr_weekly_cap >= 0 {
        if let Ok(groups) = group_by_week(days) {
            for (_week, day_idxs) in &groups {
                for j in 0..drivers_l_base as usize {
                    let mut expr = Expression::from(0.0);
                    for &d in day_idxs {
                        expr = expr + day_start_sum(&vars.a, d, j, grid.slots_per_day);
                    }
                    cs.push((expr.leq(config.adr_weekly_cap as f64)).into());
                }
            }
        }
    }

    // C7/C8: weekly and biweekly total driving-minute caps, per driver.
    if let Ok(groups) = group_by_week(days) {
        if config.weekly_drive_limit_minutes >= 0 {
            push_weekly_drive_cap(
                &mut cs, &groups, vars, catalog, drivers_t_base, true, config.weekly_drive_limit_minutes as f64,
            );
            push_weekly_drive_cap(
                &mut cs, &groups, vars, catalog, drivers_l_base, false, config.weekly_drive_limit_minutes as f64,
            );
        }
        if config.biweekly_drive_limit_minutes >= 0 {
            push_biweekly_drive_cap(
                &mut cs, &groups, vars, catalog, drivers_t_base, true, config.biweekly_drive_limit_minutes as f64,
            );
            push_biweekly_drive_cap(
                &mut cs, &groups, vars, catalog, drivers_l_base, false, config.biweekly_drive_limit_minutes as f64,
            );
        }
    }

    // C6: slot-level inventory conservation, inter-day carry-over, and the
    // pinned initial state.
    push_inventory_constraints(&mut cs, vars, days, grid, catalog, initial_state);

    cs
}

fn push_weekly_extended_cap(
    cs: &mut Vec<good_lp::Constraint>,
    groups: &[(WeekKey, Vec<usize>)],
    extended: &[Vec<Option<Variable>>],
    roster_size: u32,
    config: &SolverConfig,
) {
    for (_week, day_idxs) in groups {
        for driver in 0..roster_size as usize {
            let mut expr = Expression::from(0.0);
            for &d in day_idxs {
                if let Some(Some(v)) = extended.get(d).and_then(|row| row.get(driver)) {
                    expr = expr + *v;
                }
            }
            cs.push((expr.leq(config.max_extended_days_per_week as f64)).into());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push_break_window_constraints(
    cs: &mut Vec<good_lp::Constraint>,
    first_grid: &StartGrid,
    first_task: &ResolvedTask,
    second_grid: &StartGrid,
    second_task: &ResolvedTask,
    day: usize,
    driver: usize,
    grid: &TimeGrid,
) {
    let window = grid.break_window_slots;
    for t in 0..=(grid.slots_per_day - window) {
        let mut expr = Expression::from(0.0);
        for slot in t..t + window {
            expr = expr
                + driving_indicator(first_grid, day, driver, slot, first_task)
                + driving_indicator(second_grid, day, driver, slot, second_task);
        }
        cs.push((expr.leq(grid.break_drive_cap_slots as f64)).into());
    }
}

#[allow(clippy::too_many_arguments)]
fn push_weekly_drive_cap(
    cs: &mut Vec<good_lp::Constraint>,
    groups: &[(WeekKey, Vec<usize>)],
    vars: &VariableSet,
    catalog: &TaskCatalog,
    roster_size: u32,
    at_t_depot: bool,
    cap_minutes: f64,
) {
    for (_week, day_idxs) in groups {
        for driver in 0..roster_size as usize {
            let mut expr = Expression::from(0.0);
            for &d in day_idxs {
                expr = expr + daily_drive_minutes(vars, d, driver, catalog, at_t_depot);
            }
            cs.push((expr.leq(cap_minutes)).into());
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn push_biweekly_drive_cap(
    cs: &mut Vec<good_lp::Constraint>,
    groups: &[(WeekKey, Vec<usize>)],
    vars: &VariableSet,
    catalog: &TaskCatalog,
    roster_size: u32,
    at_t_depot: bool,
    cap_minutes: f64,
) {
    if groups.len() < 2 {
        return;
    }
    for pair in groups.windows(2) {
        let day_idxs: Vec<usize> = pair[0].1.iter().chain(pair[1].1.iter()).copied().collect();
        for driver in 0..roster_size as usize {
            let mut expr = Expression::from(0.0);
            for &d in &day_idxs {
                expr = expr + daily_drive_minutes(vars, d, driver, catalog, at_t_depot);
            }
            cs.push((expr.leq(cap_minutes)).into());
        }
    }
}

/// C5: what starts at `t` cannot draw on stock a same-slot effect only
/// produces — `Σ S ≤ ET[t]`, `Σ S + R ≤ Te[t]`, `Σ U ≤ Tf[t]`, `R ≤ FT[t]`.
///
/// This is not implied by C6's conservation equations alone: those bound
/// inventory at `t+1` given *every* effect landing on `t` (starts and
/// same-slot completions together), which is looser than "this slot's
/// already-on-hand stock covers what starts right now" whenever a
/// completion's positive contribution lands on the same slot as a new
/// start's draw.
fn push_resource_availability_constraints(
    cs: &mut Vec<good_lp::Constraint>,
    vars: &VariableSet,
    days: &[crate::model::types::DayRecord],
    grid: &TimeGrid,
) {
    for day_idx in 0..days.len() {
        let inv = &vars.inventory[day_idx];
        for t in 0..grid.slots_per_day {
            let s_sum = effect_sum(&vars.s, day_idx, 0, t);
            let u_sum = effect_sum(&vars.u, day_idx, 0, t);
            let r_t = effect_sum_r(&vars.r[day_idx], 0, t);

            cs.push(((s_sum.clone() - inv.et[t]).leq(0.0)).into());
            cs.push((((s_sum + r_t.clone()) - inv.te[t]).leq(0.0)).into());
            cs.push(((u_sum - inv.tf[t]).leq(0.0)).into());
            cs.push(((r_t - inv.ft[t]).leq(0.0)).into());
        }
    }
}

/// Accumulates every task kind's effect on one inventory counter at slot `t`
/// (the counter's value at `t+1` minus its value at `t`).
fn inventory_delta(
    vars: &VariableSet,
    day: usize,
    catalog: &TaskCatalog,
    t: usize,
    field: usize,
) -> Expression {
    let mut expr = Expression::from(0.0);
    let driven = [
        (&vars.s, &catalog.s),
        (&vars.u, &catalog.u),
        (&vars.v, &catalog.v),
        (&vars.a, &catalog.a),
    ];
    for (grid, task) in driven {
        for &(offset, d_ft, d_et, d_tf, d_te) in &task.effects {
            let delta = [d_ft, d_et, d_tf, d_te][field];
            if delta != 0 {
                expr = expr + effect_sum(grid, day, offset, t) * f64::from(delta);
            }
        }
    }
    for &(offset, d_ft, d_et, d_tf, d_te) in &catalog.r.effects {
        let delta = [d_ft, d_et, d_tf, d_te][field];
        if delta != 0 {
            expr = expr + effect_sum_r(&vars.r[day], offset, t) * f64::from(delta);
        }
    }
    expr
}

fn push_inventory_constraints(
    cs: &mut Vec<good_lp::Constraint>,
    vars: &VariableSet,
    days: &[crate::model::types::DayRecord],
    grid: &TimeGrid,
    catalog: &TaskCatalog,
    initial_state: InventorySnapshot,
) {
    for (day_idx, inv) in vars.inventory.iter().enumerate() {
        for t in 0..grid.slots_per_day {
            let ft_delta = inventory_delta(vars, day_idx, catalog, t, 0);
            let et_delta = inventory_delta(vars, day_idx, catalog, t, 1);
            let tf_delta = inventory_delta(vars, day_idx, catalog, t, 2);
            let te_delta = inventory_delta(vars, day_idx, catalog, t, 3);

            cs.push(((inv.ft[t + 1] - inv.ft[t] - ft_delta).eq(0.0)).into());
            cs.push(((inv.et[t + 1] - inv.et[t] - et_delta).eq(0.0)).into());
            cs.push(((inv.tf[t + 1] - inv.tf[t] - tf_delta).eq(0.0)).into());
            cs.push(((inv.te[t + 1] - inv.te[t] - te_delta).eq(0.0)).into());
        }
    }

    // Pin the initial state at the very first slot boundary.
    if let Some(first) = vars.inventory.first() {
        cs.push((first.ft[0].eq(f64::from(initial_state.ft))).into());
        cs.push((first.et[0].eq(f64::from(initial_state.et))).into());
        cs.push((first.tf[0].eq(f64::from(initial_state.tf))).into());
        cs.push((first.te[0].eq(f64::from(initial_state.te))).into());
    }

    // Carry inventory across the day boundary: day d's closing slot equals
    // day d+1's opening slot.
    for day_idx in 0..days.len().saturating_sub(1) {
        let closing = &vars.inventory[day_idx];
        let opening = &vars.inventory[day_idx + 1];
        cs.push(((opening.ft[0] - closing.ft[grid.slots_per_day]).eq(0.0)).into());
        cs.push(((opening.et[0] - closing.et[grid.slots_per_day]).eq(0.0)).into());
        cs.push(((opening.tf[0] - closing.tf[grid.slots_per_day]).eq(0.0)).into());
        cs.push(((opening.te[0] - closing.te[grid.slots_per_day]).eq(0.0)).into());
    }
}
