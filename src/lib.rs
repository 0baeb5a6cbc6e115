//! Two-depot fuel-logistics scheduling core.
//!
//! Computes a multi-day task-start schedule maximizing deliveries into
//! the consumer depot "L" under fleet, driver-hours, break, and
//! time-window constraints.

/// Request/response document types, solver parameters, and named presets.
pub mod config;
/// Ordered-day expansion from a date range (the "day-builder").
pub mod daybuilder;
/// Per-driver (year, week) grouping used by the weekly/biweekly caps.
pub mod weekly;
/// Core time-grid and task-catalog types shared across the solver.
pub mod model;
/// Fleet-inventory capacity bookkeeping (FT/ET/Tf/Te).
pub mod inventory;
/// Slot-level conservation equations (§4.4 C6).
pub mod conservation;
/// Task-kind templates: durations, driving profiles, inventory effects.
pub mod tasks;
/// Livigno-entry time-window gating.
pub mod entrywindow;
/// Decision-variable construction, constraint assembly, and the solve call.
pub mod solver;
/// Post-solve reporting: per-day summaries and the output document.
pub mod report;
/// Post-solve shift-report packing (the "turn-packer").
pub mod turns;
/// Request/response JSON I/O and CSV shift-report export.
pub mod io;

/// REST API for submitting solve requests (feature-gated behind `api`).
#[cfg(feature = "api")]
pub mod api;
