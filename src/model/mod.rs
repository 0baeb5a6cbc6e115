//! Core time-grid and scheduling types shared across the solver.

pub mod time;
pub mod types;

pub use time::TimeGrid;
pub use types::{Depot, DayRecord, InventorySnapshot, TaskKind};
