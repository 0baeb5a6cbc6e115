//! Shared test fixtures for integration tests.

use fuel_logistics_solver::config::RequestDocument;
use fuel_logistics_solver::model::types::{DayRecord, InventorySnapshot};

/// Builds a minimal request document over the given days, with the
/// baseline solver defaults and a full-fleet initial state unless the
/// caller overrides it via [`with_initial_state`].
pub fn request(days: Vec<DayRecord>, initial_state: InventorySnapshot) -> RequestDocument {
    serde_json::from_value(serde_json::json!({
        "days": days,
        "initial_state": initial_state,
    }))
    .expect("fixture request document should deserialize")
}

/// Merges solver-parameter overrides (as a JSON object) into a minimal
/// request document built from `days` and `initial_state`.
pub fn request_with_overrides(
    days: Vec<DayRecord>,
    initial_state: InventorySnapshot,
    overrides: serde_json::Value,
) -> RequestDocument {
    let mut body = serde_json::json!({
        "days": days,
        "initial_state": initial_state,
    });
    if let (Some(base), Some(extra)) = (body.as_object_mut(), overrides.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(body).expect("fixture request document should deserialize")
}

/// One day at `date` with the given driver availability.
pub fn day(date: &str, drivers_t: u32, drivers_l: u32) -> DayRecord {
    DayRecord {
        date: date.to_string(),
        drivers_t,
        drivers_l,
    }
}

/// A fleet with plenty of everything, for scenarios that are not fleet-limited.
pub fn ample_fleet() -> InventorySnapshot {
    InventorySnapshot {
        ft: 10,
        et: 10,
        tf: 10,
        te: 10,
    }
}
