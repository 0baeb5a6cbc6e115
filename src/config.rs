//! Request-document parsing, solver parameters, and named presets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::daybuilder::Availability;
use crate::model::types::{DayRecord, InventorySnapshot};

fn default_true() -> bool {
    true
}

/// The full per-run request document (spec §6 "Input document").
///
/// `days` may be supplied directly, or derived from `start_date`/`end_date`
/// plus `D_T`/`D_L` via [`crate::daybuilder::expand_days`] — see
/// [`RequestDocument::resolve_days`].
#[derive(Debug, Clone, Deserialize)]
pub struct RequestDocument {
    /// Pre-expanded day sequence, if the caller already built it.
    pub days: Option<Vec<DayRecord>>,
    /// Planning horizon start, `YYYY-MM-DD` (used with `end_date` when `days` is absent).
    pub start_date: Option<String>,
    /// Planning horizon end, `YYYY-MM-DD` (inclusive).
    pub end_date: Option<String>,
    /// Depot-T availability, used with `start_date`/`end_date`.
    #[serde(rename = "D_T")]
    pub d_t: Option<Availability>,
    /// Depot-L availability, used with `start_date`/`end_date`.
    #[serde(rename = "D_L")]
    pub d_l: Option<Availability>,
    /// Whether Saturday/Sunday are kept when building `days` from a date range.
    #[serde(default = "default_true")]
    pub include_weekend: bool,
    /// Initial fleet inventory at the start of day 0.
    pub initial_state: InventorySnapshot,
    /// Every remaining tunable parameter, flattened into the top-level document.
    #[serde(flatten)]
    pub solver: SolverConfig,
}

impl RequestDocument {
    /// Resolves the day sequence, expanding from a date range if `days` was not given.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if neither `days` nor a valid
    /// `start_date`/`end_date`/`D_T`/`D_L` combination is present, or if
    /// the date range fails to expand.
    pub fn resolve_days(&self) -> Result<Vec<DayRecord>, ConfigError> {
        if let Some(days) = &self.days {
            return Ok(days.clone());
        }

        let (start, end, d_t, d_l) = match (&self.start_date, &self.end_date, &self.d_t, &self.d_l)
        {
            (Some(s), Some(e), Some(dt), Some(dl)) => (s, e, dt, dl),
            _ => {
                return Err(ConfigError {
                    field: "days".into(),
                    message: "must supply either `days` or `start_date`+`end_date`+`D_T`+`D_L`"
                        .into(),
                });
            }
        };

        crate::daybuilder::expand_days(start, end, d_t, d_l, self.include_weekend).map_err(|e| {
            ConfigError {
                field: "days".into(),
                message: e.to_string(),
            }
        })
    }

    /// Resolves the fleet totals, defaulting to the on-site sums in
    /// `initial_state` when the request left them unset (spec §6).
    pub fn fleet_totals(&self) -> (u32, u32) {
        let trailers = self
            .solver
            .total_trailers
            .unwrap_or(self.initial_state.ft + self.initial_state.et);
        let tractors = self
            .solver
            .total_tractors
            .unwrap_or(self.initial_state.tf + self.initial_state.te);
        (trailers, tractors)
    }
}

/// Every tunable solver parameter, with spec §6 defaults.
///
/// Negative values disable the corresponding constraint ("Any constraint
/// whose parameter is < 0 is treated as disabled", spec §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    pub slot_minutes: u32,
    pub shift_minutes: u32,
    pub livigno_entry_start_minutes: u32,
    pub livigno_entry_end_minutes: u32,
    pub break_window_minutes: u32,
    pub break_drive_cap_minutes: u32,

    pub max_resident_trips: i64,
    pub max_adr_trips: i64,
    pub adr_weekly_cap: i64,

    pub drive_minutes_daily: u32,
    pub drive_minutes_extended: u32,
    pub max_extended_days_per_week: i64,
    pub weekly_drive_limit_minutes: i64,
    pub biweekly_drive_limit_minutes: i64,

    pub drivers_t_base: u32,
    pub drivers_l_base: u32,
    /// Defaults to `initial_state.FT + initial_state.ET` when absent.
    pub total_trailers: Option<u32>,
    /// Defaults to `initial_state.Tf + initial_state.Te` when absent.
    pub total_tractors: Option<u32>,
    pub liters_per_unit: u32,

    pub time_limit_seconds: f64,
    pub num_search_workers: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            slot_minutes: 15,
            shift_minutes: 720,
            livigno_entry_start_minutes: 120,
            livigno_entry_end_minutes: 750,
            break_window_minutes: 315,
            break_drive_cap_minutes: 270,

            max_resident_trips: 2,
            max_adr_trips: 1,
            adr_weekly_cap: 2,

            drive_minutes_daily: 540,
            drive_minutes_extended: 600,
            max_extended_days_per_week: 2,
            weekly_drive_limit_minutes: 3360,
            biweekly_drive_limit_minutes: 5400,

            drivers_t_base: 4,
            drivers_l_base: 1,
            total_trailers: None,
            total_tractors: None,
            liters_per_unit: 17_500,

            time_limit_seconds: 10.0,
            num_search_workers: 8,
        }
    }
}

impl SolverConfig {
    /// Spec §6 defaults verbatim.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// A leaner fleet margin for stress-testing feasibility: the ADR
    /// weekly cap and resident-trip cap are tightened so the solver
    /// spends more of its search on fleet-limited days.
    pub fn tight_fleet() -> Self {
        Self {
            adr_weekly_cap: 1,
            max_resident_trips: 1,
            ..Self::default()
        }
    }

    /// Wider daily/weekly driving caps, for scenarios where regulatory
    /// limits are not meant to be the binding constraint.
    pub fn relaxed_hours() -> Self {
        Self {
            drive_minutes_daily: 600,
            drive_minutes_extended: 660,
            weekly_drive_limit_minutes: 4200,
            biweekly_drive_limit_minutes: 6600,
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &'static [&'static str] = &["baseline", "tight_fleet", "relaxed_hours"];

    /// Loads a named preset.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `name` is not a known preset.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "tight_fleet" => Ok(Self::tight_fleet()),
            "relaxed_hours" => Ok(Self::relaxed_hours()),
            _ => Err(ConfigError {
                field: "preset".into(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses solver parameters from a TOML string (for reusable presets
    /// kept outside the per-run JSON request document).
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the TOML is invalid.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".into(),
            message: e.to_string(),
        })
    }

    /// Validates every field, returning every problem found (not just the first).
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.slot_minutes == 0 {
            errors.push(ConfigError {
                field: "slot_minutes".into(),
                message: "must be > 0".into(),
            });
        }
        if self.shift_minutes == 0 || self.shift_minutes % self.slot_minutes.max(1) != 0 {
            errors.push(ConfigError {
                field: "shift_minutes".into(),
                message: "must be a positive integral multiple of slot_minutes".into(),
            });
        }
        if self.livigno_entry_start_minutes > self.livigno_entry_end_minutes {
            errors.push(ConfigError {
                field: "livigno_entry_start_minutes".into(),
                message: "must be <= livigno_entry_end_minutes".into(),
            });
        }
        if self.break_window_minutes == 0 {
            errors.push(ConfigError {
                field: "break_window_minutes".into(),
                message: "must be > 0".into(),
            });
        }
        if self.drive_minutes_daily > self.drive_minutes_extended {
            errors.push(ConfigError {
                field: "drive_minutes_daily".into(),
                message: "must be <= drive_minutes_extended".into(),
            });
        }
        if self.drivers_t_base == 0 && self.drivers_l_base == 0 {
            errors.push(ConfigError {
                field: "drivers_t_base".into(),
                message: "at least one of drivers_t_base/drivers_l_base must be > 0".into(),
            });
        }
        if self.liters_per_unit == 0 {
            errors.push(ConfigError {
                field: "liters_per_unit".into(),
                message: "must be > 0".into(),
            });
        }
        if self.time_limit_seconds <= 0.0 {
            errors.push(ConfigError {
                field: "time_limit_seconds".into(),
                message: "must be > 0".into(),
            });
        }
        if self.num_search_workers == 0 {
            errors.push(ConfigError {
                field: "num_search_workers".into(),
                message: "must be >= 1".into(),
            });
        }

        errors
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"slot_minutes"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_matches_spec_defaults() {
        let cfg = SolverConfig::baseline();
        assert_eq!(cfg.slot_minutes, 15);
        assert_eq!(cfg.shift_minutes, 720);
        assert_eq!(cfg.weekly_drive_limit_minutes, 3360);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn all_presets_are_valid() {
        for name in SolverConfig::PRESETS {
            let cfg = SolverConfig::from_preset(name).unwrap();
            assert!(cfg.validate().is_empty(), "preset {name} should validate");
        }
    }

    #[test]
    fn from_preset_rejects_unknown_name() {
        let err = SolverConfig::from_preset("nonexistent").unwrap_err();
        assert!(err.message.contains("unknown preset"));
    }

    #[test]
    fn validate_catches_non_integral_shift() {
        let cfg = SolverConfig {
            shift_minutes: 722,
            ..SolverConfig::default()
        };
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "shift_minutes"));
    }

    #[test]
    fn validate_catches_inverted_entry_window() {
        let cfg = SolverConfig {
            livigno_entry_start_minutes: 800,
            livigno_entry_end_minutes: 700,
            ..SolverConfig::default()
        };
        let errors = cfg.validate();
        assert!(errors
            .iter()
            .any(|e| e.field == "livigno_entry_start_minutes"));
    }

    #[test]
    fn rejects_unknown_field_in_toml() {
        let toml = r#"
slot_minutes = 15
mxa_adr_trips = 1
"#;
        let err = SolverConfig::from_toml_str(toml).unwrap_err();
        assert_eq!(err.field, "toml");
    }

    #[test]
    fn negative_caps_are_accepted_as_disable_sentinels() {
        let cfg = SolverConfig {
            max_resident_trips: -1,
            adr_weekly_cap: -1,
            weekly_drive_limit_minutes: -1,
            ..SolverConfig::default()
        };
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn request_document_parses_from_json() {
        let json = r#"{
            "days": [{"date": "2024-06-03", "D_T": 1, "D_L": 0}],
            "initial_state": {"FT": 2, "ET": 0, "Tf": 2, "Te": 0}
        }"#;
        let doc: RequestDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.days.as_ref().unwrap().len(), 1);
        assert_eq!(doc.solver.slot_minutes, 15);
        let resolved = doc.resolve_days().unwrap();
        assert_eq!(resolved.len(), 1);
    }

    #[test]
    fn request_document_expands_date_range_when_days_absent() {
        let json = r#"{
            "start_date": "2024-06-03",
            "end_date": "2024-06-04",
            "D_T": [1, 2],
            "D_L": [0, 1],
            "initial_state": {"FT": 0, "ET": 0, "Tf": 0, "Te": 0}
        }"#;
        let doc: RequestDocument = serde_json::from_str(json).unwrap();
        let days = doc.resolve_days().unwrap();
        assert_eq!(days.len(), 2);
        assert_eq!(days[1].drivers_t, 2);
    }

    #[test]
    fn resolve_days_errors_without_days_or_range() {
        let json = r#"{"initial_state": {"FT": 0, "ET": 0, "Tf": 0, "Te": 0}}"#;
        let doc: RequestDocument = serde_json::from_str(json).unwrap();
        assert!(doc.resolve_days().is_err());
    }

    #[test]
    fn fleet_totals_default_from_initial_state() {
        let json = r#"{
            "days": [{"date": "2024-06-03", "D_T": 1, "D_L": 0}],
            "initial_state": {"FT": 3, "ET": 1, "Tf": 2, "Te": 1}
        }"#;
        let doc: RequestDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.fleet_totals(), (4, 3));
    }

    #[test]
    fn request_document_rejects_unknown_solver_field() {
        let json = r#"{
            "days": [{"date": "2024-06-03", "D_T": 1, "D_L": 0}],
            "initial_state": {"FT": 2, "ET": 0, "Tf": 2, "Te": 0},
            "mxa_adr_trips": 1
        }"#;
        let err = serde_json::from_str::<RequestDocument>(json).unwrap_err();
        assert!(err.to_string().contains("mxa_adr_trips"));
    }

    #[test]
    fn fleet_totals_honor_explicit_override() {
        let json = r#"{
            "days": [{"date": "2024-06-03", "D_T": 1, "D_L": 0}],
            "initial_state": {"FT": 3, "ET": 1, "Tf": 2, "Te": 1},
            "total_trailers": 10,
            "total_tractors": 10
        }"#;
        let doc: RequestDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.fleet_totals(), (10, 10));
    }
}
