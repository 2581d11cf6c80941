//! TOML-based lever settings and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::model::constants::{ELECTRIFICATION_REFERENCE_YEAR, SCENARIO_YEAR};

/// Policy lever settings for one scenario evaluation.
///
/// Every lever defaults to its disabled value, so the empty TOML document
/// is the do-nothing baseline. Load from TOML with
/// [`LeverSettings::from_toml_file`] or use a named preset via
/// [`LeverSettings::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeverSettings {
    /// Transit project selection.
    pub transit: TransitLevers,
    /// Bus network levers.
    pub bus: BusLevers,
    /// Cycling mode-share lever.
    pub cycling: CyclingLevers,
    /// Light-vehicle fleet levers.
    pub car: CarLevers,
    /// Travel-demand levers.
    pub trips: TripLevers,
}

/// Transit project selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitLevers {
    /// Identifiers of the projects assumed completed and in service by
    /// the scenario year. Empty means no new projects.
    pub projects: Vec<String>,
}

/// Bus network levers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BusLevers {
    /// Proportional ridership increase over the 2030-baseline bus pkt
    /// (0.4 means a 40% increase). 0 disables the lever.
    pub ridership_increase: f64,
    /// Calendar year fleet electrification begins. 0 disables the lever;
    /// an enabled year must lie after the reference year and not after
    /// the scenario year.
    pub electrification_year: u32,
}

/// Cycling mode-share lever.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CyclingLevers {
    /// Target cycling mode-share index. NOTE: the convention differs
    /// from the other proportional levers. 1 holds the baseline share, 5
    /// means five times the baseline cycling pkt, and any value of 0 or
    /// below disables the lever entirely (it is not a 0x target).
    pub mode_share: f64,
}

/// Light-vehicle fleet levers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarLevers {
    /// Fraction of light-vehicle travel shifted to electric cars, in [0, 1].
    pub electrification: f64,
    /// Fractional reduction of petrol/diesel-car emissions per km from
    /// tightened import standards, in [0, 1].
    pub emission_improvement: f64,
    /// Average car occupancy override (people per vehicle). Absent means
    /// the baseline occupancy is kept.
    pub occupancy: Option<f64>,
}

/// Travel-demand levers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TripLevers {
    /// Percentage of trips not taken across every mode, in [0, 100].
    pub reduction_pct: f64,
}

/// Lever validation error with field path and constraint description.
#[derive(Debug)]
pub struct LeverError {
    /// Dotted field path (e.g. `"bus.ridership_increase"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for LeverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lever error: {}: {}", self.field, self.message)
    }
}

impl LeverSettings {
    /// Returns the baseline settings: every lever disabled.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the committed preset: interventions already planned for
    /// the region (city rail link, bus electrification from 2025, modest
    /// fleet electrification and emission-standard gains, bus ridership
    /// growing at the current trend).
    pub fn committed() -> Self {
        Self {
            transit: TransitLevers {
                projects: vec!["CRL".to_string()],
            },
            bus: BusLevers {
                ridership_increase: 0.4,
                electrification_year: 2025,
            },
            car: CarLevers {
                electrification: 0.1,
                emission_improvement: 0.1,
                occupancy: None,
            },
            ..Self::default()
        }
    }

    /// Returns the mode-shift preset: every candidate project built,
    /// double-trend bus ridership, a doubled cycling investment plan,
    /// and higher car occupancy.
    pub fn mode_shift() -> Self {
        Self {
            transit: TransitLevers {
                projects: vec![
                    "CRL".to_string(),
                    "A2B".to_string(),
                    "IsthmusCrosstown".to_string(),
                    "NorthwesternLightRail".to_string(),
                    "AirportLightRail".to_string(),
                    "AMETI".to_string(),
                ],
            },
            bus: BusLevers {
                ridership_increase: 0.8,
                electrification_year: 2022,
            },
            cycling: CyclingLevers { mode_share: 10.0 },
            car: CarLevers {
                electrification: 0.3,
                emission_improvement: 0.2,
                occupancy: Some(1.7),
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "committed", "mode_shift"];

    /// Loads settings from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `LeverError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, LeverError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "committed" => Ok(Self::committed()),
            "mode_shift" => Ok(Self::mode_shift()),
            _ => Err(LeverError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `LeverError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, LeverError> {
        let content = fs::read_to_string(path).map_err(|e| LeverError {
            field: "levers".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `LeverError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, LeverError> {
        toml::from_str(s).map_err(|e| LeverError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates every lever against its declared domain.
    ///
    /// Returns an empty vector when all settings are valid. Project-id
    /// existence is checked later against the project table, not here.
    pub fn validate(&self) -> Vec<LeverError> {
        let mut errors = Vec::new();

        for (i, id) in self.transit.projects.iter().enumerate() {
            if id.is_empty() {
                errors.push(LeverError {
                    field: format!("transit.projects[{i}]"),
                    message: "project id must not be empty".into(),
                });
            }
        }

        let b = &self.bus;
        if !b.ridership_increase.is_finite() || b.ridership_increase < 0.0 {
            errors.push(LeverError {
                field: "bus.ridership_increase".into(),
                message: "must be a finite value >= 0".into(),
            });
        }
        if b.electrification_year != 0
            && (b.electrification_year <= ELECTRIFICATION_REFERENCE_YEAR
                || b.electrification_year > SCENARIO_YEAR)
        {
            errors.push(LeverError {
                field: "bus.electrification_year".into(),
                message: format!(
                    "must be 0 or a year in ({ELECTRIFICATION_REFERENCE_YEAR}, {SCENARIO_YEAR}]"
                ),
            });
        }

        if !self.cycling.mode_share.is_finite() || self.cycling.mode_share < 0.0 {
            errors.push(LeverError {
                field: "cycling.mode_share".into(),
                message: "must be a finite value >= 0".into(),
            });
        }

        let c = &self.car;
        if !c.electrification.is_finite() || !(0.0..=1.0).contains(&c.electrification) {
            errors.push(LeverError {
                field: "car.electrification".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if !c.emission_improvement.is_finite() || !(0.0..=1.0).contains(&c.emission_improvement) {
            errors.push(LeverError {
                field: "car.emission_improvement".into(),
                message: "must be in [0.0, 1.0]".into(),
            });
        }
        if let Some(o) = c.occupancy {
            if !o.is_finite() || o <= 0.0 {
                errors.push(LeverError {
                    field: "car.occupancy".into(),
                    message: "must be a finite value > 0 when set".into(),
                });
            }
        }

        let t = &self.trips;
        if !t.reduction_pct.is_finite() || !(0.0..=100.0).contains(&t.reduction_pct) {
            errors.push(LeverError {
                field: "trips.reduction_pct".into(),
                message: "must be in [0.0, 100.0]".into(),
            });
        }

        errors
    }
}
