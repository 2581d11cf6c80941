//! Closed mode enumeration and the fixed per-mode value record.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::Deserialize;

/// Travel mode in the regional model.
///
/// The enumeration is closed: modes are never created or destroyed at
/// runtime, and a request for a nonexistent mode is a type error rather
/// than a runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Petrol and diesel cars.
    PassengerLight,
    /// Battery-electric cars.
    ElectricLight,
    Walking,
    Cycling,
    DieselBus,
    ElectricBus,
    HeavyRail,
    LightRail,
}

impl Mode {
    /// Number of modes.
    pub const COUNT: usize = 8;

    /// Every mode, in canonical column order.
    pub const ALL: [Mode; Mode::COUNT] = [
        Mode::PassengerLight,
        Mode::ElectricLight,
        Mode::Walking,
        Mode::Cycling,
        Mode::DieselBus,
        Mode::ElectricBus,
        Mode::HeavyRail,
        Mode::LightRail,
    ];

    /// Private and active modes: the donor pool for mode-shift levers.
    pub const PRIVATE: [Mode; 4] = [
        Mode::PassengerLight,
        Mode::ElectricLight,
        Mode::Walking,
        Mode::Cycling,
    ];

    /// Public transit modes.
    pub const TRANSIT: [Mode; 4] = [
        Mode::DieselBus,
        Mode::ElectricBus,
        Mode::HeavyRail,
        Mode::LightRail,
    ];

    /// Identifier used by the CSV table contract.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::PassengerLight => "passenger_light",
            Mode::ElectricLight => "electric_light",
            Mode::Walking => "walking",
            Mode::Cycling => "cycling",
            Mode::DieselBus => "diesel_bus",
            Mode::ElectricBus => "electric_bus",
            Mode::HeavyRail => "heavy_rail",
            Mode::LightRail => "light_rail",
        }
    }

    /// Parses a table-contract identifier.
    pub fn from_name(name: &str) -> Option<Mode> {
        Mode::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// True for the two light-vehicle modes, whose vehicle-distance
    /// follows passenger-distance via average car occupancy.
    pub fn is_light_vehicle(self) -> bool {
        matches!(self, Mode::PassengerLight | Mode::ElectricLight)
    }

    /// True for transit modes.
    pub fn is_transit(self) -> bool {
        matches!(
            self,
            Mode::DieselBus | Mode::ElectricBus | Mode::HeavyRail | Mode::LightRail
        )
    }

    fn idx(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named row of per-mode values: a fixed record indexed by [`Mode`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModeVec([f64; Mode::COUNT]);

impl ModeVec {
    /// All-zero row.
    pub const ZERO: ModeVec = ModeVec([0.0; Mode::COUNT]);

    /// Builds a row by evaluating `f` for every mode in canonical order.
    pub fn from_fn(mut f: impl FnMut(Mode) -> f64) -> Self {
        let mut v = ModeVec::ZERO;
        for m in Mode::ALL {
            v[m] = f(m);
        }
        v
    }

    /// Sum across all modes.
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Iterates `(mode, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, f64)> + '_ {
        Mode::ALL.into_iter().map(|m| (m, self[m]))
    }
}

impl Index<Mode> for ModeVec {
    type Output = f64;

    fn index(&self, mode: Mode) -> &f64 {
        &self.0[mode.idx()]
    }
}

impl IndexMut<Mode> for ModeVec {
    fn index_mut(&mut self, mode: Mode) -> &mut f64 {
        &mut self.0[mode.idx()]
    }
}
