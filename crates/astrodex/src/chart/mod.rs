//! Chart derivation: positions and motion, signs and houses, solar phase,
//! and the complete-chart calculator that ties them together.

pub mod complete;
pub mod houses;
pub mod positions;
pub mod solar;

use crate::ephemeris::{Body, EphemerisError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use complete::{ChartCalculator, ChartPlanet, ChartResult, HouseSystem};
pub use houses::{
    ascendant, house_cusps, house_of, joy_house, rejoices, sect, sect_of_positions, to_sign,
    Ascendant, SignPlacement,
};
pub use positions::{
    classify_motion, speed_category, Direction, MotionState, PlanetPositions, PositionDeriver,
    SpeedCategory, StationType,
};
pub use solar::{
    combustion, morning_evening_for, morning_evening_star, solar_phase, CombustionState,
    MorningEvening, PhaseDirection, SolarPhase, Visibility,
};

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to calculate planetary positions: {0}")]
    Ephemeris(#[from] EphemerisError),
    #[error("Position for {body} missing from chart data")]
    MissingBody { body: Body },
}

/// Day or night chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sect {
    Diurnal,
    Nocturnal,
}

impl Sect {
    pub fn is_day(&self) -> bool {
        matches!(self, Sect::Diurnal)
    }
}

impl fmt::Display for Sect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sect::Diurnal => "Diurnal",
            Sect::Nocturnal => "Nocturnal",
        })
    }
}
