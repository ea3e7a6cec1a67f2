//! Relationship of a body to the Sun: combustion bands, morning or evening
//! rising, and the combined solar phase.

use crate::chart::positions::{Direction, MotionState, SpeedCategory, StationType};
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 17 arcminutes
pub const CAZIMI_ORB: f64 = 0.283;
pub const COMBUST_ORB: f64 = 8.5;
pub const UNDER_BEAMS_ORB: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Cazimi,
    Combust,
    #[serde(rename = "Under Beams")]
    UnderBeams,
    Visible,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Cazimi => "Cazimi",
            Visibility::Combust => "Combust",
            Visibility::UnderBeams => "Under Beams",
            Visibility::Visible => "Visible",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombustionState {
    pub separation_from_sun: f64,
    pub is_combust: bool,
    pub is_cazimi: bool,
    pub is_under_beams: bool,
    /// Tightest band the separation falls in
    pub visibility: Visibility,
}

pub fn combustion(body_longitude: f64, sun_longitude: f64) -> CombustionState {
    let separation = (((body_longitude - sun_longitude + 540.0).rem_euclid(360.0)) - 180.0).abs();

    let visibility = if separation <= CAZIMI_ORB {
        Visibility::Cazimi
    } else if separation <= COMBUST_ORB {
        Visibility::Combust
    } else if separation <= UNDER_BEAMS_ORB {
        Visibility::UnderBeams
    } else {
        Visibility::Visible
    };

    CombustionState {
        separation_from_sun: separation,
        is_combust: separation <= COMBUST_ORB,
        is_cazimi: separation <= CAZIMI_ORB,
        is_under_beams: separation <= UNDER_BEAMS_ORB,
        visibility,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MorningEvening {
    #[serde(rename = "Morning Star")]
    MorningStar,
    #[serde(rename = "Evening Star")]
    EveningStar,
    /// Exactly on the Sun
    None,
    /// Only Mercury and Venus are classified
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl fmt::Display for MorningEvening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MorningEvening::MorningStar => "Morning Star",
            MorningEvening::EveningStar => "Evening Star",
            MorningEvening::None => "None",
            MorningEvening::NotApplicable => "N/A",
        })
    }
}

/// Evening star when east of the Sun (rising after it), morning star when
/// west of it.
pub fn morning_evening_star(body_longitude: f64, sun_longitude: f64) -> MorningEvening {
    let diff = (body_longitude - sun_longitude + 360.0).rem_euclid(360.0);
    if diff > 0.0 && diff < 180.0 {
        MorningEvening::EveningStar
    } else if diff >= 180.0 {
        MorningEvening::MorningStar
    } else {
        MorningEvening::None
    }
}

/// `morning_evening_star` for the inferior planets, `NotApplicable` for the
/// rest.
pub fn morning_evening_for(body: Body, body_longitude: f64, sun_longitude: f64) -> MorningEvening {
    match body {
        Body::Mercury | Body::Venus => morning_evening_star(body_longitude, sun_longitude),
        _ => MorningEvening::NotApplicable,
    }
}

/// Direction as shown on the solar phase line: a station overrides the
/// plain direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseDirection {
    Direct,
    Retrograde,
    Stationary,
    #[serde(rename = "Direct Station")]
    DirectStation,
    #[serde(rename = "Retrograde Station")]
    RetrogradeStation,
}

impl PhaseDirection {
    pub fn from_motion(motion: &MotionState) -> Self {
        match (motion.is_stationary, motion.station_type, motion.direction) {
            (true, StationType::DirectStation, _) => PhaseDirection::DirectStation,
            (true, StationType::RetrogradeStation, _) => PhaseDirection::RetrogradeStation,
            (true, StationType::None, _) => PhaseDirection::Stationary,
            (false, _, Direction::Direct) => PhaseDirection::Direct,
            (false, _, Direction::Retrograde) => PhaseDirection::Retrograde,
        }
    }
}

impl fmt::Display for PhaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PhaseDirection::Direct => "Direct",
            PhaseDirection::Retrograde => "Retrograde",
            PhaseDirection::Stationary => "Stationary",
            PhaseDirection::DirectStation => "Direct Station",
            PhaseDirection::RetrogradeStation => "Retrograde Station",
        })
    }
}

/// Motion, combustion and morning/evening status of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarPhase {
    pub body: Body,
    pub direction: PhaseDirection,
    pub motion: MotionState,
    pub combustion: CombustionState,
    pub morning_evening: MorningEvening,
}

impl SolarPhase {
    pub fn speed_category(&self) -> SpeedCategory {
        self.motion.speed_category
    }
}

pub fn solar_phase(body: Body, motion: MotionState, body_longitude: f64, sun_longitude: f64) -> SolarPhase {
    SolarPhase {
        body,
        direction: PhaseDirection::from_motion(&motion),
        motion,
        combustion: combustion(body_longitude, sun_longitude),
        morning_evening: morning_evening_for(body, body_longitude, sun_longitude),
    }
}
