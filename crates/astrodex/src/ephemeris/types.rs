use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The seven traditional bodies. Declaration order (luminaries first) is the
/// order used for pair iteration and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    pub const ALL: [Body; 7] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }

    /// Mean geocentric daily motion in degrees per day.
    pub fn average_daily_motion(&self) -> f64 {
        match self {
            Body::Sun => 0.9856,
            Body::Moon => 13.176,
            Body::Mercury => 1.383,
            Body::Venus => 1.602,
            Body::Mars => 0.524,
            Body::Jupiter => 0.083,
            Body::Saturn => 0.034,
        }
    }

    pub fn is_benefic(&self) -> bool {
        matches!(self, Body::Venus | Body::Jupiter)
    }

    pub fn is_malefic(&self) -> bool {
        matches!(self, Body::Mars | Body::Saturn)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBody(pub String);

impl fmt::Display for UnknownBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown body: {}", self.0)
    }
}

impl std::error::Error for UnknownBody {}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}

/// Observer location in degrees. Elevation is always zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
}

impl Observer {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Geocentric cartesian position in AU, referred to the mean ecliptic and
/// equinox of J2000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EclipticVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn from_spherical(longitude_deg: f64, latitude_deg: f64, distance: f64) -> Self {
        let (lon, lat) = (longitude_deg.to_radians(), latitude_deg.to_radians());
        Self {
            x: distance * lat.cos() * lon.cos(),
            y: distance * lat.cos() * lon.sin(),
            z: distance * lat.sin(),
        }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Ecliptic position of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360), ecliptic of date
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    /// Geocentric distance in AU
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisBackend {
    /// Built-in mean-element ephemeris, no data files needed
    #[default]
    Analytic,
    /// Swiss Ephemeris (requires the `swisseph` feature and data files)
    Swiss,
}

/// Settings for constructing an ephemeris provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EphemerisSettings {
    #[serde(default)]
    pub backend: EphemerisBackend,
    /// Data directory for file-backed providers
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_parses_case_insensitively() {
        assert_eq!("mars".parse::<Body>(), Ok(Body::Mars));
        assert_eq!(" Saturn ".parse::<Body>(), Ok(Body::Saturn));
        assert!("pluto".parse::<Body>().is_err());
    }

    #[test]
    fn spherical_round_trip_keeps_distance() {
        let v = EclipticVector::from_spherical(123.0, -4.0, 2.5);
        assert!((v.length() - 2.5).abs() < 1e-12);
    }
}
