//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use astrodex::ephemeris::time::J2000_JD;
use astrodex::ephemeris::{precession_in_longitude, EclipticVector, EphemerisError};
use astrodex::{Body, EphemerisProvider, Instant};
use chrono::{TimeZone, Utc};
use std::collections::BTreeMap;

/// Bodies moving uniformly from fixed longitudes at J2000, with a constant
/// sidereal time. Longitudes come back exactly as given after precession.
pub struct FixedSky {
    bodies: BTreeMap<Body, (f64, f64)>,
    sidereal_hours: Option<f64>,
}

impl FixedSky {
    /// `(body, longitude at J2000, degrees per day)`
    pub fn new(bodies: &[(Body, f64, f64)], sidereal_hours: f64) -> Self {
        Self {
            bodies: bodies.iter().map(|&(b, lon, speed)| (b, (lon, speed))).collect(),
            sidereal_hours: Some(sidereal_hours),
        }
    }

    pub fn without_sidereal_time(mut self) -> Self {
        self.sidereal_hours = None;
        self
    }
}

impl EphemerisProvider for FixedSky {
    fn name(&self) -> &str {
        "fixed"
    }

    fn geo_vector(&self, body: Body, instant: Instant) -> Result<EclipticVector, EphemerisError> {
        let (longitude, speed) =
            self.bodies
                .get(&body)
                .copied()
                .ok_or_else(|| EphemerisError::CalculationFailed {
                    body: body.to_string(),
                    instant,
                    message: "not in fixture".to_string(),
                })?;
        let days = instant.julian_day() - J2000_JD;
        let of_date = longitude + speed * days;
        let j2000 = of_date - precession_in_longitude(instant.centuries_since_j2000());
        Ok(EclipticVector::from_spherical(j2000, 0.0, 1.0))
    }

    fn sidereal_time(&self, _instant: Instant) -> Result<f64, EphemerisError> {
        self.sidereal_hours.ok_or_else(|| EphemerisError::Unavailable {
            message: "no sidereal time in fixture".to_string(),
        })
    }
}

pub fn j2000() -> Instant {
    Instant::from_utc(Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap())
}

/// Sidereal time putting the ascendant near 15° Libra at Greenwich.
pub const LIBRA_RISING_HOURS: f64 = 1.0854;

/// A night chart with Libra rising:
/// Sun 10° Cancer, Moon 10° Scorpio, Mercury 20° Gemini, Venus 10° Taurus,
/// Mars 10° Pisces, Jupiter 10° Virgo, Saturn 10° Capricorn.
pub fn night_sky() -> FixedSky {
    FixedSky::new(
        &[
            (Body::Sun, 100.0, 1.0),
            (Body::Moon, 220.0, 13.0),
            (Body::Mercury, 80.0, 1.5),
            (Body::Venus, 40.0, 1.2),
            (Body::Mars, 340.0, 0.7),
            (Body::Jupiter, 160.0, 0.1),
            (Body::Saturn, 280.0, 0.05),
        ],
        LIBRA_RISING_HOURS,
    )
}
