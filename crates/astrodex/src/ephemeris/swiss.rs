use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::time::{mean_sidereal_time_hours, Instant};
use crate::ephemeris::types::{Body, EclipticVector};
use chrono::{Datelike, Timelike};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, julday, set_ephe_path};

// Swiss Ephemeris flags: SWIEPH (data files) | J2000 (equinox) | NONUT (mean ecliptic)
const FLAGS: u32 = 2 | 32 | 64;

/// Swiss Ephemeris planet code for a body.
fn planet_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
    }
}

/// Provider backed by Swiss Ephemeris data files.
pub struct SwissEphemeris {
    ephemeris_path: PathBuf,
}

impl SwissEphemeris {
    /// Create a provider; the path falls back to `SWISS_EPHEMERIS_PATH` and
    /// then to the usual system location.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        set_ephe_path(&path.to_string_lossy());
        log::debug!("Swiss Ephemeris data path: {}", path.display());
        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn path(&self) -> &PathBuf {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemeris {
    fn name(&self) -> &str {
        "swiss"
    }

    fn geo_vector(&self, body: Body, instant: Instant) -> Result<EclipticVector, EphemerisError> {
        let result = calc_ut(swiss_julian_day(instant), planet_code(body), FLAGS).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.to_string(),
                instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(EclipticVector::from_spherical(out[0], out[1], out[2]))
    }

    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError> {
        Ok(mean_sidereal_time_hours(swiss_julian_day(instant)))
    }
}

fn swiss_julian_day(instant: Instant) -> f64 {
    let dt = instant.utc();
    let hour_decimal =
        f64::from(dt.hour()) + f64::from(dt.minute()) / 60.0 + f64::from(dt.second()) / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
