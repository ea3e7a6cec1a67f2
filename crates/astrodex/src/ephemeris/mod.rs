pub mod analytic;
pub mod frames;
pub mod provider;
#[cfg(feature = "swisseph")]
pub mod swiss;
pub mod time;
pub mod types;

pub use analytic::AnalyticEphemeris;
pub use frames::{ecliptic_of_date, precession_in_longitude};
pub use provider::{from_settings, EphemerisError, EphemerisProvider};
#[cfg(feature = "swisseph")]
pub use swiss::SwissEphemeris;
pub use time::{mean_sidereal_time_hours, Instant, InstantError};
pub use types::{
    Body, BodyPosition, EclipticVector, EphemerisBackend, EphemerisSettings, Observer, UnknownBody,
};
