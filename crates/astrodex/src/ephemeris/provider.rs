use crate::ephemeris::analytic::AnalyticEphemeris;
use crate::ephemeris::time::Instant;
use crate::ephemeris::types::{Body, EclipticVector, EphemerisBackend, EphemerisSettings};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris provider unavailable: {message}")]
    Unavailable { message: String },
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at {instant}: {message}")]
    CalculationFailed {
        body: String,
        instant: Instant,
        message: String,
    },
}

/// Source of raw astronomical positions.
///
/// Implementations are injected into the position deriver; the deriver
/// itself never probes for a global library.
pub trait EphemerisProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Geocentric position of `body`, in AU, mean ecliptic and equinox of J2000.
    fn geo_vector(&self, body: Body, instant: Instant) -> Result<EclipticVector, EphemerisError>;

    /// Greenwich sidereal time in hours `[0, 24)`.
    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError>;
}

/// Build the provider named by `settings`.
pub fn from_settings(
    settings: &EphemerisSettings,
) -> Result<Arc<dyn EphemerisProvider>, EphemerisError> {
    match settings.backend {
        EphemerisBackend::Analytic => Ok(Arc::new(AnalyticEphemeris::new())),
        EphemerisBackend::Swiss => swiss_provider(settings),
    }
}

#[cfg(feature = "swisseph")]
fn swiss_provider(
    settings: &EphemerisSettings,
) -> Result<Arc<dyn EphemerisProvider>, EphemerisError> {
    let provider = crate::ephemeris::swiss::SwissEphemeris::new(settings.path.clone())?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "swisseph"))]
fn swiss_provider(
    _settings: &EphemerisSettings,
) -> Result<Arc<dyn EphemerisProvider>, EphemerisError> {
    Err(EphemerisError::Unavailable {
        message: "the swiss backend requires building with the `swisseph` feature".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analytic_backend_is_default() {
        let provider = from_settings(&EphemerisSettings::default()).unwrap();
        assert_eq!(provider.name(), "analytic");
    }

    #[cfg(not(feature = "swisseph"))]
    #[test]
    fn swiss_without_feature_is_a_configuration_error() {
        let settings = EphemerisSettings {
            backend: EphemerisBackend::Swiss,
            path: None,
        };
        assert!(matches!(
            from_settings(&settings),
            Err(EphemerisError::Unavailable { .. })
        ));
    }
}
