//! Place-name lookup behind a pluggable backend, with request throttling
//! and an offline cache of well-known cities.

use async_trait::async_trait;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeocodingError {
    #[error("Location string cannot be empty")]
    EmptyQuery,
    #[error("Latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
    #[error("No results found for location: \"{query}\"")]
    NotFound { query: String },
    #[error("Geocoding failed: {message}")]
    Backend { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl GeoLocation {
    fn cached(latitude: f64, longitude: f64, display_name: &str) -> Self {
        Self {
            latitude,
            longitude,
            display_name: display_name.to_string(),
            city: None,
            country: None,
        }
    }
}

const FALLBACK_CITIES: &[(&str, f64, f64, &str)] = &[
    ("new york", 40.7128, -74.0060, "New York, NY, USA"),
    ("new york, ny", 40.7128, -74.0060, "New York, NY, USA"),
    ("los angeles", 34.0522, -118.2437, "Los Angeles, CA, USA"),
    ("los angeles, ca", 34.0522, -118.2437, "Los Angeles, CA, USA"),
    ("chicago", 41.8781, -87.6298, "Chicago, IL, USA"),
    ("chicago, il", 41.8781, -87.6298, "Chicago, IL, USA"),
    ("houston", 29.7604, -95.3698, "Houston, TX, USA"),
    ("miami", 25.7617, -80.1918, "Miami, FL, USA"),
    ("seattle", 47.6062, -122.3321, "Seattle, WA, USA"),
    ("san francisco", 37.7749, -122.4194, "San Francisco, CA, USA"),
    ("denver", 39.7392, -104.9903, "Denver, CO, USA"),
    ("atlanta", 33.7490, -84.3880, "Atlanta, GA, USA"),
    ("boston", 42.3601, -71.0589, "Boston, MA, USA"),
    ("phoenix", 33.4484, -112.0740, "Phoenix, AZ, USA"),
    ("dallas", 32.7767, -96.7970, "Dallas, TX, USA"),
    ("orange", 33.7879, -117.8531, "Orange, CA, USA"),
    ("orange, ca", 33.7879, -117.8531, "Orange, CA, USA"),
    ("london", 51.5074, -0.1278, "London, UK"),
    ("paris", 48.8566, 2.3522, "Paris, France"),
    ("tokyo", 35.6762, 139.6503, "Tokyo, Japan"),
    ("sydney", -33.8688, 151.2093, "Sydney, Australia"),
    ("berlin", 52.5200, 13.4050, "Berlin, Germany"),
    ("rome", 41.9028, 12.4964, "Rome, Italy"),
    ("madrid", 40.4168, -3.7038, "Madrid, Spain"),
    ("toronto", 43.6532, -79.3832, "Toronto, Canada"),
    ("vancouver", 49.2827, -123.1207, "Vancouver, Canada"),
    ("mexico city", 19.4326, -99.1332, "Mexico City, Mexico"),
    ("sao paulo", -23.5505, -46.6333, "São Paulo, Brazil"),
    ("mumbai", 19.0760, 72.8777, "Mumbai, India"),
    ("beijing", 39.9042, 116.4074, "Beijing, China"),
    ("shanghai", 31.2304, 121.4737, "Shanghai, China"),
];

lazy_static! {
    static ref LOCATION_CACHE: HashMap<&'static str, GeoLocation> = FALLBACK_CITIES
        .iter()
        .map(|&(key, lat, lon, name)| (key, GeoLocation::cached(lat, lon, name)))
        .collect();
}

/// Fallback entry for `query`, matched lower-cased and trimmed.
pub fn cached_location(query: &str) -> Option<GeoLocation> {
    LOCATION_CACHE.get(query.trim().to_lowercase().as_str()).cloned()
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), GeocodingError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GeocodingError::InvalidLatitude(latitude));
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GeocodingError::InvalidLongitude(longitude));
    }
    Ok(())
}

/// Whole-hour UTC offset from longitude, 15° per hour.
pub fn estimate_utc_offset(longitude: f64) -> i32 {
    (longitude / 15.0).round() as i32
}

/// A place-name search service. Results are ordered best first.
#[async_trait]
pub trait GeocodingBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeoLocation>, GeocodingError>;
}

/// Backend with no data; only the fallback cache answers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineBackend;

#[async_trait]
impl GeocodingBackend for OfflineBackend {
    async fn search(&self, _query: &str) -> Result<Vec<GeoLocation>, GeocodingError> {
        Ok(Vec::new())
    }
}

pub struct GeocodingClient<B> {
    backend: B,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl<B: GeocodingBackend> GeocodingClient<B> {
    pub fn new(backend: B) -> Self {
        Self::with_min_interval(backend, DEFAULT_MIN_INTERVAL)
    }

    pub fn with_min_interval(backend: B, min_interval: Duration) -> Self {
        Self {
            backend,
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Resolve `query` to coordinates. When the backend fails or finds
    /// nothing, a cached city with the same name is used instead.
    pub async fn geocode(&self, query: &str) -> Result<GeoLocation, GeocodingError> {
        if query.trim().is_empty() {
            return Err(GeocodingError::EmptyQuery);
        }
        let cached = cached_location(query);

        self.enforce_rate_limit().await;

        match self.backend.search(query).await {
            Ok(results) => match results.into_iter().next() {
                Some(found) => Ok(found),
                None => match cached {
                    Some(location) => {
                        log::warn!("No results for \"{}\", using cached location", query);
                        Ok(location)
                    }
                    None => Err(GeocodingError::NotFound {
                        query: query.to_string(),
                    }),
                },
            },
            Err(err) => match cached {
                Some(location) => {
                    log::warn!("{}; using cached location for \"{}\"", err, query);
                    Ok(location)
                }
                None => Err(err),
            },
        }
    }

    async fn enforce_rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedBackend {
        result: Result<Vec<GeoLocation>, GeocodingError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl GeocodingBackend for ScriptedBackend {
        async fn search(&self, _query: &str) -> Result<Vec<GeoLocation>, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn scripted(result: Result<Vec<GeoLocation>, GeocodingError>) -> ScriptedBackend {
        ScriptedBackend {
            result,
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let client = GeocodingClient::new(OfflineBackend);
        assert_eq!(client.geocode("   ").await, Err(GeocodingError::EmptyQuery));
    }

    #[tokio::test]
    async fn backend_result_wins_over_cache() {
        let found = GeoLocation::cached(1.0, 2.0, "Somewhere");
        let client = GeocodingClient::new(scripted(Ok(vec![found.clone()])));
        assert_eq!(client.geocode("London").await, Ok(found));
    }

    #[tokio::test(start_paused = true)]
    async fn falls_back_to_cache() {
        let client = GeocodingClient::new(scripted(Err(GeocodingError::Backend {
            message: "503".to_string(),
        })));
        let location = client.geocode("  New York ").await.unwrap();
        assert_eq!(location.display_name, "New York, NY, USA");

        let offline = GeocodingClient::new(OfflineBackend);
        assert!((offline.geocode("tokyo").await.unwrap().longitude - 139.6503).abs() < 1e-9);
        assert_eq!(
            offline.geocode("Atlantis").await,
            Err(GeocodingError::NotFound {
                query: "Atlantis".to_string()
            })
        );
    }

    #[tokio::test]
    async fn backend_error_without_cache() {
        let client = GeocodingClient::new(scripted(Err(GeocodingError::Backend {
            message: "timeout".to_string(),
        })));
        assert!(matches!(
            client.geocode("Atlantis").await,
            Err(GeocodingError::Backend { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn requests_are_spaced() {
        let client = GeocodingClient::new(scripted(Ok(Vec::new())));
        let start = Instant::now();
        let _ = client.geocode("paris").await;
        let _ = client.geocode("paris").await;
        let _ = client.geocode("paris").await;
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(client.backend.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn coordinates_and_offsets() {
        assert!(validate_coordinates(51.5, -0.12).is_ok());
        assert_eq!(validate_coordinates(91.0, 0.0), Err(GeocodingError::InvalidLatitude(91.0)));
        assert!(validate_coordinates(0.0, f64::NAN).is_err());
        assert_eq!(estimate_utc_offset(-118.24), -8);
        assert_eq!(estimate_utc_offset(139.65), 9);
        assert_eq!(estimate_utc_offset(-0.12), 0);
    }
}
