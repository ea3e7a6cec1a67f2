use crate::angles::normalize_degrees;
use crate::ephemeris::time::Instant;
use crate::ephemeris::types::{BodyPosition, EclipticVector};

/// General precession in longitude from J2000 to the date, in degrees.
pub fn precession_in_longitude(centuries: f64) -> f64 {
    1.396_971_278 * centuries + 0.000_308_889 * centuries * centuries
}

/// Convert a J2000 geocentric vector into longitude, latitude and distance
/// on the ecliptic of `instant`.
pub fn ecliptic_of_date(vector: EclipticVector, instant: Instant) -> BodyPosition {
    let distance = vector.length();
    let longitude_j2000 = vector.y.atan2(vector.x).to_degrees();
    let latitude = if distance > 0.0 {
        (vector.z / distance).clamp(-1.0, 1.0).asin().to_degrees()
    } else {
        0.0
    };

    BodyPosition {
        longitude: normalize_degrees(
            longitude_j2000 + precession_in_longitude(instant.centuries_since_j2000()),
        ),
        latitude,
        distance,
    }
}
