use crate::angles::normalize_degrees;
use crate::chart::positions::PlanetPositions;
use crate::chart::{ChartError, Sect};
use crate::ephemeris::{Body, EphemerisProvider, Instant, Observer};
use crate::western::Sign;
use serde::{Deserialize, Serialize};

/// Mean obliquity of the ecliptic used for the ascendant.
pub const MEAN_OBLIQUITY: f64 = 23.4397;

/// Sign and degree of an ecliptic longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignPlacement {
    pub sign: Sign,
    pub sign_index: usize,
    pub degree_in_sign: f64,
    /// e.g. `Capricorn 7°34'`
    pub formatted: String,
}

pub fn to_sign(longitude: f64) -> SignPlacement {
    let longitude = normalize_degrees(longitude);
    let sign_index = ((longitude / 30.0) as usize).min(11);
    let sign = Sign::from_index(sign_index);
    // Division can round up onto the next cusp
    let degree_in_sign = (longitude - sign_index as f64 * 30.0).max(0.0);
    let whole = degree_in_sign.floor();
    let minutes = ((degree_in_sign % 1.0) * 60.0).floor();

    SignPlacement {
        sign,
        sign_index,
        degree_in_sign,
        formatted: format!("{} {}°{}'", sign, whole as u32, minutes as u32),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ascendant {
    pub longitude: f64,
    /// True when the sidereal time was unavailable and the hour-angle
    /// approximation was used
    pub degraded: bool,
}

/// Ascendant from Greenwich sidereal time (hours) and the observer's
/// longitude.
pub fn ascendant_from_sidereal_time(gast_hours: f64, observer_longitude: f64) -> f64 {
    let lst = (gast_hours + observer_longitude / 15.0).rem_euclid(24.0) * 15.0;
    let ramc = lst.to_radians();
    let obliquity = MEAN_OBLIQUITY.to_radians();
    let asc = (ramc.sin() * obliquity.cos()).atan2(ramc.cos()).to_degrees();
    normalize_degrees(asc + 180.0)
}

/// Ascendant for an instant and place. Always produces a value: when the
/// provider cannot give sidereal time, falls back to `hour × 15°`.
pub fn ascendant(provider: &dyn EphemerisProvider, instant: Instant, observer: &Observer) -> Ascendant {
    match provider.sidereal_time(instant) {
        Ok(gast) if gast.is_finite() => Ascendant {
            longitude: ascendant_from_sidereal_time(gast, observer.longitude),
            degraded: false,
        },
        result => {
            let reason = match result {
                Err(e) => e.to_string(),
                Ok(value) => format!("non-finite sidereal time {value}"),
            };
            log::warn!("Ascendant at {} approximated from clock time: {}", instant, reason);
            Ascendant {
                longitude: normalize_degrees(instant.local_hour_of_day() * 15.0),
                degraded: true,
            }
        }
    }
}

/// Equal-house cusps; cusp 1 is the ascendant itself.
pub fn house_cusps(ascendant: f64) -> [f64; 12] {
    std::array::from_fn(|i| normalize_degrees(ascendant + 30.0 * i as f64))
}

/// House (1-12) containing `longitude`.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> usize {
    let offset = normalize_degrees(longitude - cusps[0]);
    ((offset / 30.0) as usize).min(11) + 1
}

/// Diurnal when the Sun lies less than 180° past the ascendant.
pub fn sect(sun_longitude: f64, ascendant: f64) -> Sect {
    let sun_relative = normalize_degrees(sun_longitude - ascendant + 360.0);
    if sun_relative < 180.0 {
        Sect::Diurnal
    } else {
        Sect::Nocturnal
    }
}

pub fn sect_of_positions(positions: &PlanetPositions, ascendant: f64) -> Result<Sect, ChartError> {
    let sun = positions
        .get(&Body::Sun)
        .ok_or(ChartError::MissingBody { body: Body::Sun })?;
    Ok(sect(sun.longitude, ascendant))
}

/// House in which each body has its joy.
pub fn joy_house(body: Body) -> usize {
    match body {
        Body::Mercury => 1,
        Body::Moon => 3,
        Body::Venus => 5,
        Body::Mars => 6,
        Body::Sun => 9,
        Body::Jupiter => 11,
        Body::Saturn => 12,
    }
}

/// True when the body stands in the equal house of its joy.
pub fn rejoices(body: Body, longitude: f64, ascendant: f64) -> bool {
    let start = normalize_degrees(ascendant + (joy_house(body) - 1) as f64 * 30.0);
    normalize_degrees(longitude - start) < 30.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_degrees_and_minutes() {
        let placement = to_sign(277.5);
        assert_eq!(placement.sign, Sign::Capricorn);
        assert_eq!(placement.sign_index, 9);
        assert!((placement.degree_in_sign - 7.5).abs() < 1e-9);
        assert_eq!(placement.formatted, "Capricorn 7°30'");
    }

    #[test]
    fn sign_index_and_degree_stay_in_range() {
        for i in 0..7200 {
            let lon = -720.0 + i as f64 * 0.2 + 1e-13;
            let placement = to_sign(lon);
            assert!(placement.sign_index < 12);
            assert!((0.0..30.0).contains(&placement.degree_in_sign), "{lon}");
        }
    }

    #[test]
    fn cusps_step_thirty_degrees_from_raw_ascendant() {
        let cusps = house_cusps(345.25);
        assert_eq!(cusps[0], 345.25);
        assert!((cusps[1] - 15.25).abs() < 1e-9);
        assert!((cusps[11] - 315.25).abs() < 1e-9);
        for i in 0..12 {
            let step = normalize_degrees(cusps[(i + 1) % 12] - cusps[i]);
            assert!((step - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn houses_wrap_past_aries() {
        let cusps = house_cusps(350.0);
        assert_eq!(house_of(355.0, &cusps), 1);
        assert_eq!(house_of(10.0, &cusps), 1);
        assert_eq!(house_of(20.0, &cusps), 2);
        assert_eq!(house_of(349.9, &cusps), 12);
    }

    #[test]
    fn sect_uses_literal_comparison() {
        assert_eq!(sect(100.0, 10.0), Sect::Diurnal);
        assert_eq!(sect(10.0, 100.0), Sect::Nocturnal);
        assert_eq!(sect(190.0, 10.0), Sect::Nocturnal);
        assert_eq!(sect(180.0, 0.0), Sect::Nocturnal);
    }

    #[test]
    fn ascendant_from_known_sidereal_time() {
        // RAMC 0° gives an ascendant of 180° with this formula
        assert!((ascendant_from_sidereal_time(0.0, 0.0) - 180.0).abs() < 1e-9);
        // RAMC 90°: atan2(cos ε, 0) = 90°, plus 180°
        assert!((ascendant_from_sidereal_time(6.0, 0.0) - 270.0).abs() < 1e-9);
        // Observer longitude shifts local sidereal time
        assert!((ascendant_from_sidereal_time(0.0, 90.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn joys() {
        // Ascendant 0°: Sun's joy is the 9th house, 240°-270°
        assert!(rejoices(Body::Sun, 250.0, 0.0));
        assert!(!rejoices(Body::Sun, 280.0, 0.0));
        // Saturn's 12th house wraps below the ascendant
        assert!(rejoices(Body::Saturn, 5.0, 20.0));
        assert!(rejoices(Body::Mercury, 20.0, 20.0));
    }
}
