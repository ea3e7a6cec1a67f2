//! Built-in low-precision ephemeris.
//!
//! Planets use Keplerian mean elements with linear secular rates (JPL
//! "Approximate Positions of the Planets", 1800-2050 AD table); the Sun is
//! the reflected Earth-Moon barycenter. The Moon uses the principal periodic
//! terms of the ELP-2000/82 lunar theory as tabulated by Meeus. Accuracy is
//! on the order of arcminutes for the planets and a few tenths of a degree
//! for the Moon, which is ample for sign, aspect and dignity work.

use crate::ephemeris::frames::precession_in_longitude;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::time::{mean_sidereal_time_hours, Instant};
use crate::ephemeris::types::{Body, EclipticVector};

const AU_KM: f64 = 149_597_870.7;
const KEPLER_TOLERANCE: f64 = 1e-12;
const KEPLER_MAX_ITERATIONS: usize = 30;

/// Mean orbital elements at J2000 and their rates per Julian century.
struct OrbitalElements {
    semi_major_axis: (f64, f64),
    eccentricity: (f64, f64),
    inclination: (f64, f64),
    mean_longitude: (f64, f64),
    perihelion_longitude: (f64, f64),
    node_longitude: (f64, f64),
}

const MERCURY: OrbitalElements = OrbitalElements {
    semi_major_axis: (0.387_099_27, 0.000_000_37),
    eccentricity: (0.205_635_93, 0.000_019_06),
    inclination: (7.004_979_02, -0.005_947_49),
    mean_longitude: (252.250_323_50, 149_472.674_111_75),
    perihelion_longitude: (77.457_796_28, 0.160_476_89),
    node_longitude: (48.330_765_93, -0.125_340_81),
};

const VENUS: OrbitalElements = OrbitalElements {
    semi_major_axis: (0.723_335_66, 0.000_003_90),
    eccentricity: (0.006_776_72, -0.000_041_07),
    inclination: (3.394_676_05, -0.000_788_90),
    mean_longitude: (181.979_099_50, 58_517.815_387_29),
    perihelion_longitude: (131.602_467_18, 0.002_683_29),
    node_longitude: (76.679_842_55, -0.277_694_18),
};

const EARTH_MOON_BARYCENTER: OrbitalElements = OrbitalElements {
    semi_major_axis: (1.000_002_61, 0.000_005_62),
    eccentricity: (0.016_711_23, -0.000_043_92),
    inclination: (-0.000_015_31, -0.012_946_68),
    mean_longitude: (100.464_571_66, 35_999.372_449_81),
    perihelion_longitude: (102.937_681_93, 0.323_273_64),
    node_longitude: (0.0, 0.0),
};

const MARS: OrbitalElements = OrbitalElements {
    semi_major_axis: (1.523_710_34, 0.000_018_47),
    eccentricity: (0.093_394_10, 0.000_078_82),
    inclination: (1.849_691_42, -0.008_131_31),
    mean_longitude: (-4.553_432_05, 19_140.302_684_99),
    perihelion_longitude: (-23.943_629_59, 0.444_410_88),
    node_longitude: (49.559_538_91, -0.292_573_43),
};

const JUPITER: OrbitalElements = OrbitalElements {
    semi_major_axis: (5.202_887_00, -0.000_116_07),
    eccentricity: (0.048_386_24, -0.000_132_53),
    inclination: (1.304_396_95, -0.001_837_14),
    mean_longitude: (34.396_440_51, 3_034.746_127_75),
    perihelion_longitude: (14.728_479_83, 0.212_526_68),
    node_longitude: (100.473_909_09, 0.204_691_06),
};

const SATURN: OrbitalElements = OrbitalElements {
    semi_major_axis: (9.536_675_94, -0.001_250_60),
    eccentricity: (0.053_861_79, -0.000_509_91),
    inclination: (2.485_991_87, 0.001_936_09),
    mean_longitude: (49.954_244_23, 1_222.493_622_01),
    perihelion_longitude: (92.598_878_31, -0.418_972_16),
    node_longitude: (113.662_424_48, -0.288_677_94),
};

/// Lunar periodic term: multiples of D, M, M', F and the coefficient.
type LunarTerm = (f64, f64, f64, f64, f64);

// Longitude terms, 1e-6 degree
const MOON_LONGITUDE: &[LunarTerm] = &[
    (0.0, 0.0, 1.0, 0.0, 6_288_774.0),
    (2.0, 0.0, -1.0, 0.0, 1_274_027.0),
    (2.0, 0.0, 0.0, 0.0, 658_314.0),
    (0.0, 0.0, 2.0, 0.0, 213_618.0),
    (0.0, 1.0, 0.0, 0.0, -185_116.0),
    (0.0, 0.0, 0.0, 2.0, -114_332.0),
    (2.0, 0.0, -2.0, 0.0, 58_793.0),
    (2.0, -1.0, -1.0, 0.0, 57_066.0),
    (2.0, 0.0, 1.0, 0.0, 53_322.0),
    (2.0, -1.0, 0.0, 0.0, 45_758.0),
    (0.0, 1.0, -1.0, 0.0, -40_923.0),
    (1.0, 0.0, 0.0, 0.0, -34_720.0),
    (0.0, 1.0, 1.0, 0.0, -30_383.0),
    (2.0, 0.0, 0.0, -2.0, 15_327.0),
    (0.0, 0.0, 1.0, 2.0, -12_528.0),
    (0.0, 0.0, 1.0, -2.0, 10_980.0),
    (4.0, 0.0, -1.0, 0.0, 10_675.0),
    (0.0, 0.0, 3.0, 0.0, 10_034.0),
    (4.0, 0.0, -2.0, 0.0, 8_548.0),
    (2.0, 1.0, -1.0, 0.0, -7_888.0),
    (2.0, 1.0, 0.0, 0.0, -6_766.0),
    (1.0, 0.0, -1.0, 0.0, -5_163.0),
    (1.0, 1.0, 0.0, 0.0, 4_987.0),
    (2.0, -1.0, 1.0, 0.0, 4_036.0),
    (2.0, 0.0, 2.0, 0.0, 3_994.0),
];

// Latitude terms, 1e-6 degree
const MOON_LATITUDE: &[LunarTerm] = &[
    (0.0, 0.0, 0.0, 1.0, 5_128_122.0),
    (0.0, 0.0, 1.0, 1.0, 280_602.0),
    (0.0, 0.0, 1.0, -1.0, 277_693.0),
    (2.0, 0.0, 0.0, -1.0, 173_237.0),
    (2.0, 0.0, -1.0, 1.0, 55_413.0),
    (2.0, 0.0, -1.0, -1.0, 46_271.0),
    (2.0, 0.0, 0.0, 1.0, 32_573.0),
    (0.0, 0.0, 2.0, 1.0, 17_198.0),
    (2.0, 0.0, 1.0, -1.0, 9_266.0),
    (0.0, 0.0, 2.0, -1.0, 8_822.0),
];

// Distance terms, metres
const MOON_DISTANCE: &[LunarTerm] = &[
    (0.0, 0.0, 1.0, 0.0, -20_905_355.0),
    (2.0, 0.0, -1.0, 0.0, -3_699_111.0),
    (2.0, 0.0, 0.0, 0.0, -2_955_968.0),
    (0.0, 0.0, 2.0, 0.0, -569_925.0),
    (0.0, 1.0, 0.0, 0.0, 48_888.0),
    (0.0, 0.0, 0.0, 2.0, -3_149.0),
    (2.0, 0.0, -2.0, 0.0, 246_158.0),
    (2.0, -1.0, -1.0, 0.0, -152_138.0),
    (2.0, 0.0, 1.0, 0.0, -170_733.0),
    (2.0, -1.0, 0.0, 0.0, -204_586.0),
    (0.0, 1.0, -1.0, 0.0, -129_620.0),
    (1.0, 0.0, 0.0, 0.0, 108_743.0),
    (0.0, 1.0, 1.0, 0.0, 104_755.0),
    (2.0, 0.0, 0.0, -2.0, 10_321.0),
    (0.0, 0.0, 1.0, -2.0, 79_661.0),
];

/// Mean-element ephemeris that needs no external data.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    fn geo_vector(&self, body: Body, instant: Instant) -> Result<EclipticVector, EphemerisError> {
        let t = instant.centuries_since_j2000();
        let vector = match body {
            Body::Moon => moon_vector(t),
            Body::Sun => {
                let earth = heliocentric(&EARTH_MOON_BARYCENTER, t)?;
                EclipticVector::new(-earth.x, -earth.y, -earth.z)
            }
            planet => {
                let elements = match planet {
                    Body::Mercury => &MERCURY,
                    Body::Venus => &VENUS,
                    Body::Mars => &MARS,
                    Body::Jupiter => &JUPITER,
                    _ => &SATURN,
                };
                let helio = heliocentric(elements, t)?;
                let earth = heliocentric(&EARTH_MOON_BARYCENTER, t)?;
                EclipticVector::new(helio.x - earth.x, helio.y - earth.y, helio.z - earth.z)
            }
        };

        if vector.x.is_finite() && vector.y.is_finite() && vector.z.is_finite() {
            Ok(vector)
        } else {
            Err(EphemerisError::CalculationFailed {
                body: body.to_string(),
                instant,
                message: "non-finite position".to_string(),
            })
        }
    }

    fn sidereal_time(&self, instant: Instant) -> Result<f64, EphemerisError> {
        Ok(mean_sidereal_time_hours(instant.julian_day()))
    }
}

/// Heliocentric ecliptic J2000 position of a planet in AU.
fn heliocentric(elements: &OrbitalElements, t: f64) -> Result<EclipticVector, EphemerisError> {
    let at = |(value, rate): (f64, f64)| value + rate * t;

    let a = at(elements.semi_major_axis);
    let e = at(elements.eccentricity);
    let inclination = at(elements.inclination).to_radians();
    let perihelion = at(elements.perihelion_longitude);
    let node = at(elements.node_longitude);
    let mean_longitude = at(elements.mean_longitude);

    let argument_of_perihelion = (perihelion - node).to_radians();
    let mean_anomaly = ((mean_longitude - perihelion + 180.0).rem_euclid(360.0) - 180.0).to_radians();
    let eccentric_anomaly = solve_kepler(mean_anomaly, e)?;

    // Position in the orbital plane, x towards perihelion
    let xp = a * (eccentric_anomaly.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * eccentric_anomaly.sin();

    let (sw, cw) = argument_of_perihelion.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let (si, ci) = inclination.sin_cos();

    Ok(EclipticVector::new(
        (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
        (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
        (sw * si) * xp + (cw * si) * yp,
    ))
}

/// Newton iteration on E - e·sin(E) = M.
fn solve_kepler(mean_anomaly: f64, eccentricity: f64) -> Result<f64, EphemerisError> {
    let mut eccentric_anomaly = mean_anomaly + eccentricity * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let delta = (mean_anomaly - (eccentric_anomaly - eccentricity * eccentric_anomaly.sin()))
            / (1.0 - eccentricity * eccentric_anomaly.cos());
        eccentric_anomaly += delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(eccentric_anomaly);
        }
    }
    Err(EphemerisError::Unavailable {
        message: format!(
            "Kepler equation did not converge (M = {mean_anomaly}, e = {eccentricity})"
        ),
    })
}

/// Geocentric lunar position, returned in the J2000 frame.
fn moon_vector(t: f64) -> EclipticVector {
    let mean_longitude = 218.316_447_7 + 481_267.881_234_21 * t;
    let elongation = 297.850_192_1 + 445_267.111_403_4 * t;
    let sun_anomaly = 357.529_109_2 + 35_999.050_290_9 * t;
    let moon_anomaly = 134.963_396_4 + 477_198.867_505_5 * t;
    let latitude_argument = 93.272_095_0 + 483_202.017_523_3 * t;
    // Decreasing eccentricity of the Earth's orbit
    let e = 1.0 - 0.002_516 * t;

    let a1 = (119.75 + 131.849 * t).to_radians();
    let a2 = (53.09 + 479_264.29 * t).to_radians();
    let a3 = (313.45 + 481_266.484 * t).to_radians();

    let series = |terms: &[LunarTerm], f: fn(f64) -> f64| -> f64 {
        terms
            .iter()
            .map(|&(d, m, mp, lf, coefficient)| {
                let argument = (d * elongation + m * sun_anomaly + mp * moon_anomaly + lf * latitude_argument)
                    .to_radians();
                coefficient * e.powi(m.abs() as i32) * f(argument)
            })
            .sum()
    };

    let lp = mean_longitude.to_radians();
    let f = latitude_argument.to_radians();
    let mp = moon_anomaly.to_radians();

    let sigma_l = series(MOON_LONGITUDE, f64::sin)
        + 3958.0 * a1.sin()
        + 1962.0 * (lp - f).sin()
        + 318.0 * a2.sin();
    let sigma_b = series(MOON_LATITUDE, f64::sin) - 2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();
    let sigma_r = series(MOON_DISTANCE, f64::cos);

    // The series is referred to the equinox of date
    let longitude_of_date = mean_longitude + sigma_l / 1e6;
    let longitude_j2000 = longitude_of_date - precession_in_longitude(t);
    let latitude = sigma_b / 1e6;
    let distance_au = (385_000.56 + sigma_r / 1000.0) / AU_KM;

    EclipticVector::from_spherical(longitude_j2000, latitude, distance_au)
}
