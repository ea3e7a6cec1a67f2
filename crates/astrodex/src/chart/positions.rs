use crate::angles::unwrap_step;
use crate::ephemeris::{
    ecliptic_of_date, Body, BodyPosition, EphemerisError, EphemerisProvider, Instant, Observer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Positions of the seven bodies at one instant.
pub type PlanetPositions = BTreeMap<Body, BodyPosition>;

/// Daily motion below this (deg/day) counts as stationary.
pub const STATIONARY_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Direct,
    Retrograde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedCategory {
    Fast,
    Average,
    Slow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationType {
    None,
    DirectStation,
    RetrogradeStation,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Direct => "Direct",
            Direction::Retrograde => "Retrograde",
        })
    }
}

impl fmt::Display for SpeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpeedCategory::Fast => "Fast",
            SpeedCategory::Average => "Average",
            SpeedCategory::Slow => "Slow",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub direction: Direction,
    /// Signed degrees per day over the step from now to tomorrow
    pub daily_motion: f64,
    pub speed_category: SpeedCategory,
    pub is_stationary: bool,
    pub station_type: StationType,
    /// Set when sampling failed and these values are placeholders
    pub degraded: bool,
}

impl MotionState {
    /// Placeholder used when the ephemeris could not be sampled.
    pub fn degraded() -> Self {
        Self {
            direction: Direction::Direct,
            daily_motion: 0.0,
            speed_category: SpeedCategory::Average,
            is_stationary: false,
            station_type: StationType::None,
            degraded: true,
        }
    }

    pub fn is_retrograde(&self) -> bool {
        self.direction == Direction::Retrograde
    }
}

/// Compare |daily motion| against the body's mean speed, ±10%.
pub fn speed_category(body: Body, daily_motion: f64) -> SpeedCategory {
    let average = body.average_daily_motion();
    let speed = daily_motion.abs();
    if speed > average * 1.1 {
        SpeedCategory::Fast
    } else if speed < average * 0.9 {
        SpeedCategory::Slow
    } else {
        SpeedCategory::Average
    }
}

/// Motion from two consecutive one-day longitude steps (already unwrapped).
pub fn classify_motion(body: Body, earlier_step: f64, later_step: f64) -> MotionState {
    let sign_flip = earlier_step * later_step < 0.0;
    let is_stationary = sign_flip || later_step.abs() < STATIONARY_THRESHOLD;

    let station_type = if !is_stationary {
        StationType::None
    } else if later_step >= 0.0 && earlier_step < 0.0 {
        StationType::DirectStation
    } else if later_step < 0.0 && earlier_step >= 0.0 {
        StationType::RetrogradeStation
    } else {
        StationType::None
    };

    MotionState {
        direction: if later_step < 0.0 {
            Direction::Retrograde
        } else {
            Direction::Direct
        },
        daily_motion: later_step,
        speed_category: speed_category(body, later_step),
        is_stationary,
        station_type,
        degraded: false,
    }
}

/// Turns provider vectors into ecliptic positions and motion.
#[derive(Clone)]
pub struct PositionDeriver {
    provider: Arc<dyn EphemerisProvider>,
}

impl PositionDeriver {
    pub fn new(provider: Arc<dyn EphemerisProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &dyn EphemerisProvider {
        self.provider.as_ref()
    }

    /// Ecliptic-of-date position of one body.
    pub fn position(&self, body: Body, instant: Instant) -> Result<BodyPosition, EphemerisError> {
        let vector = self.provider.geo_vector(body, instant)?;
        Ok(ecliptic_of_date(vector, instant))
    }

    /// Positions of all seven bodies. Positions are geocentric, so the
    /// observer does not change them.
    pub fn positions(
        &self,
        instant: Instant,
        observer: &Observer,
    ) -> Result<PlanetPositions, EphemerisError> {
        log::debug!(
            "Calculating positions at {} for ({:.4}, {:.4}) with {} ephemeris",
            instant,
            observer.latitude,
            observer.longitude,
            self.provider.name()
        );
        Body::ALL
            .iter()
            .map(|&body| Ok((body, self.position(body, instant)?)))
            .collect()
    }

    /// Motion sampled at yesterday, now and tomorrow. Never fails: an
    /// ephemeris error yields `MotionState::degraded()`.
    pub fn motion(&self, body: Body, instant: Instant) -> MotionState {
        match self.sample_motion(body, instant) {
            Ok(motion) => motion,
            Err(e) => {
                log::warn!("Motion for {} at {} degraded: {}", body, instant, e);
                MotionState::degraded()
            }
        }
    }

    fn sample_motion(&self, body: Body, instant: Instant) -> Result<MotionState, EphemerisError> {
        let yesterday = self.position(body, instant.add_days(-1))?.longitude;
        let today = self.position(body, instant)?.longitude;
        let tomorrow = self.position(body, instant.add_days(1))?.longitude;

        Ok(classify_motion(
            body,
            unwrap_step(today - yesterday),
            unwrap_step(tomorrow - today),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::EclipticVector;

    struct FailingProvider;

    impl EphemerisProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn geo_vector(&self, body: Body, instant: Instant) -> Result<EclipticVector, EphemerisError> {
            Err(EphemerisError::CalculationFailed {
                body: body.to_string(),
                instant,
                message: "no data".to_string(),
            })
        }

        fn sidereal_time(&self, _instant: Instant) -> Result<f64, EphemerisError> {
            Err(EphemerisError::Unavailable {
                message: "no data".to_string(),
            })
        }
    }

    #[test]
    fn speed_bands_are_ten_percent() {
        assert_eq!(speed_category(Body::Moon, 15.0), SpeedCategory::Fast);
        assert_eq!(speed_category(Body::Moon, -13.0), SpeedCategory::Average);
        assert_eq!(speed_category(Body::Moon, 11.5), SpeedCategory::Slow);
        assert_eq!(speed_category(Body::Saturn, 0.0), SpeedCategory::Slow);
    }

    #[test]
    fn turning_retrograde() {
        let motion = classify_motion(Body::Mars, 0.02, -0.03);
        assert!(motion.is_stationary);
        assert_eq!(motion.station_type, StationType::RetrogradeStation);
        assert_eq!(motion.direction, Direction::Retrograde);
        assert_eq!(motion.daily_motion, -0.03);
    }

    #[test]
    fn turning_direct() {
        let motion = classify_motion(Body::Venus, -0.05, 0.004);
        assert!(motion.is_stationary);
        assert_eq!(motion.station_type, StationType::DirectStation);
        assert_eq!(motion.direction, Direction::Direct);
    }

    #[test]
    fn slow_without_flip_is_stationary_without_type() {
        let motion = classify_motion(Body::Saturn, -0.012, -0.005);
        assert!(motion.is_stationary);
        assert_eq!(motion.station_type, StationType::None);
        assert!(motion.is_retrograde());
    }

    #[test]
    fn ordinary_direct_motion() {
        let motion = classify_motion(Body::Sun, 1.01, 1.02);
        assert!(!motion.is_stationary);
        assert_eq!(motion.station_type, StationType::None);
        assert_eq!(motion.speed_category, SpeedCategory::Average);
        assert!(!motion.degraded);
    }

    #[test]
    fn failed_sampling_degrades() {
        let deriver = PositionDeriver::new(Arc::new(FailingProvider));
        let instant = Instant::parse_local("2020-06-01", "12:00", 0.0).unwrap();
        let motion = deriver.motion(Body::Mercury, instant);
        assert_eq!(motion, MotionState::degraded());
        assert!(motion.degraded);
        assert!(deriver.positions(instant, &Observer::new(0.0, 0.0)).is_err());
    }
}
