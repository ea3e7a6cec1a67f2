use crate::angles::{normalize_degrees, separation};
use crate::aspects::types::{Aspect, AspectDirection, AspectMatch, AspectType, EXACT_ORB};
use crate::chart::positions::{PlanetPositions, STATIONARY_THRESHOLD};
use crate::ephemeris::Body;
use std::collections::BTreeMap;

/// Aspect calculator
#[derive(Debug, Clone, Copy)]
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Test one aspect angle. The orb limit is inclusive.
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        aspect_degrees: f64,
        orb: f64,
    ) -> Option<AspectMatch> {
        let angle_diff = separation(lon1, lon2);
        let deviation = (angle_diff - aspect_degrees).abs();

        (deviation <= orb).then_some(AspectMatch {
            separation: angle_diff,
            orb: deviation,
            is_exact: deviation < EXACT_ORB,
        })
    }

    /// Applying when a day's motion brings the bodies closer together,
    /// separating when it takes them apart. Swapping the two bodies gives
    /// the same answer.
    pub fn determine_direction(
        &self,
        motion1: f64,
        motion2: f64,
        lon1: f64,
        lon2: f64,
    ) -> AspectDirection {
        if motion1.abs() < STATIONARY_THRESHOLD && motion2.abs() < STATIONARY_THRESHOLD {
            return AspectDirection::Stationary;
        }

        let current = separation(lon1, lon2);
        let future = separation(
            normalize_degrees(lon1 + motion1),
            normalize_degrees(lon2 + motion2),
        );

        if future < current {
            AspectDirection::Applying
        } else if future > current {
            AspectDirection::Separating
        } else {
            AspectDirection::Stationary
        }
    }

    /// Every aspect type within orb for one pair. Each type is tested on its
    /// own, so overlapping orb windows can yield more than one aspect.
    pub fn aspects_between(
        &self,
        (body_a, lon_a, motion_a): (Body, f64, f64),
        (body_b, lon_b, motion_b): (Body, f64, f64),
    ) -> Vec<Aspect> {
        AspectType::ALL
            .iter()
            .filter_map(|&aspect_type| {
                let found =
                    self.calculate_aspect(lon_a, lon_b, aspect_type.degrees(), aspect_type.max_orb())?;
                Some(Aspect {
                    body_a,
                    body_b,
                    aspect_type,
                    separation: found.separation,
                    orb: found.orb,
                    is_exact: found.is_exact,
                    direction: self.determine_direction(motion_a, motion_b, lon_a, lon_b),
                })
            })
            .collect()
    }

    /// Aspects for every unordered pair of placed bodies. A body without a
    /// daily motion entry is treated as motionless.
    pub fn all_aspects(
        &self,
        positions: &PlanetPositions,
        motions: &BTreeMap<Body, f64>,
    ) -> Vec<Aspect> {
        let motion_of = |body: Body| {
            motions.get(&body).copied().unwrap_or_else(|| {
                log::warn!("No daily motion for {}; aspect direction assumes 0°/day", body);
                0.0
            })
        };

        let bodies: Vec<(Body, f64, f64)> = positions
            .iter()
            .map(|(&body, position)| (body, position.longitude, motion_of(body)))
            .collect();

        let mut aspects = Vec::new();
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                aspects.extend(self.aspects_between(bodies[i], bodies[j]));
            }
        }
        aspects
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Aspects in which `body` takes part.
pub fn aspects_for_body(body: Body, aspects: &[Aspect]) -> Vec<Aspect> {
    aspects.iter().filter(|a| a.involves(body)).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conjunction_across_aries() {
        let found = AspectCalculator.calculate_aspect(358.0, 3.0, 0.0, 8.0).unwrap();
        assert!((found.separation - 5.0).abs() < 1e-9);
        assert!(!found.is_exact);
    }

    #[test]
    fn direction_of_closing_pair() {
        let calc = AspectCalculator::new();
        // Moon at 10° catching the Sun at 20°
        assert_eq!(calc.determine_direction(13.0, 1.0, 10.0, 20.0), AspectDirection::Applying);
        assert_eq!(calc.determine_direction(13.0, 1.0, 30.0, 20.0), AspectDirection::Separating);
    }

    #[test]
    fn both_bodies_still_is_stationary() {
        let calc = AspectCalculator::new();
        assert_eq!(calc.determine_direction(0.005, -0.002, 10.0, 100.0), AspectDirection::Stationary);
        // Equal motion keeps the separation unchanged
        assert_eq!(calc.determine_direction(0.5, 0.5, 10.0, 100.0), AspectDirection::Stationary);
    }

    #[test]
    fn filters_by_body() {
        let positions: PlanetPositions = [(Body::Sun, 0.0), (Body::Moon, 90.0), (Body::Mars, 240.0)]
            .into_iter()
            .map(|(body, longitude)| {
                (
                    body,
                    crate::ephemeris::BodyPosition {
                        longitude,
                        latitude: 0.0,
                        distance: 1.0,
                    },
                )
            })
            .collect();
        let aspects = AspectCalculator.all_aspects(&positions, &BTreeMap::new());
        // Sun-Moon square and Sun-Mars trine; Moon-Mars at 150° makes none
        assert_eq!(aspects.len(), 2);
        assert_eq!(aspects_for_body(Body::Moon, &aspects).len(), 1);
        assert_eq!(aspects_for_body(Body::Sun, &aspects).len(), 2);
        assert!(aspects.iter().all(|a| a.direction == AspectDirection::Stationary));
    }
}
