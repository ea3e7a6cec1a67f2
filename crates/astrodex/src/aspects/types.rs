use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aspects below this orb are reported as exact.
pub const EXACT_ORB: f64 = 1.0;

/// The five Ptolemaic aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AspectType {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectNature {
    Neutral,
    Hard,
    Soft,
}

impl AspectType {
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Opposition,
        AspectType::Trine,
        AspectType::Square,
        AspectType::Sextile,
    ];

    /// Exact angle in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Opposition => 180.0,
            AspectType::Trine => 120.0,
            AspectType::Square => 90.0,
            AspectType::Sextile => 60.0,
        }
    }

    /// Largest deviation from exact still counted as the aspect.
    pub fn max_orb(&self) -> f64 {
        match self {
            AspectType::Sextile => 6.0,
            _ => 8.0,
        }
    }

    pub fn nature(&self) -> AspectNature {
        match self {
            AspectType::Conjunction => AspectNature::Neutral,
            AspectType::Opposition | AspectType::Square => AspectNature::Hard,
            AspectType::Trine | AspectType::Sextile => AspectNature::Soft,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Opposition => "Opposition",
            AspectType::Trine => "Trine",
            AspectType::Square => "Square",
            AspectType::Sextile => "Sextile",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectDirection {
    Applying,
    Separating,
    Stationary,
}

impl fmt::Display for AspectDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AspectDirection::Applying => "Applying",
            AspectDirection::Separating => "Separating",
            AspectDirection::Stationary => "Stationary",
        })
    }
}

/// Result of testing one angle against a pair of longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectMatch {
    /// Angular distance between the bodies, 0-180
    pub separation: f64,
    /// Deviation from the exact angle
    pub orb: f64,
    pub is_exact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub aspect_type: AspectType,
    pub separation: f64,
    pub orb: f64,
    pub is_exact: bool,
    pub direction: AspectDirection,
}

impl Aspect {
    pub fn nature(&self) -> AspectNature {
        self.aspect_type.nature()
    }

    pub fn involves(&self, body: Body) -> bool {
        self.body_a == body || self.body_b == body
    }

    /// The partner of `body` in this aspect, if `body` takes part in it.
    pub fn other(&self, body: Body) -> Option<Body> {
        if self.body_a == body {
            Some(self.body_b)
        } else if self.body_b == body {
            Some(self.body_a)
        } else {
            None
        }
    }

    pub fn is_applying(&self) -> bool {
        self.direction == AspectDirection::Applying
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (orb {:.2}°, {})",
            self.body_a, self.aspect_type, self.body_b, self.orb, self.direction
        )
    }
}
