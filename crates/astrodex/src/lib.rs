//! Traditional astrology derivation engine.
//!
//! Takes raw planetary positions from an injected ephemeris provider and
//! derives signs, equal houses, sect, solar phase, aspects, essential
//! dignities, testimony and a graded planetary condition score.

pub mod angles;
pub mod aspects;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod evaluation;
pub mod geocoding;
pub mod storage;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectDirection, AspectType};
pub use chart::{ChartCalculator, ChartError, ChartResult, Sect};
pub use ephemeris::{Body, EphemerisProvider, Instant, Observer};
pub use evaluation::{EvaluationRecord, PlanetEvaluation, ScoreReport, TestimonyResult};
pub use western::{DignitySet, Sign};
