//! Weighted condition score for one body.
//!
//! `EvaluationRecord` is a plain calculator over caller-supplied judgements;
//! it never looks at chart data itself. See `evaluation::assemble` for
//! deriving a record from a computed chart.

use crate::chart::{PhaseDirection, Sect, SpeedCategory, Visibility};
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MIN_RAW_SCORE: f64 = -10.0;
const MAX_RAW_SCORE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nature {
    Benefic,
    Malefic,
    Common,
    Luminary,
}

impl Nature {
    pub fn of(body: Body) -> Self {
        match body {
            Body::Sun | Body::Moon => Nature::Luminary,
            Body::Venus | Body::Jupiter => Nature::Benefic,
            Body::Mars | Body::Saturn => Nature::Malefic,
            Body::Mercury => Nature::Common,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectAgreement {
    Same,
    Contrary,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rejoicing {
    pub in_sign: bool,
    pub in_solar_phase: bool,
}

/// Rulerships the body holds over the chart's reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Lordships {
    pub domicile: bool,
    pub exaltation: bool,
    pub triplicity: bool,
    pub bound: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssentialDignity {
    pub domicile: bool,
    pub exaltation: bool,
    pub triplicity: bool,
    pub bound: bool,
    pub mutual_reception: bool,
    pub detriment: bool,
    pub fall: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarPhaseCondition {
    pub direction: PhaseDirection,
    pub speed: SpeedCategory,
    /// None for the Sun
    pub visibility: Option<Visibility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarAspects {
    pub applying_to_moon: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Testimony {
    pub favorable: bool,
    pub bonified: bool,
    pub unfavorable: bool,
    pub maltreated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomicileLordCondition {
    Helps,
    Neutral,
    Hinders,
}

/// Qualitative condition inputs for one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRecord {
    pub nature: Nature,
    pub sect: SectAgreement,
    pub rejoicing: Rejoicing,
    pub lords: Lordships,
    pub essential_dignity: EssentialDignity,
    pub solar_phase: SolarPhaseCondition,
    pub lunar_aspects: LunarAspects,
    pub testimony: Testimony,
    pub condition_of_domicile_lord: DomicileLordCondition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreFactor {
    pub label: String,
    pub delta: i32,
}

impl fmt::Display for ScoreFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:+}", self.label, self.delta)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn from_normalized(score: f64) -> Self {
        if score >= 90.0 {
            Grade::A
        } else if score >= 75.0 {
            Grade::B
        } else if score >= 60.0 {
            Grade::C
        } else if score >= 40.0 {
            Grade::D
        } else if score >= 20.0 {
            Grade::E
        } else {
            Grade::F
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub raw_score: i32,
    /// 0-100
    pub normalized_score: f64,
    pub grade: Grade,
    /// Contributing factors in scoring order
    pub factors: Vec<ScoreFactor>,
}

/// Map a raw score onto 0-100, clamped.
pub fn normalize_score(raw: i32) -> f64 {
    let normalized = (f64::from(raw) - MIN_RAW_SCORE) / (MAX_RAW_SCORE - MIN_RAW_SCORE) * 100.0;
    normalized.clamp(0.0, 100.0)
}

impl EvaluationRecord {
    pub fn calculate_score(&self) -> ScoreReport {
        let mut factors = Vec::new();
        let mut add = |applies: bool, label: &str, delta: i32| {
            if applies {
                factors.push(ScoreFactor {
                    label: label.to_string(),
                    delta,
                });
            }
        };

        add(self.nature == Nature::Benefic, "Benefic nature", 2);
        add(self.nature == Nature::Luminary, "Luminary nature", 1);

        add(self.sect == SectAgreement::Same, "Sect agreement", 2);

        add(self.rejoicing.in_sign, "Rejoices in sign", 1);
        add(self.rejoicing.in_solar_phase, "Rejoices in solar phase", 1);

        let lords = &self.lords;
        add(lords.domicile, "Lord of domicile", 5);
        add(lords.exaltation, "Lord of exaltation", 4);
        add(lords.triplicity, "Lord of triplicity", 3);
        add(lords.bound, "Lord of bound", 2);

        let dignity = &self.essential_dignity;
        add(dignity.domicile, "In domicile", 5);
        add(dignity.exaltation, "In exaltation", 4);
        add(dignity.triplicity, "In triplicity", 3);
        add(dignity.bound, "In bound", 2);
        add(dignity.mutual_reception, "Mutual reception", 3);
        add(dignity.detriment, "In detriment", -5);
        add(dignity.fall, "In fall", -4);

        let phase = &self.solar_phase;
        add(phase.direction == PhaseDirection::Direct, "Direct motion", 1);
        add(phase.speed == SpeedCategory::Fast, "Fast speed", 1);
        add(phase.visibility == Some(Visibility::Visible), "Visible", 2);
        add(phase.visibility == Some(Visibility::Combust), "Combust", -3);

        add(self.lunar_aspects.applying_to_moon, "Applying to Moon", 1);

        let testimony = &self.testimony;
        add(testimony.favorable, "Favorable testimony", 2);
        add(testimony.bonified, "Bonified", 2);
        add(testimony.unfavorable, "Unfavorable testimony", -2);
        add(testimony.maltreated, "Maltreated", -2);

        add(
            self.condition_of_domicile_lord == DomicileLordCondition::Helps,
            "Domicile lord helps",
            2,
        );

        let raw_score = factors.iter().map(|f| f.delta).sum();
        let normalized_score = normalize_score(raw_score);
        ScoreReport {
            raw_score,
            normalized_score,
            grade: Grade::from_normalized(normalized_score),
            factors,
        }
    }
}

/// Evaluation of one client's chart: one record per body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetEvaluation {
    pub client_name: String,
    pub chart_sect: Sect,
    planets: BTreeMap<Body, EvaluationRecord>,
}

impl PlanetEvaluation {
    pub fn new(client_name: impl Into<String>, chart_sect: Sect) -> Self {
        Self {
            client_name: client_name.into(),
            chart_sect,
            planets: BTreeMap::new(),
        }
    }

    /// Add or replace the record for `body`.
    pub fn add_planet(&mut self, body: Body, record: EvaluationRecord) {
        self.planets.insert(body, record);
    }

    pub fn planet(&self, body: Body) -> Option<&EvaluationRecord> {
        self.planets.get(&body)
    }

    pub fn planets(&self) -> &BTreeMap<Body, EvaluationRecord> {
        &self.planets
    }

    pub fn calculate_planet_score(&self, body: Body) -> Option<ScoreReport> {
        match self.planets.get(&body) {
            Some(record) => Some(record.calculate_score()),
            None => {
                log::warn!("Planet '{}' not found in evaluation data", body);
                None
            }
        }
    }

    pub fn calculate_all_scores(&self) -> BTreeMap<Body, ScoreReport> {
        self.planets
            .iter()
            .map(|(&body, record)| (body, record.calculate_score()))
            .collect()
    }
}
