//! Aspect testimony and sect alignment.

use crate::aspects::{aspects_for_body, Aspect, AspectNature};
use crate::chart::Sect;
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectAlignment {
    Sect,
    Contrary,
    Neutral,
}

impl fmt::Display for SectAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SectAlignment::Sect => "Sect",
            SectAlignment::Contrary => "Contrary",
            SectAlignment::Neutral => "Neutral",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectStatus {
    pub is_sect_benefic: bool,
    pub is_sect_malefic: bool,
    pub sect_alignment: SectAlignment,
}

/// Sect benefics by day are the Sun, Jupiter and Saturn with Mars contrary;
/// by night the Moon, Venus and Mars with Saturn contrary.
pub fn sect_benefic_malefic(body: Body, sect: Sect) -> SectStatus {
    let (in_sect, contrary): (&[Body], Body) = match sect {
        Sect::Diurnal => (&[Body::Sun, Body::Jupiter, Body::Saturn], Body::Mars),
        Sect::Nocturnal => (&[Body::Moon, Body::Venus, Body::Mars], Body::Saturn),
    };

    if in_sect.contains(&body) {
        SectStatus {
            is_sect_benefic: true,
            is_sect_malefic: false,
            sect_alignment: SectAlignment::Sect,
        }
    } else if body == contrary {
        SectStatus {
            is_sect_benefic: false,
            is_sect_malefic: true,
            sect_alignment: SectAlignment::Contrary,
        }
    } else {
        SectStatus {
            is_sect_benefic: false,
            is_sect_malefic: false,
            sect_alignment: SectAlignment::Neutral,
        }
    }
}

/// Aspects to a body split by the partner's nature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonyCategories {
    /// Trines and sextiles from Venus or Jupiter
    pub favorable: Vec<Aspect>,
    /// Squares and oppositions from Mars or Saturn
    pub unfavorable: Vec<Aspect>,
}

impl TestimonyCategories {
    pub fn favorable_count(&self) -> usize {
        self.favorable.len()
    }

    pub fn unfavorable_count(&self) -> usize {
        self.unfavorable.len()
    }
}

/// Sort a body's aspects into favorable and unfavorable testimony.
/// Conjunctions, hard aspects from benefics and soft aspects from malefics
/// count for neither.
pub fn categorize_testimony(aspects: &[Aspect], body: Body) -> TestimonyCategories {
    let mut categories = TestimonyCategories::default();
    for aspect in aspects {
        let Some(other) = aspect.other(body) else {
            continue;
        };
        match aspect.nature() {
            AspectNature::Soft if other.is_benefic() => categories.favorable.push(*aspect),
            AspectNature::Hard if other.is_malefic() => categories.unfavorable.push(*aspect),
            _ => {}
        }
    }
    categories
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestimonyClass {
    None,
    Favorable,
    Unfavorable,
    Mixed,
}

impl fmt::Display for TestimonyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TestimonyClass::None => "None",
            TestimonyClass::Favorable => "Favorable",
            TestimonyClass::Unfavorable => "Unfavorable",
            TestimonyClass::Mixed => "Mixed",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonyResult {
    pub classification: TestimonyClass,
    pub score: i32,
    pub favorable_count: usize,
    pub unfavorable_count: usize,
    pub sect_alignment: SectAlignment,
}

/// Overall testimony of `body` from all chart aspects and the chart sect.
pub fn overall_testimony(body: Body, aspects: &[Aspect], sect: Sect) -> TestimonyResult {
    let status = sect_benefic_malefic(body, sect);
    let categories = categorize_testimony(&aspects_for_body(body, aspects), body);
    let favorable = categories.favorable_count();
    let unfavorable = categories.unfavorable_count();

    let sect_bonus = if status.is_sect_benefic {
        1
    } else if status.is_sect_malefic {
        -1
    } else {
        0
    };

    let classification = match (favorable > 0, unfavorable > 0) {
        (true, false) => TestimonyClass::Favorable,
        (false, true) => TestimonyClass::Unfavorable,
        (true, true) => TestimonyClass::Mixed,
        (false, false) => TestimonyClass::None,
    };

    TestimonyResult {
        classification,
        score: favorable as i32 - unfavorable as i32 + sect_bonus,
        favorable_count: favorable,
        unfavorable_count: unfavorable,
        sect_alignment: status.sect_alignment,
    }
}
