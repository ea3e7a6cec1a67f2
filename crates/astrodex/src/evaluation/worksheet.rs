//! Essential and accidental condition totals for one body, the tally a
//! practitioner fills in by hand on a conditions worksheet.

use crate::aspects::{Aspect, AspectType};
use crate::chart::{ChartError, ChartResult, Direction, MotionState, Sect, Visibility};
use crate::ephemeris::Body;
use crate::evaluation::testimony::{sect_benefic_malefic, SectAlignment};
use crate::western::DignitySet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conditions the chart data does not decide; supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorksheetFlags {
    pub face: bool,
    pub hayz: bool,
    pub besieged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorksheetMotion {
    Direct,
    Retrograde,
    Stationary,
}

impl WorksheetMotion {
    /// Direct or retrograde from the plain direction, stations included.
    /// `Stationary` is only ever set by hand.
    pub fn from_motion(motion: &MotionState) -> Self {
        match motion.direction {
            Direction::Direct => WorksheetMotion::Direct,
            Direction::Retrograde => WorksheetMotion::Retrograde,
        }
    }
}

/// Aspect kinds received from a benefic or a malefic. Each kind counts once
/// however many aspects of that kind there are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReceivedAspects {
    pub conjunction: bool,
    pub opposition: bool,
    pub trine: bool,
    pub square: bool,
    pub sextile: bool,
}

impl ReceivedAspects {
    fn mark(&mut self, aspect_type: AspectType) {
        match aspect_type {
            AspectType::Conjunction => self.conjunction = true,
            AspectType::Opposition => self.opposition = true,
            AspectType::Trine => self.trine = true,
            AspectType::Square => self.square = true,
            AspectType::Sextile => self.sextile = true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Assessment {
    VeryWeak,
    Weak,
    Neutral,
    ModeratelyStrong,
    Strong,
    VeryStrong,
}

impl Assessment {
    pub fn from_overall(overall: i32) -> Self {
        if overall >= 15 {
            Assessment::VeryStrong
        } else if overall >= 10 {
            Assessment::Strong
        } else if overall >= 5 {
            Assessment::ModeratelyStrong
        } else if overall >= 0 {
            Assessment::Neutral
        } else if overall >= -5 {
            Assessment::Weak
        } else {
            Assessment::VeryWeak
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Assessment::VeryStrong => "Very Strong (+15 or more)",
            Assessment::Strong => "Strong (+10 to +14)",
            Assessment::ModeratelyStrong => "Moderately Strong (+5 to +9)",
            Assessment::Neutral => "Neutral (0 to +4)",
            Assessment::Weak => "Weak (-1 to -5)",
            Assessment::VeryWeak => "Very Weak (-6 or less)",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionWorksheet {
    pub body: Body,
    pub dignities: DignitySet,
    pub flags: WorksheetFlags,
    pub motion: WorksheetMotion,
    pub sect_alignment: SectAlignment,
    pub benefic_aspects: ReceivedAspects,
    pub malefic_aspects: ReceivedAspects,
    /// None for the Sun
    pub visibility: Option<Visibility>,
}

impl ConditionWorksheet {
    /// Fill the worksheet for `body` from a computed chart, its aspects and
    /// the body's essential dignities.
    pub fn from_chart(
        body: Body,
        chart: &ChartResult,
        aspects: &[Aspect],
        dignities: DignitySet,
        flags: WorksheetFlags,
    ) -> Result<Self, ChartError> {
        let planet = chart.planet(body)?;

        let mut benefic_aspects = ReceivedAspects::default();
        let mut malefic_aspects = ReceivedAspects::default();
        for aspect in aspects {
            let Some(other) = aspect.other(body) else {
                continue;
            };
            if other.is_benefic() {
                benefic_aspects.mark(aspect.aspect_type);
            }
            if other.is_malefic() {
                malefic_aspects.mark(aspect.aspect_type);
            }
        }

        Ok(Self {
            body,
            dignities,
            flags,
            motion: WorksheetMotion::from_motion(&planet.motion),
            sect_alignment: worksheet_sect(body, chart.sect),
            benefic_aspects,
            malefic_aspects,
            visibility: planet.combustion.map(|c| c.visibility),
        })
    }

    pub fn essential_total(&self) -> i32 {
        let d = &self.dignities;
        let mut total = 0;
        if d.domicile {
            total += 5;
        }
        if d.exaltation {
            total += 4;
        }
        if d.triplicity.is_ruler() {
            total += 3;
        }
        if d.term {
            total += 2;
        }
        if self.flags.face {
            total += 1;
        }
        if d.detriment {
            total -= 5;
        }
        if d.fall {
            total -= 4;
        }
        total
    }

    pub fn accidental_total(&self) -> i32 {
        let mut total = match self.motion {
            WorksheetMotion::Direct => 4,
            WorksheetMotion::Retrograde => -5,
            WorksheetMotion::Stationary => 0,
        };

        total += match self.sect_alignment {
            SectAlignment::Sect => 3,
            SectAlignment::Contrary => -2,
            SectAlignment::Neutral => 0,
        };

        let benefic = &self.benefic_aspects;
        if benefic.conjunction {
            total += 5;
        }
        if benefic.trine {
            total += 4;
        }
        if benefic.sextile {
            total += 3;
        }

        let malefic = &self.malefic_aspects;
        if malefic.conjunction {
            total -= 5;
        }
        if malefic.opposition {
            total -= 4;
        }
        if malefic.square {
            total -= 3;
        }

        total += match self.visibility {
            Some(Visibility::Cazimi) => 5,
            Some(Visibility::Combust) => -5,
            Some(Visibility::UnderBeams) => -4,
            Some(Visibility::Visible) | None => 0,
        };

        if self.dignities.mutual_reception {
            total += 5;
        }
        if self.flags.hayz {
            total += 2;
        }
        if self.flags.besieged {
            total -= 5;
        }
        total
    }

    pub fn overall(&self) -> i32 {
        self.essential_total() + self.accidental_total()
    }

    pub fn assessment(&self) -> Assessment {
        Assessment::from_overall(self.overall())
    }
}

/// Day planets are in sect by day and contrary by night, night planets the
/// reverse. Mercury is neutral either way.
fn worksheet_sect(body: Body, sect: Sect) -> SectAlignment {
    if body == Body::Mercury {
        return SectAlignment::Neutral;
    }
    match sect_benefic_malefic(body, sect).sect_alignment {
        SectAlignment::Sect => SectAlignment::Sect,
        _ => SectAlignment::Contrary,
    }
}
