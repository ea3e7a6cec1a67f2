//! Essential dignities for the seven traditional bodies.
//!
//! Evaluates domicile, exaltation, detriment, fall, triplicity, Egyptian
//! bound and mutual reception from a body's sign placement and the chart's
//! sect.

use crate::angles::normalize_degrees;
use crate::chart::Sect;
use crate::ephemeris::Body;
use crate::western::tables::{
    bound_lord, detriments, exaltation, fall, triplicity_rulers, Sign,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Role a body plays as triplicity ruler of the sign it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriplicityRole {
    #[default]
    None,
    Day,
    Night,
    Participating,
}

impl TriplicityRole {
    pub fn is_ruler(&self) -> bool {
        !matches!(self, TriplicityRole::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DignitySet {
    pub domicile: bool,
    pub exaltation: bool,
    pub detriment: bool,
    pub fall: bool,
    pub triplicity: TriplicityRole,
    pub term: bool,
    pub mutual_reception: bool,
}

/// Sign and degree of a body, the only inputs dignities depend on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub body: Body,
    pub sign: Sign,
    pub degree_in_sign: f64,
}

impl Placement {
    pub fn from_longitude(body: Body, longitude: f64) -> Self {
        let longitude = normalize_degrees(longitude);
        Self {
            body,
            sign: Sign::from_longitude(longitude),
            degree_in_sign: longitude % 30.0,
        }
    }
}

pub struct DignitiesService;

impl DignitiesService {
    /// Essential dignities of one body. Mutual reception needs the rest of
    /// the chart and is left unset here.
    pub fn essential_dignities(&self, body: Body, sign: Sign, degree_in_sign: f64, sect: Sect) -> DignitySet {
        DignitySet {
            domicile: sign.ruler() == body,
            // Sign-level only; the exact exaltation degree does not gate it
            exaltation: exaltation(body).sign == sign,
            detriment: detriments(body).contains(&sign),
            fall: fall(body) == sign,
            triplicity: triplicity_role(body, sign, sect),
            term: bound_lord(sign, degree_in_sign) == body,
            mutual_reception: false,
        }
    }

    /// Dignities for every placed body, with mutual reception tested against
    /// each of the other bodies.
    pub fn chart_dignities(&self, placements: &[Placement], sect: Sect) -> BTreeMap<Body, DignitySet> {
        placements
            .iter()
            .map(|p| {
                let mut set = self.essential_dignities(p.body, p.sign, p.degree_in_sign, sect);
                set.mutual_reception = placements.iter().any(|other| {
                    other.body != p.body
                        && check_mutual_reception(p.body, p.sign, other.body, other.sign)
                });
                (p.body, set)
            })
            .collect()
    }
}

fn triplicity_role(body: Body, sign: Sign, sect: Sect) -> TriplicityRole {
    let rulers = triplicity_rulers(sign.element());
    let in_sect = match sect {
        Sect::Diurnal => (rulers.day == body).then_some(TriplicityRole::Day),
        Sect::Nocturnal => (rulers.night == body).then_some(TriplicityRole::Night),
    };
    in_sect.unwrap_or(if rulers.participating == body {
        TriplicityRole::Participating
    } else {
        TriplicityRole::None
    })
}

/// Day or night triplicity ruler of the sign's element.
pub fn triplicity_ruler(sign_index: usize, is_day_chart: bool) -> Body {
    let rulers = triplicity_rulers(Sign::from_index(sign_index).element());
    if is_day_chart {
        rulers.day
    } else {
        rulers.night
    }
}

/// Lord of the Egyptian bound at an ecliptic longitude.
pub fn bound_ruler(longitude: f64) -> Body {
    let longitude = normalize_degrees(longitude);
    bound_lord(Sign::from_longitude(longitude), longitude % 30.0)
}

/// Each body sits in a sign ruled by the other.
pub fn check_mutual_reception(body_a: Body, sign_a: Sign, body_b: Body, sign_b: Sign) -> bool {
    sign_a.ruler() == body_b && sign_b.ruler() == body_a
}
