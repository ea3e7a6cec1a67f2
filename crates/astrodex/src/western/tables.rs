//! Reference tables for traditional Western dignities.
//!
//! Sign order is the tropical zodiac starting at Aries (index 0). Every table
//! is indexed either by sign index or by body and never changes at runtime.

use crate::angles::normalize_degrees;
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign at `index`, wrapping past Pisces.
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Sign containing the ecliptic longitude.
    pub fn from_longitude(longitude: f64) -> Sign {
        Self::from_index((normalize_degrees(longitude) / 30.0) as usize)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Fire, earth, air and water repeat every four signs.
    pub fn element(&self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Traditional domicile ruler.
    pub fn ruler(&self) -> Body {
        DOMICILE_RULERS[self.index()]
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const DOMICILE_RULERS: [Body; 12] = [
    Body::Mars,    // Aries
    Body::Venus,   // Taurus
    Body::Mercury, // Gemini
    Body::Moon,    // Cancer
    Body::Sun,     // Leo
    Body::Mercury, // Virgo
    Body::Venus,   // Libra
    Body::Mars,    // Scorpio
    Body::Jupiter, // Sagittarius
    Body::Saturn,  // Capricorn
    Body::Saturn,  // Aquarius
    Body::Jupiter, // Pisces
];

/// Exaltation sign and the degree of exact exaltation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Exaltation {
    pub sign: Sign,
    pub degree: f64,
}

pub fn exaltation(body: Body) -> Exaltation {
    let (sign, degree) = match body {
        Body::Sun => (Sign::Aries, 19.0),
        Body::Moon => (Sign::Taurus, 3.0),
        Body::Mercury => (Sign::Virgo, 15.0),
        Body::Venus => (Sign::Pisces, 27.0),
        Body::Mars => (Sign::Capricorn, 28.0),
        Body::Jupiter => (Sign::Cancer, 15.0),
        Body::Saturn => (Sign::Libra, 21.0),
    };
    Exaltation { sign, degree }
}

/// Signs opposite the body's domiciles.
pub fn detriments(body: Body) -> &'static [Sign] {
    match body {
        Body::Sun => &[Sign::Aquarius],
        Body::Moon => &[Sign::Capricorn],
        Body::Mercury => &[Sign::Sagittarius, Sign::Pisces],
        Body::Venus => &[Sign::Aries, Sign::Scorpio],
        Body::Mars => &[Sign::Libra, Sign::Taurus],
        Body::Jupiter => &[Sign::Gemini, Sign::Virgo],
        Body::Saturn => &[Sign::Cancer, Sign::Leo],
    }
}

/// Sign opposite the body's exaltation.
pub fn fall(body: Body) -> Sign {
    match body {
        Body::Sun => Sign::Libra,
        Body::Moon => Sign::Scorpio,
        Body::Mercury => Sign::Pisces,
        Body::Venus => Sign::Virgo,
        Body::Mars => Sign::Cancer,
        Body::Jupiter => Sign::Capricorn,
        Body::Saturn => Sign::Aries,
    }
}

/// Dorothean triplicity rulers of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplicityRulers {
    pub day: Body,
    pub night: Body,
    pub participating: Body,
}

pub fn triplicity_rulers(element: Element) -> TriplicityRulers {
    let (day, night, participating) = match element {
        Element::Fire => (Body::Sun, Body::Jupiter, Body::Saturn),
        Element::Earth => (Body::Venus, Body::Moon, Body::Mars),
        Element::Air => (Body::Saturn, Body::Mercury, Body::Jupiter),
        Element::Water => (Body::Venus, Body::Mars, Body::Moon),
    };
    TriplicityRulers {
        day,
        night,
        participating,
    }
}

/// One Egyptian bound: the ruler holds degrees from the previous bound's end
/// up to (not including) `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub end: f64,
    pub ruler: Body,
}

const fn bound(end: f64, ruler: Body) -> Bound {
    Bound { end, ruler }
}

use crate::ephemeris::Body::{Jupiter as JU, Mars as MA, Mercury as ME, Saturn as SA, Venus as VE};

const EGYPTIAN_BOUNDS: [[Bound; 5]; 12] = [
    [bound(6.0, JU), bound(12.0, VE), bound(20.0, ME), bound(25.0, MA), bound(30.0, SA)],
    [bound(8.0, VE), bound(14.0, ME), bound(22.0, JU), bound(27.0, SA), bound(30.0, MA)],
    [bound(6.0, ME), bound(12.0, JU), bound(17.0, VE), bound(24.0, MA), bound(30.0, SA)],
    [bound(7.0, MA), bound(13.0, VE), bound(19.0, ME), bound(26.0, JU), bound(30.0, SA)],
    [bound(6.0, JU), bound(11.0, VE), bound(18.0, ME), bound(24.0, MA), bound(30.0, SA)],
    [bound(7.0, ME), bound(17.0, VE), bound(21.0, JU), bound(28.0, MA), bound(30.0, SA)],
    [bound(6.0, SA), bound(14.0, ME), bound(21.0, JU), bound(28.0, VE), bound(30.0, MA)],
    [bound(7.0, MA), bound(11.0, VE), bound(19.0, ME), bound(24.0, JU), bound(30.0, SA)],
    [bound(12.0, JU), bound(17.0, VE), bound(21.0, ME), bound(26.0, MA), bound(30.0, SA)],
    [bound(7.0, ME), bound(14.0, JU), bound(22.0, VE), bound(26.0, MA), bound(30.0, SA)],
    [bound(7.0, ME), bound(13.0, VE), bound(20.0, JU), bound(25.0, MA), bound(30.0, SA)],
    [bound(12.0, VE), bound(16.0, JU), bound(19.0, ME), bound(28.0, MA), bound(30.0, SA)],
];

pub fn egyptian_bounds(sign: Sign) -> &'static [Bound; 5] {
    &EGYPTIAN_BOUNDS[sign.index()]
}

/// Ruler of the bound containing `degree_in_sign`.
pub fn bound_lord(sign: Sign, degree_in_sign: f64) -> Body {
    let bounds = egyptian_bounds(sign);
    bounds
        .iter()
        .find(|b| degree_in_sign < b.end)
        .unwrap_or(&bounds[4])
        .ruler
}
