//! Derives evaluation records from a computed chart.

use crate::aspects::{Aspect, AspectNature};
use crate::chart::{ChartError, ChartResult, MorningEvening, Sect};
use crate::ephemeris::Body;
use crate::evaluation::scoring::{
    DomicileLordCondition, EssentialDignity, EvaluationRecord, LunarAspects, Lordships, Nature,
    PlanetEvaluation, Rejoicing, SectAgreement, SolarPhaseCondition, Testimony,
};
use crate::evaluation::testimony::{overall_testimony, sect_benefic_malefic, SectAlignment};
use crate::western::{bound_ruler, exaltation, triplicity_ruler, DignitySet, Sign};
use std::collections::BTreeMap;

/// Build the record for `body` from `chart`, its aspects and the chart's
/// essential dignities.
///
/// Lordships are taken over the ascendant degree. Bonification is an
/// applying soft aspect from the benefic of the sect, maltreatment a hard
/// aspect from the contrary malefic.
pub fn assemble_record(
    body: Body,
    chart: &ChartResult,
    aspects: &[Aspect],
    dignities: &BTreeMap<Body, DignitySet>,
) -> Result<EvaluationRecord, ChartError> {
    let planet = chart.planet(body)?;
    let dignity = dignities
        .get(&body)
        .copied()
        .ok_or(ChartError::MissingBody { body })?;
    let phase = chart.solar_phase(body)?;
    let testimony = overall_testimony(body, aspects, chart.sect);

    let sect = match sect_benefic_malefic(body, chart.sect).sect_alignment {
        SectAlignment::Sect => SectAgreement::Same,
        SectAlignment::Contrary => SectAgreement::Contrary,
        SectAlignment::Neutral => SectAgreement::Neutral,
    };

    let asc_sign = Sign::from_longitude(chart.ascendant);
    let lords = Lordships {
        domicile: asc_sign.ruler() == body,
        exaltation: exaltation(body).sign == asc_sign,
        triplicity: triplicity_ruler(asc_sign.index(), chart.sect.is_day()) == body,
        bound: bound_ruler(chart.ascendant) == body,
    };

    let sun_longitude = chart.planet(Body::Sun)?.position.longitude;
    let rejoicing = Rejoicing {
        in_sign: planet.rejoicing,
        in_solar_phase: rejoices_in_solar_phase(body, planet.position.longitude, sun_longitude),
    };

    let (benefic, malefic) = match chart.sect {
        Sect::Diurnal => (Body::Jupiter, Body::Mars),
        Sect::Nocturnal => (Body::Venus, Body::Saturn),
    };
    let from = |other: Body, nature: AspectNature, applying_only: bool| {
        aspects.iter().any(|a| {
            a.other(body) == Some(other)
                && a.nature() == nature
                && (!applying_only || a.is_applying())
        })
    };

    Ok(EvaluationRecord {
        nature: Nature::of(body),
        sect,
        rejoicing,
        lords,
        essential_dignity: EssentialDignity {
            domicile: dignity.domicile,
            exaltation: dignity.exaltation,
            triplicity: dignity.triplicity.is_ruler(),
            bound: dignity.term,
            mutual_reception: dignity.mutual_reception,
            detriment: dignity.detriment,
            fall: dignity.fall,
        },
        solar_phase: SolarPhaseCondition {
            direction: phase.direction,
            speed: phase.speed_category(),
            visibility: planet.combustion.map(|c| c.visibility),
        },
        lunar_aspects: LunarAspects {
            applying_to_moon: body != Body::Moon
                && aspects
                    .iter()
                    .any(|a| a.other(body) == Some(Body::Moon) && a.is_applying()),
        },
        testimony: Testimony {
            favorable: testimony.favorable_count > 0,
            bonified: body != benefic && from(benefic, AspectNature::Soft, true),
            unfavorable: testimony.unfavorable_count > 0,
            maltreated: body != malefic && from(malefic, AspectNature::Hard, false),
        },
        condition_of_domicile_lord: domicile_lord_condition(body, planet.placement.sign, dignities),
    })
}

/// Records for every body in the chart.
pub fn evaluate_chart(
    client_name: &str,
    chart: &ChartResult,
    aspects: &[Aspect],
    dignities: &BTreeMap<Body, DignitySet>,
) -> Result<PlanetEvaluation, ChartError> {
    let mut evaluation = PlanetEvaluation::new(client_name, chart.sect);
    for &body in chart.planets.keys() {
        evaluation.add_planet(body, assemble_record(body, chart, aspects, dignities)?);
    }
    Ok(evaluation)
}

/// Diurnal planets rejoice rising before the Sun, nocturnal ones setting
/// after it. Mercury rejoices as a morning star.
fn rejoices_in_solar_phase(body: Body, longitude: f64, sun_longitude: f64) -> bool {
    let diff = (longitude - sun_longitude).rem_euclid(360.0);
    let oriental = diff >= 180.0;
    let occidental = diff > 0.0 && diff < 180.0;
    match body {
        Body::Sun => false,
        Body::Jupiter | Body::Saturn => oriental,
        Body::Moon | Body::Venus | Body::Mars => occidental,
        Body::Mercury => {
            crate::chart::morning_evening_star(longitude, sun_longitude) == MorningEvening::MorningStar
        }
    }
}

fn domicile_lord_condition(
    body: Body,
    sign: Sign,
    dignities: &BTreeMap<Body, DignitySet>,
) -> DomicileLordCondition {
    let ruler = sign.ruler();
    if ruler == body {
        return DomicileLordCondition::Helps;
    }
    match dignities.get(&ruler) {
        Some(d) if d.domicile || d.exaltation => DomicileLordCondition::Helps,
        Some(d) if d.detriment || d.fall => DomicileLordCondition::Hinders,
        _ => DomicileLordCondition::Neutral,
    }
}
