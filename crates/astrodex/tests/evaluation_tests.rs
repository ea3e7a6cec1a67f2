mod common;

use astrodex::evaluation::{
    assemble_record, evaluate_chart, overall_testimony, sect_benefic_malefic, Assessment,
    ConditionWorksheet, DomicileLordCondition, Grade, SectAgreement, SectAlignment,
    TestimonyClass, WorksheetFlags,
};
use astrodex::western::DignitiesService;
use astrodex::{Body, ChartCalculator, ChartResult, Observer, Sect};
use common::{j2000, night_sky};
use std::sync::Arc;

fn night_chart() -> (ChartCalculator, ChartResult) {
    let calculator = ChartCalculator::new(Arc::new(night_sky()));
    let chart = calculator
        .calculate_complete_chart(j2000(), Observer::new(51.48, 0.0))
        .unwrap();
    (calculator, chart)
}

#[test]
fn test_saturn_is_contrary_at_night() {
    let status = sect_benefic_malefic(Body::Saturn, Sect::Nocturnal);
    assert!(status.is_sect_malefic);
    assert!(!status.is_sect_benefic);
    assert_eq!(status.sect_alignment, SectAlignment::Contrary);
}

#[test]
fn test_testimony_from_chart_aspects() {
    let (calculator, chart) = night_chart();
    let aspects = calculator.chart_aspects(&chart);

    // Jupiter: trine from Venus, opposition from Mars
    let jupiter = overall_testimony(Body::Jupiter, &aspects, chart.sect);
    assert_eq!(jupiter.classification, TestimonyClass::Mixed);
    assert_eq!(jupiter.favorable_count, 1);
    assert_eq!(jupiter.unfavorable_count, 1);
    assert_eq!(jupiter.sect_alignment, SectAlignment::Neutral);
    assert_eq!(jupiter.score, 0);
}

#[test]
fn test_venus_record_and_score() {
    let (calculator, chart) = night_chart();
    let aspects = calculator.chart_aspects(&chart);
    let dignities = DignitiesService.chart_dignities(&chart.placements(), chart.sect);

    let venus = assemble_record(Body::Venus, &chart, &aspects, &dignities).unwrap();
    assert_eq!(venus.sect, SectAgreement::Same);
    assert!(venus.lords.domicile);
    assert!(!venus.lords.bound);
    assert!(venus.essential_dignity.domicile);
    assert!(!venus.essential_dignity.triplicity);
    assert!(venus.lunar_aspects.applying_to_moon);
    assert!(venus.testimony.favorable);
    assert!(!venus.testimony.bonified);
    assert_eq!(venus.condition_of_domicile_lord, DomicileLordCondition::Helps);

    let report = venus.calculate_score();
    assert_eq!(report.raw_score, 22);
    assert!((report.normalized_score - 80.0).abs() < 1e-9);
    assert_eq!(report.grade, Grade::B);
}

#[test]
fn test_jupiter_is_bonified_by_venus_at_night() {
    let (calculator, chart) = night_chart();
    let aspects = calculator.chart_aspects(&chart);
    let dignities = DignitiesService.chart_dignities(&chart.placements(), chart.sect);

    let jupiter = assemble_record(Body::Jupiter, &chart, &aspects, &dignities).unwrap();
    assert!(jupiter.rejoicing.in_sign);
    assert!(jupiter.testimony.bonified);
    assert!(jupiter.testimony.unfavorable);
    assert!(!jupiter.testimony.maltreated);
    assert!(jupiter.essential_dignity.detriment);

    let moon = assemble_record(Body::Moon, &chart, &aspects, &dignities).unwrap();
    assert!(moon.essential_dignity.fall);
    assert!(!moon.lunar_aspects.applying_to_moon);

    let sun = assemble_record(Body::Sun, &chart, &aspects, &dignities).unwrap();
    assert_eq!(sun.solar_phase.visibility, None);
}

#[test]
fn test_evaluate_whole_chart() {
    let (calculator, chart) = night_chart();
    let aspects = calculator.chart_aspects(&chart);
    let dignities = DignitiesService.chart_dignities(&chart.placements(), chart.sect);

    let evaluation = evaluate_chart("Night Client", &chart, &aspects, &dignities).unwrap();
    assert_eq!(evaluation.chart_sect, Sect::Nocturnal);
    assert_eq!(evaluation.planets().len(), 7);
    let scores = evaluation.calculate_all_scores();
    assert!(scores.values().all(|s| (0.0..=100.0).contains(&s.normalized_score)));
    assert_eq!(
        evaluation.calculate_planet_score(Body::Venus).map(|s| s.raw_score),
        Some(22)
    );
}

#[test]
fn test_venus_worksheet() {
    let (calculator, chart) = night_chart();
    let aspects = calculator.chart_aspects(&chart);
    let dignities = DignitiesService.chart_dignities(&chart.placements(), chart.sect);

    let sheet = ConditionWorksheet::from_chart(
        Body::Venus,
        &chart,
        &aspects,
        dignities[&Body::Venus],
        WorksheetFlags::default(),
    )
    .unwrap();
    assert_eq!(sheet.essential_total(), 5);
    // direct 4, in sect 3, Jupiter trine 4
    assert_eq!(sheet.accidental_total(), 11);
    assert_eq!(sheet.assessment(), Assessment::VeryStrong);

    let with_flags = ConditionWorksheet::from_chart(
        Body::Venus,
        &chart,
        &aspects,
        dignities[&Body::Venus],
        WorksheetFlags {
            besieged: true,
            ..WorksheetFlags::default()
        },
    )
    .unwrap();
    assert_eq!(with_flags.overall(), 11);
    assert_eq!(with_flags.assessment(), Assessment::Strong);
}
