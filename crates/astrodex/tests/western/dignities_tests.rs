use astrodex::western::{
    bound_ruler, check_mutual_reception, triplicity_ruler, DignitiesService, Placement,
    TriplicityRole,
};
use astrodex::{Body, Sect, Sign};

#[test]
fn test_mars_and_venus_in_mutual_reception() {
    assert!(check_mutual_reception(Body::Mars, Sign::Taurus, Body::Venus, Sign::Aries));
    assert!(!check_mutual_reception(Body::Mars, Sign::Aries, Body::Venus, Sign::Taurus));
}

#[test]
fn test_sun_in_leo() {
    let service = DignitiesService;
    let dignities = service.essential_dignities(Body::Sun, Sign::Leo, 15.0, Sect::Diurnal);
    assert!(dignities.domicile);
    assert!(!dignities.exaltation);
    assert_eq!(dignities.triplicity, TriplicityRole::Day);
    assert!(!dignities.detriment && !dignities.fall);
}

#[test]
fn test_moon_in_scorpio_is_fallen_but_holds_triplicity() {
    let service = DignitiesService;
    let dignities = service.essential_dignities(Body::Moon, Sign::Scorpio, 10.0, Sect::Diurnal);
    assert!(dignities.fall);
    assert!(!dignities.detriment);
    assert_eq!(dignities.triplicity, TriplicityRole::Participating);
}

#[test]
fn test_saturn_exalted_in_libra_bound() {
    let service = DignitiesService;
    let dignities = service.essential_dignities(Body::Saturn, Sign::Libra, 3.0, Sect::Nocturnal);
    assert!(dignities.exaltation);
    assert!(dignities.term);
    assert_eq!(dignities.triplicity, TriplicityRole::None);
}

#[test]
fn test_chart_dignities_fill_mutual_reception() {
    let placements = [
        Placement::from_longitude(Body::Mars, 45.0),  // Taurus
        Placement::from_longitude(Body::Venus, 15.0), // Aries
        Placement::from_longitude(Body::Sun, 135.0),  // Leo
    ];
    let dignities = DignitiesService.chart_dignities(&placements, Sect::Diurnal);
    assert!(dignities[&Body::Mars].mutual_reception);
    assert!(dignities[&Body::Venus].mutual_reception);
    assert!(dignities[&Body::Venus].detriment);
    assert!(!dignities[&Body::Sun].mutual_reception);
}

#[test]
fn test_triplicity_and_bound_queries() {
    // Aries is fire: Sun by day, Jupiter by night
    assert_eq!(triplicity_ruler(0, true), Body::Sun);
    assert_eq!(triplicity_ruler(0, false), Body::Jupiter);
    assert_eq!(triplicity_ruler(6, false), Body::Mercury);
    // 15° Libra
    assert_eq!(bound_ruler(195.0), Body::Jupiter);
    // 0° Aries and a wrapped longitude
    assert_eq!(bound_ruler(0.0), Body::Jupiter);
    assert_eq!(bound_ruler(-1.0), Body::Saturn);
}
