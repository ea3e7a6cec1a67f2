use astrodex::western::{bound_lord, exaltation, fall, triplicity_rulers, Element, Sign};
use astrodex::Body;

#[test]
fn test_each_planet_rules_its_signs() {
    let rulers: Vec<Body> = Sign::ALL.iter().map(|s| s.ruler()).collect();
    assert_eq!(rulers.iter().filter(|&&b| b == Body::Sun).count(), 1);
    assert_eq!(rulers.iter().filter(|&&b| b == Body::Moon).count(), 1);
    for body in [Body::Mercury, Body::Venus, Body::Mars, Body::Jupiter, Body::Saturn] {
        assert_eq!(rulers.iter().filter(|&&b| b == body).count(), 2, "{body}");
    }
}

#[test]
fn test_exaltations() {
    assert_eq!(exaltation(Body::Sun).sign, Sign::Aries);
    assert_eq!(exaltation(Body::Sun).degree, 19.0);
    assert_eq!(exaltation(Body::Mars).sign, Sign::Capricorn);
    assert_eq!(fall(Body::Mars), Sign::Cancer);
}

#[test]
fn test_water_triplicity() {
    let rulers = triplicity_rulers(Element::Water);
    assert_eq!(rulers.day, Body::Venus);
    assert_eq!(rulers.night, Body::Mars);
    assert_eq!(rulers.participating, Body::Moon);
}

#[test]
fn test_bound_edges() {
    // Aries: Jupiter to 6°, then Venus
    assert_eq!(bound_lord(Sign::Aries, 5.999), Body::Jupiter);
    assert_eq!(bound_lord(Sign::Aries, 6.0), Body::Venus);
    assert_eq!(bound_lord(Sign::Capricorn, 29.9), Body::Saturn);
}
