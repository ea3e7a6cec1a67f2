pub mod dignities;
pub mod tables;

pub use dignities::{
    bound_ruler, check_mutual_reception, triplicity_ruler, DignitiesService, DignitySet, Placement,
    TriplicityRole,
};
pub use tables::{
    bound_lord, detriments, egyptian_bounds, exaltation, fall, triplicity_rulers, Bound, Element,
    Exaltation, Sign, TriplicityRulers,
};
