pub mod calculator;
pub mod types;

pub use calculator::{aspects_for_body, AspectCalculator};
pub use types::{Aspect, AspectDirection, AspectMatch, AspectNature, AspectType};
