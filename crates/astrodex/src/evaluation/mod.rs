//! Condition evaluation: aspect testimony, the weighted score, the
//! conditions worksheet, and assembly of records from a computed chart.

pub mod assemble;
pub mod scoring;
pub mod testimony;
pub mod worksheet;

pub use assemble::{assemble_record, evaluate_chart};
pub use scoring::{
    normalize_score, DomicileLordCondition, EssentialDignity, EvaluationRecord, Grade,
    LunarAspects, Lordships, Nature, PlanetEvaluation, Rejoicing, ScoreFactor, ScoreReport,
    SectAgreement, SolarPhaseCondition, Testimony,
};
pub use testimony::{
    categorize_testimony, overall_testimony, sect_benefic_malefic, SectAlignment, SectStatus,
    TestimonyCategories, TestimonyClass, TestimonyResult,
};
pub use worksheet::{Assessment, ConditionWorksheet, ReceivedAspects, WorksheetFlags, WorksheetMotion};
