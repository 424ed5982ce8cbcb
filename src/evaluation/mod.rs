//! Project evaluation: NPV, IRR, benefit/cost ratio, NPV profile and optional risk

mod evaluator;
mod report;

pub use evaluator::{
    evaluate_project, EvaluationConfig, ProjectEvaluator, DEFAULT_PROFILE_HALF_WIDTH,
    DEFAULT_PROFILE_POINTS,
};
pub use report::{EvaluationReport, EvaluationSummary};
