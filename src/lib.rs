//! Project Appraisal - Evaluation engine for capital-investment projects
//!
//! This library provides:
//! - Net present value and NPV-vs-rate profiles
//! - Internal rate of return (Newton-Raphson with bracketed bisection fallback)
//! - Benefit/cost ratios
//! - Arithmetic and geometric cashflow series
//! - Monte Carlo risk distributions of NPV
//! - Weighted multicriteria ranking of project portfolios

pub mod error;
pub mod valuation;
pub mod cashflows;
pub mod risk;
pub mod evaluation;
pub mod ranking;
pub mod portfolio;
pub mod export;

// Re-export commonly used types
pub use error::{AppraisalError, Result};
pub use cashflows::{CashflowSequence, CashflowPlan, arithmetic_series, geometric_series};
pub use valuation::{npv, npv_profile, solve_irr, benefit_cost_ratio, IrrConfig};
pub use risk::{simulate_npv, RiskSummary, SimulationConfig};
pub use evaluation::{evaluate_project, EvaluationConfig, EvaluationReport, ProjectEvaluator};
pub use ranking::{rank_projects, RankCandidate, RankingEntry, ProjectMetrics, Weights};
pub use portfolio::{PortfolioRunner, ProjectSpec};
