//! Evaluation report produced for a single project

use crate::ranking::ProjectMetrics;
use crate::risk::RiskSummary;
use crate::valuation::ProfilePoint;
use serde::{Deserialize, Serialize};

/// Full result of evaluating one project at one discount rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Cashflows as evaluated, period 0 first
    pub cashflows: Vec<f64>,

    /// Discount rate used for NPV, B/C and the profile centre
    pub rate: f64,

    pub npv: f64,

    /// None when the scan finds no sign change
    pub irr: Option<f64>,

    /// None when discounted costs are zero
    pub benefit_cost: Option<f64>,

    pub npv_profile: Vec<ProfilePoint>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub risk: Option<RiskSummary>,
}

/// Flat one-row view of a report, for tables and CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub name: String,
    pub rate: f64,
    pub periods: usize,
    pub initial_outlay: f64,
    pub npv: f64,
    pub irr: Option<f64>,
    pub benefit_cost: Option<f64>,
    pub viable: bool,
    pub probability_positive: Option<f64>,
}

impl EvaluationReport {
    /// NPV strictly positive at the evaluation rate
    pub fn is_viable(&self) -> bool {
        self.npv > 0.0
    }

    /// IRR exists and beats the evaluation rate; None when IRR is undefined
    pub fn irr_exceeds_rate(&self) -> Option<bool> {
        self.irr.map(|irr| irr > self.rate)
    }

    /// Benefit/cost ratio above one; None when the ratio is undefined
    pub fn is_profitable(&self) -> Option<bool> {
        self.benefit_cost.map(|bc| bc > 1.0)
    }

    /// Number of periods after the initial outlay
    pub fn periods(&self) -> usize {
        self.cashflows.len().saturating_sub(1)
    }

    /// Metrics consumed by the ranker
    pub fn metrics(&self) -> ProjectMetrics {
        ProjectMetrics {
            npv: Some(self.npv),
            irr: self.irr,
            benefit_cost: self.benefit_cost,
        }
    }

    pub fn summary(&self, name: &str) -> EvaluationSummary {
        EvaluationSummary {
            name: name.to_string(),
            rate: self.rate,
            periods: self.periods(),
            initial_outlay: self.cashflows.first().copied().unwrap_or(0.0),
            npv: self.npv,
            irr: self.irr,
            benefit_cost: self.benefit_cost,
            viable: self.is_viable(),
            probability_positive: self.risk.as_ref().map(|r| r.probability_positive()),
        }
    }
}
