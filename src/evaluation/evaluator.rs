//! Orchestrates discounting, IRR, profile and risk into one report

use super::report::EvaluationReport;
use crate::cashflows::CashflowSequence;
use crate::error::{AppraisalError, Result};
use crate::risk::{simulate_npv, SimulationConfig};
use crate::valuation::{benefit_cost_ratio, npv, npv_profile, rate_grid, solve_irr_with, IrrConfig};
use serde::{Deserialize, Serialize};

/// Profile spans this far either side of the evaluation rate
pub const DEFAULT_PROFILE_HALF_WIDTH: f64 = 0.20;
pub const DEFAULT_PROFILE_POINTS: usize = 41;
/// Profile rates never start below this
const PROFILE_FLOOR: f64 = 0.0;

/// Settings for a single evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Discount rate (decimal, e.g. 0.12 for 12%)
    pub rate: f64,

    #[serde(default)]
    pub irr: IrrConfig,

    #[serde(default = "default_half_width")]
    pub profile_half_width: f64,

    #[serde(default = "default_profile_points")]
    pub profile_points: usize,

    /// Monte Carlo settings; no simulation when None
    #[serde(default)]
    pub risk: Option<SimulationConfig>,
}

fn default_half_width() -> f64 { DEFAULT_PROFILE_HALF_WIDTH }
fn default_profile_points() -> usize { DEFAULT_PROFILE_POINTS }

impl EvaluationConfig {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            irr: IrrConfig::default(),
            profile_half_width: DEFAULT_PROFILE_HALF_WIDTH,
            profile_points: DEFAULT_PROFILE_POINTS,
            risk: None,
        }
    }

    pub fn with_risk(mut self, risk: SimulationConfig) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_irr(mut self, irr: IrrConfig) -> Self {
        self.irr = irr;
        self
    }

    /// Rates at which the NPV profile is sampled
    pub fn profile_rates(&self) -> Vec<f64> {
        let start = (self.rate - self.profile_half_width).max(PROFILE_FLOOR);
        let end = self.rate + self.profile_half_width;
        rate_grid(start, end, self.profile_points)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.rate.is_finite() || self.rate <= -1.0 {
            return Err(AppraisalError::InvalidRate(self.rate));
        }
        if let Some(risk) = &self.risk {
            risk.validate()?;
        }
        Ok(())
    }
}

/// Evaluates projects under a fixed configuration
///
/// # Example
/// ```ignore
/// let evaluator = ProjectEvaluator::new(EvaluationConfig::new(0.12));
/// let report = evaluator.evaluate(&cashflows)?;
/// println!("NPV: {:.2}", report.npv);
/// ```
#[derive(Debug, Clone)]
pub struct ProjectEvaluator {
    config: EvaluationConfig,
}

impl ProjectEvaluator {
    pub fn new(config: EvaluationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn evaluate(&self, cashflows: &CashflowSequence) -> Result<EvaluationReport> {
        self.config.validate()?;

        let flows = cashflows.as_slice();
        let rate = self.config.rate;

        let risk = match &self.config.risk {
            Some(sim) => Some(simulate_npv(flows, rate, sim)?),
            None => None,
        };

        Ok(EvaluationReport {
            cashflows: flows.to_vec(),
            rate,
            npv: npv(flows, rate),
            irr: solve_irr_with(flows, &self.config.irr),
            // An outlay with no later periods has nothing to weigh it against
            benefit_cost: if cashflows.horizon() == 0 {
                None
            } else {
                benefit_cost_ratio(flows, rate)
            },
            npv_profile: npv_profile(flows, &self.config.profile_rates()),
            risk,
        })
    }
}

/// Evaluate raw cashflows at `rate`, optionally with a risk simulation
pub fn evaluate_project(
    cashflows: &[f64],
    rate: f64,
    risk: Option<SimulationConfig>,
) -> Result<EvaluationReport> {
    let sequence = CashflowSequence::new(cashflows.to_vec())?;
    let mut config = EvaluationConfig::new(rate);
    config.risk = risk;
    ProjectEvaluator::new(config).evaluate(&sequence)
}
