//! Batch evaluation and ranking of project portfolios
//!
//! Projects are independent, so evaluations run in parallel. Each Monte Carlo
//! run owns its generator; nothing is shared between projects.

use crate::cashflows::{CashflowPlan, CashflowSequence};
use crate::error::Result;
use crate::evaluation::{EvaluationConfig, EvaluationReport, ProjectEvaluator};
use crate::ranking::{rank_projects, RankCandidate, RankingEntry, Weights};
use crate::risk::SimulationConfig;
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Cashflows given explicitly or generated from a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CashflowInput {
    Explicit(CashflowSequence),
    Planned {
        initial_outlay: f64,
        horizon: usize,
        plan: CashflowPlan,
    },
}

impl CashflowInput {
    pub fn resolve(&self) -> Result<CashflowSequence> {
        match self {
            CashflowInput::Explicit(sequence) => Ok(sequence.clone()),
            CashflowInput::Planned { initial_outlay, horizon, plan } => plan.build(*initial_outlay, *horizon),
        }
    }
}

/// One project of a portfolio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    pub cashflows: CashflowInput,
    /// Discount rate (decimal)
    pub rate: f64,
    #[serde(default)]
    pub monte_carlo: Option<SimulationConfig>,
}

impl ProjectSpec {
    pub fn new(name: impl Into<String>, cashflows: CashflowSequence, rate: f64) -> Self {
        Self {
            name: name.into(),
            cashflows: CashflowInput::Explicit(cashflows),
            rate,
            monte_carlo: None,
        }
    }

    pub fn with_monte_carlo(mut self, config: SimulationConfig) -> Self {
        self.monte_carlo = Some(config);
        self
    }
}

/// Evaluation result for one named project
#[derive(Debug)]
pub struct ProjectOutcome {
    pub name: String,
    pub result: Result<EvaluationReport>,
}

/// Evaluates portfolios against a shared configuration template
///
/// The template supplies IRR and profile settings; rate and Monte Carlo
/// settings come from each project.
#[derive(Debug, Clone)]
pub struct PortfolioRunner {
    template: EvaluationConfig,
}

impl PortfolioRunner {
    pub fn new() -> Self {
        Self {
            template: EvaluationConfig::new(0.0),
        }
    }

    pub fn with_template(template: EvaluationConfig) -> Self {
        Self { template }
    }

    fn config_for(&self, spec: &ProjectSpec, with_risk: bool) -> EvaluationConfig {
        let mut config = self.template.clone();
        config.rate = spec.rate;
        config.risk = if with_risk { spec.monte_carlo } else { None };
        config
    }

    /// Evaluate one project, including its Monte Carlo settings
    pub fn evaluate(&self, spec: &ProjectSpec) -> Result<EvaluationReport> {
        let cashflows = spec.cashflows.resolve()?;
        ProjectEvaluator::new(self.config_for(spec, true)).evaluate(&cashflows)
    }

    /// Evaluate every project in parallel, preserving input order
    pub fn evaluate_all(&self, specs: &[ProjectSpec]) -> Vec<ProjectOutcome> {
        info!("Evaluating {} projects", specs.len());
        specs
            .par_iter()
            .map(|spec| ProjectOutcome {
                name: spec.name.clone(),
                result: self.evaluate(spec),
            })
            .collect()
    }

    /// Evaluate without Monte Carlo and rank under `weights`
    ///
    /// Projects that fail validation are logged and left out of the ranking.
    pub fn rank(&self, specs: &[ProjectSpec], weights: &Weights) -> Vec<RankingEntry> {
        let candidates: Vec<RankCandidate> = specs
            .par_iter()
            .filter_map(|spec| {
                let evaluated = spec
                    .cashflows
                    .resolve()
                    .and_then(|cf| ProjectEvaluator::new(self.config_for(spec, false)).evaluate(&cf));
                match evaluated {
                    Ok(report) => Some(RankCandidate::new(spec.name.clone(), report.metrics())),
                    Err(e) => {
                        warn!("Skipping project '{}' from ranking: {}", spec.name, e);
                        None
                    }
                }
            })
            .collect();

        rank_projects(&candidates, weights)
    }
}

impl Default for PortfolioRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Load project specs from a JSON array file
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectSpec>> {
    let file = File::open(path)?;
    load_projects_from_reader(BufReader::new(file))
}

/// Load project specs from any JSON reader
pub fn load_projects_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProjectSpec>> {
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppraisalError;
    use approx::assert_abs_diff_eq;

    const PORTFOLIO: &str = r#"[
        {"name": "Annuity", "rate": 0.12, "cashflows": [-10000, 3000, 3000, 3000, 3000, 3000]},
        {"name": "Growth", "rate": 0.12,
         "cashflows": {"initial_outlay": -10000, "horizon": 5,
                       "plan": {"type": "geometric", "base": 2000, "growth": 0.10}},
         "monte_carlo": {"n_sim": 200, "seed": 5}},
        {"name": "Payoff", "rate": 0.10, "cashflows": [-5000, 5000]}
    ]"#;

    #[test]
    fn test_load_portfolio_json() {
        let specs = load_projects_from_reader(PORTFOLIO.as_bytes()).unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[1].monte_carlo.unwrap().sigma, 0.15);
        assert_eq!(specs[1].cashflows.resolve().unwrap().len(), 6);
    }

    #[test]
    fn test_evaluate_all_preserves_order() {
        let specs = load_projects_from_reader(PORTFOLIO.as_bytes()).unwrap();
        let outcomes = PortfolioRunner::new().evaluate_all(&specs);

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Annuity", "Growth", "Payoff"]);

        let annuity = outcomes[0].result.as_ref().unwrap();
        assert_abs_diff_eq!(annuity.npv, 814.33, epsilon = 0.01);
        assert!(annuity.risk.is_none());

        let growth = outcomes[1].result.as_ref().unwrap();
        assert_eq!(growth.risk.as_ref().unwrap().n_sim, 200);
    }

    #[test]
    fn test_rank_portfolio() {
        let specs = load_projects_from_reader(PORTFOLIO.as_bytes()).unwrap();
        let ranking = PortfolioRunner::new().rank(&specs, &Weights::default());

        let names: Vec<&str> = ranking.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Annuity", "Payoff", "Growth"]);
        assert_abs_diff_eq!(ranking[0].score, 1.0, epsilon = 1e-12);
        assert!(ranking.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_invalid_project_is_reported_not_ranked() {
        let bad = ProjectSpec {
            name: "Broken".to_string(),
            cashflows: CashflowInput::Planned {
                initial_outlay: -100.0,
                horizon: 2,
                plan: CashflowPlan::Constant { amount: 60.0 },
            },
            rate: -1.5,
            monte_carlo: None,
        };
        let good = ProjectSpec::new("Good", CashflowSequence::new(vec![-100.0, 60.0, 60.0]).unwrap(), 0.05);

        let runner = PortfolioRunner::default();
        let outcomes = runner.evaluate_all(&[bad.clone(), good.clone()]);
        assert!(matches!(outcomes[0].result, Err(AppraisalError::InvalidRate(_))));

        let ranking = runner.rank(&[bad, good], &Weights::default());
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].name, "Good");
    }

    #[test]
    fn test_oversized_trial_count_is_rejected() {
        let json = r#"[{"name": "Huge", "rate": 0.1, "cashflows": [-100, 60, 60],
                        "monte_carlo": {"n_sim": 10000000000}}]"#;
        let specs = load_projects_from_reader(json.as_bytes()).unwrap();
        let outcomes = PortfolioRunner::new().evaluate_all(&specs);
        assert!(matches!(outcomes[0].result, Err(AppraisalError::InvalidTrialCount(_))));
    }
}
