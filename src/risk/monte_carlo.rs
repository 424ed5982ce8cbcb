//! Monte Carlo simulation of NPV under multiplicative cashflow noise
//!
//! Every flow after period 0 is multiplied by an independent draw from
//! Normal(1, sigma). The period-0 outlay is known and never shocked.

use super::stats::RiskSummary;
use crate::error::{AppraisalError, Result};
use crate::valuation::npv;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

pub const DEFAULT_TRIALS: usize = 2000;
pub const DEFAULT_SIGMA: f64 = 0.15;
/// Upper bound on trials per run
pub const MAX_TRIALS: usize = 1_000_000;

/// Simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of trials
    #[serde(default = "default_trials")]
    pub n_sim: usize,

    /// Relative standard deviation of each shock (0.15 = 15%)
    #[serde(default = "default_sigma")]
    pub sigma: f64,

    /// Random seed for reproducibility; fresh entropy when None
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> usize { DEFAULT_TRIALS }
fn default_sigma() -> f64 { DEFAULT_SIGMA }

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_sim: DEFAULT_TRIALS,
            sigma: DEFAULT_SIGMA,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn new(n_sim: usize) -> Self {
        Self { n_sim, ..Default::default() }
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations that cannot produce a distribution
    pub fn validate(&self) -> Result<()> {
        if self.n_sim == 0 || self.n_sim > MAX_TRIALS {
            return Err(AppraisalError::InvalidTrialCount(self.n_sim));
        }
        if !(self.sigma.is_finite() && self.sigma > 0.0) {
            return Err(AppraisalError::InvalidSigma(self.sigma));
        }
        Ok(())
    }

    /// Generator for one simulation run
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Simulate NPV at `rate`, seeding a private generator from the config
pub fn simulate_npv(cashflows: &[f64], rate: f64, config: &SimulationConfig) -> Result<RiskSummary> {
    config.validate()?;
    let mut rng = config.rng();
    simulate_npv_with_rng(cashflows, rate, config.n_sim, config.sigma, &mut rng)
}

/// Simulate NPV at `rate` drawing shocks from a caller-supplied generator
pub fn simulate_npv_with_rng<R: Rng + ?Sized>(
    cashflows: &[f64],
    rate: f64,
    n_sim: usize,
    sigma: f64,
    rng: &mut R,
) -> Result<RiskSummary> {
    if cashflows.is_empty() {
        return Err(AppraisalError::EmptyCashflows);
    }
    SimulationConfig { n_sim, sigma, seed: None }.validate()?;

    let shock = Normal::new(1.0, sigma).map_err(|_| AppraisalError::InvalidSigma(sigma))?;

    let mut scenario = cashflows.to_vec();
    let mut samples = Vec::with_capacity(n_sim);

    for _ in 0..n_sim {
        for (shocked, &base) in scenario.iter_mut().zip(cashflows).skip(1) {
            *shocked = base * shock.sample(rng);
        }
        samples.push(npv(&scenario, rate));
    }

    Ok(RiskSummary::from_samples(samples))
}
