//! Monte Carlo risk analysis of NPV

mod monte_carlo;
mod stats;

pub use monte_carlo::{
    simulate_npv, simulate_npv_with_rng, SimulationConfig, DEFAULT_SIGMA, DEFAULT_TRIALS,
    MAX_TRIALS,
};
pub use stats::{mean, percentile, population_std_dev, RiskBand, RiskSummary};
