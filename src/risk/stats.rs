//! Summary statistics over simulated NPV samples

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Distribution of simulated NPVs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub n_sim: usize,
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    pub p5: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p95: f64,
    /// Raw samples in trial order, kept for charting
    pub samples: Vec<f64>,
}

/// Qualitative reading of the probability that NPV is positive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    /// At least 75% of trials positive
    Robust,
    /// At least 50% of trials positive
    Moderate,
    Risky,
}

impl RiskSummary {
    /// Build a summary from samples in trial order
    pub fn from_samples(samples: Vec<f64>) -> Self {
        let mut sorted = samples.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        Self {
            n_sim: samples.len(),
            mean: mean(&samples),
            std_dev: population_std_dev(&samples),
            p5: percentile(&sorted, 5.0),
            p25: percentile(&sorted, 25.0),
            p50: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            p95: percentile(&sorted, 95.0),
            samples,
        }
    }

    /// Share of trials with NPV strictly above zero
    pub fn probability_positive(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let positive = self.samples.iter().filter(|&&v| v > 0.0).count();
        positive as f64 / self.samples.len() as f64
    }

    pub fn risk_band(&self) -> RiskBand {
        let p = self.probability_positive();
        if p >= 0.75 {
            RiskBand::Robust
        } else if p >= 0.50 {
            RiskBand::Moderate
        } else {
            RiskBand::Risky
        }
    }

    /// (percentile, value) pairs in ascending percentile order
    pub fn percentiles(&self) -> [(f64, f64); 5] {
        [
            (5.0, self.p5),
            (25.0, self.p25),
            (50.0, self.p50),
            (75.0, self.p75),
            (95.0, self.p95),
        ]
    }
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn population_std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Percentile `p` (0-100) of ascending `sorted`, linearly interpolated
/// between closest ranks
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = (p / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = (lower + 1).min(n - 1);
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&sorted, 50.0), 3.0);
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 100.0), 5.0);
        assert_abs_diff_eq!(percentile(&sorted, 25.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile(&[10.0, 20.0], 5.0), 10.5, epsilon = 1e-12);
    }

    #[test]
    fn test_population_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(mean(&values), 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(population_std_dev(&values), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_keeps_trial_order() {
        let summary = RiskSummary::from_samples(vec![3.0, -1.0, 2.0, 5.0]);
        assert_eq!(summary.samples, vec![3.0, -1.0, 2.0, 5.0]);
        assert_eq!(summary.n_sim, 4);
        assert!(summary.p5 <= summary.p25 && summary.p75 <= summary.p95);
        assert_abs_diff_eq!(summary.probability_positive(), 0.75, epsilon = 1e-12);
        assert_eq!(summary.risk_band(), RiskBand::Robust);
    }

    #[test]
    fn test_risk_bands() {
        assert_eq!(RiskSummary::from_samples(vec![1.0, -1.0]).risk_band(), RiskBand::Moderate);
        assert_eq!(RiskSummary::from_samples(vec![1.0, -1.0, -2.0]).risk_band(), RiskBand::Risky);
    }
}
