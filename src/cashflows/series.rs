//! Gradient series for building synthetic cashflows

use super::CashflowSequence;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Arithmetic gradient: `f0, f0 + g, f0 + 2g, ...` (`n` terms)
pub fn arithmetic_series(f0: f64, g: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| f0 + g * i as f64).collect()
}

/// Geometric gradient: `f0, f0(1+g), f0(1+g)^2, ...` (`n` terms)
pub fn geometric_series(f0: f64, g: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| f0 * (1.0 + g).powi(i as i32)).collect()
}

/// How the flows after period 0 are generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CashflowPlan {
    /// Same amount every period
    Constant { amount: f64 },
    /// Base amount growing by a fixed increment
    Arithmetic { base: f64, gradient: f64 },
    /// Base amount growing at a fixed rate
    Geometric { base: f64, growth: f64 },
    /// Explicit flows; the horizon is ignored
    Manual { flows: Vec<f64> },
}

impl CashflowPlan {
    /// Flows for periods 1..=horizon
    pub fn future_flows(&self, horizon: usize) -> Vec<f64> {
        match self {
            CashflowPlan::Constant { amount } => vec![*amount; horizon],
            CashflowPlan::Arithmetic { base, gradient } => arithmetic_series(*base, *gradient, horizon),
            CashflowPlan::Geometric { base, growth } => geometric_series(*base, *growth, horizon),
            CashflowPlan::Manual { flows } => flows.clone(),
        }
    }

    /// Prepend the initial outlay to the generated flows
    pub fn build(&self, initial_outlay: f64, horizon: usize) -> Result<CashflowSequence> {
        CashflowSequence::with_outlay(initial_outlay, &self.future_flows(horizon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_arithmetic_series() {
        assert_eq!(arithmetic_series(1000.0, 200.0, 4), vec![1000.0, 1200.0, 1400.0, 1600.0]);
    }

    #[test]
    fn test_geometric_series() {
        let series = geometric_series(1000.0, 0.10, 3);
        let expected = [1000.0, 1100.0, 1210.0];
        assert_eq!(series.len(), 3);
        for (got, want) in series.iter().zip(expected) {
            assert_abs_diff_eq!(*got, want, epsilon = 0.005);
        }
    }

    #[test]
    fn test_zero_length_series_is_empty() {
        assert!(arithmetic_series(1.0, 1.0, 0).is_empty());
        assert!(geometric_series(1.0, 0.5, 0).is_empty());
    }

    #[test]
    fn test_plan_builds_full_sequence() {
        let plan = CashflowPlan::Constant { amount: 3000.0 };
        let seq = plan.build(-10000.0, 5).unwrap();
        assert_eq!(seq.as_slice(), &[-10000.0, 3000.0, 3000.0, 3000.0, 3000.0, 3000.0]);

        let plan = CashflowPlan::Arithmetic { base: 2000.0, gradient: 300.0 };
        let seq = plan.build(-10000.0, 3).unwrap();
        assert_eq!(seq.as_slice(), &[-10000.0, 2000.0, 2300.0, 2600.0]);
    }

    #[test]
    fn test_manual_plan_ignores_horizon() {
        let plan = CashflowPlan::Manual { flows: vec![10.0, 20.0] };
        assert_eq!(plan.build(-25.0, 9).unwrap().len(), 3);
    }

    #[test]
    fn test_plan_from_json() {
        let plan: CashflowPlan =
            serde_json::from_str(r#"{"type":"geometric","base":2000.0,"growth":0.05}"#).unwrap();
        assert_eq!(plan, CashflowPlan::Geometric { base: 2000.0, growth: 0.05 });
    }
}
