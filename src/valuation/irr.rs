//! Internal Rate of Return (IRR) calculation
//!
//! Two phases:
//! 1. Newton-Raphson from an initial guess, abandoned on a vanishing
//!    derivative, on leaving the rate domain, or when the budget runs out.
//! 2. A fixed scan of 2200 rates over [-0.9999, -0.1] and [-0.05, 5.0],
//!    followed by bisection of the first sign-change bracket found.
//!
//! When the scan sees several sign changes the lowest bracket wins. Callers
//! that need to know about the ambiguity can inspect
//! [`IrrSolution::brackets_found`].

use super::discount::{npv, npv_and_derivative, rate_grid};
use log::debug;
use serde::{Deserialize, Serialize};

pub const DEFAULT_IRR_GUESS: f64 = 0.10;
pub const DEFAULT_IRR_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_IRR_MAX_ITERATIONS: u32 = 200;

/// Newton steps are abandoned below this derivative magnitude
const MIN_DERIVATIVE: f64 = 1e-12;
/// Newton candidates at or below this rate leave the valid domain
const MIN_NEWTON_RATE: f64 = -0.999999;

/// Near-degenerate scan region
const FINE_SCAN: (f64, f64, usize) = (-0.9999, -0.1, 200);
/// Broad scan region
const BROAD_SCAN: (f64, f64, usize) = (-0.05, 5.0, 2000);

const MAX_BISECTION_ITERATIONS: u32 = 100;

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrConfig {
    /// Starting rate for Newton-Raphson
    pub guess: f64,
    /// Convergence threshold on |NPV|
    pub tolerance: f64,
    /// Newton-Raphson iteration budget
    pub max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            guess: DEFAULT_IRR_GUESS,
            tolerance: DEFAULT_IRR_TOLERANCE,
            max_iterations: DEFAULT_IRR_MAX_ITERATIONS,
        }
    }
}

impl IrrConfig {
    pub fn with_guess(mut self, guess: f64) -> Self {
        self.guess = guess;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which phase produced the rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveMethod {
    NewtonRaphson,
    /// A scanned grid rate had NPV exactly zero
    GridPoint,
    Bisection,
}

/// A solved rate of return with solver diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrSolution {
    pub rate: f64,
    pub method: SolveMethod,
    /// Sign-change brackets seen by the scan (0 when Newton converged)
    pub brackets_found: usize,
}

/// Solve for the IRR with default settings
///
/// # Returns
/// * `Option<f64>` - Periodic IRR as a decimal, or None if no sign change exists
pub fn solve_irr(cashflows: &[f64]) -> Option<f64> {
    solve_irr_with(cashflows, &IrrConfig::default())
}

/// Solve for the IRR with explicit settings
pub fn solve_irr_with(cashflows: &[f64], config: &IrrConfig) -> Option<f64> {
    solve_irr_detailed(cashflows, config).map(|s| s.rate)
}

/// Solve for the IRR and report how the answer was found
pub fn solve_irr_detailed(cashflows: &[f64], config: &IrrConfig) -> Option<IrrSolution> {
    if cashflows.is_empty() {
        return None;
    }

    if let Some(rate) = newton_raphson(cashflows, config) {
        return Some(IrrSolution {
            rate,
            method: SolveMethod::NewtonRaphson,
            brackets_found: 0,
        });
    }

    debug!("Newton-Raphson did not converge from guess {}, scanning for brackets", config.guess);

    match scan_for_brackets(cashflows) {
        ScanOutcome::ExactRoot(rate) => Some(IrrSolution {
            rate,
            method: SolveMethod::GridPoint,
            brackets_found: 0,
        }),
        ScanOutcome::Brackets(brackets) => {
            let &(low, high) = brackets.first()?;
            if brackets.len() > 1 {
                debug!("{} sign changes found; using lowest bracket [{}, {}]", brackets.len(), low, high);
            }
            Some(IrrSolution {
                rate: bisect(cashflows, low, high, config.tolerance),
                method: SolveMethod::Bisection,
                brackets_found: brackets.len(),
            })
        }
    }
}

fn newton_raphson(cashflows: &[f64], config: &IrrConfig) -> Option<f64> {
    let mut rate = config.guess;

    for _ in 0..config.max_iterations {
        let (value, slope) = npv_and_derivative(cashflows, rate);

        if !value.is_finite() || !slope.is_finite() {
            return None;
        }

        if value.abs() < config.tolerance {
            return Some(rate);
        }

        if slope.abs() < MIN_DERIVATIVE {
            return None;
        }

        let next = rate - value / slope;
        if next <= MIN_NEWTON_RATE {
            return None;
        }

        rate = next;
    }

    None
}

enum ScanOutcome {
    ExactRoot(f64),
    Brackets(Vec<(f64, f64)>),
}

fn scan_grid() -> Vec<f64> {
    let mut grid = rate_grid(FINE_SCAN.0, FINE_SCAN.1, FINE_SCAN.2);
    grid.extend(rate_grid(BROAD_SCAN.0, BROAD_SCAN.1, BROAD_SCAN.2));
    grid
}

fn scan_for_brackets(cashflows: &[f64]) -> ScanOutcome {
    let grid = scan_grid();
    let values: Vec<f64> = grid.iter().map(|&r| npv(cashflows, r)).collect();
    let mut brackets = Vec::new();

    for i in 0..grid.len() - 1 {
        if values[i] == 0.0 {
            return ScanOutcome::ExactRoot(grid[i]);
        }
        if values[i] * values[i + 1] < 0.0 {
            brackets.push((grid[i], grid[i + 1]));
        }
    }

    ScanOutcome::Brackets(brackets)
}

fn bisect(cashflows: &[f64], mut low: f64, mut high: f64, tolerance: f64) -> f64 {
    let mut npv_low = npv(cashflows, low);

    for _ in 0..MAX_BISECTION_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv(cashflows, mid);

        if npv_mid.abs() < tolerance {
            return mid;
        }

        if npv_low * npv_mid < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    (low + high) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_level_annuity_irr() {
        let cashflows = [-10000.0, 3000.0, 3000.0, 3000.0, 3000.0, 3000.0];
        let irr = solve_irr(&cashflows).unwrap();
        assert_abs_diff_eq!(irr, 0.152382, epsilon = 1e-5);
        assert!(npv(&cashflows, irr).abs() < 1e-6);
    }

    #[test]
    fn test_single_payoff_breaks_even_at_zero() {
        let irr = solve_irr(&[-5000.0, 5000.0]).unwrap();
        assert_abs_diff_eq!(irr, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_sign_change_has_no_irr() {
        assert!(solve_irr(&[100.0, 200.0, 300.0]).is_none());
        assert!(solve_irr(&[-100.0, -200.0, -300.0]).is_none());
        assert!(solve_irr(&[-1000.0]).is_none());
        assert!(solve_irr(&[]).is_none());
    }

    #[test]
    fn test_newton_converges_from_default_guess() {
        let solution = solve_irr_detailed(&[-1000.0, 1100.0], &IrrConfig::default()).unwrap();
        assert_eq!(solution.method, SolveMethod::NewtonRaphson);
        assert_abs_diff_eq!(solution.rate, 0.10, epsilon = 1e-9);
    }

    #[test]
    fn test_falls_back_to_bisection_when_newton_budget_exhausted() {
        let cashflows = [-1000.0, 300.0, 400.0, 500.0];
        let config = IrrConfig::default().with_max_iterations(0);
        let solution = solve_irr_detailed(&cashflows, &config).unwrap();
        assert_eq!(solution.method, SolveMethod::Bisection);
        assert_eq!(solution.brackets_found, 1);
        assert!(npv(&cashflows, solution.rate).abs() < 1e-6);
    }

    #[test]
    fn test_multiple_roots_take_lowest_bracket() {
        // Roots at 10% and 20%: -1 + 2.3/(1+r) - 1.32/(1+r)^2
        let cashflows = [-1000.0, 2300.0, -1320.0];
        let config = IrrConfig::default().with_max_iterations(0);
        let solution = solve_irr_detailed(&cashflows, &config).unwrap();
        assert_eq!(solution.brackets_found, 2);
        assert_abs_diff_eq!(solution.rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_newton_leaving_domain_falls_back() {
        // Flat NPV at the guess sends the first Newton step far below -1
        let cashflows = [-1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1000.0];
        let config = IrrConfig::default().with_guess(4.0);
        let irr = solve_irr_with(&cashflows, &config).unwrap();
        assert_abs_diff_eq!(irr, 1000.0_f64.powf(0.1) - 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_exact_grid_root_returned_directly() {
        // NPV at the second scanned rate is exactly zero
        let rate = scan_grid()[1];
        let cashflows = [-1.0, 1.0 + rate];
        assert_eq!(npv(&cashflows, rate), 0.0);

        let config = IrrConfig::default().with_max_iterations(0);
        let solution = solve_irr_detailed(&cashflows, &config).unwrap();
        assert_eq!(solution.method, SolveMethod::GridPoint);
        assert_eq!(solution.rate, rate);
        assert_eq!(solution.brackets_found, 0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IrrConfig = serde_json::from_str(r#"{"guess": 0.2}"#).unwrap();
        assert_eq!(config, IrrConfig::default().with_guess(0.2));
    }

    #[test]
    fn test_scan_grid_size() {
        assert_eq!(scan_grid().len(), 2200);
    }
}
