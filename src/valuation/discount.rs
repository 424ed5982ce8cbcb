//! Present value calculations over periodic cashflows
//!
//! Supports:
//! - Net present value at a single rate
//! - Analytic derivative of NPV with respect to the rate (for Newton-Raphson)
//! - NPV profiles over a grid of rates
//! - Benefit/cost ratio from the positive and negative legs of a cashflow stream

use serde::{Deserialize, Serialize};

/// Cost denominators below this are treated as zero
const ZERO_COST_EPSILON: f64 = 1e-12;

/// One point of an NPV-vs-rate profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub rate: f64,
    pub npv: f64,
}

/// Calculate the net present value of `cashflows` at periodic `rate`
///
/// Period 0 is undiscounted. For `rate <= -1` the result is NaN or infinite;
/// callers guard that domain edge.
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate
pub fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// Evaluate NPV at every rate in `rates`, preserving order
pub fn npv_profile(cashflows: &[f64], rates: &[f64]) -> Vec<ProfilePoint> {
    rates
        .iter()
        .map(|&rate| ProfilePoint { rate, npv: npv(cashflows, rate) })
        .collect()
}

/// Evenly spaced grid of `points` rates from `start` to `end` inclusive
pub fn rate_grid(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| if i == points - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Benefit/cost ratio: PV of strictly positive flows over PV of the
/// magnitude of strictly negative flows, both discounted at `rate`
///
/// Returns `None` when the discounted cost is numerically zero.
pub fn benefit_cost_ratio(cashflows: &[f64], rate: f64) -> Option<f64> {
    let mut pv_benefits = 0.0;
    let mut pv_costs = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        if cf > 0.0 {
            pv_benefits += cf / discount;
        } else if cf < 0.0 {
            pv_costs += -cf / discount;
        }
    }

    if pv_costs.abs() < ZERO_COST_EPSILON {
        return None;
    }

    Some(pv_benefits / pv_costs)
}
