//! Cashflow sequences, series generators and CSV loading

mod series;
pub mod loader;

pub use series::{arithmetic_series, geometric_series, CashflowPlan};
pub use loader::{load_cashflows, load_cashflows_from_reader};

use crate::error::{AppraisalError, Result};
use serde::{Deserialize, Serialize};

/// Ordered cashflows indexed by period 0..N
///
/// Period 0 is the initial outlay. Always holds at least one finite amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashflowSequence {
    flows: Vec<f64>,
}

/// Classification of a period's flow for tabular output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowKind {
    Investment,
    Inflow,
    Outflow,
}

/// One row of a cashflow table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashflowRow {
    pub period: usize,
    pub amount: f64,
    pub cumulative: f64,
    pub kind: FlowKind,
}

impl CashflowSequence {
    /// Validate and wrap a vector of periodic amounts
    pub fn new(flows: Vec<f64>) -> Result<Self> {
        if flows.is_empty() {
            return Err(AppraisalError::EmptyCashflows);
        }
        if let Some(period) = flows.iter().position(|cf| !cf.is_finite()) {
            return Err(AppraisalError::NonFiniteCashflow { period });
        }
        Ok(Self { flows })
    }

    /// Build from an initial outlay followed by later-period flows
    pub fn with_outlay(initial_outlay: f64, future: &[f64]) -> Result<Self> {
        let mut flows = Vec::with_capacity(future.len() + 1);
        flows.push(initial_outlay);
        flows.extend_from_slice(future);
        Self::new(flows)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// True when the sequence holds no flows
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Number of periods after period 0
    pub fn horizon(&self) -> usize {
        self.flows.len() - 1
    }

    pub fn initial_outlay(&self) -> f64 {
        self.flows[0]
    }

    /// Flows for periods 1..N
    pub fn future_flows(&self) -> &[f64] {
        &self.flows[1..]
    }

    /// Sum of all positive amounts
    pub fn total_inflows(&self) -> f64 {
        self.flows.iter().filter(|&&cf| cf > 0.0).sum()
    }

    /// Sum of all negative amounts (a non-positive number)
    pub fn total_outflows(&self) -> f64 {
        self.flows.iter().filter(|&&cf| cf < 0.0).sum()
    }

    /// Undiscounted net total
    pub fn net_total(&self) -> f64 {
        self.flows.iter().sum()
    }

    /// Running undiscounted balance per period
    pub fn cumulative(&self) -> Vec<f64> {
        self.flows
            .iter()
            .scan(0.0, |acc, &cf| {
                *acc += cf;
                Some(*acc)
            })
            .collect()
    }

    /// Period-by-period table with running balance
    pub fn rows(&self) -> Vec<CashflowRow> {
        self.flows
            .iter()
            .zip(self.cumulative())
            .enumerate()
            .map(|(period, (&amount, cumulative))| CashflowRow {
                period,
                amount,
                cumulative,
                kind: if period == 0 {
                    FlowKind::Investment
                } else if amount > 0.0 {
                    FlowKind::Inflow
                } else {
                    FlowKind::Outflow
                },
            })
            .collect()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.flows
    }
}

impl TryFrom<Vec<f64>> for CashflowSequence {
    type Error = AppraisalError;

    fn try_from(flows: Vec<f64>) -> Result<Self> {
        Self::new(flows)
    }
}

impl From<CashflowSequence> for Vec<f64> {
    fn from(sequence: CashflowSequence) -> Self {
        sequence.flows
    }
}

impl AsRef<[f64]> for CashflowSequence {
    fn as_ref(&self) -> &[f64] {
        &self.flows
    }
}
