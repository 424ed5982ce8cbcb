//! Discounting primitive and rate-of-return solver

mod discount;
mod irr;

pub use discount::{
    npv, npv_and_derivative, npv_profile, rate_grid, benefit_cost_ratio, ProfilePoint,
};
pub use irr::{
    solve_irr, solve_irr_with, solve_irr_detailed, IrrConfig, IrrSolution, SolveMethod,
    DEFAULT_IRR_GUESS, DEFAULT_IRR_TOLERANCE, DEFAULT_IRR_MAX_ITERATIONS,
};
