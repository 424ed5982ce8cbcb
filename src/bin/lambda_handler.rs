//! AWS Lambda handler for project evaluation and comparison
//!
//! Accepts a JSON body tagged by `action`:
//! - `evaluate`: one project's cashflows and rate, optional Monte Carlo settings
//! - `compare`: a list of projects and a weight triple, returns the ranking
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use project_appraisal::{
    evaluation::EvaluationSummary,
    portfolio::{PortfolioRunner, ProjectSpec},
    risk::{DEFAULT_SIGMA, DEFAULT_TRIALS},
    CashflowSequence, EvaluationConfig, EvaluationReport, ProjectEvaluator, RankingEntry,
    SimulationConfig, Weights,
};
use serde::{Deserialize, Serialize};

/// Input for a single evaluation
#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    #[serde(default = "default_name")]
    pub name: String,

    /// Cashflows, period 0 first
    pub cashflows: Vec<f64>,

    /// Discount rate as a decimal (default: 12%)
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Whether to run the Monte Carlo simulation
    #[serde(default)]
    pub monte_carlo: bool,

    #[serde(default = "default_trials")]
    pub n_sim: usize,

    #[serde(default = "default_sigma")]
    pub sigma: f64,

    #[serde(default)]
    pub seed: Option<u64>,

    /// Drop raw Monte Carlo samples from the response
    #[serde(default)]
    pub omit_samples: bool,
}

/// Input for ranking a portfolio
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub projects: Vec<ProjectSpec>,

    #[serde(default)]
    pub weights: Weights,

    /// Rescale weights to sum to one
    #[serde(default = "default_true")]
    pub normalize_weights: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AppraisalRequest {
    Evaluate(EvaluateRequest),
    Compare(CompareRequest),
}

fn default_name() -> String { "project".to_string() }
fn default_rate() -> f64 { 0.12 }
fn default_trials() -> usize { DEFAULT_TRIALS }
fn default_sigma() -> f64 { DEFAULT_SIGMA }
fn default_true() -> bool { true }

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub summary: EvaluationSummary,
    pub report: EvaluationReport,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub weights: Weights,
    pub ranking: Vec<RankingEntry>,
    pub execution_time_ms: u64,
}

const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "POST, OPTIONS"),
    ("Access-Control-Allow-Headers", "Content-Type"),
];

fn response(status: u16, body: Body) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder()
        .status(status)
        .header("Content-Type", "application/json");
    for (name, value) in CORS_HEADERS {
        builder = builder.header(name, value);
    }
    Ok(builder.body(body)?)
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    response(status, Body::Text(body.to_string()))
}

fn json_response<T: Serialize>(body: &T) -> Result<Response<Body>, Error> {
    response(200, Body::Text(serde_json::to_string(body)?))
}

fn evaluate(request: EvaluateRequest, start: std::time::Instant) -> Result<Response<Body>, Error> {
    let cashflows = match CashflowSequence::new(request.cashflows) {
        Ok(c) => c,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let mut config = EvaluationConfig::new(request.rate);
    if request.monte_carlo {
        let mut sim = SimulationConfig::new(request.n_sim).with_sigma(request.sigma);
        sim.seed = request.seed;
        config = config.with_risk(sim);
    }

    let mut report = match ProjectEvaluator::new(config).evaluate(&cashflows) {
        Ok(r) => r,
        Err(e) => return error_response(400, &e.to_string()),
    };

    let summary = report.summary(&request.name);
    if request.omit_samples {
        if let Some(risk) = report.risk.as_mut() {
            risk.samples.clear();
        }
    }

    json_response(&EvaluateResponse {
        summary,
        report,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn compare(request: CompareRequest, start: std::time::Instant) -> Result<Response<Body>, Error> {
    if request.projects.is_empty() {
        return error_response(400, "No projects to compare");
    }

    let weights = if request.normalize_weights {
        request.weights.normalized()
    } else {
        request.weights
    };

    let ranking = PortfolioRunner::new().rank(&request.projects, &weights);

    json_response(&CompareResponse {
        weights,
        ranking,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return response(200, Body::Empty);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: AppraisalRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    match request {
        AppraisalRequest::Evaluate(req) => evaluate(req, start),
        AppraisalRequest::Compare(req) => compare(req, start),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
