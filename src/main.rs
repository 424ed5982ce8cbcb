//! Project Appraisal CLI
//!
//! Command-line interface for evaluating, comparing and generating project cashflows

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use project_appraisal::{
    arithmetic_series, geometric_series,
    cashflows::load_cashflows,
    export::{write_cashflow_table, write_ranking, write_summaries},
    portfolio::load_projects,
    risk::{RiskSummary, DEFAULT_SIGMA, DEFAULT_TRIALS},
    CashflowPlan, CashflowSequence, EvaluationConfig, EvaluationReport, PortfolioRunner,
    ProjectEvaluator, SimulationConfig, Weights,
};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "project_appraisal", version, about = "Capital-investment project appraisal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one project: NPV, IRR, B/C, NPV profile and optional Monte Carlo
    Evaluate(EvaluateArgs),
    /// Rank the projects of a JSON portfolio file
    Compare(CompareArgs),
    /// Print an arithmetic or geometric cashflow series
    Series(SeriesArgs),
}

#[derive(Clone, Copy, ValueEnum)]
enum PlanKind {
    Constant,
    Arithmetic,
    Geometric,
}

#[derive(Args)]
struct EvaluateArgs {
    /// Project label used in output and export file names
    #[arg(long, default_value = "project")]
    name: String,

    /// Comma-separated cashflows, period 0 first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    cashflows: Option<Vec<f64>>,

    /// CSV file with `period,cashflow` columns
    #[arg(long, conflicts_with = "cashflows")]
    file: Option<PathBuf>,

    /// Generate flows after period 0 instead of listing them
    #[arg(long, value_enum, conflicts_with_all = ["cashflows", "file"])]
    plan: Option<PlanKind>,

    /// Initial outlay for --plan (normally negative)
    #[arg(long, allow_hyphen_values = true)]
    outlay: Option<f64>,

    /// Number of periods after period 0 for --plan
    #[arg(long)]
    horizon: Option<usize>,

    /// Base amount for --plan
    #[arg(long, allow_hyphen_values = true)]
    base: Option<f64>,

    /// Gradient (arithmetic) or growth rate (geometric) for --plan
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    growth: f64,

    /// Discount rate as a decimal (0.12 = 12%)
    #[arg(long, allow_hyphen_values = true)]
    rate: f64,

    /// Run the Monte Carlo risk simulation
    #[arg(long)]
    monte_carlo: bool,

    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    sims: usize,

    /// Relative standard deviation of each cashflow shock
    #[arg(long, default_value_t = DEFAULT_SIGMA)]
    sigma: f64,

    #[arg(long)]
    seed: Option<u64>,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// Write <name>_cashflows.csv and <name>_summary.csv into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[derive(Args)]
struct CompareArgs {
    /// JSON array of projects
    projects: PathBuf,

    /// NPV, IRR and B/C weights
    #[arg(long, value_delimiter = ',', default_values_t = [0.5, 0.3, 0.2])]
    weights: Vec<f64>,

    /// Rescale the weights to sum to one before ranking
    #[arg(long)]
    normalize_weights: bool,

    #[arg(long)]
    json: bool,

    /// Write the ranking to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesKind {
    Arithmetic,
    Geometric,
}

#[derive(Args)]
struct SeriesArgs {
    #[arg(value_enum)]
    kind: SeriesKind,

    /// First term
    #[arg(allow_hyphen_values = true)]
    f0: f64,

    /// Increment (arithmetic) or growth rate (geometric)
    #[arg(allow_hyphen_values = true)]
    g: f64,

    /// Number of terms
    n: usize,
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Evaluate(args) => run_evaluate(args),
        Command::Compare(args) => run_compare(args),
        Command::Series(args) => {
            run_series(args);
            Ok(())
        }
    }
}

fn read_cashflows(args: &EvaluateArgs) -> Result<CashflowSequence> {
    if let Some(flows) = &args.cashflows {
        return CashflowSequence::new(flows.clone()).context("Invalid cashflows");
    }

    if let Some(path) = &args.file {
        return load_cashflows(path).with_context(|| format!("Failed to load {}", path.display()));
    }

    if let (Some(kind), Some(outlay), Some(horizon), Some(base)) =
        (args.plan, args.outlay, args.horizon, args.base)
    {
        let plan = match kind {
            PlanKind::Constant => CashflowPlan::Constant { amount: base },
            PlanKind::Arithmetic => CashflowPlan::Arithmetic { base, gradient: args.growth },
            PlanKind::Geometric => CashflowPlan::Geometric { base, growth: args.growth },
        };
        return plan.build(outlay, horizon).context("Invalid cashflow plan");
    }

    bail!("Provide --cashflows, --file, or --plan with --outlay, --horizon and --base")
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let cashflows = read_cashflows(&args)?;

    let mut config = EvaluationConfig::new(args.rate);
    if args.monte_carlo {
        let mut sim = SimulationConfig::new(args.sims).with_sigma(args.sigma);
        sim.seed = args.seed;
        config = config.with_risk(sim);
    }

    let report = ProjectEvaluator::new(config)
        .evaluate(&cashflows)
        .context("Evaluation failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&args.name, &cashflows, &report);
    }

    if let Some(dir) = &args.export_dir {
        export_evaluation(dir, &args.name, &cashflows, &report)?;
    }

    Ok(())
}

fn format_pct(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{:.2}%", v * 100.0))
}

fn print_report(name: &str, cashflows: &CashflowSequence, report: &EvaluationReport) {
    println!("Project Appraisal v0.1.0");
    println!("========================\n");

    println!("Project: {}", name);
    println!("  Rate: {:.2}%", report.rate * 100.0);
    println!("  Periods: {}", report.periods());
    println!("  Initial Outlay: ${:.2}", cashflows.initial_outlay());
    println!();

    println!("{:>6} {:>14} {:>14}", "Period", "Cashflow", "Cumulative");
    println!("{}", "-".repeat(36));
    for row in cashflows.rows() {
        println!("{:>6} {:>14.2} {:>14.2}", row.period, row.amount, row.cumulative);
    }
    println!();

    println!("Metrics:");
    println!(
        "  NPV: ${:.2} ({})",
        report.npv,
        if report.is_viable() { "viable" } else { "not viable" }
    );
    match report.irr_exceeds_rate() {
        Some(beats) => println!("  IRR: {} ({} rate)", format_pct(report.irr), if beats { ">" } else { "<=" }),
        None => println!("  IRR: N/A"),
    }
    match report.benefit_cost {
        Some(bc) => println!("  B/C: {:.3} ({})", bc, if bc > 1.0 { "profitable" } else { "not profitable" }),
        None => println!("  B/C: N/A"),
    }
    println!(
        "  Inflows: ${:.2}  Outflows: ${:.2}  Net: ${:.2}",
        cashflows.total_inflows(),
        cashflows.total_outflows(),
        cashflows.net_total()
    );

    println!("\nNPV Profile:");
    for point in report.npv_profile.iter().step_by(5) {
        println!("  {:>7.2}% {:>14.2}", point.rate * 100.0, point.npv);
    }

    if let Some(risk) = &report.risk {
        print_risk(risk);
    }
}

fn print_risk(risk: &RiskSummary) {
    println!("\nMonte Carlo ({} trials):", risk.n_sim);
    println!("  Mean: ${:.2}  Std Dev: ${:.2}", risk.mean, risk.std_dev);
    for (p, value) in risk.percentiles() {
        println!("  P{:<2}: ${:.2}", p, value);
    }
    println!(
        "  P(NPV > 0): {:.1}% ({:?})",
        risk.probability_positive() * 100.0,
        risk.risk_band()
    );
}

fn export_evaluation(
    dir: &Path,
    name: &str,
    cashflows: &CashflowSequence,
    report: &EvaluationReport,
) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Unable to create {}", dir.display()))?;

    let cashflow_path = dir.join(format!("{}_cashflows.csv", name));
    write_cashflow_table(File::create(&cashflow_path)?, cashflows)?;

    let summary_path = dir.join(format!("{}_summary.csv", name));
    write_summaries(File::create(&summary_path)?, &[report.summary(name)])?;

    println!("\nResults written to: {}", dir.display());
    Ok(())
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let specs = load_projects(&args.projects)
        .with_context(|| format!("Failed to load projects from {}", args.projects.display()))?;

    let mut weights = match args.weights.as_slice() {
        &[npv, irr, bc] => Weights::new(npv, irr, bc),
        other => bail!("Expected 3 weights (NPV,IRR,B/C), got {}", other.len()),
    };
    if args.normalize_weights {
        weights = weights.normalized();
    }

    let ranking = PortfolioRunner::new().rank(&specs, &weights);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ranking)?);
    } else {
        println!(
            "Ranking ({} projects, weights NPV={:.2} IRR={:.2} B/C={:.2}):",
            ranking.len(),
            weights.npv,
            weights.irr,
            weights.benefit_cost
        );
        println!("{:>4} {:<24} {:>14} {:>9} {:>7} {:>7}", "Rank", "Project", "NPV", "IRR", "B/C", "Score");
        println!("{}", "-".repeat(70));
        for (i, entry) in ranking.iter().enumerate() {
            println!(
                "{:>4} {:<24} {:>14.2} {:>8.2}% {:>7.3} {:>7.4}",
                i + 1,
                entry.name,
                entry.npv,
                entry.irr * 100.0,
                entry.benefit_cost,
                entry.score
            );
        }
    }

    if let Some(path) = &args.export {
        write_ranking(File::create(path)?, &ranking)?;
        println!("\nRanking written to: {}", path.display());
    }

    Ok(())
}

fn run_series(args: SeriesArgs) {
    let series = match args.kind {
        SeriesKind::Arithmetic => arithmetic_series(args.f0, args.g, args.n),
        SeriesKind::Geometric => geometric_series(args.f0, args.g, args.n),
    };

    for (i, value) in series.iter().enumerate() {
        println!("{:>4} {:>14.2}", i, value);
    }
}
