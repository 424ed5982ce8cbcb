//! CSV export of cashflow tables, evaluation summaries and rankings

use crate::cashflows::CashflowSequence;
use crate::error::Result;
use crate::evaluation::EvaluationSummary;
use crate::ranking::RankingEntry;
use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// Flat ranking row; csv cannot write nested structs
#[derive(Debug, Serialize)]
struct RankingRow<'a> {
    rank: usize,
    name: &'a str,
    npv: f64,
    irr: f64,
    benefit_cost: f64,
    norm_npv: f64,
    norm_irr: f64,
    norm_benefit_cost: f64,
    score: f64,
}

/// Write `period,amount,cumulative,kind` rows
pub fn write_cashflow_table<W: Write>(writer: W, cashflows: &CashflowSequence) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    for row in cashflows.rows() {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write one summary row per evaluated project
pub fn write_summaries<W: Write>(writer: W, summaries: &[EvaluationSummary]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    for summary in summaries {
        csv.serialize(summary)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write a ranking with 1-based positions
pub fn write_ranking<W: Write>(writer: W, ranking: &[RankingEntry]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    for (i, entry) in ranking.iter().enumerate() {
        csv.serialize(RankingRow {
            rank: i + 1,
            name: &entry.name,
            npv: entry.npv,
            irr: entry.irr,
            benefit_cost: entry.benefit_cost,
            norm_npv: entry.normalized.npv,
            norm_irr: entry.normalized.irr,
            norm_benefit_cost: entry.normalized.benefit_cost,
            score: entry.score,
        })?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate_project;
    use crate::ranking::{rank_projects, ProjectMetrics, RankCandidate, Weights};

    #[test]
    fn test_cashflow_table() {
        let seq = CashflowSequence::new(vec![-100.0, 60.0, 70.0]).unwrap();
        let mut out = Vec::new();
        write_cashflow_table(&mut out, &seq).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "period,amount,cumulative,kind");
        assert_eq!(lines[1], "0,-100.0,-100.0,Investment");
        assert_eq!(lines[3], "2,70.0,30.0,Inflow");
    }

    #[test]
    fn test_summary_leaves_undefined_metrics_blank() {
        let report = evaluate_project(&[100.0, 200.0], 0.1, None).unwrap();
        let mut out = Vec::new();
        write_summaries(&mut out, &[report.summary("inflows")]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.starts_with("inflows,0.1,1,100.0,"));
        assert!(row.contains(",,,true,"));
    }

    #[test]
    fn test_ranking_rows_are_numbered() {
        let candidates = vec![
            RankCandidate::new("low", ProjectMetrics { npv: Some(1.0), irr: Some(0.1), benefit_cost: Some(1.0) }),
            RankCandidate::new("high", ProjectMetrics { npv: Some(2.0), irr: Some(0.2), benefit_cost: Some(2.0) }),
        ];
        let ranking = rank_projects(&candidates, &Weights::default());
        let mut out = Vec::new();
        write_ranking(&mut out, &ranking).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.lines().nth(1).unwrap().starts_with("1,high,"));
        assert!(text.lines().nth(2).unwrap().starts_with("2,low,"));
    }
}
