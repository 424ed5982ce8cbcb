//! Load cashflow sequences from `period,cashflow` CSV files

use super::CashflowSequence;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

/// Raw CSV row; rows are ordered by file position, the period column is informational
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "period")]
    _period: usize,
    #[serde(rename = "cashflow")]
    cashflow: f64,
}

/// Load a cashflow sequence from a CSV file
pub fn load_cashflows<P: AsRef<Path>>(path: P) -> Result<CashflowSequence> {
    let reader = Reader::from_path(path)?;
    collect_rows(reader)
}

/// Load a cashflow sequence from any reader (e.g., string buffer, request body)
pub fn load_cashflows_from_reader<R: std::io::Read>(reader: R) -> Result<CashflowSequence> {
    collect_rows(Reader::from_reader(reader))
}

fn collect_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<CashflowSequence> {
    let mut flows = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        flows.push(row.cashflow);
    }

    CashflowSequence::new(flows)
}
