use std::io::Read;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use crate::data::Table;

/// Read a CSV table (header row required) from any reader, preserving row
/// order from the source.
pub fn read_table<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.context("Failed to read CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        anyhow::bail!("CSV input contains no data rows");
    }

    Ok(Table::new(headers, rows))
}

pub fn read_table_from_stdin() -> Result<Table> {
    read_table(std::io::stdin().lock())
}
