use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::classify::{TableComplexity, TableType};
use crate::error::ExtractError;
use crate::model::Table;
use crate::stats::TableStats;

#[derive(Debug, Serialize)]
struct TableStatsRecord<'a> {
    document: &'a str,
    label: &'a str,
    sub_table_index: usize,
    rows: usize,
    columns: usize,
    has_header: bool,
    has_body: bool,
    no_xml_table: bool,
    table_type: Option<TableType>,
    complexity: Option<TableComplexity>,
    stats: &'a TableStats,
}

/// Appends one JSON line per table to the report file. The file is the
/// reporting collaborator's output, not part of the extraction model.
pub(crate) fn append_table_stats(path: &Path, table: &Table) -> Result<(), ExtractError> {
    let record = TableStatsRecord {
        document: &table.document_id,
        label: &table.label,
        sub_table_index: table.sub_table_index,
        rows: table.rows(),
        columns: table.columns(),
        has_header: table.has_header,
        has_body: table.has_body,
        no_xml_table: table.no_xml_table,
        table_type: table.table_type,
        complexity: table.complexity,
        stats: &table.stats,
    };

    let mut line = serde_json::to_string(&record)?;
    line.push('\n');
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(line.as_bytes())?;
    Ok(())
}
