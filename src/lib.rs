mod article;
mod classify;
mod discover;
mod error;
mod grid;
mod model;
mod options;
mod report;
mod stats;
mod warning;
mod xml_source;

use std::path::Path;

use tracing::error;

use crate::report::append_table_stats;
use crate::xml_source::strip_dtd_lines;

pub use article::{Article, Author};
pub use classify::{
    ComplexityClassifier, TableClassifier, TableComplexity, TableType, TypeClassifier,
};
pub use error::ExtractError;
pub use model::{Cell, Grid, PlaceError, Table};
pub use options::ExtractOptions;
pub use stats::{CorpusStats, TableStats};
pub use warning::{ExtractWarning, WarningCode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub table_count: usize,
    pub filled_cell_count: u64,
    pub warnings: Vec<ExtractWarning>,
}

impl ExtractionReport {
    fn failure(warning: ExtractWarning) -> Self {
        Self {
            table_count: 0,
            filled_cell_count: 0,
            warnings: vec![warning],
        }
    }
}

/// Parses one article from an XML string. DTD reference lines are stripped
/// first; malformed XML is the only fatal outcome.
pub fn extract_article_from_str(
    xml: &str,
    file_name: &str,
    options: &ExtractOptions,
    stats: &mut CorpusStats,
) -> Result<(Article, ExtractionReport), ExtractError> {
    stats.add_document();
    let cleaned = strip_dtd_lines(xml);
    let doc = roxmltree::Document::parse(&cleaned)?;

    let mut article = Article::new(file_name);
    article.source_xml = cleaned.clone();
    article::parse_metadata(&mut article, &doc);

    let mut warnings = Vec::new();
    let document_id = format!("PMC{}", article.pmc);
    article.tables = discover::extract_tables(&doc, &cleaned, &document_id, stats, &mut warnings);

    classify_tables(&mut article.tables, options, &mut warnings);

    let report = ExtractionReport {
        table_count: article.tables.len(),
        filled_cell_count: article
            .tables
            .iter()
            .map(|table| table.stats.filled_cells)
            .sum(),
        warnings,
    };
    Ok((article, report))
}

/// Best-effort file entry point for batch runs: an unreadable or malformed
/// document is logged and degrades to an empty article instead of failing
/// the batch.
pub fn extract_article(
    path: &Path,
    options: &ExtractOptions,
    stats: &mut CorpusStats,
) -> (Article, ExtractionReport) {
    let file_name = path.display().to_string();

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(source) => {
            error!(file = %file_name, error = %source, "failed to read article source");
            stats.add_document();
            return (
                Article::new(file_name),
                ExtractionReport::failure(ExtractWarning::new(
                    WarningCode::UnreadableSource,
                    format!("failed to read article source: {source}"),
                )),
            );
        }
    };

    match extract_article_from_str(&raw, &file_name, options, stats) {
        Ok(result) => result,
        Err(source) => {
            error!(file = %file_name, error = %source, "failed to parse article; returning empty article");
            let mut article = Article::new(file_name);
            article.source_xml = raw;
            (
                article,
                ExtractionReport::failure(ExtractWarning::new(
                    WarningCode::MalformedXml,
                    format!("failed to parse article XML: {source}"),
                )),
            )
        }
    }
}

fn classify_tables(
    tables: &mut [Table],
    options: &ExtractOptions,
    warnings: &mut Vec<ExtractWarning>,
) {
    if options.classify_by_type {
        for table in tables.iter_mut() {
            TypeClassifier.classify(table);
            if let Some(path) = &options.stats_report
                && let Err(source) = append_table_stats(path, table)
            {
                error!(error = %source, "failed to append table statistics report");
                warnings.push(ExtractWarning::new(
                    WarningCode::ReportWriteFailed,
                    format!("failed to append table statistics: {source}"),
                ));
            }
        }
    }

    if options.classify_by_complexity {
        for table in tables.iter_mut() {
            ComplexityClassifier.classify(table);
        }
    }
}
