mod common;

use std::process::Command;

use jats_tables::{CorpusStats, ExtractOptions, WarningCode, extract_article};
use tempfile::tempdir;

const HEADED_TABLE: &str = "<table-wrap>\
<label>Table 1</label>\
<caption><p>Cohort characteristics.</p></caption>\
<table>\
<thead><tr><th>Group</th><th>N</th><th>Mean</th></tr></thead>\
<tbody>\
<tr><td>Control</td><td>40</td><td>1.2</td></tr>\
<tr><td>Treated</td><td>38</td><td>1.9</td></tr>\
</tbody>\
</table>\
<table-wrap-foot>Means are unadjusted.</table-wrap-foot>\
</table-wrap>";

#[test]
fn extracts_metadata_and_table_grid_from_a_file() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("PMC3845678.xml");
    common::write_article(&input, HEADED_TABLE).expect("fixture should be written");

    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &ExtractOptions::default(), &mut stats);

    assert!(report.warnings.is_empty(), "report: {report:?}");
    assert_eq!(article.title, "Spanning cells in observational cohorts");
    assert_eq!(article.pmc, "3845678");
    assert_eq!(article.authors[0].surname, "Lovelace");

    assert_eq!(report.table_count, 1);
    let table = &article.tables[0];
    assert_eq!(table.label, "Table 1");
    assert_eq!(table.caption, "Cohort characteristics.");
    assert_eq!(table.footer, "Means are unadjusted.");
    assert_eq!(table.document_id, "PMC3845678");
    assert_eq!(table.rows(), 3);
    assert_eq!(table.columns(), 3);
    assert!(table.has_header && table.has_body);
    assert_eq!(report.filled_cell_count, 9);

    assert_eq!(stats.documents, 1);
    assert_eq!(stats.tables, 1);
    assert_eq!(stats.header_rows, 1);
    assert_eq!(stats.body_rows, 2);
}

#[test]
fn spanning_cells_resolve_across_the_grid() {
    let wrap = "<table-wrap><label>Table 1</label><table>\
                <thead><tr><th>Visit</th><th>Score</th></tr></thead>\
                <tbody>\
                <tr><td rowspan=\"2\">Baseline</td><td>10</td></tr>\
                <tr><td>12</td></tr>\
                <tr><td colspan=\"2\">No further visits</td></tr>\
                </tbody></table></table-wrap>";

    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("spans.xml");
    common::write_article(&input, wrap).expect("fixture should be written");

    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &ExtractOptions::default(), &mut stats);

    assert!(report.warnings.is_empty(), "report: {report:?}");
    let table = &article.tables[0];
    assert!(table.is_row_spanning && table.is_col_spanning);

    let grid = &table.grid;
    let content =
        |row: usize, col: usize| grid.get(row, col).map(|cell| cell.content.clone()).unwrap();
    assert_eq!(content(1, 0), "Baseline");
    assert_eq!(content(2, 0), "Baseline");
    assert_eq!(content(2, 1), "12");
    assert_eq!(content(3, 0), "No further visits");
    assert_eq!(content(3, 1), "No further visits");

    assert_eq!(stats.row_spanning_cells, 1);
    assert_eq!(stats.col_spanning_cells, 1);
}

#[test]
fn image_only_wrap_yields_a_placeholder_table() {
    let wrap = "<table-wrap><label>Table 2</label>\
                <caption><p>Rendered as an image.</p></caption>\
                <graphic href=\"tab2.gif\"/></table-wrap>";

    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("image.xml");
    common::write_article(&input, wrap).expect("fixture should be written");

    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &ExtractOptions::default(), &mut stats);

    assert_eq!(report.table_count, 1);
    let table = &article.tables[0];
    assert!(table.no_xml_table);
    assert_eq!(table.rows(), 0);
    assert_eq!(report.filled_cell_count, 0);
    assert_eq!(stats.image_tables, 1);
    assert_eq!(stats.tables, 1);
}

#[test]
fn malformed_xml_degrades_to_an_empty_article() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("broken.xml");
    std::fs::write(&input, "<article><body><table-wrap>").expect("fixture should be written");

    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &ExtractOptions::default(), &mut stats);

    assert!(article.tables.is_empty());
    assert_eq!(report.table_count, 0);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].code, WarningCode::MalformedXml);
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.tables, 0);
}

#[test]
fn missing_file_degrades_to_an_empty_article() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("does-not-exist.xml");

    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &ExtractOptions::default(), &mut stats);

    assert!(article.tables.is_empty());
    assert_eq!(report.warnings[0].code, WarningCode::UnreadableSource);
    assert_eq!(stats.documents, 1);
}

#[test]
fn type_classification_appends_report_lines() {
    let wraps = format!(
        "{HEADED_TABLE}<table-wrap><label>Table 2</label><graphic href=\"t2.gif\"/></table-wrap>"
    );

    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("classified.xml");
    common::write_article(&input, &wraps).expect("fixture should be written");
    let report_path = dir.path().join("TableStats.txt");

    let options = ExtractOptions {
        classify_by_type: true,
        classify_by_complexity: true,
        stats_report: Some(report_path.clone()),
    };
    let mut stats = CorpusStats::default();
    let (article, report) = extract_article(&input, &options, &mut stats);

    assert!(report.warnings.is_empty(), "report: {report:?}");
    assert_eq!(article.tables.len(), 2);
    assert!(article.tables[0].table_type.is_some());
    assert!(article.tables[0].complexity.is_some());
    assert!(article.tables[1].table_type.is_some());

    let contents = std::fs::read_to_string(&report_path).expect("report should be readable");
    let lines: Vec<_> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let record: serde_json::Value =
            serde_json::from_str(line).expect("line should be valid JSON");
        assert_eq!(record["document"], "PMC3845678");
        assert!(record["table_type"].is_string());
    }
}

#[test]
fn batch_runs_accumulate_corpus_statistics_across_files() {
    let dir = tempdir().expect("tempdir should be created");
    common::write_article(&dir.path().join("a.xml"), HEADED_TABLE)
        .expect("fixture should be written");
    common::write_article(
        &dir.path().join("b.xml"),
        "<table-wrap><label>Table 1</label><graphic/></table-wrap>",
    )
    .expect("fixture should be written");

    let mut stats = CorpusStats::default();
    let options = ExtractOptions::default();
    for name in ["a.xml", "b.xml"] {
        extract_article(&dir.path().join(name), &options, &mut stats);
    }

    assert_eq!(stats.documents, 2);
    assert_eq!(stats.tables, 2);
    assert_eq!(stats.image_tables, 1);
    assert_eq!(stats.header_rows, 1);
    assert_eq!(stats.body_rows, 2);
}

#[test]
fn cli_extracts_a_directory_of_articles() {
    let dir = tempdir().expect("tempdir should be created");
    common::write_article(&dir.path().join("a.xml"), HEADED_TABLE)
        .expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_jats2tables"))
        .args(["extract", "-i", &dir.path().to_string_lossy()])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(0));
}

#[test]
fn cli_exits_with_code_2_when_no_tables_found() {
    let dir = tempdir().expect("tempdir should be created");
    let input = dir.path().join("plain.xml");
    common::write_article(&input, "").expect("fixture should be written");

    let status = Command::new(env!("CARGO_BIN_EXE_jats2tables"))
        .args(["extract", "-i", &input.to_string_lossy()])
        .status()
        .expect("CLI should run");

    assert_eq!(status.code(), Some(2));
}
