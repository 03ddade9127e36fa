use roxmltree::Node;
use tracing::{debug, warn};

use crate::model::{Cell, Grid, PlaceError, Table};
use crate::stats::CorpusStats;
use crate::warning::{ExtractWarning, WarningCode};
use crate::xml_source::{children_by_tag, node_text};

const STUB_PROBABILITY: f32 = 0.9;
const HEADER_PROBABILITY: f32 = 1.0;

/// Span attribute value; honored only when it parses as an integer greater
/// than one, anything else counts as no span.
fn span_value(cell: Node, attribute: &str) -> usize {
    cell.attribute(attribute)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|value| *value > 1)
        .unwrap_or(1)
}

/// Head rows carry `th` cells; some documents use plain `td` there instead.
fn header_cells<'a, 'input>(row: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    let cells = children_by_tag(row, "th");
    if cells.is_empty() {
        children_by_tag(row, "td")
    } else {
        cells
    }
}

/// Column count = max over body rows of their colspan sums, widened by the
/// first head row's cell count. Head and body are often independently
/// malformed; taking the larger of the two is the lenient policy that keeps
/// partial extraction going.
fn count_columns(body_rows: &[Node], head_rows: &[Node]) -> usize {
    let mut columns = 0;
    for row in body_rows {
        let width: usize = children_by_tag(*row, "td")
            .iter()
            .map(|cell| span_value(*cell, "colspan"))
            .sum();
        columns = columns.max(width);
    }
    if let Some(first) = head_rows.first() {
        columns = columns.max(header_cells(*first).len());
    }
    columns
}

/// Builds the cell grid for one embedded `<table>` element: counts
/// dimensions, allocates the grid, then fills header rows followed by body
/// rows. Missing `thead`/`tbody` are recorded facts, not errors; a table
/// without a body keeps an empty grid.
pub(crate) fn build_table_grid(
    table: &mut Table,
    table_node: Node,
    table_index: usize,
    stats: &mut CorpusStats,
    warnings: &mut Vec<ExtractWarning>,
) {
    let head_rows = match children_by_tag(table_node, "thead").first() {
        Some(thead) => children_by_tag(*thead, "tr"),
        None => {
            table.has_header = false;
            stats.add_table_without_head();
            Vec::new()
        }
    };

    let tbody = children_by_tag(table_node, "tbody");
    let Some(tbody) = tbody.first() else {
        table.has_body = false;
        stats.add_table_without_body();
        return;
    };
    let body_rows = children_by_tag(*tbody, "tr");

    let columns = count_columns(&body_rows, &head_rows);
    let rows = head_rows.len() + body_rows.len();
    table.grid = Grid::new(rows, columns);
    stats.add_rows(rows);
    stats.add_columns(columns);
    debug!(table_index, rows, columns, "allocated table grid");

    for (row_index, row) in head_rows.iter().enumerate() {
        stats.add_header_row();
        table.stats.add_header_row();
        let cells = header_cells(*row);
        fill_row(table, &cells, row_index, true, table_index, stats, warnings);
    }

    for (row_offset, row) in body_rows.iter().enumerate() {
        stats.add_body_row();
        table.stats.add_body_row();
        let cells = children_by_tag(*row, "td");
        fill_row(
            table,
            &cells,
            head_rows.len() + row_offset,
            false,
            table_index,
            stats,
            warnings,
        );
    }
}

/// Greedy skip-and-fill placement for one row of cell definitions. The
/// column cursor skips positions already claimed by rowspans from earlier
/// rows; each colspan unit then lands on `row_span` consecutive rows through
/// `Grid::place`. A definition that runs out of columns is dropped and
/// reported; the rest of the row keeps processing.
#[allow(clippy::too_many_lines)]
fn fill_row(
    table: &mut Table,
    row_cells: &[Node],
    dest_row: usize,
    is_header: bool,
    table_index: usize,
    stats: &mut CorpusStats,
    warnings: &mut Vec<ExtractWarning>,
) {
    let columns = table.grid.columns();
    let total_rows = table.grid.rows();
    let mut cursor = 0_usize;

    for definition in row_cells {
        let row_span = span_value(*definition, "rowspan");
        let col_span = span_value(*definition, "colspan");
        if row_span > 1 {
            table.is_row_spanning = true;
            stats.add_row_spanning_cell();
            table.stats.add_row_spanning_cell();
        }
        if col_span > 1 {
            table.is_col_spanning = true;
            stats.add_col_spanning_cell();
            table.stats.add_col_spanning_cell();
        }
        let content = node_text(*definition);

        for col_offset in 0..col_span {
            while cursor < columns && table.grid.is_filled(dest_row, cursor) {
                cursor += 1;
            }
            if cursor >= columns {
                warn!(
                    table_index,
                    row = dest_row,
                    "cell definition exceeds the declared column count; dropping"
                );
                warnings.push(
                    ExtractWarning::new(
                        WarningCode::CellOverflow,
                        "cell definition exceeds the table's column count",
                    )
                    .with_table_index(table_index)
                    .with_row(dest_row),
                );
                break;
            }

            let is_stub = !is_header && cursor == 0;
            for row_offset in 0..row_span {
                let target_row = dest_row + row_offset;
                if target_row >= total_rows {
                    warn!(
                        table_index,
                        row = target_row,
                        "rowspan extends past the last table row; dropping"
                    );
                    warnings.push(
                        ExtractWarning::new(
                            WarningCode::CellOverflow,
                            "rowspan extends past the last table row",
                        )
                        .with_table_index(table_index)
                        .with_row(target_row),
                    );
                    break;
                }

                let cell = Cell {
                    content: content.clone(),
                    is_header,
                    header_probability: if is_header { HEADER_PROBABILITY } else { 0.0 },
                    is_stub,
                    stub_probability: if is_stub { STUB_PROBABILITY } else { 0.0 },
                    is_row_spanning: row_span > 1,
                    row_span,
                    is_col_spanning: col_span > 1,
                    col_span,
                    row_span_offset: row_offset,
                    col_span_offset: col_offset,
                    ..Cell::default()
                };
                match table.grid.place(target_row, cursor, cell) {
                    Ok(placed) => table.stats.record_cell(placed),
                    Err(PlaceError::AlreadyFilled { row, col }) => {
                        warn!(
                            table_index,
                            row, col, "overlapping spans claim the same grid position; dropping"
                        );
                        warnings.push(
                            ExtractWarning::new(
                                WarningCode::CellOverflow,
                                "overlapping spans claim the same grid position",
                            )
                            .with_table_index(table_index)
                            .with_row(row),
                        );
                    }
                    Err(PlaceError::OutOfBounds { row, col }) => {
                        warn!(table_index, row, col, "cell placement out of bounds; dropping");
                        warnings.push(
                            ExtractWarning::new(
                                WarningCode::CellOverflow,
                                "cell placement out of bounds",
                            )
                            .with_table_index(table_index)
                            .with_row(row),
                        );
                    }
                }
            }
            cursor += 1;
        }
    }
}
