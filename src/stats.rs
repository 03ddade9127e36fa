use serde::Serialize;

use crate::model::Cell;

/// Process-wide accumulator for a batch run. Owned by the caller and passed
/// down into extraction; merging per-document accumulators under a single
/// writer is the intended path if batches are ever parallelized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CorpusStats {
    pub documents: u64,
    pub tables: u64,
    pub image_tables: u64,
    pub tables_without_head: u64,
    pub tables_without_body: u64,
    pub header_rows: u64,
    pub body_rows: u64,
    pub row_spanning_cells: u64,
    pub col_spanning_cells: u64,
    pub total_rows: u64,
    pub total_columns: u64,
}

impl CorpusStats {
    pub fn add_document(&mut self) {
        self.documents = self.documents.saturating_add(1);
    }

    pub fn add_table(&mut self) {
        self.tables = self.tables.saturating_add(1);
    }

    pub fn add_image_table(&mut self) {
        self.image_tables = self.image_tables.saturating_add(1);
    }

    pub fn add_table_without_head(&mut self) {
        self.tables_without_head = self.tables_without_head.saturating_add(1);
    }

    pub fn add_table_without_body(&mut self) {
        self.tables_without_body = self.tables_without_body.saturating_add(1);
    }

    pub fn add_header_row(&mut self) {
        self.header_rows = self.header_rows.saturating_add(1);
    }

    pub fn add_body_row(&mut self) {
        self.body_rows = self.body_rows.saturating_add(1);
    }

    pub fn add_row_spanning_cell(&mut self) {
        self.row_spanning_cells = self.row_spanning_cells.saturating_add(1);
    }

    pub fn add_col_spanning_cell(&mut self) {
        self.col_spanning_cells = self.col_spanning_cells.saturating_add(1);
    }

    pub fn add_rows(&mut self, rows: usize) {
        self.total_rows = self.total_rows.saturating_add(rows as u64);
    }

    pub fn add_columns(&mut self, columns: usize) {
        self.total_columns = self.total_columns.saturating_add(columns as u64);
    }

    /// Folds another accumulator into this one, counter by counter.
    pub fn merge(&mut self, other: &Self) {
        self.documents = self.documents.saturating_add(other.documents);
        self.tables = self.tables.saturating_add(other.tables);
        self.image_tables = self.image_tables.saturating_add(other.image_tables);
        self.tables_without_head = self
            .tables_without_head
            .saturating_add(other.tables_without_head);
        self.tables_without_body = self
            .tables_without_body
            .saturating_add(other.tables_without_body);
        self.header_rows = self.header_rows.saturating_add(other.header_rows);
        self.body_rows = self.body_rows.saturating_add(other.body_rows);
        self.row_spanning_cells = self
            .row_spanning_cells
            .saturating_add(other.row_spanning_cells);
        self.col_spanning_cells = self
            .col_spanning_cells
            .saturating_add(other.col_spanning_cells);
        self.total_rows = self.total_rows.saturating_add(other.total_rows);
        self.total_columns = self.total_columns.saturating_add(other.total_columns);
    }
}

/// Per-table accumulator with the same counter shape, scoped to one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub header_rows: u64,
    pub body_rows: u64,
    pub row_spanning_cells: u64,
    pub col_spanning_cells: u64,
    pub filled_cells: u64,
    pub header_cells: u64,
    pub stub_cells: u64,
}

impl TableStats {
    pub fn add_header_row(&mut self) {
        self.header_rows = self.header_rows.saturating_add(1);
    }

    pub fn add_body_row(&mut self) {
        self.body_rows = self.body_rows.saturating_add(1);
    }

    pub fn add_row_spanning_cell(&mut self) {
        self.row_spanning_cells = self.row_spanning_cells.saturating_add(1);
    }

    pub fn add_col_spanning_cell(&mut self) {
        self.col_spanning_cells = self.col_spanning_cells.saturating_add(1);
    }

    pub fn record_cell(&mut self, cell: &Cell) {
        self.filled_cells = self.filled_cells.saturating_add(1);
        if cell.is_header {
            self.header_cells = self.header_cells.saturating_add(1);
        }
        if cell.is_stub {
            self.stub_cells = self.stub_cells.saturating_add(1);
        }
    }
}
