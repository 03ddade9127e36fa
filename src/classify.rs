use serde::Serialize;

use crate::model::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableType {
    Image,
    List,
    Matrix,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableComplexity {
    Simple,
    Medium,
    Complex,
}

/// Classifiers run after grid construction. They annotate the table with a
/// label and must not touch grid cell content.
pub trait TableClassifier {
    fn classify(&self, table: &mut Table);
}

/// Shape-based type label: image placeholders, single-column lists, and
/// header-plus-stub matrices.
pub struct TypeClassifier;

impl TableClassifier for TypeClassifier {
    fn classify(&self, table: &mut Table) {
        let table_type = if table.no_xml_table {
            TableType::Image
        } else if !table.has_body {
            TableType::Plain
        } else if table.columns() <= 1 {
            TableType::List
        } else if table.has_header && table.stats.stub_cells > 0 {
            TableType::Matrix
        } else {
            TableType::Plain
        };
        table.table_type = Some(table_type);
    }
}

/// Span-based complexity label: both span kinds make a table complex, one
/// kind or a multi-row header makes it medium.
pub struct ComplexityClassifier;

impl TableClassifier for ComplexityClassifier {
    fn classify(&self, table: &mut Table) {
        let complexity = if table.is_row_spanning && table.is_col_spanning {
            TableComplexity::Complex
        } else if table.is_row_spanning || table.is_col_spanning || table.stats.header_rows > 1 {
            TableComplexity::Medium
        } else {
            TableComplexity::Simple
        };
        table.complexity = Some(complexity);
    }
}
