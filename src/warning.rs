#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningCode {
    UnreadableSource,
    MalformedXml,
    CellOverflow,
    ReportWriteFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractWarning {
    pub code: WarningCode,
    pub message: String,
    pub table_index: Option<usize>,
    pub row: Option<usize>,
}

impl ExtractWarning {
    #[must_use]
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            table_index: None,
            row: None,
        }
    }

    #[must_use]
    pub fn with_table_index(mut self, table_index: usize) -> Self {
        self.table_index = Some(table_index);
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}
