use std::path::PathBuf;

/// Switches consumed by the extraction core. Classification is off by
/// default; the stats report is written only while type classification runs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractOptions {
    pub classify_by_type: bool,
    pub classify_by_complexity: bool,
    pub stats_report: Option<PathBuf>,
}
