use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to serialize table statistics: {0}")]
    StatsSerialize(#[from] serde_json::Error),
}
