use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid DOCX: {0}")]
    InvalidDocx(String),

    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid classifier pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An element record whose variant tag none of the height formulas cover.
    #[error("element {index}: unrecognized element type {kind:?}")]
    UnrecognizedElement { index: usize, kind: String },
}
