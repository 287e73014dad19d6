use std::fmt;
use std::path::{Path, PathBuf};

/// Failure reading an input spreadsheet.
#[derive(Debug)]
pub enum InputError {
    /// File could not be opened or read.
    Io { path: PathBuf, message: String },
    /// Extension is not a spreadsheet or delimited text format we read.
    UnsupportedFormat { path: PathBuf },
    /// Workbook opened but has no worksheets.
    NoSheets { path: PathBuf },
    /// Sheet or CSV content could not be parsed.
    Parse { path: PathBuf, message: String },
}

impl InputError {
    pub(crate) fn io(path: &Path, message: impl fmt::Display) -> Self {
        Self::Io { path: path.to_path_buf(), message: message.to_string() }
    }

    pub(crate) fn parse(path: &Path, message: impl fmt::Display) -> Self {
        Self::Parse { path: path.to_path_buf(), message: message.to_string() }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::UnsupportedFormat { path } => write!(
                f,
                "unsupported file type: {} (expected .xlsx, .xls, .xlsb, .ods, .csv or .tsv)",
                path.display()
            ),
            Self::NoSheets { path } => write!(f, "{} contains no sheets", path.display()),
            Self::Parse { path, message } => write!(f, "cannot parse {}: {message}", path.display()),
        }
    }
}

impl std::error::Error for InputError {}

/// Failure in the template store.
#[derive(Debug)]
pub enum StoreError {
    /// No template with this id.
    NotFound(String),
    /// Template metadata rejected before saving.
    Invalid(String),
    /// Filesystem error.
    Io(String),
    /// Stored document is not valid JSON for a template.
    Corrupt { id: String, message: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "template not found: {id}"),
            Self::Invalid(msg) => write!(f, "invalid template: {msg}"),
            Self::Io(msg) => write!(f, "template store error: {msg}"),
            Self::Corrupt { id, message } => write!(f, "template '{id}' is unreadable: {message}"),
        }
    }
}

impl std::error::Error for StoreError {}
