use std::fmt;

/// Fatal errors. Anything that can go wrong for a single program is a
/// [`crate::model::ProgramOutcome`] instead.
#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (no sources, empty column name, etc.).
    ConfigValidation(String),
    /// IO error (file open, read, etc.).
    Io(String),
    /// Spreadsheet could not be opened or a worksheet could not be read.
    Workbook { source: String, message: String },
    /// Data in a source starts below the configured header row.
    MissingHeader { source: String, header_row: u32 },
    /// Required column missing from a source header row.
    MissingColumn { source: String, column: String },
    /// Catalog is not valid JSON.
    CatalogParse(String),
    /// Catalog is valid JSON but not an array of universities.
    CatalogShape(String),
    /// Catalog could not be serialized or written back.
    CatalogWrite(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Workbook { source, message } => {
                write!(f, "source '{source}': cannot read workbook: {message}")
            }
            Self::MissingHeader { source, header_row } => {
                write!(f, "source '{source}': no header at row {header_row}")
            }
            Self::MissingColumn { source, column } => {
                write!(f, "source '{source}': missing column '{column}'")
            }
            Self::CatalogParse(msg) => write!(f, "catalog parse error: {msg}"),
            Self::CatalogShape(msg) => write!(f, "unexpected catalog layout: {msg}"),
            Self::CatalogWrite(msg) => write!(f, "cannot write catalog: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
