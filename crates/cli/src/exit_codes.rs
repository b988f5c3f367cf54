//! CLI Exit Code Registry
//!
//! Single source of truth for `yokscore` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                               |
//! |------|-------------------------------------------------------|
//! | 0    | Success (including runs that updated zero programs)   |
//! | 1    | General error (unspecified)                           |
//! | 2    | CLI usage error (bad args, --report onto the catalog) |
//! | 3    | Config file unreadable or invalid                     |
//! | 4    | Score table could not be loaded                       |
//! | 5    | Catalog could not be loaded                           |
//! | 6    | Catalog or report could not be written                |
//!
//! Codes 3-5 are raised before the catalog is touched.

use yokscore_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. Clap exits with this code on its own;
/// argument combinations it cannot check are rejected with it too.
pub const EXIT_USAGE: u8 = 2;

/// Config file missing, unparseable, or failing validation.
pub const EXIT_CONFIG: u8 = 3;

/// A score source is missing, unreadable, or lacks a required column.
pub const EXIT_TABLE: u8 = 4;

/// Catalog file missing, not JSON, or not an array of universities.
pub const EXIT_CATALOG: u8 = 5;

/// Writing the catalog (or the JSON report) failed.
pub const EXIT_WRITE: u8 = 6;

/// Map a fatal engine error to its exit code. Plain IO errors take
/// `io_code`, the code of the phase that hit them.
pub fn recon_exit_code(err: &ReconError, io_code: u8) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG,
        ReconError::Workbook { .. }
        | ReconError::MissingHeader { .. }
        | ReconError::MissingColumn { .. } => EXIT_TABLE,
        ReconError::CatalogParse(_) | ReconError::CatalogShape(_) => EXIT_CATALOG,
        ReconError::CatalogWrite(_) => EXIT_WRITE,
        ReconError::Io(_) => io_code,
    }
}
