//! `yokscore-recon` - writes published minimum scores into a program catalog.
//!
//! Pure engine crate: receives a pre-loaded score table and catalog, mutates
//! the catalog, returns a per-program report. No file IO apart from reading
//! the optional config file.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod score;
pub mod table;

pub use catalog::Catalog;
pub use config::ReconConfig;
pub use engine::{reconcile, MatchRules};
pub use error::ReconError;
pub use model::{ProgramOutcome, ReconReport, ReconSummary};
pub use score::normalize_score;
pub use table::{ScoreRow, ScoreTable};
