use serde::Serialize;

use crate::catalog::ProgramLocation;
use crate::score::ScoreRejection;
use crate::table::{DuplicateCode, RowOrigin};

// ---------------------------------------------------------------------------
// Per-program outcome
// ---------------------------------------------------------------------------

/// What happened to one program during a pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProgramOutcome {
    /// Score written into `quota.general.minScore`.
    Updated {
        code: i64,
        previous: Option<f64>,
        score: f64,
        row: RowOrigin,
    },
    /// Row found but its score cell is empty, the sentinel, or not a number.
    Unusable {
        code: i64,
        reason: ScoreRejection,
        row: RowOrigin,
    },
    /// Matching row found but the program has no `quota.general` object.
    MissingScoreSlot { code: i64, row: RowOrigin },
    /// No row carries this program's code.
    Unmatched { code: i64 },
    /// `programCode` missing or not an integer.
    MalformedIdentifier,
}

impl ProgramOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Updated { code, .. }
            | Self::Unusable { code, .. }
            | Self::MissingScoreSlot { code, .. }
            | Self::Unmatched { code } => Some(*code),
            Self::MalformedIdentifier => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Updated { .. } => "updated",
            Self::Unusable { .. } => "unusable",
            Self::MissingScoreSlot { .. } => "missing_score_slot",
            Self::Unmatched { .. } => "unmatched",
            Self::MalformedIdentifier => "malformed_identifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramReport {
    pub location: ProgramLocation,
    #[serde(flatten)]
    pub outcome: ProgramOutcome,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub programs: usize,
    pub updated: usize,
    /// Updated programs whose score was already the same value.
    pub unchanged_value: usize,
    pub unusable: usize,
    pub missing_score_slot: usize,
    pub unmatched: usize,
    pub malformed_identifier: usize,
    pub table_rows: usize,
    pub duplicate_codes: usize,
}

impl ReconSummary {
    pub fn skipped(&self) -> usize {
        self.programs - self.updated
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub summary: ReconSummary,
    pub duplicates: Vec<DuplicateCode>,
    pub programs: Vec<ProgramReport>,
}

impl ReconReport {
    pub fn updated_count(&self) -> usize {
        self.summary.updated
    }

    /// Everything except `unmatched`, which usually dominates and says little.
    pub fn notable(&self) -> impl Iterator<Item = &ProgramReport> {
        self.programs
            .iter()
            .filter(|p| !matches!(p.outcome, ProgramOutcome::Unmatched { .. }))
    }
}

pub(crate) fn compute_summary(programs: &[ProgramReport], table_rows: usize, duplicates: usize) -> ReconSummary {
    let mut summary = ReconSummary {
        programs: programs.len(),
        table_rows,
        duplicate_codes: duplicates,
        ..ReconSummary::default()
    };

    for report in programs {
        match &report.outcome {
            ProgramOutcome::Updated { previous, score, .. } => {
                summary.updated += 1;
                if *previous == Some(*score) {
                    summary.unchanged_value += 1;
                }
            }
            ProgramOutcome::Unusable { .. } => summary.unusable += 1,
            ProgramOutcome::MissingScoreSlot { .. } => summary.missing_score_slot += 1,
            ProgramOutcome::Unmatched { .. } => summary.unmatched += 1,
            ProgramOutcome::MalformedIdentifier => summary.malformed_identifier += 1,
        }
    }

    summary
}
