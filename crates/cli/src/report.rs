//! JSON report for `--json` / `--report`.

use serde::Serialize;
use yokscore_recon::model::ProgramReport;
use yokscore_recon::table::DuplicateCode;
use yokscore_recon::{ReconConfig, ReconReport, ReconSummary};

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub meta: RunMeta,
    pub summary: &'a ReconSummary,
    pub duplicates: &'a [DuplicateCode],
    /// Every outcome except `unmatched`.
    pub outcomes: Vec<&'a ProgramReport>,
}

#[derive(Debug, Serialize)]
pub struct RunMeta {
    pub record: String,
    pub columns: [String; 2],
    pub sources: Vec<String>,
    pub catalog: String,
    pub dry_run: bool,
    pub tool_version: String,
    pub run_at: String,
}

impl<'a> RunReport<'a> {
    pub fn new(config: &ReconConfig, report: &'a ReconReport, dry_run: bool) -> Self {
        Self {
            meta: RunMeta {
                record: config.record.clone(),
                columns: [config.columns.code.clone(), config.columns.score.clone()],
                sources: config
                    .sources
                    .iter()
                    .map(|s| s.file.display().to_string())
                    .collect(),
                catalog: config.catalog.display().to_string(),
                dry_run,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                run_at: chrono::Utc::now().to_rfc3339(),
            },
            summary: &report.summary,
            duplicates: &report.duplicates,
            outcomes: report.notable().collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// `updated 1234 program(s) with 2025 scores`
pub fn summary_line(config: &ReconConfig, summary: &ReconSummary) -> String {
    let label = config.record_year().unwrap_or(&config.record);
    format!("updated {} program(s) with {} scores", summary.updated, label)
}

/// Breakdown of everything that was not updated, or `None` if nothing was skipped.
pub fn skipped_line(summary: &ReconSummary) -> Option<String> {
    if summary.skipped() == 0 {
        return None;
    }

    let mut parts = Vec::new();
    for (count, what) in [
        (summary.unmatched, "not in the score tables"),
        (summary.unusable, "without a usable score"),
        (summary.malformed_identifier, "with a malformed program code"),
        (summary.missing_score_slot, "without quota.general"),
    ] {
        if count > 0 {
            parts.push(format!("{count} {what}"));
        }
    }

    Some(format!(
        "skipped {} of {} program(s): {}",
        summary.skipped(),
        summary.programs,
        parts.join(", ")
    ))
}
