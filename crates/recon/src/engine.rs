use serde_json::Value;

use crate::catalog::{min_score, program_code, score_slot, Catalog};
use crate::config::{ColumnMapping, ReconConfig};
use crate::model::{compute_summary, ProgramOutcome, ProgramReport, ReconReport};
use crate::score::normalize_score;
use crate::table::{CodeIndex, ScoreTable};

/// How programs are joined to score rows and which field gets written.
#[derive(Debug, Clone)]
pub struct MatchRules {
    pub columns: ColumnMapping,
    pub record: String,
    pub sentinel: String,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::from(&ReconConfig::default())
    }
}

impl From<&ReconConfig> for MatchRules {
    fn from(config: &ReconConfig) -> Self {
        Self {
            columns: config.columns.clone(),
            record: config.record.clone(),
            sentinel: config.sentinel.clone(),
        }
    }
}

/// Write matching scores into `catalog` in place.
///
/// Never fails: a program that cannot be updated is left exactly as it was
/// and reported with the reason.
pub fn reconcile(catalog: &mut Catalog, table: &ScoreTable, rules: &MatchRules) -> ReconReport {
    let index = table.index(&rules.columns.code);

    if !index.duplicates().is_empty() {
        let sample: Vec<String> = index
            .duplicates()
            .iter()
            .take(5)
            .map(|d| format!("{} (x{})", d.code, d.occurrences))
            .collect();
        log::warn!(
            "{} program code(s) appear in more than one row, using the first: {}",
            index.duplicates().len(),
            sample.join(", ")
        );
    }

    let mut programs = Vec::new();
    catalog.for_each_program_mut(|location, program| {
        let outcome = reconcile_program(program, &index, rules);
        log::trace!("{location}: {}", outcome.label());
        programs.push(ProgramReport { location, outcome });
    });

    let summary = compute_summary(&programs, table.len(), index.duplicates().len());

    ReconReport {
        summary,
        duplicates: index.duplicates().to_vec(),
        programs,
    }
}

fn reconcile_program(program: &mut Value, index: &CodeIndex<'_>, rules: &MatchRules) -> ProgramOutcome {
    let Some(code) = program_code(program, &rules.record) else {
        return ProgramOutcome::MalformedIdentifier;
    };

    let Some(row) = index.lookup(code) else {
        return ProgramOutcome::Unmatched { code };
    };

    let raw = row.get(&rules.columns.score).unwrap_or_default();
    let score = match normalize_score(raw, &rules.sentinel) {
        Ok(score) => score,
        Err(reason) => {
            return ProgramOutcome::Unusable {
                code,
                reason,
                row: row.origin.clone(),
            }
        }
    };

    let previous = min_score(program, &rules.record);
    let Some(slot) = score_slot(program, &rules.record) else {
        return ProgramOutcome::MissingScoreSlot {
            code,
            row: row.origin.clone(),
        };
    };
    slot.insert("minScore".to_string(), Value::from(score));

    ProgramOutcome::Updated {
        code,
        previous,
        score,
        row: row.origin.clone(),
    }
}
