use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::score::parse_code;

/// Where a score row came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowOrigin {
    /// Index of the source in load order.
    pub source: usize,
    /// Source label (usually the file name).
    pub label: String,
    /// 1-based physical spreadsheet row.
    pub line: u32,
}

/// A single data row, keyed by trimmed header name.
#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub origin: RowOrigin,
    pub fields: HashMap<String, String>,
}

impl ScoreRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(|v| v.as_str())
    }
}

/// Concatenated rows of every score source, in source order.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    rows: Vec<ScoreRow>,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ScoreRow>) -> Self {
        Self { rows }
    }

    /// Append another source's rows after the existing ones. No dedup.
    pub fn extend(&mut self, rows: impl IntoIterator<Item = ScoreRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Build a code → row lookup for `code_column`. First row wins.
    pub fn index(&self, code_column: &str) -> CodeIndex<'_> {
        let mut first: HashMap<i64, usize> = HashMap::new();
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();

        for (i, row) in self.rows.iter().enumerate() {
            let Some(code) = row.get(code_column).and_then(parse_code) else {
                continue;
            };
            first.entry(code).or_insert(i);
            *counts.entry(code).or_insert(0) += 1;
        }

        let duplicates = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(code, occurrences)| DuplicateCode { code, occurrences })
            .collect();

        CodeIndex {
            table: self,
            first,
            duplicates,
        }
    }
}

/// A program code that appears in more than one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateCode {
    pub code: i64,
    pub occurrences: usize,
}

/// First-match lookup over a [`ScoreTable`].
pub struct CodeIndex<'a> {
    table: &'a ScoreTable,
    first: HashMap<i64, usize>,
    duplicates: Vec<DuplicateCode>,
}

impl<'a> CodeIndex<'a> {
    pub fn lookup(&self, code: i64) -> Option<&'a ScoreRow> {
        self.first.get(&code).map(|&i| &self.table.rows[i])
    }

    /// Codes seen more than once, ascending.
    pub fn duplicates(&self) -> &[DuplicateCode] {
        &self.duplicates
    }
}

#[cfg(test)]
pub(crate) fn test_row(source: usize, line: u32, code: &str, score: &str) -> ScoreRow {
    ScoreRow {
        origin: RowOrigin {
            source,
            label: format!("tablo{source}.xlsx"),
            line,
        },
        fields: HashMap::from([
            ("Program Kodu".to_string(), code.to_string()),
            ("En Küçük Puan".to_string(), score.to_string()),
        ]),
    }
}
