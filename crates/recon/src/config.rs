use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::DEFAULT_RECORD;
use crate::error::ReconError;
use crate::score::DEFAULT_SENTINEL;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    pub catalog: PathBuf,
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub columns: ColumnMapping,
    #[serde(default = "default_record")]
    pub record: String,
    #[serde(default = "default_sentinel")]
    pub sentinel: String,
    /// 1-based physical row holding the column names.
    #[serde(default = "default_header_row")]
    pub header_row: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub file: PathBuf,
    /// Worksheet name. First worksheet when absent.
    #[serde(default)]
    pub sheet: Option<String>,
}

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnMapping {
    #[serde(default = "default_code_column")]
    pub code: String,
    #[serde(default = "default_score_column")]
    pub score: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            code: default_code_column(),
            score: default_score_column(),
        }
    }
}

fn default_code_column() -> String {
    "Program Kodu".into()
}

fn default_score_column() -> String {
    "En Küçük Puan".into()
}

fn default_record() -> String {
    DEFAULT_RECORD.into()
}

fn default_sentinel() -> String {
    DEFAULT_SENTINEL.into()
}

fn default_header_row() -> u32 {
    3
}

// ---------------------------------------------------------------------------
// Defaults, Parse + Validate
// ---------------------------------------------------------------------------

const DEFAULT_CATALOG: &str = "backend/data/turkey-universities-enhanced.json";
const DEFAULT_SOURCES: [&str; 2] = [
    "backend/data/tablo4_ykd25082025.xlsx",
    "backend/data/tablo3_ykd25082025.xlsx",
];

impl Default for ReconConfig {
    /// The 2025 run: Tablo 4 then Tablo 3, relative to the working directory.
    fn default() -> Self {
        Self {
            catalog: PathBuf::from(DEFAULT_CATALOG),
            sources: DEFAULT_SOURCES
                .iter()
                .map(|file| SourceConfig {
                    file: PathBuf::from(file),
                    sheet: None,
                })
                .collect(),
            columns: ColumnMapping::default(),
            record: default_record(),
            sentinel: default_sentinel(),
            header_row: default_header_row(),
        }
    }
}

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file. Relative paths inside it resolve against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self, ReconError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_toml(&text)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base_dir);
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base_dir: &Path) {
        self.catalog = base_dir.join(&self.catalog);
        for source in &mut self.sources {
            source.file = base_dir.join(&source.file);
        }
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.sources.is_empty() {
            return Err(ReconError::ConfigValidation(
                "at least one source is required".into(),
            ));
        }

        if self.header_row == 0 {
            return Err(ReconError::ConfigValidation(
                "header_row is 1-based and must be at least 1".into(),
            ));
        }

        for (field, value) in [
            ("columns.code", &self.columns.code),
            ("columns.score", &self.columns.score),
            ("record", &self.record),
        ] {
            if value.trim().is_empty() {
                return Err(ReconError::ConfigValidation(format!("{field} must not be empty")));
            }
        }

        if self.columns.code.trim() == self.columns.score.trim() {
            return Err(ReconError::ConfigValidation(format!(
                "code and score columns are both '{}'",
                self.columns.code.trim()
            )));
        }

        Ok(())
    }

    /// Year suffix of the record key (`yokData2025` → `2025`), if any.
    pub fn record_year(&self) -> Option<&str> {
        let digits = self.record.trim_start_matches(|c: char| !c.is_ascii_digit());
        (!digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
catalog = "data/universities.json"

[[sources]]
file = "data/tablo4.xlsx"

[[sources]]
file = "data/tablo3.xlsx"
sheet = "Tablo3"
"#;

    #[test]
    fn parse_minimal_uses_defaults() {
        let config = ReconConfig::from_toml(MINIMAL).unwrap();
        assert_eq!(config.catalog, PathBuf::from("data/universities.json"));
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.sources[0].sheet, None);
        assert_eq!(config.sources[1].sheet.as_deref(), Some("Tablo3"));
        assert_eq!(config.columns, ColumnMapping::default());
        assert_eq!(config.record, "yokData2025");
        assert_eq!(config.sentinel, "--");
        assert_eq!(config.header_row, 3);
    }

    #[test]
    fn parse_overrides() {
        let input = r#"
catalog = "c.json"
record = "yokData2026"
sentinel = "yok"
header_row = 1

[[sources]]
file = "a.xlsx"

[columns]
code = "Kod"
score = "Taban"
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.record, "yokData2026");
        assert_eq!(config.record_year(), Some("2026"));
        assert_eq!(config.sentinel, "yok");
        assert_eq!(config.header_row, 1);
        assert_eq!(config.columns.code, "Kod");
        assert_eq!(config.columns.score, "Taban");
    }

    #[test]
    fn reject_no_sources() {
        let err = ReconConfig::from_toml("catalog = \"c.json\"\nsources = []\n").unwrap_err();
        assert!(err.to_string().contains("at least one source"));
    }

    #[test]
    fn reject_zero_header_row() {
        let input = "catalog = \"c.json\"\nheader_row = 0\n[[sources]]\nfile = \"a.xlsx\"\n";
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("header_row"));
    }

    #[test]
    fn reject_same_columns() {
        let input = r#"
catalog = "c.json"
[[sources]]
file = "a.xlsx"
[columns]
code = "Kod"
score = " Kod "
"#;
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(err.to_string().contains("both 'Kod'"));
    }

    #[test]
    fn reject_unknown_key() {
        let input = "catalog = \"c.json\"\n[[sources]]\nfile = \"a.xlsx\"\nshet = \"x\"\n";
        let err = ReconConfig::from_toml(input).unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn default_matches_2025_run() {
        let config = ReconConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sources.len(), 2);
        assert!(config.sources[0].file.ends_with("tablo4_ykd25082025.xlsx"));
        assert!(config.sources[1].file.ends_with("tablo3_ykd25082025.xlsx"));
        assert_eq!(config.record_year(), Some("2025"));
    }

    #[test]
    fn resolve_paths_joins_base_dir() {
        let mut config = ReconConfig::from_toml(MINIMAL).unwrap();
        config.resolve_paths(Path::new("/srv/yok"));
        assert_eq!(config.catalog, PathBuf::from("/srv/yok/data/universities.json"));
        assert_eq!(config.sources[1].file, PathBuf::from("/srv/yok/data/tablo3.xlsx"));
    }

    #[test]
    fn record_year_absent() {
        let mut config = ReconConfig::default();
        config.record = "scores".into();
        assert_eq!(config.record_year(), None);
    }
}
