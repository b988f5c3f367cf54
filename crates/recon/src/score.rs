//! Score text normalization.
//!
//! Published tables use Turkish decimal commas (`"350,125"`) and a `"--"`
//! marker for programs with no published score.

use serde::Serialize;

/// Marker used by the published tables for "no score available".
pub const DEFAULT_SENTINEL: &str = "--";

/// Why a score cell could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRejection {
    /// Nothing left after trimming.
    Empty,
    /// The cell holds the sentinel.
    Unavailable,
    /// Not a finite floating-point number.
    NotNumeric(String),
}

impl std::fmt::Display for ScoreRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::NotNumeric(text) => write!(f, "not numeric: {text:?}"),
        }
    }
}

/// Normalize a raw score cell and parse it.
///
/// Whitespace is stripped, the first comma becomes a decimal point, and the
/// result is rejected when empty or equal to `sentinel`.
pub fn normalize_score(raw: &str, sentinel: &str) -> Result<f64, ScoreRejection> {
    let text = raw.trim().replacen(',', ".", 1);
    let text = text.trim();

    if text.is_empty() {
        return Err(ScoreRejection::Empty);
    }
    if text == sentinel.trim() {
        return Err(ScoreRejection::Unavailable);
    }

    match text.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(ScoreRejection::NotNumeric(text.to_string())),
    }
}

/// Parse a program code as an integer. Surrounding whitespace is allowed.
pub fn parse_code(text: &str) -> Option<i64> {
    text.trim().parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma() {
        assert_eq!(normalize_score("350,125", "--"), Ok(350.125));
        assert_eq!(normalize_score("  412,5 ", "--"), Ok(412.5));
    }

    #[test]
    fn decimal_point_passes_through() {
        assert_eq!(normalize_score("287.93", "--"), Ok(287.93));
        assert_eq!(normalize_score("300", "--"), Ok(300.0));
    }

    #[test]
    fn sentinel_rejected() {
        assert_eq!(normalize_score("--", "--"), Err(ScoreRejection::Unavailable));
        assert_eq!(normalize_score("  -- ", "--"), Err(ScoreRejection::Unavailable));
    }

    #[test]
    fn custom_sentinel() {
        assert_eq!(normalize_score("yok", "yok"), Err(ScoreRejection::Unavailable));
        assert!(matches!(normalize_score("--", "yok"), Err(ScoreRejection::NotNumeric(_))));
    }

    #[test]
    fn empty_rejected() {
        assert_eq!(normalize_score("", "--"), Err(ScoreRejection::Empty));
        assert_eq!(normalize_score("   ", "--"), Err(ScoreRejection::Empty));
    }

    #[test]
    fn only_first_comma_replaced() {
        assert_eq!(
            normalize_score("1,234,5", "--"),
            Err(ScoreRejection::NotNumeric("1.234,5".into()))
        );
    }

    #[test]
    fn non_finite_rejected() {
        assert!(matches!(normalize_score("NaN", "--"), Err(ScoreRejection::NotNumeric(_))));
        assert!(matches!(normalize_score("inf", "--"), Err(ScoreRejection::NotNumeric(_))));
    }

    #[test]
    fn text_rejected() {
        assert_eq!(
            normalize_score("Dolmadı", "--"),
            Err(ScoreRejection::NotNumeric("Dolmadı".into()))
        );
    }

    #[test]
    fn parse_code_variants() {
        assert_eq!(parse_code("90320123"), Some(90320123));
        assert_eq!(parse_code(" 90320123 "), Some(90320123));
        assert_eq!(parse_code("ABC123"), None);
        assert_eq!(parse_code(""), None);
        assert_eq!(parse_code("903201.5"), None);
    }
}
