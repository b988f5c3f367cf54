//! The university → faculty → program catalog.
//!
//! The document is kept as a `serde_json::Value` tree so fields this crate
//! does not know about (and their key order) survive a load/save cycle.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ReconError;
use crate::score::parse_code;

/// Per-year record key on a program.
pub const DEFAULT_RECORD: &str = "yokData2025";

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    root: Value,
}

impl Catalog {
    /// Wrap a parsed document. The top level must be an array.
    pub fn from_value(root: Value) -> Result<Self, ReconError> {
        match &root {
            Value::Array(_) => Ok(Self { root }),
            other => Err(ReconError::CatalogShape(format!(
                "expected an array of universities, found {}",
                kind_of(other)
            ))),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ReconError> {
        let root: Value =
            serde_json::from_str(text).map_err(|e| ReconError::CatalogParse(e.to_string()))?;
        Self::from_value(root)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Pretty JSON, 2-space indent, non-ASCII written literally.
    pub fn to_json_pretty(&self) -> Result<String, ReconError> {
        serde_json::to_string_pretty(&self.root).map_err(|e| ReconError::CatalogWrite(e.to_string()))
    }

    pub fn university_count(&self) -> usize {
        self.root.as_array().map_or(0, Vec::len)
    }

    /// Visit every program in document order.
    pub fn for_each_program_mut<F>(&mut self, mut visit: F)
    where
        F: FnMut(ProgramLocation, &mut Value),
    {
        let Some(universities) = self.root.as_array_mut() else {
            return;
        };

        for (u, university) in universities.iter_mut().enumerate() {
            let university_name = name_of(university);
            let Some(faculties) = children_mut(university, "faculties") else {
                continue;
            };
            for (f, faculty) in faculties.iter_mut().enumerate() {
                let Some(programs) = children_mut(faculty, "programs") else {
                    continue;
                };
                for (p, program) in programs.iter_mut().enumerate() {
                    let location = ProgramLocation {
                        university: u,
                        faculty: f,
                        program: p,
                        university_name: university_name.clone(),
                        program_name: name_of(program),
                    };
                    visit(location, program);
                }
            }
        }
    }

    pub fn program_count(&self) -> usize {
        let Some(universities) = self.root.as_array() else {
            return 0;
        };
        universities
            .iter()
            .filter_map(|u| u.get("faculties").and_then(Value::as_array))
            .flatten()
            .filter_map(|f| f.get("programs").and_then(Value::as_array))
            .map(Vec::len)
            .sum()
    }
}

/// Position of a program inside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramLocation {
    pub university: usize,
    pub faculty: usize,
    pub program: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
}

impl std::fmt::Display for ProgramLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}/{}/{}]", self.university, self.faculty, self.program)?;
        if let Some(name) = &self.program_name {
            write!(f, " {name}")?;
        }
        Ok(())
    }
}

/// Read `<record>.programCode` as an integer. Accepts a string holding an
/// integer (surrounding whitespace allowed) or a JSON number with no
/// fractional part (`90320123` or `90320123.0`).
pub fn program_code(program: &Value, record: &str) -> Option<i64> {
    match program.get(record)?.get("programCode")? {
        Value::String(s) => parse_code(s),
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        _ => None,
    }
}

/// The `<record>.quota.general` object that holds `minScore`.
pub fn score_slot<'a>(program: &'a mut Value, record: &str) -> Option<&'a mut Map<String, Value>> {
    program
        .get_mut(record)?
        .get_mut("quota")?
        .get_mut("general")?
        .as_object_mut()
}

/// Current `minScore`, if it is a number.
pub fn min_score(program: &Value, record: &str) -> Option<f64> {
    program
        .get(record)?
        .get("quota")?
        .get("general")?
        .get("minScore")?
        .as_f64()
}

fn children_mut<'a>(entity: &'a mut Value, key: &str) -> Option<&'a mut Vec<Value>> {
    entity.get_mut(key)?.as_array_mut()
}

fn name_of(entity: &Value) -> Option<String> {
    entity.get("name").and_then(Value::as_str).map(str::to_string)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_array() {
        let err = Catalog::from_json(r#"{"faculties": []}"#).unwrap_err();
        assert!(err.to_string().contains("found an object"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Catalog::from_json("[{").unwrap_err();
        assert!(matches!(err, ReconError::CatalogParse(_)));
    }

    #[test]
    fn visits_programs_in_order() {
        let mut catalog = Catalog::from_value(json!([
            {"name": "A", "faculties": [
                {"programs": [{"name": "p0"}, {"name": "p1"}]},
                {"name": "no programs"}
            ]},
            {"name": "B"},
            {"name": "C", "faculties": [{"programs": [{"name": "p2"}]}]}
        ]))
        .unwrap();

        let mut seen = Vec::new();
        catalog.for_each_program_mut(|loc, _| {
            seen.push((loc.university, loc.faculty, loc.program, loc.program_name.unwrap()));
        });

        assert_eq!(
            seen,
            vec![
                (0, 0, 0, "p0".to_string()),
                (0, 0, 1, "p1".to_string()),
                (2, 0, 0, "p2".to_string()),
            ]
        );
        assert_eq!(catalog.program_count(), 3);
        assert_eq!(catalog.university_count(), 3);
    }

    #[test]
    fn program_code_accepts_text_and_integer() {
        let text = json!({"yokData2025": {"programCode": "90320123"}});
        let number = json!({"yokData2025": {"programCode": 90320123}});
        let bad = json!({"yokData2025": {"programCode": "ABC123"}});
        let missing = json!({"name": "x"});

        assert_eq!(program_code(&text, DEFAULT_RECORD), Some(90320123));
        assert_eq!(program_code(&number, DEFAULT_RECORD), Some(90320123));
        assert_eq!(program_code(&bad, DEFAULT_RECORD), None);
        assert_eq!(program_code(&missing, DEFAULT_RECORD), None);
    }

    #[test]
    fn program_code_accepts_integral_float() {
        let doc = Catalog::from_json(
            r#"[{"faculties": [{"programs": [
                {"yokData2025": {"programCode": 90320123.0}},
                {"yokData2025": {"programCode": 90320123.5}},
                {"yokData2025": {"programCode": 1e30}}
            ]}]}]"#,
        )
        .unwrap();
        let programs = &doc.as_value()[0]["faculties"][0]["programs"];

        assert_eq!(program_code(&programs[0], DEFAULT_RECORD), Some(90320123));
        assert_eq!(program_code(&programs[1], DEFAULT_RECORD), None);
        assert_eq!(program_code(&programs[2], DEFAULT_RECORD), None);
    }

    #[test]
    fn program_code_rejects_text_float() {
        let text = json!({"yokData2025": {"programCode": "90320123.0"}});
        assert_eq!(program_code(&text, DEFAULT_RECORD), None);
    }

    #[test]
    fn score_slot_requires_general_object() {
        let mut full = json!({"yokData2025": {"quota": {"general": {"minScore": null}}}});
        let mut partial = json!({"yokData2025": {"quota": {}}});

        assert!(score_slot(&mut full, DEFAULT_RECORD).is_some());
        assert!(score_slot(&mut partial, DEFAULT_RECORD).is_none());
        assert_eq!(min_score(&full, DEFAULT_RECORD), None);
    }

    #[test]
    fn pretty_output_keeps_turkish_text() {
        let catalog = Catalog::from_json(r#"[{"name":"Boğaziçi Üniversitesi","city":"İstanbul"}]"#).unwrap();
        let out = catalog.to_json_pretty().unwrap();
        assert!(out.contains("Boğaziçi Üniversitesi"));
        assert!(out.contains("\n    \"city\": \"İstanbul\""));
        assert!(!out.contains("\\u"));
    }

    #[test]
    fn key_order_survives() {
        let input = r#"[{"z":1,"a":2,"m":{"y":true,"b":null}}]"#;
        let catalog = Catalog::from_json(input).unwrap();
        let compact = serde_json::to_string(catalog.as_value()).unwrap();
        assert_eq!(compact, input);
    }
}
