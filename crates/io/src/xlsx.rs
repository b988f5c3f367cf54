// Excel score-table import (xlsx, xls, xlsb, ods)
//
// Cells are flattened to display text. The header row is applied later by
// `table::rows_from_grid`, so this module knows nothing about columns.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use yokscore_recon::ReconError;

use crate::Grid;

/// Read one worksheet (first one when `sheet` is `None`) into a [`Grid`].
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<Grid, ReconError> {
    let source = path.display().to_string();
    let workbook_err = |message: String| ReconError::Workbook {
        source: source.clone(),
        message,
    };

    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| workbook_err(format!("failed to open: {e}")))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| workbook_err("workbook contains no sheets".into()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_err(format!("failed to read sheet '{sheet_name}': {e}")))?;

    // Range start offset (data may not begin at A1)
    let (first_row, _) = range.start().unwrap_or((0, 0));

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();

    Ok(Grid { first_row, rows })
}

/// Display text of a cell. Integral numbers lose their `.0` so program
/// codes stored as floats still read as integers.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => format_number(*n),
        Data::Int(n) => n.to_string(),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => format_number(dt.as_f64()),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(cell_text(&Data::Float(90320123.0)), "90320123");
        assert_eq!(cell_text(&Data::Float(-3.0)), "-3");
    }

    #[test]
    fn fractional_floats_keep_shortest_form() {
        assert_eq!(cell_text(&Data::Float(350.125)), "350.125");
        assert_eq!(cell_text(&Data::Float(0.1)), "0.1");
    }

    #[test]
    fn text_and_empty() {
        assert_eq!(cell_text(&Data::String("350,125".into())), "350,125");
        assert_eq!(cell_text(&Data::String("--".into())), "--");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Int(42)), "42");
        assert_eq!(cell_text(&Data::Bool(true)), "TRUE");
    }

    #[test]
    fn missing_file_is_workbook_error() {
        let err = read_grid(Path::new("/nonexistent/tablo4.xlsx"), None).unwrap_err();
        assert!(matches!(err, ReconError::Workbook { .. }));
        assert!(err.to_string().contains("tablo4.xlsx"));
    }
}
