use std::collections::HashMap;

use yokscore_recon::config::{ColumnMapping, ReconConfig, SourceConfig};
use yokscore_recon::table::RowOrigin;
use yokscore_recon::{ReconError, ScoreRow, ScoreTable};

use crate::Grid;

/// Load every configured source and concatenate the rows in source order.
pub fn load_table(config: &ReconConfig) -> Result<ScoreTable, ReconError> {
    let mut table = ScoreTable::new();
    for (index, source) in config.sources.iter().enumerate() {
        let rows = load_source(index, source, config.header_row, &config.columns)?;
        log::info!("{}: {} row(s)", source.file.display(), rows.len());
        table.extend(rows);
    }
    Ok(table)
}

/// Load one source workbook (xlsx, xls, xlsb or ods).
pub fn load_source(
    index: usize,
    source: &SourceConfig,
    header_row: u32,
    columns: &ColumnMapping,
) -> Result<Vec<ScoreRow>, ReconError> {
    let grid = crate::xlsx::read_grid(&source.file, source.sheet.as_deref())?;

    let label = source
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.file.display().to_string());

    rows_from_grid(index, &label, &grid, header_row, columns)
}

/// Apply the header row to a grid.
///
/// `header_row` is the 1-based physical row holding the column names; rows
/// above it are titles and are ignored. Header names are trimmed. Fully
/// blank data rows are dropped.
pub fn rows_from_grid(
    index: usize,
    label: &str,
    grid: &Grid,
    header_row: u32,
    columns: &ColumnMapping,
) -> Result<Vec<ScoreRow>, ReconError> {
    let missing_header = || ReconError::MissingHeader {
        source: label.to_string(),
        header_row,
    };

    let header_at = header_row
        .checked_sub(1)
        .and_then(|physical| physical.checked_sub(grid.first_row))
        .map(|offset| offset as usize)
        .ok_or_else(missing_header)?;
    let header = grid.rows.get(header_at).ok_or_else(missing_header)?;
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

    for required in [&columns.code, &columns.score] {
        if !header.iter().any(|h| h == required.trim()) {
            return Err(ReconError::MissingColumn {
                source: label.to_string(),
                column: required.trim().to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for (offset, cells) in grid.rows.iter().enumerate().skip(header_at + 1) {
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let mut fields = HashMap::new();
        for (name, value) in header.iter().zip(cells.iter()) {
            if name.is_empty() {
                continue;
            }
            // Repeated header names: first column wins.
            fields.entry(name.clone()).or_insert_with(|| value.clone());
        }

        rows.push(ScoreRow {
            origin: RowOrigin {
                source: index,
                label: label.to_string(),
                line: grid.first_row + offset as u32 + 1,
            },
            fields,
        });
    }

    Ok(rows)
}
