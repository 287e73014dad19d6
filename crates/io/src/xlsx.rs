// Excel/ODS import (calamine) and export (rust_xlsxwriter)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Format, Workbook};

use crate::error::InputError;
use crate::table::{Cell, Table};

/// Read the first worksheet. Its first row is the header.
pub fn read_table(path: &Path) -> Result<Table, InputError> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| InputError::io(path, e))?;

    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| InputError::NoSheets { path: path.to_path_buf() })?;

    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| InputError::parse(path, format!("sheet '{}': {}", first, e)))?;

    let mut grid = Vec::with_capacity(range.height());
    for row in range.rows() {
        let cells: Vec<Cell> = row.iter().map(convert).collect();
        if cells.iter().all(|c| matches!(c, Cell::Empty)) {
            continue;
        }
        grid.push(cells);
    }

    log::debug!("{}: read {} rows from sheet '{}'", path.display(), grid.len(), first);
    Ok(Table::from_grid(grid))
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Serial number, same as the sheet would show unformatted
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{:?}", e)),
    }
}

// ============================================================================
// Export
// ============================================================================

/// A cell to write. Numbers stay numeric in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum OutCell {
    Text(String),
    Number(f64),
}

/// One worksheet: a bold header row, then data.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<OutCell>>,
    /// Column widths in characters; columns past the end keep the default.
    pub widths: Vec<f64>,
}

/// Write sheets in order to a new workbook at `path`.
pub fn write_sheets(path: &Path, sheets: &[SheetData]) -> Result<(), String> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&sheet.name)
            .map_err(|e| format!("Failed to create sheet '{}': {}", sheet.name, e))?;

        for (col, width) in sheet.widths.iter().enumerate() {
            worksheet
                .set_column_width(col as u16, *width)
                .map_err(|e| format!("Failed to set column width: {}", e))?;
        }

        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .map_err(|e| format!("Failed to write header: {}", e))?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let row_idx = (r + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                let col = col as u16;
                match cell {
                    OutCell::Text(s) if s.is_empty() => {}
                    OutCell::Text(s) => {
                        worksheet
                            .write_string(row_idx, col, s)
                            .map_err(|e| format!("Failed to write cell: {}", e))?;
                    }
                    OutCell::Number(n) => {
                        worksheet
                            .write_number(row_idx, col, *n)
                            .map_err(|e| format!("Failed to write cell: {}", e))?;
                    }
                }
            }
        }
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}
