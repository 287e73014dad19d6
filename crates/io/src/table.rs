// Header-keyed view over the first sheet of a spreadsheet or a delimited text file

use std::collections::HashMap;
use std::path::Path;

use crate::error::InputError;

/// A single cell as read from disk, before any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Cell {
    /// Cell as text. Whole numbers print without a decimal point.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Lenient numeric read: anything that is not a finite number becomes 0.
    pub fn number(&self) -> f64 {
        let n = match self {
            Cell::Empty => 0.0,
            Cell::Number(n) => *n,
            Cell::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(0.0)
                }
            }
        };
        if n.is_finite() {
            n
        } else {
            0.0
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// First row is the header; every following row is data.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    index: HashMap<String, usize>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();
        let mut index = HashMap::with_capacity(headers.len());
        for (i, h) in headers.iter().enumerate() {
            if !h.is_empty() {
                // First occurrence of a repeated header wins
                index.entry(h.clone()).or_insert(i);
            }
        }
        Self { headers, rows, index }
    }

    /// Build a table from a grid whose first row is the header.
    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let header_row = grid.remove(0);
        let headers = header_row.iter().map(Cell::text).collect();
        Self::new(headers, grid)
    }

    pub fn has_column(&self, header: &str) -> bool {
        self.index.contains_key(header)
    }

    /// Cell under `header` in data row `row`, `Cell::Empty` if either is absent.
    pub fn cell(&self, row: usize, header: &str) -> &Cell {
        self.index
            .get(header)
            .and_then(|&col| self.rows.get(row).and_then(|r| r.get(col)))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read the first sheet of a workbook, or a delimited text file, by extension.
pub fn read_table(path: &Path) -> Result<Table, InputError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => crate::xlsx::read_table(path),
        "csv" | "txt" => crate::csv::read_table(path),
        "tsv" => crate::csv::read_table_with_delimiter(path, b'\t'),
        _ => Err(InputError::UnsupportedFormat { path: path.to_path_buf() }),
    }
}
