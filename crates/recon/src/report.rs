//! Print-ready report sections.
//!
//! A section's column schema is picked from `Category::record_kind`, so every
//! renderer (plain text here, XLSX in the io crate) lays out the same table.

use std::fmt::Write as _;

use crate::model::{AnalysisResult, Category, ItemRecord, RecordKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub align: Align,
}

const fn left(name: &'static str) -> Column {
    Column { name, align: Align::Left }
}

const fn right(name: &'static str) -> Column {
    Column { name, align: Align::Right }
}

const ANALYZED_COLUMNS: &[Column] = &[
    left("Item Code"),
    left("Description"),
    right("On Hand"),
    right("Min"),
    right("Max"),
    right("Diff"),
];

const ON_HAND_COLUMNS: &[Column] = &[
    left("Item Code"),
    left("Description"),
    right("On Hand"),
    left("Bin Location"),
];

const TEMPLATE_COLUMNS: &[Column] = &[
    left("Item Code"),
    left("Description"),
    right("Min"),
    right("Max"),
    left("Unit"),
];

/// Report-level metadata printed above the sections.
#[derive(Debug, Clone, Default)]
pub struct ReportHeader {
    pub report_name: String,
    pub template_name: String,
    pub date: String,
}

#[derive(Debug, Clone)]
pub struct ReportSection {
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub columns: &'static [Column],
    pub rows: Vec<Vec<String>>,
}

pub fn title(category: Category) -> &'static str {
    match category {
        Category::Overstocked => "OVERSTOCKED ITEMS",
        Category::Understocked => "UNDERSTOCKED ITEMS",
        Category::NotInTemplate => "ITEMS NOT IN TEMPLATE",
        Category::Negative => "NEGATIVE QUANTITY ITEMS",
        Category::Missing => "MISSING ITEMS",
        Category::Correct => "CORRECTLY STOCKED ITEMS",
    }
}

pub fn description(category: Category) -> &'static str {
    match category {
        Category::Overstocked => "Items exceeding maximum stock levels",
        Category::Understocked => "Items below minimum stock levels",
        Category::NotInTemplate => "Items on truck that should not be there",
        Category::Negative => "Items with negative inventory (data errors)",
        Category::Missing => "Items in template but not found on truck",
        Category::Correct => "Items within acceptable min/max range",
    }
}

pub fn columns(kind: RecordKind) -> &'static [Column] {
    match kind {
        RecordKind::Analyzed => ANALYZED_COLUMNS,
        RecordKind::OnHand => ON_HAND_COLUMNS,
        RecordKind::Template => TEMPLATE_COLUMNS,
    }
}

/// Quantity as printed: whole numbers without a decimal point.
pub fn format_qty(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn format_difference(n: f64) -> String {
    if n > 0.0 {
        format!("+{}", format_qty(n))
    } else {
        format_qty(n)
    }
}

fn text_or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

fn cells(record: ItemRecord<'_>) -> Vec<String> {
    match record {
        ItemRecord::Analyzed(item) => vec![
            item.item_code.clone(),
            text_or_dash(Some(&item.item_description)),
            format_qty(item.on_hand),
            format_qty(item.min_qty),
            format_qty(item.max_qty),
            format_difference(item.difference),
        ],
        ItemRecord::OnHand(item) => vec![
            item.item_code.clone(),
            text_or_dash(Some(record.description())),
            format_qty(item.on_hand),
            text_or_dash(item.bin_location.as_deref()),
        ],
        ItemRecord::Template(item) => vec![
            item.item_code.clone(),
            text_or_dash(item.item_description.as_deref()),
            format_qty(item.min_qty),
            format_qty(item.max_qty),
            text_or_dash(item.unit_of_measure.as_deref()),
        ],
    }
}

/// The six sections in report order.
pub fn sections(result: &AnalysisResult) -> Vec<ReportSection> {
    Category::ALL
        .iter()
        .map(|&category| ReportSection {
            category,
            title: title(category),
            description: description(category),
            columns: columns(category.record_kind()),
            rows: result.records(category).into_iter().map(cells).collect(),
        })
        .collect()
}

/// One-line count banner, e.g. `Over: 2 | Under: 0 | ...`.
pub fn count_line(result: &AnalysisResult) -> String {
    format!(
        "Over: {} | Under: {} | Not in Tmpl: {} | Neg: {} | Missing: {} | OK: {}",
        result.overstocked.len(),
        result.understocked.len(),
        result.not_in_template.len(),
        result.negative.len(),
        result.missing.len(),
        result.correct.len(),
    )
}

/// Render the full report as fixed-width plain text.
pub fn render_text(header: &ReportHeader, result: &AnalysisResult) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", header.report_name);
    let _ = writeln!(out, "{}", header.date);
    let _ = writeln!(out, "Template: {} | {}", header.template_name, count_line(result));

    for section in sections(result) {
        out.push('\n');
        let _ = writeln!(out, "{} ({})", section.title, section.rows.len());
        let _ = writeln!(out, "{}", section.description);

        if section.rows.is_empty() {
            let _ = writeln!(out, "  No items in this category");
            continue;
        }

        render_table(&mut out, section.columns, &section.rows);
    }

    out
}

fn render_table(out: &mut String, columns: &[Column], rows: &[Vec<String>]) {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|r| r.get(i).map(|c| c.chars().count()).unwrap_or(0))
                .chain(std::iter::once(col.name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = columns.iter().map(|c| c.name.to_string()).collect();
    write_row(out, columns, &widths, &header);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_row(out, columns, &widths, &rule);

    for row in rows {
        write_row(out, columns, &widths, row);
    }
}

fn write_row(out: &mut String, columns: &[Column], widths: &[usize], cells: &[String]) {
    let mut line = String::from(" ");
    for (i, col) in columns.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        let pad = widths[i].saturating_sub(cell.chars().count());
        line.push(' ');
        match col.align {
            Align::Left => {
                line.push_str(cell);
                line.push_str(&" ".repeat(pad));
            }
            Align::Right => {
                line.push_str(&" ".repeat(pad));
                line.push_str(cell);
            }
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
