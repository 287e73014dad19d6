// Workbook rendering of the reconciliation report

use std::path::Path;

use truckstock_recon::model::{AnalysisSummary, Category};
use truckstock_recon::report::{sections, Align, ReportHeader};
use truckstock_recon::AnalysisResult;

use crate::xlsx::{write_sheets, OutCell, SheetData};

pub const SUMMARY_SHEET: &str = "Summary";

/// Summary sheet first, then one sheet per category in report order.
pub fn write_report_xlsx(
    path: &Path,
    header: &ReportHeader,
    summary: &AnalysisSummary,
    result: &AnalysisResult,
) -> Result<(), String> {
    let mut sheets = vec![summary_sheet(header, summary)];

    for section in sections(result) {
        let widths = section
            .columns
            .iter()
            .map(|c| if c.name == "Description" { 40.0 } else { 14.0 })
            .collect();

        let rows = section
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(section.columns)
                    .map(|(cell, col)| match col.align {
                        // Quantities go in as numbers so the sheet can total them
                        Align::Right => match cell.trim_start_matches('+').parse::<f64>() {
                            Ok(n) => OutCell::Number(n),
                            Err(_) => OutCell::Text(cell.clone()),
                        },
                        Align::Left => OutCell::Text(cell.clone()),
                    })
                    .collect()
            })
            .collect();

        sheets.push(SheetData {
            name: section.title.to_string(),
            headers: section.columns.iter().map(|c| c.name.to_string()).collect(),
            rows,
            widths,
        });
    }

    write_sheets(path, &sheets)?;
    log::info!("wrote report workbook {}", path.display());
    Ok(())
}

fn summary_sheet(header: &ReportHeader, summary: &AnalysisSummary) -> SheetData {
    let text = |label: &str, value: &str| vec![OutCell::Text(label.into()), OutCell::Text(value.into())];
    let count = |label: &str, n: usize| vec![OutCell::Text(label.into()), OutCell::Number(n as f64)];

    let mut rows = vec![
        text("Report", &header.report_name),
        text("Template", &header.template_name),
        text("Date", &header.date),
    ];
    for category in Category::ALL {
        rows.push(count(truckstock_recon::report::title(category), summary.count(category)));
    }
    rows.push(count("TOTAL", summary.total));
    rows.push(count("CONSUMABLE ITEMS", summary.consumable));

    SheetData {
        name: SUMMARY_SHEET.into(),
        headers: vec!["Field".into(), "Value".into()],
        rows,
        widths: vec![26.0, 40.0],
    }
}
