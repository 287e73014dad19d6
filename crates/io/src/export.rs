//! Inventory adjustment import file for consumable parts.
//!
//! Every consumable on the truck is set to zero on hand in one adjustment,
//! grouped by a shared reference number.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use truckstock_recon::model::OnHandItem;

use crate::registry::Truck;
use crate::xlsx::{OutCell, SheetData};

pub const SHEET_NAME: &str = "AdjustmentItems";

pub const COLUMNS: [&str; 9] = [
    "Import Reference",
    "Business Unit",
    "Reference Number",
    "Adjustment Date",
    "Adjustment Type",
    "Item Code",
    "Inventory Location",
    "Set Quantity On Hand To",
    "Unit of Measure",
];

const COLUMN_WIDTHS: [f64; 9] = [18.0, 18.0, 18.0, 14.0, 28.0, 20.0, 22.0, 22.0, 16.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// `.csv` writes CSV; anything else writes a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentSettings {
    pub adjustment_type: String,
    /// Appended to the truck number to name the inventory location.
    pub location_suffix: String,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            adjustment_type: "Inventory Quantity Adjustment".into(),
            location_suffix: "Truck Inventory".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentRow {
    pub import_reference: String,
    pub business_unit: String,
    pub reference_number: String,
    pub adjustment_date: String,
    pub adjustment_type: String,
    pub item_code: String,
    pub inventory_location: String,
    pub set_quantity_on_hand_to: f64,
    pub unit_of_measure: String,
}

impl AdjustmentRow {
    fn text_cells(&self) -> Vec<String> {
        vec![
            self.import_reference.clone(),
            self.business_unit.clone(),
            self.reference_number.clone(),
            self.adjustment_date.clone(),
            self.adjustment_type.clone(),
            self.item_code.clone(),
            self.inventory_location.clone(),
            format!("{}", self.set_quantity_on_hand_to),
            self.unit_of_measure.clone(),
        ]
    }

    fn sheet_cells(&self) -> Vec<OutCell> {
        let mut cells: Vec<OutCell> = self.text_cells().into_iter().map(OutCell::Text).collect();
        cells[7] = OutCell::Number(self.set_quantity_on_hand_to);
        cells
    }
}

/// Current Unix time in milliseconds. Digits only, well under 32 characters.
pub fn generate_reference() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// `MM/DD/YYYY`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// `Consumable_Adjustments_{truck}_{MM-DD-YYYY}.{ext}`
pub fn default_file_name(truck_number: &str, date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "Consumable_Adjustments_{}_{}.{}",
        truck_number,
        date.format("%m-%d-%Y"),
        format.extension()
    )
}

pub fn build_rows(
    consumables: &[OnHandItem],
    truck: &Truck,
    date: NaiveDate,
    reference: &str,
    settings: &AdjustmentSettings,
) -> Vec<AdjustmentRow> {
    let location = format!("{} {}", truck.truck_number, settings.location_suffix);
    let adjustment_date = format_date(date);

    consumables
        .iter()
        .map(|item| AdjustmentRow {
            import_reference: reference.to_string(),
            business_unit: truck.description.clone(),
            reference_number: reference.to_string(),
            adjustment_date: adjustment_date.clone(),
            adjustment_type: settings.adjustment_type.clone(),
            item_code: item.item_code.clone(),
            inventory_location: location.clone(),
            set_quantity_on_hand_to: 0.0,
            unit_of_measure: String::new(),
        })
        .collect()
}

/// Write the adjustment file in the format implied by `path`.
///
/// Returns the number of rows written. With no consumables nothing is
/// written and 0 is returned.
pub fn write_adjustments(
    path: &Path,
    consumables: &[OnHandItem],
    truck: &Truck,
    date: NaiveDate,
    settings: &AdjustmentSettings,
) -> Result<usize, String> {
    if consumables.is_empty() {
        log::warn!("no consumable items to export; {} not written", path.display());
        return Ok(0);
    }

    let reference = generate_reference();
    let rows = build_rows(consumables, truck, date, &reference, settings);

    match ExportFormat::from_path(path) {
        ExportFormat::Csv => {
            let rows: Vec<Vec<String>> = rows.iter().map(AdjustmentRow::text_cells).collect();
            crate::csv::write_rows(path, &COLUMNS, &rows)?;
        }
        ExportFormat::Xlsx => {
            let sheet = SheetData {
                name: SHEET_NAME.to_string(),
                headers: COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: rows.iter().map(AdjustmentRow::sheet_cells).collect(),
                widths: COLUMN_WIDTHS.to_vec(),
            };
            crate::xlsx::write_sheets(path, &[sheet])?;
        }
    }

    log::info!(
        "wrote {} adjustment rows for truck {} to {} (reference {})",
        rows.len(),
        truck.truck_number,
        path.display(),
        reference
    );
    Ok(rows.len())
}
