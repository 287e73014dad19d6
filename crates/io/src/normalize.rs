//! Spreadsheet rows to reconciliation records.
//!
//! Header names are matched exactly (after trimming). Rows without an item
//! code are dropped; every other malformed cell is coerced rather than
//! rejected.

use std::path::Path;

use truckstock_recon::model::{OnHandItem, TemplateItem};

use crate::error::InputError;
use crate::table::{read_table, Table};

// ---------------------------------------------------------------------------
// Template columns
// ---------------------------------------------------------------------------

pub const TEMPLATE_ITEM_CODE: &str = "ITEM CODE";
pub const TEMPLATE_DESCRIPTION: &str = "ITEM DESCRIPTION";
pub const TEMPLATE_MIN: &str = "MIN";
pub const TEMPLATE_MAX: &str = "MAX";
pub const TEMPLATE_UNIT: &str = "UNIT OF MEASURE";
pub const TEMPLATE_BIN: &str = "BIN LOCATION";

// ---------------------------------------------------------------------------
// On-hand export columns
// ---------------------------------------------------------------------------

pub const ON_HAND_ITEM_NAME: &str = "Item Name";
pub const ON_HAND_TAGS: &str = "Inventory Tags";
pub const ON_HAND_ITEM_CODE: &str = "Item Code";
pub const ON_HAND_DESCRIPTION: &str = "Item Description";
pub const ON_HAND_AVAILABLE: &str = "Available";
pub const ON_HAND_ON_ORDER: &str = "On Order";
pub const ON_HAND_ON_HOLD: &str = "On Hold";
pub const ON_HAND_QTY: &str = "On Hand";
pub const ON_HAND_TOTAL: &str = "Total Quantity";
pub const ON_HAND_BIN: &str = "Bin Location";

pub fn parse_template_file(path: &Path) -> Result<Vec<TemplateItem>, InputError> {
    let table = read_table(path)?;
    warn_if_missing(path, &table, TEMPLATE_ITEM_CODE);
    let items = template_items(&table);
    log::info!("{}: {} template items", path.display(), items.len());
    Ok(items)
}

pub fn parse_on_hand_file(path: &Path) -> Result<Vec<OnHandItem>, InputError> {
    let table = read_table(path)?;
    warn_if_missing(path, &table, ON_HAND_ITEM_CODE);
    let items = on_hand_items(&table);
    log::info!("{}: {} on-hand items", path.display(), items.len());
    Ok(items)
}

pub fn template_items(table: &Table) -> Vec<TemplateItem> {
    (0..table.len())
        .filter_map(|row| {
            let item_code = text(table, row, TEMPLATE_ITEM_CODE);
            if item_code.is_empty() {
                return None;
            }
            Some(TemplateItem {
                item_code,
                item_description: optional_text(table, row, TEMPLATE_DESCRIPTION),
                min_qty: table.cell(row, TEMPLATE_MIN).number(),
                max_qty: table.cell(row, TEMPLATE_MAX).number(),
                unit_of_measure: optional_text(table, row, TEMPLATE_UNIT),
                bin_location: optional_text(table, row, TEMPLATE_BIN),
            })
        })
        .collect()
}

pub fn on_hand_items(table: &Table) -> Vec<OnHandItem> {
    (0..table.len())
        .filter_map(|row| {
            let item_code = text(table, row, ON_HAND_ITEM_CODE);
            if item_code.is_empty() {
                return None;
            }
            Some(OnHandItem {
                item_name: text(table, row, ON_HAND_ITEM_NAME),
                inventory_tags: text(table, row, ON_HAND_TAGS),
                item_code,
                item_description: text(table, row, ON_HAND_DESCRIPTION),
                available: table.cell(row, ON_HAND_AVAILABLE).number(),
                on_order: table.cell(row, ON_HAND_ON_ORDER).number(),
                on_hold: table.cell(row, ON_HAND_ON_HOLD).number(),
                on_hand: table.cell(row, ON_HAND_QTY).number(),
                total_quantity: table.cell(row, ON_HAND_TOTAL).number(),
                bin_location: optional_text(table, row, ON_HAND_BIN),
            })
        })
        .collect()
}

fn text(table: &Table, row: usize, header: &str) -> String {
    table.cell(row, header).text().trim().to_string()
}

fn optional_text(table: &Table, row: usize, header: &str) -> Option<String> {
    let value = text(table, row, header);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// Every row is dropped without the code column; usually the wrong file was picked
fn warn_if_missing(path: &Path, table: &Table, header: &str) {
    if !table.is_empty() && !table.has_column(header) {
        log::warn!(
            "{}: no '{}' column (found: {})",
            path.display(),
            header,
            table.headers.join(", ")
        );
    }
}
