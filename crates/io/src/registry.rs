//! File-backed parts and truck registries.
//!
//! Both read any format [`read_table`] accepts. Errors come back as strings;
//! [`RegistryCache`](truckstock_recon::RegistryCache) turns them into a warning
//! and an empty value.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use truckstock_recon::{ConsumableCodes, Registry};

use crate::table::{read_table, Cell, Table};

pub const PART_NUMBER: &str = "our_part_number";
pub const CONSUMABLE: &str = "consumable";

pub const TRUCK_ID: &str = "id";
pub const TRUCK_NUMBER: &str = "truck_number";
pub const TRUCK_DESCRIPTION: &str = "description";
pub const TRUCK_TECH: &str = "current_tech";
pub const TRUCK_ACTIVE: &str = "active";

/// `true`, `yes`, `y`, `1` (any case), or a non-zero number.
fn truthy(cell: &Cell) -> bool {
    match cell {
        Cell::Bool(b) => *b,
        Cell::Number(n) => *n != 0.0,
        Cell::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "yes" | "y" | "1"
        ),
        Cell::Empty => false,
    }
}

fn require_column(path: &Path, table: &Table, header: &str) -> Result<(), String> {
    if table.has_column(header) {
        Ok(())
    } else {
        Err(format!("{}: missing column '{}'", path.display(), header))
    }
}

// ============================================================================
// Consumable parts
// ============================================================================

/// Parts table with `our_part_number` and `consumable` columns.
#[derive(Debug, Clone)]
pub struct FileConsumableRegistry {
    path: PathBuf,
}

impl FileConsumableRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Registry<ConsumableCodes> for FileConsumableRegistry {
    fn name(&self) -> &str {
        "consumable parts"
    }

    fn fetch(&self) -> Result<ConsumableCodes, String> {
        let table = read_table(&self.path).map_err(|e| e.to_string())?;
        require_column(&self.path, &table, PART_NUMBER)?;
        require_column(&self.path, &table, CONSUMABLE)?;

        let codes = ConsumableCodes::new(
            (0..table.len())
                .filter(|&row| truthy(table.cell(row, CONSUMABLE)))
                .map(|row| table.cell(row, PART_NUMBER).text()),
        );
        log::info!("loaded {} consumable part numbers from {}", codes.len(), self.path.display());
        Ok(codes)
    }
}

// ============================================================================
// Trucks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub id: String,
    pub truck_number: String,
    /// Also the business unit on adjustment exports.
    pub description: String,
    pub current_tech: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone)]
pub struct FileTruckRegistry {
    path: PathBuf,
}

impl FileTruckRegistry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Registry<Vec<Truck>> for FileTruckRegistry {
    fn name(&self) -> &str {
        "trucks"
    }

    /// Active trucks only, ordered by truck number.
    fn fetch(&self) -> Result<Vec<Truck>, String> {
        let table = read_table(&self.path).map_err(|e| e.to_string())?;
        require_column(&self.path, &table, TRUCK_NUMBER)?;

        let mut trucks: Vec<Truck> = (0..table.len())
            .filter_map(|row| {
                let truck_number = table.cell(row, TRUCK_NUMBER).text().trim().to_string();
                if truck_number.is_empty() {
                    return None;
                }
                // A sheet without an active column lists only active trucks
                let active = !table.has_column(TRUCK_ACTIVE) || truthy(table.cell(row, TRUCK_ACTIVE));
                let tech = table.cell(row, TRUCK_TECH).text().trim().to_string();
                Some(Truck {
                    id: table.cell(row, TRUCK_ID).text().trim().to_string(),
                    truck_number,
                    description: table.cell(row, TRUCK_DESCRIPTION).text().trim().to_string(),
                    current_tech: if tech.is_empty() { None } else { Some(tech) },
                    active,
                })
            })
            .filter(|t| t.active)
            .collect();

        trucks.sort_by(|a, b| a.truck_number.cmp(&b.truck_number));
        log::info!("loaded {} active trucks from {}", trucks.len(), self.path.display());
        Ok(trucks)
    }
}

/// Find a truck by number, ignoring case and surrounding whitespace.
pub fn find_truck<'a>(trucks: &'a [Truck], truck_number: &str) -> Option<&'a Truck> {
    let wanted = truck_number.trim();
    trucks
        .iter()
        .find(|t| t.truck_number.eq_ignore_ascii_case(wanted))
}
