// End to end through the io crate: workbook + CSV in, analysis, adjustment file out.

use std::fs;

use chrono::NaiveDate;
use tempfile::tempdir;
use truckstock_io::export::{default_file_name, write_adjustments, AdjustmentSettings, ExportFormat};
use truckstock_io::registry::find_truck;
use truckstock_io::xlsx::{write_sheets, OutCell, SheetData};
use truckstock_io::{load_inputs, FileConsumableRegistry, FileTruckRegistry};
use truckstock_recon::{analyze, Registry};

fn text(s: &str) -> OutCell {
    OutCell::Text(s.into())
}

#[test]
fn workbook_template_against_csv_export() {
    let dir = tempdir().unwrap();

    let template_path = dir.path().join("hvac.xlsx");
    write_sheets(
        &template_path,
        &[SheetData {
            name: "Template".into(),
            headers: ["ITEM CODE", "ITEM DESCRIPTION", "MIN", "MAX", "UNIT OF MEASURE", "BIN LOCATION"]
                .iter()
                .map(|h| h.to_string())
                .collect(),
            rows: vec![
                vec![text("FLT-16"), text("Filter 16x25"), OutCell::Number(2.0), OutCell::Number(6.0), text("EA"), text("Rack A")],
                vec![text("CAP-45"), text("Capacitor 45uF"), OutCell::Number(1.0), OutCell::Number(2.0), text("EA")],
                vec![text("TAPE-F"), text("Foil tape"), OutCell::Number(1.0), OutCell::Number(3.0), text("RL")],
            ],
            widths: vec![],
        }],
    )
    .unwrap();

    let on_hand_path = dir.path().join("truck.csv");
    fs::write(
        &on_hand_path,
        "Item Name,Inventory Tags,Item Code,Item Description,Available,On Order,On Hold,On Hand,Total Quantity,Bin Location\n\
         Filter,,flt-16,,9,0,0,9,9,\n\
         Foil tape,,TAPE-F,Foil tape 2in,2,0,0,2,2,\n\
         Contactor,,CON-30,,1,0,0,1,1,Bin 3\n",
    )
    .unwrap();

    let (template, on_hand) = load_inputs(&template_path, &on_hand_path).unwrap();
    assert_eq!(template.len(), 3);
    assert_eq!(template[1].bin_location, None);
    assert_eq!(on_hand.len(), 3);

    let parts_path = dir.path().join("parts.csv");
    fs::write(&parts_path, "our_part_number,consumable\nTAPE-F,TRUE\n").unwrap();
    let codes = FileConsumableRegistry::new(&parts_path).fetch().unwrap();

    let report = analyze(&template, &on_hand, &codes).unwrap();
    assert_eq!(report.result.overstocked[0].item_code, "flt-16");
    assert_eq!(report.result.overstocked[0].difference, 3.0);
    assert_eq!(report.result.overstocked[0].bin_location.as_deref(), Some("Rack A"));
    assert_eq!(report.result.not_in_template[0].item_code, "CON-30");
    assert_eq!(report.result.missing[0].item_code, "CAP-45");
    assert_eq!(report.result.correct[0].item_description, "Foil tape 2in");
    assert_eq!(report.summary.consumable, 1);

    let trucks_path = dir.path().join("trucks.csv");
    fs::write(&trucks_path, "id,truck_number,description,active\n1,T-12,Residential HVAC,true\n").unwrap();
    let trucks = FileTruckRegistry::new(&trucks_path).fetch().unwrap();
    let truck = find_truck(&trucks, "T-12").unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let out = dir.path().join(default_file_name(&truck.truck_number, date, ExportFormat::Xlsx));
    let written = write_adjustments(&out, &report.consumable, truck, date, &AdjustmentSettings::default()).unwrap();
    assert_eq!(written, 1);
    assert!(out.ends_with("Consumable_Adjustments_T-12_10-19-2026.xlsx"));

    let table = truckstock_io::table::read_table(&out).unwrap();
    assert_eq!(table.cell(0, "Item Code").text(), "TAPE-F");
    assert_eq!(table.cell(0, "Business Unit").text(), "Residential HVAC");
    assert_eq!(table.cell(0, "Inventory Location").text(), "T-12 Truck Inventory");
}
