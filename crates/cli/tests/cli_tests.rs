// Integration tests for the `truckstock` binary.
// Run with: cargo test -p truckstock-cli --test cli_tests -- --nocapture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const TEMPLATE_CSV: &str = "\
ITEM CODE,ITEM DESCRIPTION,MIN,MAX,UNIT OF MEASURE,BIN LOCATION
A1,Copper elbow,2,5,EA,Shelf 1
B2,Valve,1,3,EA,
C3,Tape,1,4,RL,
D4,Fuse,2,2,EA,
";

const ON_HAND_CSV: &str = "\
Item Name,Inventory Tags,Item Code,Item Description,Available,On Order,On Hold,On Hand,Total Quantity,Bin Location
Elbow,,a1,,7,0,0,7,7,
Valve,,B2,Valve 1/2,0,0,0,0,0,
Tape,,C3,,2,0,0,2,2,Door
Rag,,Z9,Shop rag,3,0,0,3,3,
Gasket,,N1,,-2,0,0,-2,-2,
";

/// Temp workspace with a config pointing the store and registries inside it.
struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let fx = Fixture { dir };
        fx.write("template.csv", TEMPLATE_CSV);
        fx.write("on_hand.csv", ON_HAND_CSV);
        fx.write("parts.csv", "our_part_number,consumable\nc3,true\nz9,yes\nA1,false\n");
        fx.write(
            "trucks.csv",
            "id,truck_number,description,current_tech,active\nt7,T-7,HVAC North,Sam,true\nt8,T-8,Old,,false\n",
        );
        fx.write(
            "truckstock.toml",
            "[store]\ndir = \"templates\"\n\n[registry]\nconsumables = \"parts.csv\"\ntrucks = \"trucks.csv\"\n\n[export]\nformat = \"csv\"\n",
        );
        fx
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn write(&self, name: &str, content: &str) {
        fs::write(self.path(name), content).unwrap();
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_truckstock"))
            .args(args)
            .current_dir(self.dir.path())
            .env("TRUCKSTOCK_CONFIG", self.path("truckstock.toml"))
            .env_remove("TRUCKSTOCK_LOG")
            .output()
            .expect("run truckstock")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn codes(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["item_code"].as_str().unwrap().to_string())
        .collect()
}

fn as_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_json_classifies_every_row() {
    let fx = Fixture::new();
    let out = fx.run(&["analyze", "--template", "template.csv", "--on-hand", "on_hand.csv", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).expect("valid JSON");
    let result = &json["result"];

    assert_eq!(codes(&result["overstocked"]), vec!["a1"]);
    assert_eq!(result["overstocked"][0]["difference"], 2.0);
    assert_eq!(codes(&result["understocked"]), vec!["B2"]);
    assert_eq!(codes(&result["not_in_template"]), vec!["Z9"]);
    assert_eq!(codes(&result["negative"]), vec!["N1"]);
    assert_eq!(codes(&result["missing"]), vec!["D4"]);
    assert_eq!(codes(&result["correct"]), vec!["C3"]);

    assert_eq!(json["summary"]["total"], 6);
    assert_eq!(json["summary"]["consumable"], 2);
    assert_eq!(codes(&json["consumable"]), vec!["C3", "Z9"]);

    assert!(stderr(&out).contains("Over: 1 | Under: 1"));
}

#[test]
fn analyze_writes_text_report_to_stdout() {
    let fx = Fixture::new();
    let out = fx.run(&[
        "analyze", "--template", "template.csv", "--on-hand", "on_hand.csv",
        "--report", "-", "--report-name", "Truck 7", "--date", "2026-03-07",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let text = stdout(&out);
    assert!(text.starts_with("Truck 7\nMarch 7, 2026\nTemplate: template |"));
    assert!(text.contains("OVERSTOCKED ITEMS (1)"));
    assert!(text.contains("ITEMS NOT IN TEMPLATE (1)"));
    assert!(text.contains("Shop rag"));
}

#[test]
fn analyze_writes_report_workbook_and_json_file() {
    let fx = Fixture::new();
    let out = fx.run(&[
        "analyze", "--template", "template.csv", "--on-hand", "on_hand.csv",
        "--report-xlsx", "report.xlsx", "--output", "result.json",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(fx.path("report.xlsx").exists());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(fx.path("result.json")).unwrap()).unwrap();
    assert_eq!(json["summary"]["missing"], 1);
    // No --json: nothing on stdout
    assert!(stdout(&out).is_empty());
}

#[test]
fn analyze_exports_consumable_adjustments() {
    let fx = Fixture::new();
    let dir = fx.path("exports");
    fs::create_dir(&dir).unwrap();

    let out = fx.run(&[
        "analyze", "--template", "template.csv", "--on-hand", "on_hand.csv",
        "--adjustments", as_str(&dir), "--truck", "t-7", "--date", "2026-03-07",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let file = dir.join("Consumable_Adjustments_T-7_03-07-2026.csv");
    let content = fs::read_to_string(&file).expect("adjustment file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Import Reference,Business Unit,Reference Number,Adjustment Date"));
    assert!(lines[1].contains(",HVAC North,"));
    assert!(lines[1].contains(",03/07/2026,Inventory Quantity Adjustment,C3,T-7 Truck Inventory,0,"));
    assert!(lines[2].contains(",Z9,"));
}

#[test]
fn analyze_unknown_truck_is_usage_error() {
    let fx = Fixture::new();
    let out = fx.run(&[
        "analyze", "--template", "template.csv", "--on-hand", "on_hand.csv",
        "--adjustments", "adj.csv", "--truck", "T-8",
    ]);
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("unknown truck: T-8"));
    assert!(!fx.path("adj.csv").exists());
}

#[test]
fn adjustments_require_truck() {
    let fx = Fixture::new();
    let out = fx.run(&["analyze", "--template", "template.csv", "--on-hand", "on_hand.csv", "--adjustments", "adj.csv"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn analyze_empty_on_hand_exits_4() {
    let fx = Fixture::new();
    fx.write("empty.csv", "Item Code,On Hand\n");
    let out = fx.run(&["analyze", "--template", "template.csv", "--on-hand", "empty.csv"]);
    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("no items found in the on-hand inventory file"));
}

#[test]
fn analyze_missing_file_exits_3() {
    let fx = Fixture::new();
    let out = fx.run(&["analyze", "--template", "template.csv", "--on-hand", "nope.csv"]);
    assert_eq!(out.status.code(), Some(3));

    let out = fx.run(&["analyze", "--template", "template.pdf", "--on-hand", "on_hand.csv"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("hint:"));
}

#[test]
fn template_and_template_id_conflict() {
    let fx = Fixture::new();
    let out = fx.run(&[
        "analyze", "--template", "template.csv", "--template-id", "x", "--on-hand", "on_hand.csv",
    ]);
    assert_eq!(out.status.code(), Some(2));
}

// ---------------------------------------------------------------------------
// template store
// ---------------------------------------------------------------------------

#[test]
fn template_lifecycle() {
    let fx = Fixture::new();

    let out = fx.run(&[
        "template", "import", "template.csv", "--name", "HVAC Service", "--trade", "HVAC", "--truck-type", "Van",
    ]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let id = stdout(&out).trim().to_string();
    assert_eq!(id.len(), 36);
    assert!(fx.path("templates").join(format!("{id}.json")).exists());

    let out = fx.run(&["template", "list", "--json"]);
    let list: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["name"], "HVAC Service");
    assert_eq!(list[0]["item_count"], 4);
    assert!(list[0]["department"].is_null());

    let out = fx.run(&["template", "show", &id]);
    assert!(stdout(&out).contains("Copper elbow"));

    let out = fx.run(&["analyze", "--template-id", &id, "--on-hand", "on_hand.csv", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(codes(&json["result"]["missing"]), vec!["D4"]);

    let out = fx.run(&["template", "delete", &id]);
    assert!(out.status.success());

    let out = fx.run(&["template", "show", &id]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("template not found"));
}

#[test]
fn template_import_requires_metadata() {
    let fx = Fixture::new();
    let out = fx.run(&["template", "import", "template.csv", "--name", "X", "--trade", " ", "--truck-type", "Van"]);
    assert_eq!(out.status.code(), Some(5));
    assert!(stderr(&out).contains("trade is required"));
}

// ---------------------------------------------------------------------------
// trucks, config
// ---------------------------------------------------------------------------

#[test]
fn trucks_lists_active_only() {
    let fx = Fixture::new();
    let out = fx.run(&["trucks", "--json"]);
    assert!(out.status.success());

    let trucks: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let numbers: Vec<&str> = trucks.as_array().unwrap().iter().map(|t| t["truck_number"].as_str().unwrap()).collect();
    assert_eq!(numbers, vec!["T-7"]);
}

#[test]
fn missing_registry_degrades_with_warning() {
    let fx = Fixture::new();
    fx.write("truckstock.toml", "[registry]\nconsumables = \"gone.csv\"\n");
    let out = fx.run(&["analyze", "--template", "template.csv", "--on-hand", "on_hand.csv", "--json"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));

    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["summary"]["consumable"], 0);
    assert!(stderr(&out).contains("unavailable"));
}

#[test]
fn invalid_config_exits_7() {
    let fx = Fixture::new();
    fx.write("truckstock.toml", "[export]\nformat = \"pdf\"\n");
    let out = fx.run(&["trucks"]);
    assert_eq!(out.status.code(), Some(7));
    assert!(stderr(&out).starts_with("error: config parse error"));
}
