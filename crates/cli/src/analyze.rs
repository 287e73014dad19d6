//! `truckstock analyze`: load inputs, reconcile, then write whichever outputs
//! were asked for.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;
use truckstock_io::export::{default_file_name, write_adjustments};
use truckstock_io::registry::find_truck;
use truckstock_io::report::write_report_xlsx;
use truckstock_io::{load_inputs, parse_on_hand_file, TemplateStore};
use truckstock_recon::model::{OnHandItem, TemplateItem};
use truckstock_recon::report::{count_line, render_text, ReportHeader};
use truckstock_recon::{analyze, AnalysisReport};

use crate::{CliError, Context};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Template spreadsheet (.xlsx, .xls, .ods, .csv)
    #[arg(long, required_unless_present = "template_id", conflicts_with = "template_id")]
    template: Option<PathBuf>,

    /// Id of a stored template (see `truckstock template list`)
    #[arg(long)]
    template_id: Option<String>,

    /// On-hand inventory export
    #[arg(long)]
    on_hand: PathBuf,

    /// Output JSON to stdout instead of human summary
    #[arg(long)]
    json: bool,

    /// Write JSON output to file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the plain-text report to file ("-" for stdout)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the report as a workbook, one sheet per category
    #[arg(long)]
    report_xlsx: Option<PathBuf>,

    /// Title printed at the top of the report
    #[arg(long, default_value = "Truck Stock Analysis")]
    report_name: String,

    /// Write the consumable adjustment file (a directory gets the default file name)
    #[arg(long, requires = "truck")]
    adjustments: Option<PathBuf>,

    /// Truck number the adjustment applies to
    #[arg(long)]
    truck: Option<String>,

    /// Adjustment date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

pub fn cmd_analyze(ctx: &Context, args: AnalyzeArgs) -> Result<(), CliError> {
    let (template_name, template_items, on_hand_items) = load(ctx, &args)?;

    let codes = ctx.consumable_codes();
    let report = analyze(&template_items, &on_hand_items, &codes)?;

    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let header = ReportHeader {
        report_name: args.report_name.clone(),
        template_name,
        date: date.format("%B %-d, %Y").to_string(),
    };

    if args.json || args.output.is_some() {
        write_json(&report, args.json, args.output.as_deref())?;
    }

    if let Some(path) = &args.report {
        let text = render_text(&header, &report.result);
        if path.as_os_str() == "-" {
            print!("{text}");
        } else {
            std::fs::write(path, text)
                .map_err(|e| CliError::export(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
        }
    }

    if let Some(path) = &args.report_xlsx {
        write_report_xlsx(path, &header, &report.summary, &report.result).map_err(CliError::export)?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(target) = &args.adjustments {
        export_adjustments(ctx, &args, target, &report.consumable, date)?;
    }

    // Human summary to stderr
    let s = &report.summary;
    eprintln!(
        "{} on-hand items vs {} template items: {} issues",
        on_hand_items.len(),
        template_items.len(),
        s.total - s.correct,
    );
    eprintln!("{}", count_line(&report.result));
    if s.consumable > 0 {
        eprintln!("consumable: {}", s.consumable);
    }

    Ok(())
}

fn load(ctx: &Context, args: &AnalyzeArgs) -> Result<(String, Vec<TemplateItem>, Vec<OnHandItem>), CliError> {
    match (&args.template, &args.template_id) {
        (Some(path), _) => {
            let (template, on_hand) = load_inputs(path, &args.on_hand)?;
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok((name, template, on_hand))
        }
        (None, Some(id)) => {
            let store = ctx.store();
            let template = store.get_template(id)?;
            let items = store.get_template_items(id)?;
            let on_hand = parse_on_hand_file(&args.on_hand)?;
            Ok((template.meta.name, items, on_hand))
        }
        (None, None) => Err(CliError::usage("one of --template or --template-id is required")),
    }
}

fn write_json(report: &AnalysisReport, to_stdout: bool, output: Option<&Path>) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(report)
        .map_err(|e| CliError::export(format!("JSON serialization error: {e}")))?;

    if let Some(path) = output {
        std::fs::write(path, &json_str)
            .map_err(|e| CliError::export(format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }

    if to_stdout {
        println!("{json_str}");
    }
    Ok(())
}

fn export_adjustments(
    ctx: &Context,
    args: &AnalyzeArgs,
    target: &Path,
    consumables: &[OnHandItem],
    date: NaiveDate,
) -> Result<(), CliError> {
    let Some(truck_number) = args.truck.as_deref() else {
        return Err(CliError::usage("--adjustments requires --truck"));
    };

    let trucks = ctx.trucks();
    let Some(truck) = find_truck(&trucks, truck_number) else {
        return Err(CliError::usage(format!("unknown truck: {truck_number}"))
            .with_hint("list active trucks with `truckstock trucks`; the registry is set by [registry] trucks"));
    };

    let path = if target.is_dir() {
        target.join(default_file_name(&truck.truck_number, date, ctx.config.export.format))
    } else {
        target.to_path_buf()
    };

    let settings = ctx.config.export.adjustment_settings();
    let written = write_adjustments(&path, consumables, truck, date, &settings).map_err(CliError::export)?;
    if written == 0 {
        eprintln!("no consumable items; adjustment file not written");
    } else {
        eprintln!("wrote {} ({} items)", path.display(), written);
    }
    Ok(())
}
