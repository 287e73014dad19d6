//! `truckstock template` - stored template management.

use std::path::PathBuf;

use clap::Subcommand;
use truckstock_io::{parse_template_file, TemplateMeta, TemplateStore};
use truckstock_recon::report::format_qty;
use truckstock_recon::ReconError;

use crate::{CliError, Context};

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Store a template spreadsheet
    #[command(after_help = "\
Examples:
  truckstock template import hvac.xlsx --name 'HVAC Service' --trade HVAC --truck-type 'Service Van'
  truckstock template import plumbing.csv --name Plumbing --trade Plumbing --truck-type Box --department North")]
    Import {
        /// Template spreadsheet (ITEM CODE, ITEM DESCRIPTION, MIN, MAX, UNIT OF MEASURE, BIN LOCATION)
        file: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        trade: String,

        #[arg(long)]
        truck_type: String,

        #[arg(long)]
        department: Option<String>,
    },

    /// List stored templates
    List {
        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a template and its items
    Show {
        id: String,

        /// Output JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Delete a template and its items
    Delete { id: String },
}

pub fn cmd_template(ctx: &Context, cmd: TemplateCommands) -> Result<(), CliError> {
    match cmd {
        TemplateCommands::Import { file, name, trade, truck_type, department } => {
            let meta = TemplateMeta { name, trade, department, truck_type };
            cmd_import(ctx, file, meta)
        }
        TemplateCommands::List { json } => cmd_list(ctx, json),
        TemplateCommands::Show { id, json } => cmd_show(ctx, &id, json),
        TemplateCommands::Delete { id } => cmd_delete(ctx, &id),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value).map_err(|e| CliError::export(format!("JSON serialization error: {e}")))
}

fn cmd_import(ctx: &Context, file: PathBuf, meta: TemplateMeta) -> Result<(), CliError> {
    let items = parse_template_file(&file)?;
    if items.is_empty() {
        return Err(ReconError::EmptyTemplate.into());
    }

    let template = ctx.store().create_template(meta, items)?;
    eprintln!("imported '{}' ({} items)", template.meta.name, template.item_count);
    // Id on stdout so scripts can capture it
    println!("{}", template.id);
    Ok(())
}

fn cmd_list(ctx: &Context, json: bool) -> Result<(), CliError> {
    let templates = ctx.store().list_templates()?;

    if json {
        println!("{}", to_json(&templates)?);
        return Ok(());
    }

    if templates.is_empty() {
        eprintln!("no templates stored in {}", ctx.store().dir().display());
        return Ok(());
    }

    println!("{:<36}  {:<24} {:<12} {:<14} {:>5}  {}", "ID", "NAME", "TRADE", "TRUCK TYPE", "ITEMS", "CREATED");
    for t in &templates {
        println!(
            "{:<36}  {:<24} {:<12} {:<14} {:>5}  {}",
            t.id,
            t.meta.name,
            t.meta.trade,
            t.meta.truck_type,
            t.item_count,
            t.created_at.format("%Y-%m-%d"),
        );
    }
    Ok(())
}

fn cmd_show(ctx: &Context, id: &str, json: bool) -> Result<(), CliError> {
    let store = ctx.store();
    let template = store.get_template(id)?;
    let items = store.get_template_items(id)?;

    if json {
        let doc = serde_json::json!({ "template": template, "items": items });
        println!("{}", to_json(&doc)?);
        return Ok(());
    }

    println!("{}", template.meta.name);
    println!("trade: {}  truck type: {}", template.meta.trade, template.meta.truck_type);
    if let Some(dept) = &template.meta.department {
        println!("department: {dept}");
    }
    println!();
    println!("{:<20} {:<36} {:>6} {:>6}  {:<6} {}", "ITEM CODE", "DESCRIPTION", "MIN", "MAX", "UNIT", "BIN");
    for item in &items {
        println!(
            "{:<20} {:<36} {:>6} {:>6}  {:<6} {}",
            item.item_code,
            item.item_description.as_deref().unwrap_or("-"),
            format_qty(item.min_qty),
            format_qty(item.max_qty),
            item.unit_of_measure.as_deref().unwrap_or("-"),
            item.bin_location.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

fn cmd_delete(ctx: &Context, id: &str) -> Result<(), CliError> {
    ctx.store().delete_template(id)?;
    eprintln!("deleted {id}");
    Ok(())
}
