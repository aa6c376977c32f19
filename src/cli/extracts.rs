use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::confirm;
use crate::error::{ContabilError, Result};
use crate::extract_importer::{import_extract, update_extract};
use crate::fmt::display_value;
use crate::importer::ImportOutcome;
use crate::models::ExtractRecord;
use crate::settings::load_settings;

pub fn list() -> Result<()> {
    let catalog = load_settings().extracts_catalog();
    let mut table = Table::new();
    table.set_header(vec!["Entry", "Source file", "Processed", "Rows"]);
    for id in catalog.list()? {
        match catalog.read::<ExtractRecord>(&id) {
            Ok(record) => table.add_row(vec![
                Cell::new(&id),
                Cell::new(&record.origin_filename),
                Cell::new(&record.processed_at),
                Cell::new(record.rows.len()),
            ]),
            Err(e) => table.add_row(vec![
                Cell::new(&id),
                Cell::new(e.to_string().red()),
                Cell::new(""),
                Cell::new(""),
            ]),
        };
    }
    println!("Extracts\n{table}");
    Ok(())
}

pub fn import(file: &str, yes: bool) -> Result<()> {
    let settings = load_settings();
    let catalog = settings.extracts_catalog();
    let outcome = import_extract(&catalog, &PathBuf::from(file), &settings.extract, |conflict| {
        confirm(&format!("{conflict}. Replace it?"), yes)
    })?;
    match outcome {
        ImportOutcome::Written(id) => println!("{} {id}", "Extract saved as".green()),
        ImportOutcome::Declined => println!("{}", "Import cancelled; nothing was written.".yellow()),
    }
    Ok(())
}

pub fn update(id: &str, file: &str) -> Result<()> {
    let settings = load_settings();
    let record = update_extract(&settings.extracts_catalog(), id, &PathBuf::from(file), &settings.extract)?;
    println!(
        "{} {id} ({} rows from {})",
        "Updated".green(),
        record.rows.len(),
        record.origin_filename
    );
    Ok(())
}

pub fn show(id: &str) -> Result<()> {
    let record: ExtractRecord = load_settings().extracts_catalog().read(id)?;
    let columns = record.columns();
    let mut table = Table::new();
    table.set_header(columns.clone());
    for row in &record.rows {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(row.get(c).map(display_value).unwrap_or_default())),
        );
    }
    println!(
        "{} (processed {})\n{table}",
        record.origin_filename.bold(),
        record.processed_at
    );
    Ok(())
}

pub fn delete(id: &str, yes: bool) -> Result<()> {
    let catalog = load_settings().extracts_catalog();
    if !catalog.exists(id) {
        return Err(ContabilError::NotFound(id.to_string()));
    }
    if !confirm(&format!("Delete the extract {id}?"), yes) {
        println!("{}", "Nothing deleted.".yellow());
        return Ok(());
    }
    catalog.delete(id)?;
    log::info!("deleted extract {id}");
    println!("Deleted {id}");
    Ok(())
}
