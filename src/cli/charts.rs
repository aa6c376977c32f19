use std::path::PathBuf;

use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::chart_importer::{import_chart, update_chart};
use crate::cli::confirm;
use crate::error::{ContabilError, Result};
use crate::fmt::indented_name;
use crate::importer::ImportOutcome;
use crate::models::ChartOfAccounts;
use crate::settings::load_settings;

pub fn list() -> Result<()> {
    let catalog = load_settings().charts_catalog();
    let mut table = Table::new();
    table.set_header(vec!["Entry", "Company", "Accounts"]);
    for id in catalog.list()? {
        match catalog.read::<ChartOfAccounts>(&id) {
            Ok(chart) => table.add_row(vec![
                Cell::new(&id),
                Cell::new(&chart.company),
                Cell::new(chart.accounts.len()),
            ]),
            Err(e) => table.add_row(vec![
                Cell::new(&id),
                Cell::new(e.to_string().red()),
                Cell::new(""),
            ]),
        };
    }
    println!("Charts of accounts\n{table}");
    Ok(())
}

pub fn import(file: &str, yes: bool) -> Result<()> {
    let settings = load_settings();
    let catalog = settings.charts_catalog();
    let outcome = import_chart(&catalog, &PathBuf::from(file), &settings.chart, |conflict| {
        confirm(&format!("{conflict}. Replace it?"), yes)
    })?;
    match outcome {
        ImportOutcome::Written(id) => println!("{} {id}", "Chart of accounts saved as".green()),
        ImportOutcome::Declined => println!("{}", "Import cancelled; nothing was written.".yellow()),
    }
    Ok(())
}

pub fn update(id: &str, file: &str) -> Result<()> {
    let settings = load_settings();
    let chart = update_chart(&settings.charts_catalog(), id, &PathBuf::from(file), &settings.chart)?;
    println!(
        "{} {id} ({}, {} accounts)",
        "Updated".green(),
        chart.company,
        chart.accounts.len()
    );
    Ok(())
}

pub fn show(id: &str) -> Result<()> {
    let chart: ChartOfAccounts = load_settings().charts_catalog().read(id)?;
    let mut table = Table::new();
    table.set_header(vec!["Code", "Type", "Classification", "Name", "Degree"]);
    for account in &chart.accounts {
        table.add_row(vec![
            Cell::new(&account.code),
            Cell::new(&account.account_type),
            Cell::new(&account.classification),
            Cell::new(indented_name(&account.name, &account.classification)),
            Cell::new(account.degree),
        ]);
    }
    println!("{}\n{table}", chart.company.bold());
    Ok(())
}

pub fn delete(id: &str, yes: bool) -> Result<()> {
    let catalog = load_settings().charts_catalog();
    if !catalog.exists(id) {
        return Err(ContabilError::NotFound(id.to_string()));
    }
    let label = catalog
        .read::<ChartOfAccounts>(id)
        .map(|c| c.company)
        .unwrap_or_else(|_| id.to_string());
    if !confirm(&format!("Delete the chart of accounts for {label}?"), yes) {
        println!("{}", "Nothing deleted.".yellow());
        return Ok(());
    }
    catalog.delete(id)?;
    log::info!("deleted chart {id}");
    println!("Deleted {id}");
    Ok(())
}
