use std::path::PathBuf;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::settings::{load_settings, settings_file_exists};

fn describe(catalog: &Catalog) -> Result<String> {
    if !catalog.dir().exists() {
        return Ok("(not created)".to_string());
    }
    Ok(format!("{} entries", catalog.list()?.len()))
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let data_dir = PathBuf::from(&settings.data_dir);
    let charts = settings.charts_catalog();
    let extracts = settings.extracts_catalog();

    if !settings_file_exists() {
        println!("No settings saved yet; using defaults. Run `contabil init` to set up.");
        println!();
    }
    println!("Data dir:   {}", data_dir.display());
    println!("Charts:     {}  {}", charts.dir().display(), describe(&charts)?);
    println!("Extracts:   {}  {}", extracts.dir().display(), describe(&extracts)?);
    Ok(())
}
