use std::path::PathBuf;

use dialoguer::Input;

use crate::error::Result;
use crate::settings::{load_settings, save_settings, settings_file_exists, shellexpand_path};

pub fn run(data_dir: Option<String>) -> Result<()> {
    let mut settings = load_settings();

    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    } else if !settings_file_exists() {
        // First run: ask for the data dir
        let chosen: String = Input::new()
            .with_prompt("Data directory")
            .default(settings.data_dir.clone())
            .interact_text()
            .unwrap_or_else(|_| settings.data_dir.clone());
        settings.data_dir = shellexpand_path(chosen.trim());
    }

    save_settings(&settings)?;

    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(settings.charts_catalog().dir())?;
    std::fs::create_dir_all(settings.extracts_catalog().dir())?;

    log::info!("initialized data directory {}", resolved.display());
    println!("Initialized contabil at {}", resolved.display());
    Ok(())
}
