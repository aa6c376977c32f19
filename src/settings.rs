use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{ContabilError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    #[serde(default = "default_charts_dir")]
    pub charts_dir: String,
    #[serde(default = "default_extracts_dir")]
    pub extracts_dir: String,
    #[serde(default)]
    pub chart: ChartConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
}

/// Layout of a chart-of-accounts export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Text that precedes the company name in the first row.
    pub company_marker: String,
    /// Metadata rows above the column-title row.
    pub header_rows: usize,
    pub type_column: usize,
    /// The account name is searched for in the columns after this one.
    pub classification_column: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            company_marker: "Empresa:".to_string(),
            header_rows: 3,
            type_column: 3,
            classification_column: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Columns whose header contains any of these (ignoring case) are dropped.
    pub stop_markers: Vec<String>,
    pub description_marker: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        let stop_markers = [
            "Código", "Cod", "Cod.", "Codigo",
            "Doc", "Doc.", "Documento", "Nº Doc", "N Doc", "Num Doc",
            "Saldo dia", "Saldo Dia", "Saldo do dia", "Saldo",
        ];
        Self {
            stop_markers: stop_markers.iter().map(|s| s.to_string()).collect(),
            description_marker: "desc".to_string(),
        }
    }
}

fn default_charts_dir() -> String {
    "data".to_string()
}

fn default_extracts_dir() -> String {
    "extratos".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            charts_dir: default_charts_dir(),
            extracts_dir: default_extracts_dir(),
            chart: ChartConfig::default(),
            extract: ExtractConfig::default(),
        }
    }
}

impl Settings {
    pub fn charts_catalog(&self) -> Catalog {
        Catalog::new(PathBuf::from(&self.data_dir).join(&self.charts_dir))
    }

    pub fn extracts_catalog(&self) -> Catalog {
        Catalog::new(PathBuf::from(&self.data_dir).join(&self.extracts_dir))
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("contabil")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("contabil")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        match std::fs::read_to_string(&path) {
            Ok(content) => parse_settings(&content).unwrap_or_else(|e| {
                log::warn!("ignoring unreadable {}: {e}", path.display());
                Settings::default()
            }),
            Err(e) => {
                log::warn!("could not read {}: {e}", path.display());
                Settings::default()
            }
        }
    } else {
        Settings::default()
    }
}

fn parse_settings(content: &str) -> Result<Settings> {
    serde_json::from_str(content).map_err(|e| ContabilError::Settings(e.to_string()))
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ContabilError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn settings_file_exists() -> bool {
    settings_path().exists()
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
