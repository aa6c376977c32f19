use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{ContabilError, Result};
use crate::importer::{commit, entry_id_for, replace, Conflict, ImportOutcome};
use crate::models::{AccountRecord, ChartOfAccounts};
use crate::settings::ChartConfig;
use crate::sheet::{cell_at, read_grid, Cell, Grid};

const CODE_COLUMN: usize = 0;

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// Company name from the first row: the first non-blank cell after the one
/// containing `marker`.
pub fn find_company(grid: &Grid, marker: &str) -> Result<String> {
    let mut found_marker = false;
    for cell in grid.row(0) {
        let Some(text) = cell.text() else { continue };
        let text = text.trim();
        if found_marker && !text.is_empty() {
            return Ok(text.to_string());
        }
        if text.contains(marker) {
            found_marker = true;
        }
    }
    Err(ContabilError::Extraction(if found_marker {
        format!("no company name after \"{marker}\" in the first row")
    } else {
        format!("\"{marker}\" not found in the first row")
    }))
}

/// Columns holding at least one value from `from_row` down, in sheet order.
pub fn kept_columns(grid: &Grid, from_row: usize) -> Vec<usize> {
    let rows = grid.rows().get(from_row..).unwrap_or(&[]);
    (0..grid.width())
        .filter(|&col| rows.iter().any(|row| !cell_at(row, col).is_empty()))
        .collect()
}

fn trimmed_text(cell: &Cell) -> String {
    cell.text().map(|t| t.trim().to_string()).unwrap_or_default()
}

/// First non-blank text cell to the right of `after`. Numbers and dates
/// never count as a name.
pub fn find_name(row: &[Cell], columns: &[usize], after: usize) -> Option<String> {
    columns
        .iter()
        .filter(|&&col| col > after)
        .find_map(|&col| match cell_at(row, col) {
            Cell::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
}

/// Rightmost numeric cell of the row, truncated; 0 when the row has none.
pub fn find_degree(row: &[Cell], columns: &[usize]) -> i64 {
    columns
        .iter()
        .rev()
        .find_map(|&col| cell_at(row, col).truncated_integer())
        .unwrap_or(0)
}

fn is_kept(columns: &[usize], col: usize) -> bool {
    columns.binary_search(&col).is_ok()
}

fn parse_account_row(row: &[Cell], columns: &[usize], config: &ChartConfig) -> Option<AccountRecord> {
    let code = trimmed_text(cell_at(row, CODE_COLUMN));
    if code.is_empty() {
        return None;
    }
    let text_of = |col: usize| {
        if is_kept(columns, col) {
            trimmed_text(cell_at(row, col))
        } else {
            String::new()
        }
    };
    let Some(name) = find_name(row, columns, config.classification_column) else {
        log::warn!("skipping account {code}: no name after column {}", config.classification_column + 1);
        return None;
    };
    Some(AccountRecord {
        account_type: text_of(config.type_column),
        classification: text_of(config.classification_column),
        degree: find_degree(row, columns),
        code,
        name,
    })
}

/// Account rows below the metadata block and the column-title row.
pub fn extract_accounts(grid: &Grid, config: &ChartConfig) -> Vec<AccountRecord> {
    let columns = kept_columns(grid, config.header_rows);
    log::debug!("chart columns kept: {columns:?}");
    grid.rows()
        .iter()
        .skip(config.header_rows + 1)
        .filter_map(|row| parse_account_row(row, &columns, config))
        .collect()
}

pub fn parse_chart(grid: &Grid, config: &ChartConfig) -> Result<ChartOfAccounts> {
    let company = find_company(grid, &config.company_marker)?;
    let accounts = extract_accounts(grid, config);
    Ok(ChartOfAccounts { company, accounts })
}

pub fn load_chart(file_path: &Path, config: &ChartConfig) -> Result<ChartOfAccounts> {
    let grid = read_grid(file_path)?;
    parse_chart(&grid, config)
}

// ---------------------------------------------------------------------------
// Catalog operations
// ---------------------------------------------------------------------------

/// Id of the first catalog entry recorded for `company` (exact match).
pub fn find_company_entry(catalog: &Catalog, company: &str) -> Result<Option<String>> {
    for (id, chart) in catalog.entries::<ChartOfAccounts>()? {
        if chart.company == company {
            return Ok(Some(id));
        }
    }
    Ok(None)
}

/// Import a new chart of accounts. When the company already has an entry,
/// `confirm` decides whether to go ahead; the new entry is written under the
/// spreadsheet's own name either way.
pub fn import_chart(
    catalog: &Catalog,
    file_path: &Path,
    config: &ChartConfig,
    confirm: impl FnOnce(&Conflict) -> bool,
) -> Result<ImportOutcome> {
    let id = entry_id_for(file_path)?;
    let chart = load_chart(file_path, config)?;
    log::info!(
        "parsed {} accounts for {} from {}",
        chart.accounts.len(),
        chart.company,
        file_path.display()
    );
    let conflict = find_company_entry(catalog, &chart.company)?.map(|existing_id| {
        Conflict::SameCompany {
            existing_id,
            company: chart.company.clone(),
        }
    });
    commit(catalog, id, &chart, conflict, confirm)
}

/// Rebuild an existing entry from a new spreadsheet.
pub fn update_chart(catalog: &Catalog, id: &str, file_path: &Path, config: &ChartConfig) -> Result<ChartOfAccounts> {
    let chart = load_chart(file_path, config)?;
    replace(catalog, id, &chart)?;
    log::info!("updated {id} from {}", file_path.display());
    Ok(chart)
}
