use std::path::Path;

use chrono::NaiveDateTime;

use crate::catalog::Catalog;
use crate::error::{ContabilError, Result};
use crate::importer::{commit, entry_id_for, origin_filename, replace, Conflict, ImportOutcome};
use crate::models::{ExtractRecord, ExtractRow, TIMESTAMP_FORMAT};
use crate::normalize::normalize;
use crate::settings::ExtractConfig;
use crate::sheet::{cell_at, read_grid, Cell, Grid};

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// Column names from the first row, kept exactly as written. Blank headers
/// become `Unnamed: <n>` and repeats get `.1`, `.2`, ... so every name is
/// unique.
pub fn header_names(grid: &Grid) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(grid.width());
    for col in 0..grid.width() {
        let base = cell_at(grid.row(0), col)
            .text()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Unnamed: {col}"));
        let mut name = base.clone();
        let mut n = 1;
        while names.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        names.push(name);
    }
    names
}

/// True when `header` contains any stop marker, ignoring case.
pub fn is_stop_column(header: &str, stop_markers: &[String]) -> bool {
    let header = header.to_lowercase();
    stop_markers
        .iter()
        .any(|m| header.contains(&m.to_lowercase()))
}

/// Indices of the columns that survive stop-marker pruning.
pub fn prune_columns(headers: &[String], stop_markers: &[String]) -> Vec<usize> {
    headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| {
            if is_stop_column(h, stop_markers) {
                log::debug!("dropping column {h:?}");
                None
            } else {
                Some(i)
            }
        })
        .collect()
}

/// First kept column whose header contains `marker`, ignoring case.
pub fn find_description_column(headers: &[String], kept: &[usize], marker: &str) -> Result<usize> {
    let marker = marker.to_lowercase();
    kept.iter()
        .copied()
        .find(|&col| headers[col].to_lowercase().contains(&marker))
        .ok_or_else(|| ContabilError::AmbiguousSchema(format!("a description column (no header contains \"{marker}\")")))
}

fn is_blank(cell: &Cell) -> bool {
    cell.text().map_or(true, |t| t.trim().is_empty())
}

/// Data rows worth keeping: not entirely empty over `kept`, and with a
/// non-blank description.
pub fn filter_rows<'g>(grid: &'g Grid, kept: &[usize], description_col: usize) -> Vec<&'g [Cell]> {
    grid.rows()
        .iter()
        .skip(1)
        .map(Vec::as_slice)
        .filter(|row| kept.iter().any(|&col| !cell_at(row, col).is_empty()))
        .filter(|row| !is_blank(cell_at(row, description_col)))
        .collect()
}

pub fn parse_extract(
    grid: &Grid,
    origin_filename: &str,
    processed_at: NaiveDateTime,
    config: &ExtractConfig,
) -> Result<ExtractRecord> {
    let headers = header_names(grid);
    let kept = prune_columns(&headers, &config.stop_markers);
    let description_col = find_description_column(&headers, &kept, &config.description_marker)?;
    let kept_rows = filter_rows(grid, &kept, description_col);
    log::debug!(
        "{origin_filename}: {} of {} data rows kept, description column {:?}",
        kept_rows.len(),
        grid.height().saturating_sub(1),
        headers[description_col]
    );

    let rows = kept_rows
        .into_iter()
        .map(|row| {
            kept.iter()
                .map(|&col| (headers[col].clone(), normalize(cell_at(row, col))))
                .collect::<ExtractRow>()
        })
        .collect();

    Ok(ExtractRecord {
        origin_filename: origin_filename.to_string(),
        processed_at: processed_at.format(TIMESTAMP_FORMAT).to_string(),
        rows,
    })
}

pub fn load_extract(file_path: &Path, config: &ExtractConfig) -> Result<ExtractRecord> {
    let grid = read_grid(file_path)?;
    let now = chrono::Local::now().naive_local();
    parse_extract(&grid, &origin_filename(file_path), now, config)
}

// ---------------------------------------------------------------------------
// Catalog operations
// ---------------------------------------------------------------------------

/// Import a new extract, asking `confirm` before replacing an entry with
/// the same name.
pub fn import_extract(
    catalog: &Catalog,
    file_path: &Path,
    config: &ExtractConfig,
    confirm: impl FnOnce(&Conflict) -> bool,
) -> Result<ImportOutcome> {
    let id = entry_id_for(file_path)?;
    let record = load_extract(file_path, config)?;
    log::info!("parsed {} rows from {}", record.rows.len(), file_path.display());
    let conflict = catalog
        .exists(&id)
        .then(|| Conflict::EntryExists { id: id.clone() });
    commit(catalog, id, &record, conflict, confirm)
}

/// Rebuild an existing extract entry from a new spreadsheet. This is an
/// explicit update, so there is no confirmation step.
pub fn update_extract(catalog: &Catalog, id: &str, file_path: &Path, config: &ExtractConfig) -> Result<ExtractRecord> {
    let record = load_extract(file_path, config)?;
    replace(catalog, id, &record)?;
    log::info!("updated {id} from {}", file_path.display());
    Ok(record)
}
