use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::catalog::{Catalog, ENTRY_EXTENSION};
use crate::error::{ContabilError, Result};

/// Catalog id for a source spreadsheet: its base name with the extension
/// swapped for `.json`.
pub fn entry_id_for(file_path: &Path) -> Result<String> {
    let stem = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            ContabilError::Extraction(format!("no usable file name in {}", file_path.display()))
        })?;
    Ok(format!("{stem}.{ENTRY_EXTENSION}"))
}

pub fn origin_filename(file_path: &Path) -> String {
    file_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Why an import needs the caller's go-ahead before writing.
#[derive(Debug, Clone, PartialEq)]
pub enum Conflict {
    /// Another chart entry already belongs to this company.
    SameCompany { existing_id: String, company: String },
    /// The target entry id is already taken.
    EntryExists { id: String },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::SameCompany { existing_id, company } => write!(
                f,
                "A chart of accounts for {company} already exists ({existing_id})"
            ),
            Conflict::EntryExists { id } => write!(f, "An entry named {id} already exists"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Written(String),
    Declined,
}

/// Write `entry` under `id` unless a conflict exists and `confirm` says no.
pub(crate) fn commit<T: Serialize>(
    catalog: &Catalog,
    id: String,
    entry: &T,
    conflict: Option<Conflict>,
    confirm: impl FnOnce(&Conflict) -> bool,
) -> Result<ImportOutcome> {
    if let Some(conflict) = conflict {
        if !confirm(&conflict) {
            log::info!("declined overwrite: {conflict}");
            return Ok(ImportOutcome::Declined);
        }
    }
    catalog.write(&id, entry)?;
    Ok(ImportOutcome::Written(id))
}

/// Overwrite an existing entry without asking.
pub(crate) fn replace<T: Serialize>(catalog: &Catalog, id: &str, entry: &T) -> Result<()> {
    if !catalog.exists(id) {
        return Err(ContabilError::NotFound(id.to_string()));
    }
    catalog.write(id, entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::PathBuf;

    #[test]
    fn test_entry_id_for() {
        assert_eq!(entry_id_for(Path::new("/tmp/Plano 2024.xlsx")).unwrap(), "Plano 2024.json");
        assert_eq!(entry_id_for(Path::new("extrato.jan.xls")).unwrap(), "extrato.jan.json");
        assert_eq!(entry_id_for(Path::new("noext")).unwrap(), "noext.json");
        assert!(entry_id_for(Path::new("/")).is_err());
    }

    #[test]
    fn test_origin_filename() {
        assert_eq!(origin_filename(&PathBuf::from("/a/b/jan.xlsx")), "jan.xlsx");
    }

    #[test]
    fn test_commit_without_conflict_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path());
        let outcome = commit(&catalog, "a.json".to_string(), &json!({}), None, |_| {
            panic!("no prompt expected")
        })
        .unwrap();
        assert_eq!(outcome, ImportOutcome::Written("a.json".to_string()));
    }

    #[test]
    fn test_commit_declined_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path().join("c"));
        let conflict = Conflict::EntryExists { id: "a.json".to_string() };
        let outcome = commit(&catalog, "a.json".to_string(), &json!({}), Some(conflict), |_| false)
            .unwrap();
        assert_eq!(outcome, ImportOutcome::Declined);
        assert!(!catalog.dir().exists());
    }

    #[test]
    fn test_replace_requires_existing_entry() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path());
        assert!(matches!(
            replace(&catalog, "a.json", &json!({"v": 1})).unwrap_err(),
            ContabilError::NotFound(_)
        ));
        catalog.write("a.json", &json!({"v": 1})).unwrap();
        replace(&catalog, "a.json", &json!({"v": 2})).unwrap();
        assert_eq!(catalog.read::<Value>("a.json").unwrap(), json!({"v": 2}));
    }

    #[test]
    fn test_conflict_messages() {
        let c = Conflict::SameCompany {
            existing_id: "old.json".to_string(),
            company: "ACME".to_string(),
        };
        assert_eq!(c.to_string(), "A chart of accounts for ACME already exists (old.json)");
    }
}
