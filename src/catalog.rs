use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ContabilError, Result};

pub const ENTRY_EXTENSION: &str = "json";

/// A directory of JSON entries, one file per entry, addressed by file name.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
}

impl Catalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Entry ids in lexicographic order. A catalog that was never written to
    /// lists as empty.
    pub fn list(&self) -> Result<Vec<String>> {
        let read_dir = match std::fs::read_dir(&self.dir) {
            Ok(rd) => rd,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut ids = Vec::new();
        for entry in read_dir {
            let entry = entry?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let path = Path::new(&name);
            let is_entry = !name.starts_with('.')
                && path.extension().is_some_and(|e| e == ENTRY_EXTENSION)
                && entry.file_type()?.is_file();
            if is_entry {
                ids.push(name);
            }
        }
        ids.sort();
        Ok(ids)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.entry_path(id).is_ok_and(|p| p.is_file())
    }

    pub fn read<T: DeserializeOwned>(&self, id: &str) -> Result<T> {
        let path = self.entry_path(id)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ContabilError::NotFound(id.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(ContabilError::CorruptEntry {
                    id: id.to_string(),
                    reason: "not valid UTF-8".to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| ContabilError::CorruptEntry {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    /// Every entry in listing order. Fails on the first corrupt entry.
    pub fn entries<T: DeserializeOwned>(&self) -> Result<Vec<(String, T)>> {
        self.list()?
            .into_iter()
            .map(|id| {
                let entry = self.read(&id)?;
                Ok((id, entry))
            })
            .collect()
    }

    /// Replace (or create) an entry. The document goes to a hidden sibling
    /// file first and is renamed over the entry, so readers see either the
    /// old or the new content.
    pub fn write<T: Serialize>(&self, id: &str, entry: &T) -> Result<()> {
        let path = self.entry_path(id)?;
        std::fs::create_dir_all(&self.dir)?;

        let mut content = to_json(entry)?;
        content.push(b'\n');

        let tmp_path = self.dir.join(format!(".{id}.tmp"));
        std::fs::write(&tmp_path, &content)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }
        log::debug!("wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let path = self.entry_path(id)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ContabilError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Ids are bare file names; anything that could escape the directory
    /// cannot name an entry.
    fn entry_path(&self, id: &str) -> Result<PathBuf> {
        let bare = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\'])
            && Path::new(id).file_name().is_some_and(|n| n == id);
        if !bare {
            return Err(ContabilError::NotFound(id.to_string()));
        }
        Ok(self.dir.join(id))
    }
}

/// Four-space indented JSON with non-ASCII text kept as-is.
fn to_json<T: Serialize>(entry: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    entry.serialize(&mut ser).map_err(std::io::Error::from)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn test_catalog() -> (tempfile::TempDir, Catalog) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(dir.path().join("data"));
        (dir, catalog)
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let (_dir, catalog) = test_catalog();
        assert!(catalog.list().unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_dir_and_lists_sorted() {
        let (_dir, catalog) = test_catalog();
        catalog.write("b.json", &json!({"n": 2})).unwrap();
        catalog.write("a.json", &json!({"n": 1})).unwrap();
        std::fs::write(catalog.dir().join("notes.txt"), "x").unwrap();
        std::fs::write(catalog.dir().join(".c.json.tmp"), "{").unwrap();
        assert_eq!(catalog.list().unwrap(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_write_format() {
        let (_dir, catalog) = test_catalog();
        catalog.write("x.json", &json!({"empresa": "Padaria São João"})).unwrap();
        let raw = std::fs::read_to_string(catalog.dir().join("x.json")).unwrap();
        assert_eq!(raw, "{\n    \"empresa\": \"Padaria São João\"\n}\n");
    }

    #[test]
    fn test_write_replaces_and_leaves_no_temp_file() {
        let (_dir, catalog) = test_catalog();
        catalog.write("x.json", &json!({"v": 1})).unwrap();
        catalog.write("x.json", &json!({"v": 2})).unwrap();
        let value: Value = catalog.read("x.json").unwrap();
        assert_eq!(value, json!({"v": 2}));
        let names: Vec<_> = std::fs::read_dir(catalog.dir()).unwrap().collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let (_dir, catalog) = test_catalog();
        let err = catalog.read::<Value>("nope.json").unwrap_err();
        assert!(matches!(err, ContabilError::NotFound(id) if id == "nope.json"));
    }

    #[test]
    fn test_read_malformed_is_corrupt() {
        let (_dir, catalog) = test_catalog();
        std::fs::create_dir_all(catalog.dir()).unwrap();
        std::fs::write(catalog.dir().join("bad.json"), "{\"empresa\": ").unwrap();
        let err = catalog.read::<Value>("bad.json").unwrap_err();
        assert!(matches!(err, ContabilError::CorruptEntry { .. }));
    }

    #[test]
    fn test_read_wrong_shape_is_corrupt() {
        #[derive(serde::Deserialize, Debug)]
        struct Needs {
            #[allow(dead_code)]
            empresa: String,
        }
        let (_dir, catalog) = test_catalog();
        catalog.write("x.json", &json!({"other": 1})).unwrap();
        let err = catalog.read::<Needs>("x.json").unwrap_err();
        assert!(matches!(err, ContabilError::CorruptEntry { .. }));
    }

    #[test]
    fn test_delete() {
        let (_dir, catalog) = test_catalog();
        catalog.write("x.json", &json!({})).unwrap();
        assert!(catalog.exists("x.json"));
        catalog.delete("x.json").unwrap();
        assert!(!catalog.exists("x.json"));
        assert!(matches!(
            catalog.delete("x.json").unwrap_err(),
            ContabilError::NotFound(_)
        ));
    }

    #[test]
    fn test_ids_cannot_escape_dir() {
        let (dir, catalog) = test_catalog();
        std::fs::write(dir.path().join("outside.json"), "{}").unwrap();
        for id in ["../outside.json", "..", "", "a/b.json"] {
            assert!(matches!(
                catalog.read::<Value>(id).unwrap_err(),
                ContabilError::NotFound(_)
            ));
            assert!(catalog.write(id, &json!({})).is_err());
        }
        assert!(dir.path().join("outside.json").exists());
    }
}
