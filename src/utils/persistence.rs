use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::AdvisorError;

const TMP_SUFFIX: &str = "tmp";

/// Creates `path` and its parents when missing.
pub fn ensure_dir(path: &Path) -> Result<(), AdvisorError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Serializes `value` as pretty JSON and swaps it into place via a staging file.
pub fn save_json_atomic<T: Serialize>(value: &T, path: &Path) -> Result<(), AdvisorError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a JSON document, returning `None` when the file does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AdvisorError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&data)?))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn saves_and_loads_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");
        let mut doc = BTreeMap::new();
        doc.insert("crop".to_string(), "Tulsi".to_string());

        save_json_atomic(&doc, &path).unwrap();
        let loaded: BTreeMap<String, String> = load_json(&path).unwrap().unwrap();
        assert_eq!(loaded, doc);
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let temp = TempDir::new().unwrap();
        let loaded: Option<BTreeMap<String, String>> =
            load_json(&temp.path().join("absent.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn tmp_path_appends_suffix() {
        assert_eq!(
            tmp_path(Path::new("/x/config.json")),
            PathBuf::from("/x/config.json.tmp")
        );
    }
}
