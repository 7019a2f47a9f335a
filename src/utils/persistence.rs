use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{core::utils::ensure_dir, errors::StorageError};

const TMP_SUFFIX: &str = "tmp";

/// Writes `value` as pretty JSON, staging to a temporary file and renaming it into place.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let json = serde_json::to_string_pretty(value)?;
    fs::write(&tmp, json)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Loads a JSON document from disk, returning structured errors on failure.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// Like [`load_json`] but yields `T::default()` when the file does not exist.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, StorageError> {
    if path.exists() {
        load_json(path)
    } else {
        Ok(T::default())
    }
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
    use tempfile::tempdir;

    #[test]
    fn save_leaves_no_temporary_file_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("value.json");
        save_json(&vec![1, 2, 3], &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path(&path).exists());
        let loaded: Vec<i32> = load_json(&path).unwrap();
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempdir().unwrap();
        let loaded: Vec<String> = load_json_or_default(&dir.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_reports_serde_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load_json::<Vec<i32>>(&path).unwrap_err();
        assert!(matches!(err, StorageError::Serde(_)));
    }
}
