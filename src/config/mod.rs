use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::{
    core::utils::{app_data_dir, config_file_in, ensure_dir},
    errors::StorageError,
    utils::persistence::{load_json_or_default, save_json},
};

/// User preferences for the command-line front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the record store. Defaults to the application directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// User reported on when a request names none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_user: Option<Uuid>,
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StorageError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StorageError> {
        ensure_dir(&base)?;
        let path = config_file_in(&base);
        Ok(Self { base, path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Config, StorageError> {
        load_json_or_default(&self.path)
    }

    pub fn save(&self, config: &Config) -> Result<(), StorageError> {
        save_json(config, &self.path)
    }
}
