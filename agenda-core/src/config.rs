//! Agenda configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{AgendaError, AgendaResult};
use crate::slot::FileStore;
use crate::store::DEFAULT_STORAGE_KEY;

static DEFAULT_DATA_DIR: &str = "~/.local/share/agenda";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

/// Configuration at ~/.config/agenda/config.toml
///
/// Every key can be overridden with an `AGENDA_`-prefixed environment
/// variable, e.g. `AGENDA_DATA_DIR`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// Directory holding the event slot
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the slot the events are stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented default file on
    /// first run.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::from_file(&config_path)
    }

    /// Load from `path`. A missing file means defaults.
    pub fn from_file(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("AGENDA"))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// `data_dir` with `~` and environment variables expanded.
    pub fn data_path(&self) -> AgendaResult<PathBuf> {
        let raw = self.data_dir.to_string_lossy();
        let expanded = shellexpand::full(&raw)
            .map_err(|e| AgendaError::Config(format!("Could not expand data_dir: {e}")))?;

        Ok(PathBuf::from(expanded.into_owned()))
    }

    /// The slot storage this configuration points at.
    pub fn file_store(&self) -> AgendaResult<FileStore> {
        Ok(FileStore::new(self.data_path()?))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where your events are stored:
# data_dir = \"{}\"

# Name of the slot inside data_dir (stored as <name>.json):
# storage_key = \"{}\"
",
            DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
