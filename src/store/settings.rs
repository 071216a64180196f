//! The global scheduler-settings record.

use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::ProjectCriterion;

/// Store-wide scheduler configuration: the project-level ranking chain
/// (uniform across all projects) and a debug-logging hint for the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerSettings {
    /// Ranking chain for project selection, applied store-wide.
    pub project_selection_priority: Vec<ProjectCriterion>,
    /// Host hint: emit scheduler debug-level logging.
    pub log_debug: bool,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        SchedulerSettings {
            project_selection_priority: ProjectCriterion::default_chain(),
            log_debug: false,
        }
    }
}

impl SchedulerSettings {
    /// Load the settings record, creating the file with defaults if absent.
    pub fn load_or_create(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            let settings = SchedulerSettings::default();
            settings.save(path)?;
            info!("settings: created defaults at {}", path.display());
            return Ok(settings);
        }

        let raw = fs::read_to_string(path).map_err(|source| StoreError::SettingsRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| StoreError::SettingsParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write the settings record.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let body =
            toml::to_string_pretty(self).map_err(|source| StoreError::SettingsEncode { source })?;
        fs::write(path, body).map_err(|source| StoreError::SettingsWrite {
            path: path.to_path_buf(),
            source,
        })
    }
}
