//! Persistence of the project store and global scheduler settings.
//!
//! The store is a directory of human-editable JSON records, one project per
//! file, discovered by scanning for `*.json`. Derived and transient fields
//! (validity, cached horizontal coordinates, the backing path) are never
//! serialized; everything else round-trips.

mod settings;

pub use settings::SchedulerSettings;

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::StoreError;
use crate::models::Project;

/// Load every `*.json` project record under `dir`.
///
/// Records load in sorted-file-name order: the scan order is the store order,
/// which the selection protocol uses as its final tie-break, so it must be
/// deterministic across platforms.
pub fn load_projects(dir: &Path) -> Result<Vec<Project>, StoreError> {
    let entries = fs::read_dir(dir).map_err(|source| StoreError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| StoreError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut projects = Vec::with_capacity(paths.len());
    for path in &paths {
        projects.push(load_project(path)?);
    }
    Ok(projects)
}

/// Load a single project record and attach its backing path.
pub fn load_project(path: &Path) -> Result<Project, StoreError> {
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut deserializer = serde_json::Deserializer::from_str(&raw);
    let mut project: Project =
        serde_path_to_error::deserialize(&mut deserializer).map_err(|source| {
            StoreError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

    project.attach_store_path(path.to_path_buf());
    debug!(
        "store: loaded project '{}' from {}",
        project.name,
        path.display()
    );
    Ok(project)
}

/// Write a project record back to its backing file, pretty-printed.
pub fn save_project(project: &Project) -> Result<(), StoreError> {
    let Some(path) = project.source.as_deref() else {
        return Err(StoreError::NoBackingFile {
            name: project.name.clone(),
        });
    };

    let mut body =
        serde_json::to_string_pretty(project).map_err(|source| StoreError::Encode {
            name: project.name.clone(),
            source,
        })?;
    body.push('\n');

    fs::write(path, body).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
