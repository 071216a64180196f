//! Error taxonomy for scheduling and persistence.

use std::io;
use std::path::PathBuf;

/// Result type for scheduling operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Error type for scheduling operations.
///
/// The three `NoEligible*` variants are not fatal: they signal "nothing to do
/// right now" and the calling action is expected to skip itself.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("no eligible project")]
    NoEligibleProject,

    #[error("no eligible target")]
    NoEligibleTarget,

    #[error("no eligible exposure")]
    NoEligibleExposure,

    /// An exposure plan names a filter the equipment configuration does not
    /// define. Surfaced as a skip, but logged at error level because it
    /// indicates a configuration defect.
    #[error("no filter definition matching '{0}'")]
    NoMatchingFilterDefinition(String),

    /// A continuity fingerprint no longer resolves against the loaded store,
    /// e.g. after the backing record was edited between passes.
    #[error("fingerprint does not resolve to a stored entity: {0}")]
    UnknownFingerprint(String),

    /// Reading or writing the persisted store failed. The pass must abort
    /// rather than operate on partial state.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error type for project-store and settings I/O.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read project store at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed project record {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },

    #[error("failed to encode project '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write project record {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The project was built in memory and never attached to a store file.
    #[error("project '{name}' has no backing store file")]
    NoBackingFile { name: String },

    #[error("failed to read scheduler settings at {}: {source}", path.display())]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed scheduler settings {}: {source}", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to encode scheduler settings: {source}")]
    SettingsEncode {
        #[source]
        source: toml::ser::Error,
    },

    #[error("failed to write scheduler settings at {}: {source}", path.display())]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
