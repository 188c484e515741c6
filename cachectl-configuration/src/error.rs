//! Configuration error types.

use thiserror::Error;

/// Error loading or resolving a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be deserialized.
    #[error("invalid YAML configuration: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    /// The JSON document could not be deserialized.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A preset name that does not exist.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
}

/// Error reading or writing a preference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    /// The store was used before [`init`](crate::PreferenceStore::init).
    #[error("preference store is not initialized")]
    NotInitialized,

    /// A stored value could not be interpreted.
    #[error("invalid value {value:?} for preference {key}")]
    InvalidValue {
        /// Preference key.
        key: String,
        /// Stored text.
        value: String,
    },
}
