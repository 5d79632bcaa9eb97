//! Error types for the currency catalog

use thiserror::Error;

/// Errors that can occur while loading the remote catalog
///
/// Cloneable so a shared load handle can hand the same outcome to every
/// awaiter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// Catalog endpoint answered with a non-2xx status
    #[error("Failed to fetch currency data: {status} {status_text}")]
    RemoteLoad { status: u16, status_text: String },

    /// Response body is not a valid catalog document
    #[error("Invalid catalog data: {0}")]
    Parse(String),

    /// Latest published version could not be determined
    #[error("Version resolution failed: {0}")]
    VersionResolution(String),

    /// Transport failed before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Load task was aborted by the runtime
    #[error("Load aborted: {0}")]
    Aborted(String),
}

impl LoadError {
    /// Creates a RemoteLoad error
    pub fn remote(status: u16, status_text: impl Into<String>) -> Self {
        Self::RemoteLoad {
            status,
            status_text: status_text.into(),
        }
    }

    /// Creates a VersionResolution error
    pub fn version(msg: impl Into<String>) -> Self {
        Self::VersionResolution(msg.into())
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Errors returned synchronously by catalog lookups
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// No snapshot exists and no load is outstanding
    #[error("Currency catalog not loaded; call load_remote() or supply init data")]
    NotLoaded,

    /// First load is still in flight; await `ready()` before querying
    #[error("Currency catalog is still loading; await ready() first")]
    Loading,
}

/// Errors produced by the offline dataset builder
#[derive(Debug, Error)]
pub enum BuildError {
    /// Listing page could not be fetched or parsed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Output files could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
