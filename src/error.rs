//! Error types for the configuration and asset layers.
//!
//! The orbital model itself cannot fail; everything here comes from reading files.

use std::path::PathBuf;

/// Errors that can occur when loading or parsing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// A color was not a six-digit hex string.
    #[error("invalid color {value:?}, expected six hex digits like \"3399ff\"")]
    InvalidColor { value: String },
}

/// Errors that can occur while loading an asset off the main thread.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The asset file could not be read.
    #[error("failed to read asset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bytes were read but could not be decoded.
    #[error("asset {path} could not be decoded as a {kind}")]
    Decode { path: PathBuf, kind: &'static str },

    /// The loader thread went away without producing a result.
    #[error("asset loader thread exited without a result")]
    LoaderLost,
}
