//! Errors produced by the library.
//!
//! Classification and font resolution never fail; everything here comes from
//! loading configuration/documents or building shape meshes.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid color {0:?} (expected a palette name or #RRGGBB[AA])")]
    InvalidColor(String),

    #[error("invalid style key {0:?} (expected \"<script>.<mode>\")")]
    InvalidStyleKey(String),

    #[error("invalid notebook item #{index}: {reason}")]
    InvalidItem { index: usize, reason: String },

    #[error("lyon tessellation failed: {0}")]
    Tessellation(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
