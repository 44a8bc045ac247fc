//! Shared error types for the services crate.

use std::path::PathBuf;
use thiserror::Error;

use play_core::model::ContentError;
use play_core::rules::RulesError;
use play_core::SessionError;

/// Errors emitted by `ContentSource` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentSourceError {
    #[error("no {kind} content available")]
    Empty { kind: &'static str },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Errors emitted while loading `PlayConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Rules(#[from] RulesError),
}

/// Errors emitted by host-side services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("level {level} does not exist (1..={levels})")]
    UnknownLevel { level: usize, levels: usize },
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Content(#[from] ContentSourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
