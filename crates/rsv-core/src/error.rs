use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("endpoint {0} is defined by more than one json spec file")]
    DuplicateEndpoint(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("cyclic inheritance detected: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),
}

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("json spec not found for endpoint: {0}")]
    SpecNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}
