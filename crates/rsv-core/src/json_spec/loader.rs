use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LoadError;

use super::types::JsonSpecMap;

/// Load every JSON spec file in `dir` into one map.
///
/// Files are read in file-name order. Files whose name starts with `_`
/// hold shared definitions rather than endpoints and are skipped.
pub fn load_dir(dir: &Path) -> Result<JsonSpecMap, LoadError> {
    let mut files = spec_files(dir)?;
    files.sort();

    let mut specs = JsonSpecMap::new();
    for path in files {
        let entries = load_file(&path)?;
        log::debug!("loaded {} endpoint(s) from {}", entries.len(), path.display());
        for (name, spec) in entries {
            if specs.contains_key(&name) {
                return Err(LoadError::DuplicateEndpoint(name));
            }
            specs.insert(name, spec);
        }
    }
    Ok(specs)
}

/// Load a single JSON spec document.
pub fn load_file(path: &Path) -> Result<JsonSpecMap, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    super::from_json(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn spec_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source: std::io::Error| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let shared = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('_'));
        if path.is_file() && is_json && !shared {
            files.push(path);
        }
    }
    Ok(files)
}
