use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::resolve::BodyMerge;

/// Top-level project configuration loaded from `.rsv.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RsvConfig {
    /// Type model document.
    pub model: String,
    /// Directory of JSON spec files, or a single JSON spec document.
    pub json_spec: String,
    pub body_merge: BodyMerge,
    pub format: ReportFormat,
}

impl Default for RsvConfig {
    fn default() -> Self {
        Self {
            model: "schema.json".to_string(),
            json_spec: "rest-api-spec".to_string(),
            body_merge: BodyMerge::LastAncestor,
            format: ReportFormat::Text,
        }
    }
}

/// How the diagnostic report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    /// One `warn!` log line per diagnostic.
    Log,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rsv.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RsvConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: RsvConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rsv configuration
model: schema.json          # type model document
json_spec: rest-api-spec    # directory of JSON spec files, or one .json document

# How a body declared by ancestors combines with the request's own:
#   last_ancestor  the last ancestor that disagrees decides
#   any            a body anywhere in the inheritance chain wins
body_merge: last_ancestor

format: text                # text | json | log
"#
}
