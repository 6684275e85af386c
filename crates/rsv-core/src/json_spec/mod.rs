pub mod loader;
pub mod types;

pub use loader::{load_dir, load_file};
pub use types::{BodySpec, Documentation, JsonSpec, JsonSpecMap, ParamSpec, UrlPath, UrlSpec};

use crate::error::ParseError;

/// Parse one JSON spec document. A document maps one or more endpoint
/// names to their descriptions.
pub fn from_json(input: &str) -> Result<JsonSpecMap, ParseError> {
    let specs: JsonSpecMap = serde_json::from_str(input)?;
    Ok(specs)
}
