pub mod definition;
pub mod endpoint;

pub use definition::{Body, Definition, Interface, Property, Request, TypeDefinition};
pub use endpoint::{Endpoint, Model};

use crate::error::ParseError;

/// Parse a type model from its JSON form.
pub fn from_json(input: &str) -> Result<Model, ParseError> {
    let model: Model = serde_json::from_str(input)?;
    Ok(model)
}
