use serde::{Deserialize, Serialize};

use super::definition::{Definition, TypeDefinition};

/// The type model: every endpoint plus every type declared alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,

    #[serde(default)]
    pub types: Vec<TypeDefinition>,
}

impl Model {
    /// Find the request or interface declared under `name`.
    ///
    /// Other kinds of types never match, even when their name does.
    pub fn find_definition(&self, name: &str) -> Option<Definition<'_>> {
        self.types
            .iter()
            .filter_map(TypeDefinition::as_definition)
            .find(|def| def.name() == name)
    }
}

/// A named API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub name: String,

    /// Name of the request type describing accepted parameters, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<EndpointUrl>,
}

/// A URL template an endpoint is served under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointUrl {
    pub path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,
}
