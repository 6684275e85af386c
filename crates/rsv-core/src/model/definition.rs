use serde::{Deserialize, Serialize};

/// A type declared in the model, tagged by `kind`.
///
/// Only requests and interfaces carry parameters; every other kind is kept
/// as an opaque placeholder so whole models deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDefinition {
    Request(Request),
    Interface(Interface),
    #[serde(other)]
    Other,
}

impl TypeDefinition {
    pub fn as_definition(&self) -> Option<Definition<'_>> {
        match self {
            TypeDefinition::Request(r) => Some(Definition::Request(r)),
            TypeDefinition::Interface(i) => Some(Definition::Interface(i)),
            TypeDefinition::Other => None,
        }
    }
}

/// A request type: path and query parameters kept apart, plus a body marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub name: String,

    #[serde(default)]
    pub path: Vec<Property>,

    #[serde(default)]
    pub query: Vec<Property>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<String>,
}

impl Request {
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(Body::is_present)
    }
}

/// An interface: one flat property list, no body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,

    #[serde(default)]
    pub properties: Vec<Property>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inherits: Vec<String>,
}

/// A named property. Nothing beyond the name is inspected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
}

/// Body marker on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Body {
    Properties,
    Value,
    NoBody,
}

impl Body {
    pub fn is_present(&self) -> bool {
        !matches!(self, Body::NoBody)
    }
}

/// A borrowed request or interface, the two kinds that contribute parameters.
#[derive(Debug, Clone, Copy)]
pub enum Definition<'a> {
    Request(&'a Request),
    Interface(&'a Interface),
}

impl<'a> Definition<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Definition::Request(r) => &r.name,
            Definition::Interface(i) => &i.name,
        }
    }

    pub fn inherits(&self) -> &'a [String] {
        match self {
            Definition::Request(r) => &r.inherits,
            Definition::Interface(i) => &i.inherits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_request() {
        let json = r#"{
            "kind": "request",
            "name": "GetRequest",
            "path": [{"name": "index", "required": true}, {"name": "id"}],
            "query": [{"name": "routing"}],
            "body": {"kind": "no_body"},
            "inherits": ["RequestBase"]
        }"#;
        let def: TypeDefinition = serde_json::from_str(json).unwrap();
        match def {
            TypeDefinition::Request(r) => {
                assert_eq!(r.name, "GetRequest");
                assert_eq!(r.path.len(), 2);
                assert_eq!(r.query[0].name, "routing");
                assert_eq!(r.inherits, vec!["RequestBase".to_string()]);
                assert!(!r.has_body());
            }
            _ => panic!("expected a request"),
        }
    }

    #[test]
    fn test_body_kinds() {
        let props: Body =
            serde_json::from_str(r#"{"kind": "properties", "properties": []}"#).unwrap();
        assert!(props.is_present());
        let value: Body = serde_json::from_str(r#"{"kind": "value"}"#).unwrap();
        assert!(value.is_present());
        let none: Body = serde_json::from_str(r#"{"kind": "no_body"}"#).unwrap();
        assert!(!none.is_present());
    }

    #[test]
    fn test_unknown_kind_is_other() {
        let json = r#"{"kind": "enum", "name": "Level", "members": [{"name": "debug"}]}"#;
        let def: TypeDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def, TypeDefinition::Other);
        assert!(def.as_definition().is_none());
    }

    #[test]
    fn test_interface_defaults() {
        let json = r#"{"kind": "interface", "name": "Common"}"#;
        let def: TypeDefinition = serde_json::from_str(json).unwrap();
        let found = def.as_definition().unwrap();
        assert_eq!(found.name(), "Common");
        assert!(found.inherits().is_empty());
    }
}
