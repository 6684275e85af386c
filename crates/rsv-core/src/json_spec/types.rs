use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// JSON spec entries keyed by endpoint name.
pub type JsonSpecMap = IndexMap<String, JsonSpec>;

/// Description of a single endpoint in the JSON spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<Documentation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<String>,

    pub url: UrlSpec,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, ParamSpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodySpec>,
}

impl JsonSpec {
    /// Every path part name across all URL templates, first occurrence first.
    ///
    /// Templates may expose different subsets of parts, so the union is what
    /// a request type has to cover.
    pub fn path_parts(&self) -> IndexSet<&str> {
        self.url
            .paths
            .iter()
            .filter_map(|p| p.parts.as_ref())
            .flat_map(|parts| parts.keys().map(String::as_str))
            .collect()
    }

    /// Query parameter names, or `None` when the entry has no `params` object.
    pub fn query_params(&self) -> Option<IndexSet<&str>> {
        self.params
            .as_ref()
            .map(|params| params.keys().map(String::as_str).collect())
    }

    pub fn body_required(&self) -> bool {
        self.body.as_ref().is_some_and(|b| b.required)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlSpec {
    #[serde(default)]
    pub paths: Vec<UrlPath>,
}

/// One URL template with the path parts it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlPath {
    #[serde(default)]
    pub path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<IndexMap<String, ParamSpec>>,
}

/// Metadata for a path part or query parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> JsonSpec {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_path_parts_union_across_templates() {
        let spec = parse(
            r#"{
                "url": {"paths": [
                    {"path": "/_search", "methods": ["GET", "POST"]},
                    {"path": "/{index}/_search", "methods": ["GET"], "parts": {"index": {"type": "list"}}},
                    {"path": "/{index}/_doc/{id}", "parts": {"index": {}, "id": {"type": "string"}}}
                ]}
            }"#,
        );
        let parts: Vec<&str> = spec.path_parts().into_iter().collect();
        assert_eq!(parts, vec!["index", "id"]);
    }

    #[test]
    fn test_missing_params_is_none() {
        let spec = parse(r#"{"url": {"paths": []}}"#);
        assert!(spec.query_params().is_none());
        assert!(spec.body.is_none());
        assert!(!spec.body_required());
    }

    #[test]
    fn test_body_required_defaults_to_false() {
        let spec = parse(r#"{"url": {"paths": []}, "body": {"description": "the doc"}}"#);
        assert!(spec.body.is_some());
        assert!(!spec.body_required());

        let spec = parse(r#"{"url": {"paths": []}, "body": {"required": true}}"#);
        assert!(spec.body_required());
    }

    #[test]
    fn test_param_metadata() {
        let spec = parse(
            r#"{
                "url": {"paths": []},
                "params": {
                    "refresh": {"type": "enum", "options": ["true", "false", "wait_for"], "default": "false"},
                    "pretty": {}
                }
            }"#,
        );
        let params = spec.params.as_ref().unwrap();
        assert_eq!(params["refresh"].options.len(), 3);
        assert_eq!(params["refresh"].param_type.as_deref(), Some("enum"));
        let names: Vec<&str> = spec.query_params().unwrap().into_iter().collect();
        assert_eq!(names, vec!["refresh", "pretty"]);
    }
}
