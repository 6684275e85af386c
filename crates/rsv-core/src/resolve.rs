//! Inheritance-aware property extraction.
//!
//! A request or interface is flattened by taking its own path, query and
//! body declarations and folding in everything its ancestors declare,
//! transitively, in `inherits` order.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;
use crate::model::{Definition, Model};

/// Whether a flattened definition carries a request body.
///
/// Variants are ordered by precedence under [`BodyMerge::Any`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BodyState {
    /// Nothing said about a body. Interfaces never declare one.
    #[default]
    Unspecified,
    /// A request that declares no body.
    Absent,
    /// A request that declares a body.
    Present,
}

impl BodyState {
    pub fn is_present(self) -> bool {
        self == BodyState::Present
    }
}

/// How an ancestor's body state combines with the accumulated one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMerge {
    /// Each ancestor that states something different overwrites the
    /// accumulated state, so the last such ancestor decides.
    #[default]
    LastAncestor,
    /// A body anywhere in the chain wins.
    Any,
}

impl BodyMerge {
    fn merge(self, current: BodyState, inherited: BodyState) -> BodyState {
        match self {
            BodyMerge::LastAncestor => {
                if inherited != BodyState::Unspecified && inherited != current {
                    inherited
                } else {
                    current
                }
            }
            BodyMerge::Any => current.max(inherited),
        }
    }
}

/// The path/query/body contract of a definition after inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FlattenedProperties {
    pub path: IndexSet<String>,
    pub query: IndexSet<String>,
    pub body: BodyState,
}

impl FlattenedProperties {
    fn own(def: Definition<'_>) -> Self {
        match def {
            Definition::Request(r) => Self {
                path: r.path.iter().map(|p| p.name.clone()).collect(),
                query: r.query.iter().map(|p| p.name.clone()).collect(),
                body: if r.has_body() {
                    BodyState::Present
                } else {
                    BodyState::Absent
                },
            },
            Definition::Interface(i) => Self {
                path: IndexSet::new(),
                query: i.properties.iter().map(|p| p.name.clone()).collect(),
                body: BodyState::Unspecified,
            },
        }
    }
}

/// Flattens requests and interfaces of a model by name.
///
/// Nothing is cached: every call walks the inheritance chain again.
pub struct PropertyResolver<'a> {
    model: &'a Model,
    body_merge: BodyMerge,
}

impl<'a> PropertyResolver<'a> {
    pub fn new(model: &'a Model) -> Self {
        Self::with_body_merge(model, BodyMerge::default())
    }

    pub fn with_body_merge(model: &'a Model, body_merge: BodyMerge) -> Self {
        Self { model, body_merge }
    }

    /// Resolve the request or interface called `name`.
    pub fn resolve(&self, name: &str) -> Result<FlattenedProperties, ResolveError> {
        let mut chain = Vec::new();
        self.resolve_in(name, &mut chain)
    }

    fn resolve_in(
        &self,
        name: &str,
        chain: &mut Vec<String>,
    ) -> Result<FlattenedProperties, ResolveError> {
        if chain.iter().any(|n| n == name) {
            let mut cycle = chain.clone();
            cycle.push(name.to_string());
            return Err(ResolveError::CyclicInheritance(cycle));
        }

        let def = self
            .model
            .find_definition(name)
            .ok_or_else(|| ResolveError::DefinitionNotFound(name.to_string()))?;
        log::debug!("resolving {name}");

        let mut props = FlattenedProperties::own(def);

        chain.push(name.to_string());
        for parent in def.inherits() {
            let inherited = self.resolve_in(parent, chain)?;
            props.path.extend(inherited.path);
            props.query.extend(inherited.query);
            props.body = self.body_merge.merge(props.body, inherited.body);
        }
        chain.pop();

        Ok(props)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn model(types: serde_json::Value) -> Model {
        serde_json::from_value(json!({ "endpoints": [], "types": types })).unwrap()
    }

    fn names(set: &IndexSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_own_properties_of_request() {
        let m = model(json!([{
            "kind": "request",
            "name": "GetDocRequest",
            "path": [{"name": "index"}, {"name": "id"}],
            "query": [{"name": "routing"}],
            "body": {"kind": "no_body"}
        }]));
        let props = PropertyResolver::new(&m).resolve("GetDocRequest").unwrap();
        assert_eq!(names(&props.path), vec!["index", "id"]);
        assert_eq!(names(&props.query), vec!["routing"]);
        assert_eq!(props.body, BodyState::Absent);
    }

    #[test]
    fn test_interface_properties_count_as_query() {
        let m = model(json!([{
            "kind": "interface",
            "name": "CommonQueryParameters",
            "properties": [{"name": "pretty"}, {"name": "human"}]
        }]));
        let props = PropertyResolver::new(&m)
            .resolve("CommonQueryParameters")
            .unwrap();
        assert!(props.path.is_empty());
        assert_eq!(names(&props.query), vec!["pretty", "human"]);
        assert_eq!(props.body, BodyState::Unspecified);
    }

    #[test]
    fn test_inheritance_unions_paths() {
        let m = model(json!([
            {"kind": "request", "name": "R", "inherits": ["A", "B"]},
            {"kind": "request", "name": "A", "path": [{"name": "id"}]},
            {"kind": "request", "name": "B", "path": [{"name": "index"}]}
        ]));
        let props = PropertyResolver::new(&m).resolve("R").unwrap();
        assert_eq!(names(&props.path), vec!["id", "index"]);
    }

    #[test]
    fn test_transitive_and_duplicate_inheritance() {
        let m = model(json!([
            {"kind": "request", "name": "R", "query": [{"name": "q"}], "inherits": ["A", "B"]},
            {"kind": "interface", "name": "A", "properties": [{"name": "pretty"}], "inherits": ["Base"]},
            {"kind": "interface", "name": "B", "properties": [{"name": "q"}], "inherits": ["Base"]},
            {"kind": "interface", "name": "Base", "properties": [{"name": "human"}]}
        ]));
        let props = PropertyResolver::new(&m).resolve("R").unwrap();
        assert_eq!(names(&props.query), vec!["q", "pretty", "human"]);
    }

    #[test]
    fn test_other_kinds_are_not_definitions() {
        let m = model(json!([{"kind": "enum", "name": "Refresh"}]));
        let err = PropertyResolver::new(&m).resolve("Refresh").unwrap_err();
        assert!(matches!(err, ResolveError::DefinitionNotFound(name) if name == "Refresh"));
    }

    #[test]
    fn test_missing_ancestor_is_fatal() {
        let m = model(json!([{"kind": "request", "name": "R", "inherits": ["Gone"]}]));
        let err = PropertyResolver::new(&m).resolve("R").unwrap_err();
        assert!(matches!(err, ResolveError::DefinitionNotFound(name) if name == "Gone"));
    }

    #[test]
    fn test_cycle_is_reported() {
        let m = model(json!([
            {"kind": "request", "name": "A", "inherits": ["B"]},
            {"kind": "interface", "name": "B", "inherits": ["A"]}
        ]));
        let err = PropertyResolver::new(&m).resolve("A").unwrap_err();
        match err {
            ResolveError::CyclicInheritance(chain) => assert_eq!(chain, vec!["A", "B", "A"]),
            other => panic!("expected a cycle, got {other}"),
        }
    }

    #[test]
    fn test_last_ancestor_decides_body() {
        let m = model(json!([
            {"kind": "request", "name": "R", "inherits": ["WithBody", "NoBody"]},
            {"kind": "request", "name": "WithBody", "body": {"kind": "properties"}},
            {"kind": "request", "name": "NoBody", "body": {"kind": "no_body"}}
        ]));
        let props = PropertyResolver::new(&m).resolve("R").unwrap();
        assert_eq!(props.body, BodyState::Absent);

        let props = PropertyResolver::with_body_merge(&m, BodyMerge::Any)
            .resolve("R")
            .unwrap();
        assert_eq!(props.body, BodyState::Present);
    }

    #[test]
    fn test_interface_ancestor_keeps_body() {
        let m = model(json!([
            {"kind": "request", "name": "R", "body": {"kind": "value"}, "inherits": ["Common"]},
            {"kind": "interface", "name": "Common", "properties": [{"name": "pretty"}]}
        ]));
        let props = PropertyResolver::new(&m).resolve("R").unwrap();
        assert!(props.body.is_present());
    }
}
