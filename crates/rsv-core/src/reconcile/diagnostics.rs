use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What disagrees between a request type and its JSON spec entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mismatch {
    /// A path parameter declared by the model that no URL template exposes.
    PathMissingFromSpec { name: String },
    /// A path part of the JSON spec the model does not declare.
    PathMissingFromModel { name: String },
    QueryMissingFromSpec { name: String },
    QueryMissingFromModel { name: String },
    /// The model declares a body the JSON spec does not describe.
    BodyMissingFromSpec,
    /// The JSON spec requires a body the model does not declare.
    BodyMissingFromModel,
}

/// Which part of the request contract a mismatch concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    PathParameter,
    QueryParameter,
    Body,
}

impl Mismatch {
    pub fn category(&self) -> Category {
        match self {
            Mismatch::PathMissingFromSpec { .. } | Mismatch::PathMissingFromModel { .. } => {
                Category::PathParameter
            }
            Mismatch::QueryMissingFromSpec { .. } | Mismatch::QueryMissingFromModel { .. } => {
                Category::QueryParameter
            }
            Mismatch::BodyMissingFromSpec | Mismatch::BodyMissingFromModel => Category::Body,
        }
    }

    /// The offending parameter name, or `None` for body mismatches.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Mismatch::PathMissingFromSpec { name }
            | Mismatch::PathMissingFromModel { name }
            | Mismatch::QueryMissingFromSpec { name }
            | Mismatch::QueryMissingFromModel { name } => Some(name.as_str()),
            Mismatch::BodyMissingFromSpec | Mismatch::BodyMissingFromModel => None,
        }
    }
}

/// One mismatch found while reconciling an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub endpoint: String,
    pub request: String,
    pub mismatch: Mismatch,
}

impl Serialize for Diagnostic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Diagnostic", 5)?;
        state.serialize_field("endpoint", &self.endpoint)?;
        state.serialize_field("request", &self.request)?;
        state.serialize_field("category", &self.mismatch.category())?;
        state.serialize_field("identifier", &self.mismatch.identifier())?;
        state.serialize_field("mismatch", &self.mismatch)?;
        state.end()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = &self.request;
        match &self.mismatch {
            Mismatch::PathMissingFromSpec { name } => write!(
                f,
                "{request} has the path parameter {name} which is not present in the json spec."
            ),
            Mismatch::PathMissingFromModel { name } => write!(
                f,
                "{request} does not include the path parameter {name} which is present in the json spec."
            ),
            Mismatch::QueryMissingFromSpec { name } => write!(
                f,
                "{request} has the query parameter {name} which is not present in the json spec."
            ),
            Mismatch::QueryMissingFromModel { name } => write!(
                f,
                "{request} does not include the query parameter {name} which is present in the json spec."
            ),
            Mismatch::BodyMissingFromSpec => write!(
                f,
                "{request} has a body but the json spec does not describe one."
            ),
            Mismatch::BodyMissingFromModel => write!(
                f,
                "{request} does not have a body but the json spec requires one."
            ),
        }
    }
}

/// Receives diagnostics at the end of a successful reconciliation pass.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Ordered in-memory collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Diagnostics for one endpoint, in the order they were found.
    pub fn for_endpoint<'a>(&'a self, endpoint: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.items.iter().filter(move |d| d.endpoint == endpoint)
    }

    /// Render one `warning[<endpoint>]: <message>` line per diagnostic.
    pub fn render(&self) -> String {
        self.items
            .iter()
            .map(|d| format!("warning[{}]: {}\n", d.endpoint, d))
            .collect()
    }

    pub fn drain_into(self, sink: &mut dyn DiagnosticSink) {
        for diagnostic in self.items {
            sink.report(diagnostic);
        }
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Writes each diagnostic as a `log::warn!` line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        log::warn!("{}: {}", diagnostic.endpoint, diagnostic);
    }
}
