//! Cross-check of the type model against the JSON spec.
//!
//! Every endpoint that names a request type is flattened and compared with
//! its JSON spec entry on path parameters, query parameters and body.
//! Mismatches are soft: they become [`Diagnostic`]s and processing moves on.
//! A missing definition or JSON spec entry aborts the whole pass.

pub mod diagnostics;

pub use diagnostics::{Category, Diagnostic, DiagnosticSink, Diagnostics, LogSink, Mismatch};

use indexmap::IndexSet;

use crate::error::ReconcileError;
use crate::json_spec::{JsonSpec, JsonSpecMap};
use crate::model::Model;
use crate::resolve::{BodyMerge, FlattenedProperties, PropertyResolver};

/// Options for a reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub body_merge: BodyMerge,
}

/// Reconcile `model` against `specs` with default options.
///
/// Returns the model unchanged so the pass can sit inside a larger pipeline.
pub fn reconcile<'m>(
    model: &'m Model,
    specs: &JsonSpecMap,
    sink: &mut dyn DiagnosticSink,
) -> Result<&'m Model, ReconcileError> {
    reconcile_with_options(model, specs, sink, &ReconcileOptions::default())
}

/// Reconcile with explicit options.
///
/// Diagnostics are buffered and only handed to `sink` once every endpoint
/// has been checked; on error the sink receives nothing.
pub fn reconcile_with_options<'m>(
    model: &'m Model,
    specs: &JsonSpecMap,
    sink: &mut dyn DiagnosticSink,
    options: &ReconcileOptions,
) -> Result<&'m Model, ReconcileError> {
    let resolver = PropertyResolver::with_body_merge(model, options.body_merge);
    let mut found = Diagnostics::new();
    let mut checked = 0usize;

    for endpoint in &model.endpoints {
        let Some(request) = endpoint.request.as_deref() else {
            continue;
        };
        log::debug!("reconciling {} ({request})", endpoint.name);

        let props = resolver.resolve(request)?;
        let spec = specs
            .get(&endpoint.name)
            .ok_or_else(|| ReconcileError::SpecNotFound(endpoint.name.clone()))?;

        for mismatch in compare(&props, spec) {
            found.push(Diagnostic {
                endpoint: endpoint.name.clone(),
                request: request.to_string(),
                mismatch,
            });
        }
        checked += 1;
    }

    log::info!("reconciled {checked} endpoint(s), {} mismatch(es)", found.len());
    found.drain_into(sink);
    Ok(model)
}

/// Compare one flattened request with its JSON spec entry.
///
/// Order: path (model side, then spec side), query (same), body.
pub fn compare(props: &FlattenedProperties, spec: &JsonSpec) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    let parts = spec.path_parts();
    let (model_only, spec_only) = symmetric_difference(&props.path, &parts);
    mismatches.extend(model_only.map(|name| Mismatch::PathMissingFromSpec { name }));
    mismatches.extend(spec_only.map(|name| Mismatch::PathMissingFromModel { name }));

    if let Some(params) = spec.query_params() {
        let (model_only, spec_only) = symmetric_difference(&props.query, &params);
        mismatches.extend(model_only.map(|name| Mismatch::QueryMissingFromSpec { name }));
        mismatches.extend(spec_only.map(|name| Mismatch::QueryMissingFromModel { name }));
    }

    if props.body.is_present() && spec.body.is_none() {
        mismatches.push(Mismatch::BodyMissingFromSpec);
    } else if !props.body.is_present() && spec.body_required() {
        mismatches.push(Mismatch::BodyMissingFromModel);
    }

    mismatches
}

/// Names only in `model`, and names only in `spec`, each in set order.
fn symmetric_difference<'a>(
    model: &'a IndexSet<String>,
    spec: &'a IndexSet<&'a str>,
) -> (
    impl Iterator<Item = String> + 'a,
    impl Iterator<Item = String> + 'a,
) {
    let model_only = model
        .iter()
        .filter(|name| !spec.contains(name.as_str()))
        .cloned();
    let spec_only = spec
        .iter()
        .filter(|name| !model.contains(**name))
        .map(|name| name.to_string());
    (model_only, spec_only)
}
