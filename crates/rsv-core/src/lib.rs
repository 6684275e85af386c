pub mod config;
pub mod error;
pub mod json_spec;
pub mod model;
pub mod reconcile;
pub mod resolve;

pub use reconcile::{
    Category, Diagnostic, DiagnosticSink, Diagnostics, LogSink, Mismatch, ReconcileOptions,
    reconcile, reconcile_with_options,
};
pub use resolve::{BodyMerge, BodyState, FlattenedProperties, PropertyResolver};
