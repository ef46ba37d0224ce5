use indexmap::IndexMap;
use serde::Serialize;

use super::operations::OperationDescriptor;
use super::schemas::NormalizedSchema;
use crate::transform::ref_collector::TsRefs;

/// The normalized, renderer-ready description of one API document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrSpec {
    pub title: String,
    pub version: String,
    /// Base URL every generated call is relative to.
    pub base_url: String,
    pub paths: IndexMap<String, PathRecord>,
    pub definitions: IndexMap<String, NormalizedSchema>,
}

/// Every operation declared under one URL path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRecord {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Keyed by lower-case method name.
    pub operations: IndexMap<String, OperationDescriptor>,
    /// Union of the operations' reference dictionaries.
    pub ts_refs: TsRefs,
}
