use indexmap::IndexMap;
use serde::Serialize;

use crate::transform::ref_collector::TsRefs;

/// How a renderer should declare a named schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaShape {
    /// An object with declared properties.
    Object,
    Array,
    /// A scalar restricted to literal values.
    Enum,
    /// Any other shape, declared as a type alias.
    Alias,
}

/// A reusable schema with every property projected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSchema {
    pub key: String,
    pub kind: SchemaShape,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Projection of the schema as a whole.
    pub ts_type: String,
    pub properties: IndexMap<String, NormalizedProperty>,
    /// Value type of the index signature, when the object declares one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties_ts_type: Option<String>,
    /// References this schema imports. Never contains `key` itself.
    pub ts_refs: TsRefs,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedProperty {
    pub ts_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ts_refs: TsRefs,
}
