//! Swagger 2.0 document types.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::HttpMethod;

use super::schema::{SchemaOrRef, TypeSet};
use super::Info;

/// Top-level Swagger 2.0 specification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwaggerSpec {
    pub swagger: String,

    #[serde(default)]
    pub info: Info,

    pub host: Option<String>,

    #[serde(rename = "basePath")]
    pub base_path: Option<String>,

    #[serde(default)]
    pub schemes: Vec<String>,

    #[serde(default)]
    pub paths: IndexMap<String, SwaggerPathItem>,

    #[serde(default)]
    pub definitions: IndexMap<String, SchemaOrRef>,

    /// Reusable parameters, referenced as `#/parameters/NAME`.
    #[serde(default)]
    pub parameters: IndexMap<String, SwaggerParameter>,

    /// Reusable responses, referenced as `#/responses/NAME`.
    #[serde(default)]
    pub responses: IndexMap<String, SwaggerResponse>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SwaggerPathItem {
    #[serde(default)]
    pub parameters: Vec<SwaggerParameterOrRef>,

    pub get: Option<SwaggerOperation>,
    pub put: Option<SwaggerOperation>,
    pub post: Option<SwaggerOperation>,
    pub delete: Option<SwaggerOperation>,
    pub options: Option<SwaggerOperation>,
    pub head: Option<SwaggerOperation>,
    pub patch: Option<SwaggerOperation>,
}

impl SwaggerPathItem {
    /// Declared operations in method order.
    pub fn operations(&self) -> Vec<(HttpMethod, &SwaggerOperation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwaggerOperation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,

    pub summary: Option<String>,

    pub description: Option<String>,

    #[serde(default)]
    pub parameters: Vec<SwaggerParameterOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, SwaggerResponseOrRef>,

    pub deprecated: Option<bool>,
}

/// A Swagger parameter. Body parameters carry `schema`; every other location
/// describes its type inline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwaggerParameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    pub schema: Option<SchemaOrRef>,

    #[serde(rename = "type")]
    pub schema_type: Option<TypeSet>,

    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SwaggerParameterOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Parameter(SwaggerParameter),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct SwaggerResponse {
    pub description: Option<String>,

    pub schema: Option<SchemaOrRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SwaggerResponseOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Response(SwaggerResponse),
}
