//! OpenAPI 3.x document types. Only what the adapter reads is modelled.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::HttpMethod;

use super::Info;
use super::schema::SchemaOrRef;
use super::server::Server;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,

    #[serde(default)]
    pub info: Info,

    #[serde(default)]
    pub servers: Vec<Server>,

    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    pub components: Option<Components>,
}

/// Reusable objects addressed by `#/components/{kind}/NAME`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub responses: IndexMap<String, Ref<Response>>,

    #[serde(default)]
    pub parameters: IndexMap<String, Ref<Parameter>>,

    #[serde(rename = "requestBodies", default)]
    pub request_bodies: IndexMap<String, Ref<RequestBody>>,
}

/// Either an inline object or a `$ref` to one under `components`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Ref<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Inline(T),
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathItem {
    /// Shared by every operation below unless redeclared.
    #[serde(default)]
    pub parameters: Vec<Ref<Parameter>>,

    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub options: Option<Operation>,
    pub head: Option<Operation>,
    pub patch: Option<Operation>,
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Declared operations in method order.
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Ref<Parameter>>,
    pub request_body: Option<Ref<RequestBody>>,
    #[serde(default)]
    pub responses: IndexMap<String, Ref<Response>>,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<SchemaOrRef>,
}

/// Media type → payload, e.g. `application/json`.
pub type Content = IndexMap<String, MediaType>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub description: Option<String>,
    #[serde(default)]
    pub content: Content,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_or_inline() {
        let params: Vec<Ref<Parameter>> = serde_json::from_str(
            r##"[
                {"$ref": "#/components/parameters/Limit"},
                {"name": "q", "in": "query", "schema": {"type": "string"}}
            ]"##,
        )
        .unwrap();
        assert!(matches!(&params[0], Ref::Ref { ref_path } if ref_path == "#/components/parameters/Limit"));
        assert!(matches!(&params[1], Ref::Inline(p) if p.name == "q" && !p.required));
    }

    #[test]
    fn test_path_item_operation_order() {
        let item: PathItem = serde_json::from_str(
            r#"{
                "post": {"responses": {}},
                "get": {"operationId": "list", "deprecated": true}
            }"#,
        )
        .unwrap();
        let ops = item.operations();
        assert_eq!(ops[0].0, HttpMethod::Get);
        assert!(ops[0].1.deprecated);
        assert_eq!(ops[1].0, HttpMethod::Post);
    }
}
