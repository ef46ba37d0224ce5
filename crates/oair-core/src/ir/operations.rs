use indexmap::IndexMap;
use serde::Serialize;

use crate::model::HttpMethod;
use crate::transform::ref_collector::TsRefs;

/// Where a parameter travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
    Body,
    FormData,
}

impl ParameterLocation {
    /// Parse the `in` keyword of a parameter.
    pub fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(ParameterLocation::Path),
            "query" => Some(ParameterLocation::Query),
            "header" => Some(ParameterLocation::Header),
            "cookie" => Some(ParameterLocation::Cookie),
            "body" => Some(ParameterLocation::Body),
            "formData" => Some(ParameterLocation::FormData),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Path => "path",
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Cookie => "cookie",
            ParameterLocation::Body => "body",
            ParameterLocation::FormData => "formData",
        }
    }
}

/// A parameter with its projected type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ts_type: String,
}

/// Which location buckets are non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterFlags {
    pub path: bool,
    pub query: bool,
    pub header: bool,
    pub cookie: bool,
    pub body: bool,
    pub form_data: bool,
}

impl ParameterFlags {
    pub fn set(&mut self, location: ParameterLocation) {
        match location {
            ParameterLocation::Path => self.path = true,
            ParameterLocation::Query => self.query = true,
            ParameterLocation::Header => self.header = true,
            ParameterLocation::Cookie => self.cookie = true,
            ParameterLocation::Body => self.body = true,
            ParameterLocation::FormData => self.form_data = true,
        }
    }
}

/// The type of a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyDescriptor {
    pub ts_type: String,
    pub required: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ts_type: String,
    /// The status key is the literal `default`.
    pub is_default: bool,
}

/// Everything a renderer needs to emit one API call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub operation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub deprecated: bool,
    pub path_key: String,
    pub method: HttpMethod,
    /// `method`, renamed where it collides with a reserved word.
    pub method_safe: String,
    pub capitalized_operation_id: String,
    pub capitalized_method: String,
    /// Path argument of the generated call: a template literal when path
    /// parameters exist, a quoted string otherwise.
    pub path_expr: String,
    /// Payload argument of the generated call; `None` sends nothing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_expr: Option<String>,
    /// Request config argument carrying query parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_expr: Option<String>,
    pub can_send_body: bool,
    /// Parameters grouped by location, keyed by the location's `in` name.
    pub structured_parameters: IndexMap<String, Vec<ClassifiedParameter>>,
    pub parameter_exists: ParameterFlags,
    /// Type of `params.data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BodyDescriptor>,
    /// Type of `params.formData` when it comes from a request body schema
    /// instead of individual form parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_data: Option<BodyDescriptor>,
    pub responses: IndexMap<String, NormalizedResponse>,
    pub ts_refs: TsRefs,
}
