use indexmap::IndexMap;
use serde::Serialize;

use super::schema::Schema;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }

    /// Whether a generated call for this method takes a request body.
    pub fn can_send_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// A declared parameter. The location is kept verbatim and classified later.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: String,
    pub required: bool,
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

/// How a request body travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyEncoding {
    Json,
    FormData,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub schema: Option<Schema>,
    pub required: bool,
    pub encoding: BodyEncoding,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub operation_id: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Keyed by status code or `default`.
    pub responses: IndexMap<String, Response>,
}

/// Operations declared under one URL path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathItem {
    pub operations: IndexMap<HttpMethod, Operation>,
}
