//! The dialect-independent API model.
//!
//! Both the Swagger 2.0 and the OpenAPI 3.x front-ends translate into these
//! types, so normalization only ever sees one representation.

pub mod operation;
pub mod schema;

use indexmap::IndexMap;

pub use operation::{
    BodyEncoding, HttpMethod, Operation, Parameter, PathItem, RequestBody, Response,
};
pub use schema::{Schema, SchemaKind};

/// A parsed API document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spec {
    pub title: String,
    pub version: String,
    /// Legacy `host`.
    pub host: Option<String>,
    /// Legacy `schemes`.
    pub schemes: Vec<String>,
    /// Legacy `basePath`.
    pub base_path: Option<String>,
    /// Server URLs with variable defaults substituted.
    pub servers: Vec<String>,
    pub paths: IndexMap<String, PathItem>,
    /// Reusable schemas (`definitions` or `components.schemas`).
    pub schemas: IndexMap<String, Schema>,
}
