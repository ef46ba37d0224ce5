pub mod adapt;
pub mod openapi;
pub mod schema;
pub mod server;
pub mod swagger;

use serde::Deserialize;

use crate::error::{ParseError, ResolveError};
use crate::model::Spec;
use openapi::OpenApiSpec;
use swagger::SwaggerSpec;

/// Document metadata shared by both dialects.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub version: String,
}

/// A parsed document in either supported dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiDocument {
    Swagger(SwaggerSpec),
    OpenApi(OpenApiSpec),
}

impl ApiDocument {
    /// The declared `swagger` or `openapi` version string.
    pub fn version(&self) -> &str {
        match self {
            ApiDocument::Swagger(s) => &s.swagger,
            ApiDocument::OpenApi(s) => &s.openapi,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ApiDocument::Swagger(s) => &s.info.title,
            ApiDocument::OpenApi(s) => &s.info.title,
        }
    }

    /// Translate into the dialect-independent model.
    pub fn to_spec(&self) -> Result<Spec, ResolveError> {
        match self {
            ApiDocument::Swagger(s) => adapt::swagger_to_spec(s),
            ApiDocument::OpenApi(s) => adapt::openapi_to_spec(s),
        }
    }
}

/// Just enough of a document to tell the dialects apart.
#[derive(Deserialize)]
struct VersionProbe {
    swagger: Option<String>,
    openapi: Option<String>,
}

enum Dialect {
    Swagger,
    OpenApi,
}

/// Parse a Swagger/OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<ApiDocument, ParseError> {
    let probe: VersionProbe = serde_yaml_ng::from_str(input)?;
    Ok(match detect_dialect(probe)? {
        Dialect::Swagger => ApiDocument::Swagger(serde_yaml_ng::from_str(input)?),
        Dialect::OpenApi => ApiDocument::OpenApi(serde_yaml_ng::from_str(input)?),
    })
}

/// Parse a Swagger/OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<ApiDocument, ParseError> {
    let probe: VersionProbe = serde_json::from_str(input)?;
    Ok(match detect_dialect(probe)? {
        Dialect::Swagger => ApiDocument::Swagger(serde_json::from_str(input)?),
        Dialect::OpenApi => ApiDocument::OpenApi(serde_json::from_str(input)?),
    })
}

fn detect_dialect(probe: VersionProbe) -> Result<Dialect, ParseError> {
    match (probe.swagger, probe.openapi) {
        (_, Some(v)) if v.starts_with("3.") => Ok(Dialect::OpenApi),
        (Some(v), None) if v.starts_with("2.") => Ok(Dialect::Swagger),
        (_, Some(v)) | (Some(v), None) => Err(ParseError::UnsupportedVersion(v)),
        (None, None) => Err(ParseError::MissingVersion),
    }
}
