use thiserror::Error;

/// The input could not be read as a supported document.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither Swagger `2.0` nor OpenAPI `3.*`.
    #[error("unsupported document version `{0}` (expected swagger 2.0 or openapi 3.x)")]
    UnsupportedVersion(String),

    #[error("document declares neither `swagger` nor `openapi`")]
    MissingVersion,
}

/// A `$ref` pointer that is malformed or dangles.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed `$ref` pointer `{0}`")]
    InvalidRefFormat(String),

    #[error("`$ref` target `{0}` does not exist in the document")]
    RefTargetNotFound(String),
}

/// Any failure while turning a document into the IR. Normalization is
/// all-or-nothing, so the first error aborts the run.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("parameter `{name}` has unknown location `{location}`")]
    UnknownParameterLocation { name: String, location: String },
}
