use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::config::NormalizeConfig;
use crate::error::TransformError;
use crate::ir::IrSpec;
use crate::model::Spec;

use super::path_normalizer::normalize_path;
use super::ref_resolver::RefResolver;
use super::schema_normalizer::normalize_schema;

/// Normalize a parsed document into the IR.
///
/// Either every path and schema normalizes or the first fatal error is
/// returned; there is no partial result.
pub fn normalize(spec: &Spec, config: &NormalizeConfig) -> Result<IrSpec, TransformError> {
    let resolver = RefResolver::new(config, &spec.schemas);
    let base_path = config
        .base_path
        .as_deref()
        .or(spec.base_path.as_deref())
        .filter(|p| !p.is_empty());

    let mut paths = IndexMap::with_capacity(spec.paths.len());
    for (key, item) in &spec.paths {
        debug!("normalizing path {key}");
        paths.insert(key.clone(), normalize_path(key, item, base_path, &resolver)?);
    }

    let mut seen = HashSet::new();
    for op in paths.values().flat_map(|p| p.operations.values()) {
        if !seen.insert(op.operation_id.as_str()) {
            warn!(
                "duplicate operationId `{}` at {} {}",
                op.operation_id,
                op.method.as_str(),
                op.path_key
            );
        }
    }

    let mut definitions = IndexMap::with_capacity(spec.schemas.len());
    for (name, schema) in &spec.schemas {
        debug!("normalizing schema {name}");
        definitions.insert(name.clone(), normalize_schema(name, schema, &resolver)?);
    }

    Ok(IrSpec {
        title: spec.title.clone(),
        version: spec.version.clone(),
        base_url: base_url(spec, config),
        paths,
        definitions,
    })
}

/// The first server URL, or one composed from the legacy host fields.
pub fn base_url(spec: &Spec, config: &NormalizeConfig) -> String {
    if let Some(server) = spec.servers.first() {
        return server.clone();
    }

    let base_path = config
        .base_path
        .as_deref()
        .or(spec.base_path.as_deref())
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') {
                p.to_string()
            } else {
                format!("/{p}")
            }
        })
        .unwrap_or_else(|| "/".to_string());

    match &spec.host {
        Some(host) => {
            let scheme = if spec.schemes.iter().any(|s| s == "https") {
                "https"
            } else {
                "http"
            };
            format!("{scheme}://{host}{base_path}")
        }
        None => base_path,
    }
}
