use indexmap::IndexMap;

use crate::config::NormalizeConfig;
use crate::error::ResolveError;
use crate::model::Schema;

/// Prefixes under which reusable schemas live in the two dialects.
const SCHEMA_REF_PREFIXES: [&str; 2] = ["#/components/schemas/", "#/definitions/"];

/// A schema reference resolved to its bare name and generated import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRef {
    pub name: String,
    pub import_path: String,
}

/// Resolves schema pointers against the document's reusable schemas.
///
/// Holds the normalization config so every recursive projection reads the
/// same import roots without touching ambient state.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    config: &'a NormalizeConfig,
    schemas: &'a IndexMap<String, Schema>,
}

impl<'a> RefResolver<'a> {
    pub fn new(config: &'a NormalizeConfig, schemas: &'a IndexMap<String, Schema>) -> Self {
        Self { config, schemas }
    }

    pub fn config(&self) -> &'a NormalizeConfig {
        self.config
    }

    /// Resolve `#/components/schemas/NAME` or `#/definitions/NAME`.
    pub fn resolve(&self, ref_path: &str) -> Result<ResolvedRef, ResolveError> {
        let name = parse_ref_name(ref_path)?;
        if !self.schemas.contains_key(name) {
            return Err(ResolveError::RefTargetNotFound(ref_path.to_string()));
        }
        Ok(ResolvedRef {
            name: name.to_string(),
            import_path: self.config.definition_import(name),
        })
    }
}

fn parse_ref_name(ref_path: &str) -> Result<&str, ResolveError> {
    SCHEMA_REF_PREFIXES
        .iter()
        .find_map(|prefix| ref_path.strip_prefix(prefix))
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))
}
