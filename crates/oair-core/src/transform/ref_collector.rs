use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::model::{Schema, SchemaKind};

use super::ref_resolver::RefResolver;

/// Referenced type name → import path.
pub type TsRefs = BTreeMap<String, String>;

/// Collect the references a schema's projected type depends on.
///
/// Follows the same recursion as the type projector: arrays into `items`,
/// objects into `additionalProperties`. Object `properties` are left to the
/// caller, which records each property's contribution separately.
pub fn collect_refs(
    schema: Option<&Schema>,
    resolver: &RefResolver<'_>,
) -> Result<TsRefs, ResolveError> {
    let Some(schema) = schema else {
        return Ok(TsRefs::new());
    };

    match &schema.kind {
        SchemaKind::Array { items } => collect_refs(Some(items), resolver),
        SchemaKind::Object {
            additional_properties,
            ..
        } => collect_refs(additional_properties.as_deref(), resolver),
        SchemaKind::Ref(ref_path) => {
            let resolved = resolver.resolve(ref_path)?;
            Ok(TsRefs::from([(resolved.name, resolved.import_path)]))
        }
        SchemaKind::Boolean { .. }
        | SchemaKind::Number { .. }
        | SchemaKind::Integer
        | SchemaKind::String { .. }
        | SchemaKind::Unknown => Ok(TsRefs::new()),
    }
}

/// Key-union of reference dictionaries. The same name always maps to the
/// same import path, so argument order does not matter.
pub fn union_refs(parts: impl IntoIterator<Item = TsRefs>) -> TsRefs {
    parts.into_iter().flatten().collect()
}
