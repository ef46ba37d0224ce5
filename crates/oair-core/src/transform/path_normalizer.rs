use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::PathRecord;
use crate::model::PathItem;

use super::operation_normalizer::normalize_operation;
use super::ref_collector::union_refs;
use super::ref_resolver::RefResolver;

/// Normalize every operation under one path. `base_path` is recorded as-is
/// and prefixes the path's output directory.
pub fn normalize_path(
    key: &str,
    item: &PathItem,
    base_path: Option<&str>,
    resolver: &RefResolver<'_>,
) -> Result<PathRecord, TransformError> {
    let mut operations = IndexMap::with_capacity(item.operations.len());
    for (method, operation) in &item.operations {
        let descriptor = normalize_operation(key, *method, operation, resolver)?;
        operations.insert(method.as_str().to_string(), descriptor);
    }

    let ts_refs = union_refs(operations.values().map(|op| op.ts_refs.clone()));
    Ok(PathRecord {
        key: key.to_string(),
        base_path: base_path.map(str::to_string),
        operations,
        ts_refs,
    })
}
