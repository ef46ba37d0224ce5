use serde_json::Value;

use crate::error::ResolveError;
use crate::model::{Schema, SchemaKind};

use super::ref_resolver::RefResolver;

/// Type used wherever the shape is absent or not understood.
pub const DYNAMIC_TYPE: &str = "any";

/// Project a schema onto a TypeScript type expression.
///
/// Absent and unrecognized schemas degrade to [`DYNAMIC_TYPE`]; only a
/// reference that does not resolve is an error.
pub fn project_type(
    schema: Option<&Schema>,
    resolver: &RefResolver<'_>,
) -> Result<String, ResolveError> {
    let Some(schema) = schema else {
        return Ok(DYNAMIC_TYPE.to_string());
    };

    Ok(match &schema.kind {
        SchemaKind::Integer => "number".to_string(),
        SchemaKind::Number { enum_values } => scalar("number", enum_values),
        SchemaKind::Boolean { enum_values } => scalar("boolean", enum_values),
        SchemaKind::String { enum_values } => scalar("string", enum_values),
        SchemaKind::Array { items } => format!("({})[]", project_type(Some(items), resolver)?),
        SchemaKind::Object {
            additional_properties: Some(value),
            ..
        } => format!("{{[k: string]: ({})}}", project_type(Some(value), resolver)?),
        SchemaKind::Object {
            additional_properties: None,
            ..
        } => format!("{{[k: string]: {DYNAMIC_TYPE}}}"),
        SchemaKind::Ref(ref_path) => resolver.resolve(ref_path)?.name,
        SchemaKind::Unknown => DYNAMIC_TYPE.to_string(),
    })
}

/// A scalar keyword, or the union of its enum literals in declared order.
fn scalar(keyword: &str, enum_values: &[Value]) -> String {
    if enum_values.is_empty() {
        return keyword.to_string();
    }
    enum_values
        .iter()
        .map(|v| match v {
            Value::String(s) => format!("\"{s}\""),
            other => format!("\"{other}\""),
        })
        .collect::<Vec<_>>()
        .join(" | ")
}
