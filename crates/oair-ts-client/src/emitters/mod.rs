pub mod api_context;
pub mod definitions;
pub mod paths;

use heck::{ToLowerCamelCase, ToPascalCase};
use minijinja::{AutoEscape, Environment};
use oair_core::transform::TsRefs;
use serde::Serialize;

/// Static helper shipped next to the generated calls.
pub const OBJECT_TO_FORM_DATA: &str = include_str!("../../templates/objectToFormData.ts");

/// Template environment with every renderer template registered.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(
        "definition.d.ts.j2",
        include_str!("../../templates/definition.d.ts.j2"),
    )?;
    env.add_template("path.ts.j2", include_str!("../../templates/path.ts.j2"))?;
    env.add_template(
        "api_context.ts.j2",
        include_str!("../../templates/api_context.ts.j2"),
    )?;
    Ok(env)
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportContext {
    name: String,
    path: String,
}

/// One named import per reference, in name order.
pub(crate) fn import_contexts(refs: &TsRefs) -> Vec<ImportContext> {
    refs.iter()
        .map(|(name, path)| ImportContext {
            name: name.clone(),
            path: path.clone(),
        })
        .collect()
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A property key, quoted when it is not a bare identifier.
pub(crate) fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

/// A callable name for an operation id such as `pets.list`.
pub(crate) fn function_name(operation_id: &str) -> String {
    if is_identifier(operation_id) {
        operation_id.to_string()
    } else {
        operation_id.to_lower_camel_case()
    }
}

/// A type name prefix for an operation.
pub(crate) fn type_name(capitalized_operation_id: &str) -> String {
    if is_identifier(capitalized_operation_id) {
        capitalized_operation_id.to_string()
    } else {
        capitalized_operation_id.to_pascal_case()
    }
}
