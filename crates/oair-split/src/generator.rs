use log::debug;
use oair_core::config::NormalizeConfig;
use oair_core::ir::IrSpec;
use oair_core::transform::path_template::path_directory;
use oair_core::{CodeGenerator, GeneratedFile};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

const SPEC_FILE: &str = "spec.json";

#[derive(Debug, Error)]
pub enum SplitError {
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Emits the IR as `spec.json` files: one for the whole document, one per
/// path and one per definition.
pub struct JsonSplitGenerator;

impl CodeGenerator for JsonSplitGenerator {
    type Config = NormalizeConfig;
    type Error = SplitError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &NormalizeConfig,
    ) -> Result<Vec<GeneratedFile>, SplitError> {
        let api = config.api_name.as_str();
        let mut files = Vec::with_capacity(1 + ir.paths.len() + ir.definitions.len());

        files.push(json_file(join(&[api, SPEC_FILE]), ir)?);

        for (key, record) in &ir.paths {
            let dir = path_directory(
                key,
                record.base_path.as_deref(),
                &config.path_param_replace_value,
            );
            debug!("splitting path {key} into {dir}");
            files.push(json_file(join(&[api, "paths", &dir, SPEC_FILE]), record)?);
        }

        for (name, schema) in &ir.definitions {
            files.push(json_file(
                join(&[api, "definitions", name, SPEC_FILE]),
                schema,
            )?);
        }

        Ok(files)
    }
}

/// Serialize with recursively sorted keys, two-space indentation and a
/// trailing newline.
pub fn to_stable_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    sort_keys(&mut value);
    let mut out = serde_json::to_string_pretty(&value)?;
    out.push('\n');
    Ok(out)
}

fn sort_keys(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.sort_keys();
            map.values_mut().for_each(sort_keys);
        }
        Value::Array(items) => items.iter_mut().for_each(sort_keys),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

/// Join path segments, skipping empty ones.
fn join(segments: &[&str]) -> String {
    segments
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("/")
}

fn json_file<T: Serialize>(path: String, value: &T) -> Result<GeneratedFile, SplitError> {
    match to_stable_json(value) {
        Ok(content) => Ok(GeneratedFile { path, content }),
        Err(source) => Err(SplitError::Serialize { path, source }),
    }
}
