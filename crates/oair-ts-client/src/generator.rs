use log::debug;
use oair_core::config::NormalizeConfig;
use oair_core::ir::IrSpec;
use oair_core::transform::path_template::path_directory;
use oair_core::{CodeGenerator, GeneratedFile};
use thiserror::Error;

use crate::emitters::{self, OBJECT_TO_FORM_DATA};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to load templates: {0}")]
    Environment(#[from] minijinja::Error),

    #[error("failed to render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Renders TypeScript definitions and one call module per path. Output
/// paths are relative to the source directory that `package_root` aliases.
pub struct TsClientGenerator;

impl CodeGenerator for TsClientGenerator {
    type Config = NormalizeConfig;
    type Error = RenderError;

    fn generate(
        &self,
        ir: &IrSpec,
        config: &NormalizeConfig,
    ) -> Result<Vec<GeneratedFile>, RenderError> {
        let env = emitters::environment()?;
        let api_dir = format!("{}/{}", config.api_root, config.api_name);
        let mut files = Vec::new();

        for (name, schema) in &ir.definitions {
            let path = format!("{api_dir}/definitions/{name}/index.d.ts");
            debug!("rendering {path}");
            let content = emitters::definitions::emit_definition(&env, schema);
            files.push(rendered(path, content)?);
        }

        for (key, record) in &ir.paths {
            let dir = path_directory(
                key,
                record.base_path.as_deref(),
                &config.path_param_replace_value,
            );
            let path = if dir.is_empty() {
                format!("{api_dir}/paths/index.ts")
            } else {
                format!("{api_dir}/paths/{dir}/index.ts")
            };
            debug!("rendering {path}");
            let content = emitters::paths::emit_path(&env, record);
            files.push(rendered(path, content)?);
        }

        let path = format!("{api_dir}/utils/apiContext.ts");
        let content = emitters::api_context::emit_api_context(&env, &ir.base_url);
        files.push(rendered(path, content)?);

        files.push(GeneratedFile {
            path: format!("{}/utils/objectToFormData.ts", config.api_root),
            content: OBJECT_TO_FORM_DATA.to_string(),
        });

        Ok(files)
    }
}

fn rendered(
    path: String,
    content: Result<String, minijinja::Error>,
) -> Result<GeneratedFile, RenderError> {
    match content {
        Ok(content) => Ok(GeneratedFile { path, content }),
        Err(source) => Err(RenderError::Render { path, source }),
    }
}
