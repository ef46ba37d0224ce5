use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level project configuration loaded from `.oair.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OairConfig {
    pub input: String,
    pub mode: Mode,
    pub swagger_out_dir: String,
    pub src_out_dir: String,
    /// Restrict writing to these output paths. Empty means no restriction.
    pub filter: Vec<String>,
    pub normalize: NormalizeConfig,
}

impl Default for OairConfig {
    fn default() -> Self {
        Self {
            input: "swagger.json".to_string(),
            mode: Mode::Both,
            swagger_out_dir: "swagger".to_string(),
            src_out_dir: "src".to_string(),
            filter: Vec::new(),
            normalize: NormalizeConfig::default(),
        }
    }
}

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Split IR JSON files only.
    Json,
    /// TypeScript sources only.
    Ts,
    Both,
}

impl Mode {
    pub fn emits_json(self) -> bool {
        matches!(self, Mode::Json | Mode::Both)
    }

    pub fn emits_ts(self) -> bool {
        matches!(self, Mode::Ts | Mode::Both)
    }
}

/// Settings threaded through every normalization step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Directory under the source root holding every generated API.
    pub api_root: String,
    pub api_name: String,
    /// Import alias prefix, e.g. `@` for `@/api/petstore/definitions/Pet`.
    pub package_root: String,
    /// Regex replacement applied to `{param}` placeholders when a URL path
    /// becomes a directory name.
    pub path_param_replace_value: String,
    /// Overrides the document's base path.
    pub base_path: Option<String>,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            api_root: "api".to_string(),
            api_name: "api".to_string(),
            package_root: "@".to_string(),
            path_param_replace_value: "_$1".to_string(),
            base_path: None,
        }
    }
}

impl NormalizeConfig {
    /// Import path of a generated definition module.
    pub fn definition_import(&self, name: &str) -> String {
        format!(
            "{}/{}/{}/definitions/{}",
            self.package_root, self.api_root, self.api_name, name
        )
    }

    /// Import path of a per-API utility module such as `apiContext`.
    pub fn api_util_import(&self, name: &str) -> String {
        format!(
            "{}/{}/{}/utils/{}",
            self.package_root, self.api_root, self.api_name, name
        )
    }

    /// Import path of a utility shared by every API under `api_root`.
    pub fn shared_util_import(&self, name: &str) -> String {
        format!("{}/{}/utils/{}", self.package_root, self.api_root, name)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oair.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OairConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: OairConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oair configuration
input: swagger.json
mode: both              # json | ts | both
swagger_out_dir: swagger
src_out_dir: src
filter: []              # restrict writing to these output paths

normalize:
  api_root: api
  api_name: api
  package_root: "@"
  path_param_replace_value: "_$1"
  # base_path: /v1
"#
}
