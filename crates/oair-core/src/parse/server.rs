use indexmap::IndexMap;
use serde::Deserialize;

/// A server URL variable. Only its default is substituted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerVariable {
    pub default: String,
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Server {
    pub url: String,

    #[serde(default)]
    pub variables: IndexMap<String, ServerVariable>,
}

impl Server {
    /// The URL with every `{variable}` replaced by its default value.
    pub fn resolved_url(&self) -> String {
        self.variables
            .iter()
            .fold(self.url.clone(), |url, (name, var)| {
                url.replace(&format!("{{{name}}}"), &var.default)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_url_substitutes_defaults() {
        let server: Server = serde_json::from_str(
            r#"{
                "url": "https://{region}.example.com/{version}",
                "variables": {
                    "region": {"default": "eu", "enum": ["eu", "us"]},
                    "version": {"default": "v2"}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(server.resolved_url(), "https://eu.example.com/v2");
    }

    #[test]
    fn test_resolved_url_without_variables() {
        let server: Server = serde_json::from_str(r#"{"url": "/api"}"#).unwrap();
        assert_eq!(server.resolved_url(), "/api");
    }
}
