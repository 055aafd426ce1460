use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Top-level project configuration loaded from `.apislate.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlateConfig {
    pub input: String,
    pub output: String,
    /// Target client languages, in tab order. Validated at build time so an
    /// unknown language fails before any output is written.
    pub languages: Vec<String>,
    pub document: DocumentOptions,
    pub packages: PackageOptions,
    /// Folder with hand-written definition and property descriptions.
    pub descriptions: Option<String>,
    /// Folder with `{language}_api_example.j2` templates overriding the
    /// built-in ones.
    pub templates: Option<String>,
}

impl Default for SlateConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "docs".to_string(),
            languages: vec!["java".to_string(), "python".to_string()],
            document: DocumentOptions::default(),
            packages: PackageOptions::default(),
            descriptions: None,
            templates: None,
        }
    }
}

/// Slate front-matter options.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentOptions {
    pub title: String,
    pub toc_footers: Vec<String>,
    pub includes: Vec<String>,
    pub search: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: "API Reference".to_string(),
            toc_footers: vec!["<a href='#'>Sign Up for a Developer Key</a>".to_string()],
            includes: vec!["errors".to_string()],
            search: true,
        }
    }
}

/// Package names bound into the example snippets. Unset values fall back to
/// each language's conventional default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageOptions {
    pub api_package: Option<String>,
    pub model_package: Option<String>,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".apislate.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SlateConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SlateConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# apislate configuration
input: swagger.yaml
output: docs
languages:            # java | python | php, in tab order
  - java
  - python

document:
  title: API Reference
  toc_footers:
    - <a href='#'>Sign Up for a Developer Key</a>
  includes:
    - errors
  search: true

packages: {}
  # api_package: io.swagger.client.api
  # model_package: io.swagger.client.model

# descriptions: docs/descriptions   # hand-written definition descriptions
# templates: docs/templates         # {language}_api_example.j2 overrides
"#
}
