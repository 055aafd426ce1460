use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0} (expected 2.0)")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid reference format: {0}")]
    InvalidRefFormat(String),

    #[error("reference target not found: {0}")]
    RefTargetNotFound(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Build-wide failures. Any of these aborts the document before output.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("language {0} is not supported at the moment")]
    UnsupportedLanguage(String),

    #[error("no example template available for supported language {0}")]
    MissingTemplateResource(String),

    #[error("failed to render {language} example for {operation}: {message}")]
    Template {
        language: String,
        operation: String,
        message: String,
    },

    #[error("specification contains no operations")]
    NoOperations,

    #[error("no target languages configured")]
    NoLanguages,
}
