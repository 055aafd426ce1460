pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod spec;

use crate::error::ParseError;
use spec::SwaggerSpec;

/// Parse a Swagger spec from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

/// Parse a Swagger spec from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    let spec: SwaggerSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    Ok(spec)
}

fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if spec.swagger != "2.0" {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
