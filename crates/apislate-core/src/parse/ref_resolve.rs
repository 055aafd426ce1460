use super::parameter::{Parameter, ParameterOrRef};
use super::response::{Response, ResponseOrRef};
use super::spec::SwaggerSpec;
use crate::error::ResolveError;

/// Resolves `#/parameters/*` and `#/responses/*` pointers against the
/// document's reusable sections. Schema references are left in place; the
/// specification model keeps them as named references.
pub struct RefResolver<'a> {
    spec: &'a SwaggerSpec,
}

impl<'a> RefResolver<'a> {
    pub fn new(spec: &'a SwaggerSpec) -> Self {
        Self { spec }
    }

    pub fn resolve_parameter(&self, param: &ParameterOrRef) -> Result<Parameter, ResolveError> {
        match param {
            ParameterOrRef::Parameter(p) => Ok(p.clone()),
            ParameterOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "parameters")?;
                self.spec
                    .parameters
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
            }
        }
    }

    pub fn resolve_response(&self, resp: &ResponseOrRef) -> Result<Response, ResolveError> {
        match resp {
            ResponseOrRef::Response(r) => Ok(r.clone()),
            ResponseOrRef::Ref { ref_path } => {
                let name = parse_ref_name(ref_path, "responses")?;
                self.spec
                    .responses
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
            }
        }
    }
}

/// Parse a `$ref` path like `#/definitions/Pet` and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    let stripped = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    Ok(name)
}

/// Extract the definition name from a schema `$ref`. Swagger tooling also
/// accepts bare names (`$ref: Pet`), so those pass through unchanged.
pub fn definition_name(ref_path: &str) -> Result<&str, ResolveError> {
    if ref_path.starts_with("#/") {
        parse_ref_name(ref_path, "definitions")
    } else if ref_path.is_empty() || ref_path.contains('/') {
        Err(ResolveError::InvalidRefFormat(ref_path.to_string()))
    } else {
        Ok(ref_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_definition_name() {
        assert_eq!(definition_name("#/definitions/Pet").unwrap(), "Pet");
        assert_eq!(definition_name("Pet").unwrap(), "Pet");
        assert!(definition_name("#/parameters/limit").is_err());
        assert!(definition_name("other.yaml#/Pet").is_err());
    }

    #[test]
    fn test_parse_ref_name_rejects_missing_section() {
        assert!(matches!(
            parse_ref_name("#/Pet", "definitions"),
            Err(ResolveError::InvalidRefFormat(_))
        ));
    }
}
