use std::fmt;

use indexmap::IndexMap;

use super::schemas::{Model, Property, Schema};

/// HTTP method, limited to the methods a reference document covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Patch,
    Options,
}

impl HttpMethod {
    /// Discovery order within a path.
    pub const ALL: [HttpMethod; 6] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of an operation: (path template, method).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationKey {
    pub path: String,
    pub method: HttpMethod,
}

impl OperationKey {
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }
}

impl fmt::Display for OperationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// A security requirement: map of scheme name → required scopes.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// One HTTP method on one path template.
#[derive(Debug, Clone, Default)]
pub struct Operation {
    pub operation_id: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, Response>,
    pub security: Vec<SecurityRequirement>,
    pub deprecated: bool,
}

impl Operation {
    /// The single body parameter, if there is exactly one.
    pub fn body_parameter(&self) -> Option<&Parameter> {
        let mut bodies = self
            .parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Body);
        match (bodies.next(), bodies.next()) {
            (Some(body), None) => Some(body),
            _ => None,
        }
    }

    pub fn has_payload(&self) -> bool {
        self.parameters.iter().any(|p| {
            matches!(
                p.location,
                ParameterLocation::Body | ParameterLocation::Form
            )
        })
    }
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Body,
    Header,
    Form,
    Query,
    Path,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Body => "body",
            ParameterLocation::Header => "header",
            ParameterLocation::Form => "formData",
            ParameterLocation::Query => "query",
            ParameterLocation::Path => "path",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub description: Option<String>,
    pub schema: ParameterSchema,
}

/// How a parameter's type is described.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSchema {
    /// Body parameters carry a full model.
    Body(Model),
    /// Every other location describes its type inline.
    Inline(Property),
}

/// A resolved response.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub description: String,
    pub schema: Option<Schema>,
    pub example: Option<serde_json::Value>,
}
