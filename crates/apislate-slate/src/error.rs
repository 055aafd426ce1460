use apislate_core::model::ParameterLocation;
use thiserror::Error;

/// A named reference that is missing from `definitions`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("reference to undefined definition {0}")]
pub struct DanglingReference(pub String);

impl DanglingReference {
    /// Label substituted for a type that could not be resolved.
    pub fn placeholder(&self) -> String {
        format!("{} (unresolved)", self.0)
    }
}

/// Failures isolated to one operation's section or one of its blocks.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("parameter type '{0}' not supported yet")]
    UnsupportedParameterLocation(ParameterLocation),

    #[error("example generator couldn't produce valid JSON: {0}")]
    ExampleSerialization(#[from] serde_json::Error),
}
