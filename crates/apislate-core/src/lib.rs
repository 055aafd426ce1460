pub mod config;
pub mod error;
pub mod markup;
pub mod model;
pub mod parse;
pub mod transform;

pub use error::GeneratorError;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for document generators that produce files from a specification.
pub trait DocumentGenerator {
    fn generate(
        &self,
        spec: &model::Specification,
    ) -> Result<Vec<GeneratedFile>, GeneratorError>;
}
