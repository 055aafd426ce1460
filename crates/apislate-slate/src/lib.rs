pub mod assembler;
pub mod descriptions;
pub mod error;
pub mod examples;
pub mod generator;
pub mod properties;
pub mod snippets;
pub mod type_resolver;

pub use assembler::{BuildReport, DocumentAssembler};
pub use descriptions::{DescriptionSource, DirectoryDescriptions, NoDescriptions};
pub use generator::SlateGenerator;
pub use snippets::language::Language;
pub use snippets::templates::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};
