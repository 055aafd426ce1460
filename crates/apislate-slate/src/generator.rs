use apislate_core::config::{DocumentOptions, PackageOptions, SlateConfig};
use apislate_core::model::Specification;
use apislate_core::{DocumentGenerator, GeneratedFile, GeneratorError};

use crate::assembler::{BuildReport, DocumentAssembler};
use crate::descriptions::{DescriptionSource, DirectoryDescriptions, NoDescriptions};
use crate::snippets::SnippetRenderer;
use crate::snippets::language::Language;
use crate::snippets::templates::{DirectoryTemplates, EmbeddedTemplates, TemplateSource};

/// File name of the generated document.
pub const OUTPUT_FILE: &str = "slate.md";

/// Slate markdown generator.
pub struct SlateGenerator {
    languages: Vec<String>,
    document: DocumentOptions,
    packages: PackageOptions,
    templates: Box<dyn TemplateSource>,
    descriptions: Box<dyn DescriptionSource>,
}

impl SlateGenerator {
    /// Generator for `languages` with embedded templates and no
    /// hand-written descriptions.
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            document: DocumentOptions::default(),
            packages: PackageOptions::default(),
            templates: Box::new(EmbeddedTemplates),
            descriptions: Box::new(NoDescriptions),
        }
    }

    pub fn from_config(config: &SlateConfig) -> Self {
        let mut generator = Self::new(config.languages.iter().cloned())
            .with_document_options(config.document.clone())
            .with_packages(config.packages.clone());
        if let Some(dir) = &config.templates {
            generator = generator.with_templates(DirectoryTemplates::new(dir));
        }
        if let Some(dir) = &config.descriptions {
            generator = generator.with_descriptions(DirectoryDescriptions::new(dir));
        }
        generator
    }

    pub fn with_document_options(mut self, document: DocumentOptions) -> Self {
        self.document = document;
        self
    }

    pub fn with_packages(mut self, packages: PackageOptions) -> Self {
        self.packages = packages;
        self
    }

    pub fn with_templates(mut self, templates: impl TemplateSource + 'static) -> Self {
        self.templates = Box::new(templates);
        self
    }

    pub fn with_descriptions(mut self, descriptions: impl DescriptionSource + 'static) -> Self {
        self.descriptions = Box::new(descriptions);
        self
    }

    /// Build the markdown text. Languages are validated first, so an
    /// unsupported one fails before anything is rendered.
    pub fn build(&self, spec: &Specification) -> Result<(String, BuildReport), GeneratorError> {
        let languages = Language::parse_list(self.languages.as_slice())?;
        let renderer = SnippetRenderer::new(self.templates.as_ref(), &self.packages);
        DocumentAssembler::new(
            spec,
            &languages,
            &self.document,
            renderer,
            self.descriptions.as_ref(),
        )
        .build_markdown()
    }
}

impl DocumentGenerator for SlateGenerator {
    fn generate(&self, spec: &Specification) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let (content, report) = self.build(spec)?;
        if !report.skipped.is_empty() {
            log::warn!(
                "{} operation(s) left out of the document",
                report.skipped.len()
            );
        }
        Ok(vec![GeneratedFile {
            path: OUTPUT_FILE.to_string(),
            content,
        }])
    }
}
