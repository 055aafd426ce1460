//! Per-language client example snippets.

pub mod context;
pub mod language;
pub mod templates;
pub mod type_mapper;

use std::collections::HashMap;

use apislate_core::GeneratorError;
use apislate_core::config::PackageOptions;
use apislate_core::model::{OperationKey, Specification};
use indexmap::IndexMap;
use minijinja::Environment;

use self::context::OperationContextBuilder;
use self::language::Language;
use self::templates::TemplateSource;

/// Rendered snippets keyed by operation, then by language in request order.
pub type SnippetCache = HashMap<OperationKey, IndexMap<Language, String>>;

/// Renders one example snippet per operation per language.
pub struct SnippetRenderer<'a> {
    templates: &'a dyn TemplateSource,
    packages: &'a PackageOptions,
}

impl<'a> SnippetRenderer<'a> {
    pub fn new(templates: &'a dyn TemplateSource, packages: &'a PackageOptions) -> Self {
        Self {
            templates,
            packages,
        }
    }

    /// Render every operation for one language.
    pub fn render_language(
        &self,
        spec: &Specification,
        language: Language,
    ) -> Result<HashMap<OperationKey, String>, GeneratorError> {
        let source = self
            .templates
            .template_for(language)
            .ok_or_else(|| GeneratorError::MissingTemplateResource(language.to_string()))?;
        let name = language.template_name();

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        let tmpl = env
            .template_from_named_str(name.as_str(), &*source)
            .map_err(|e| GeneratorError::Template {
                language: language.to_string(),
                operation: name.clone(),
                message: e.to_string(),
            })?;

        let builder = OperationContextBuilder::new(spec, language, self.packages);
        let mut rendered = HashMap::new();
        for (key, op) in spec.operations() {
            let text = tmpl
                .render(builder.build(&key, op))
                .map_err(|e| GeneratorError::Template {
                    language: language.to_string(),
                    operation: key.to_string(),
                    message: e.to_string(),
                })?;
            rendered.insert(key, text.trim_end().to_string());
        }
        log::debug!("rendered {} {language} examples", rendered.len());
        Ok(rendered)
    }

    /// Render every operation for each language, in `languages` order.
    pub fn render_all(
        &self,
        spec: &Specification,
        languages: &[Language],
    ) -> Result<SnippetCache, GeneratorError> {
        let mut cache = SnippetCache::new();
        for &language in languages {
            for (key, text) in self.render_language(spec, language)? {
                cache.entry(key).or_default().insert(language, text);
            }
        }
        Ok(cache)
    }
}
