use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;

use super::language::Language;

/// Supplies the example template text for a language.
pub trait TemplateSource {
    /// `None` when no template exists for `language`.
    fn template_for(&self, language: Language) -> Option<Cow<'static, str>>;
}

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn template_for(&self, language: Language) -> Option<Cow<'static, str>> {
        let text = match language {
            Language::Java => include_str!("../../templates/java_api_example.j2"),
            Language::Python => include_str!("../../templates/python_api_example.j2"),
            Language::Php => include_str!("../../templates/php_api_example.j2"),
        };
        Some(Cow::Borrowed(text))
    }
}

/// Templates read from `{dir}/{language}_api_example.j2`, optionally
/// falling back to the embedded set for languages the folder lacks.
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    dir: PathBuf,
    fallback: bool,
}

impl DirectoryTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fallback: true,
        }
    }

    /// Only use templates present in the folder.
    pub fn strict(mut self) -> Self {
        self.fallback = false;
        self
    }
}

impl TemplateSource for DirectoryTemplates {
    fn template_for(&self, language: Language) -> Option<Cow<'static, str>> {
        let path = self.dir.join(format!("{}.j2", language.template_name()));
        match fs::read_to_string(&path) {
            Ok(text) => {
                log::debug!("using example template {}", path.display());
                Some(Cow::Owned(text))
            }
            Err(err) if self.fallback => {
                log::debug!("{}: {err}; using built-in template", path.display());
                EmbeddedTemplates.template_for(language)
            }
            Err(err) => {
                log::debug!("{}: {err}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_covers_supported_languages() {
        for language in Language::SUPPORTED {
            let text = EmbeddedTemplates.template_for(language).unwrap();
            assert!(text.contains("nickname"), "{language} template");
        }
    }

    #[test]
    fn test_directory_override_and_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("java_api_example.j2"), "custom {{ nickname }}").unwrap();

        let templates = DirectoryTemplates::new(dir.path());
        assert_eq!(
            templates.template_for(Language::Java).unwrap(),
            "custom {{ nickname }}"
        );
        assert!(templates.template_for(Language::Php).is_some());

        let strict = DirectoryTemplates::new(dir.path()).strict();
        assert!(strict.template_for(Language::Php).is_none());
    }
}
