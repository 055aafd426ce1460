use std::fmt;
use std::str::FromStr;

use apislate_core::GeneratorError;
use apislate_core::model::NormalizedName;
use apislate_core::transform::name_normalizer::normalize_name;

/// Client languages with an example template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Java,
    Python,
    Php,
}

impl Language {
    pub const SUPPORTED: [Language; 3] = [Language::Java, Language::Python, Language::Php];

    /// Tab identifier, also the fenced-block language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Java => "java",
            Language::Python => "python",
            Language::Php => "php",
        }
    }

    pub fn template_name(&self) -> String {
        format!("{}_api_example", self.as_str())
    }

    pub fn default_api_package(&self) -> &'static str {
        match self {
            Language::Java => "io.swagger.client.api",
            Language::Python => "swagger_client",
            Language::Php => "Swagger\\Client\\Api",
        }
    }

    pub fn default_model_package(&self) -> &'static str {
        match self {
            Language::Java => "io.swagger.client.model",
            Language::Python => "swagger_client",
            Language::Php => "Swagger\\Client\\Model",
        }
    }

    pub fn method_name(&self, name: &NormalizedName) -> String {
        match self {
            Language::Python => name.snake_case.clone(),
            Language::Java | Language::Php => name.camel_case.clone(),
        }
    }

    pub fn variable_name(&self, name: &str) -> String {
        let normalized = normalize_name(name);
        match self {
            Language::Python => normalized.snake_case,
            Language::Java | Language::Php => normalized.camel_case,
        }
    }

    /// Parse a requested language list, keeping the first occurrence of
    /// each language.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Language>, GeneratorError> {
        let mut languages = Vec::with_capacity(names.len());
        for name in names {
            let language: Language = name.as_ref().parse()?;
            if languages.contains(&language) {
                log::warn!("language {language} requested more than once");
                continue;
            }
            languages.push(language);
        }
        if languages.is_empty() {
            return Err(GeneratorError::NoLanguages);
        }
        Ok(languages)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "java" => Ok(Language::Java),
            "python" => Ok(Language::Python),
            "php" => Ok(Language::Php),
            _ => Err(GeneratorError::UnsupportedLanguage(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported() {
        assert_eq!("java".parse::<Language>().unwrap(), Language::Java);
        assert_eq!(" Python ".parse::<Language>().unwrap(), Language::Python);
        assert_eq!("php".parse::<Language>().unwrap(), Language::Php);
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "ruby".parse::<Language>().unwrap_err();
        assert!(matches!(err, GeneratorError::UnsupportedLanguage(ref l) if l == "ruby"));
        assert_eq!(err.to_string(), "language ruby is not supported at the moment");
    }

    #[test]
    fn test_parse_list_keeps_order_and_dedups() {
        let langs = Language::parse_list(&["python", "java", "python"]).unwrap();
        assert_eq!(langs, vec![Language::Python, Language::Java]);
    }

    #[test]
    fn test_parse_list_fails_on_any_unknown() {
        assert!(matches!(
            Language::parse_list(&["java", "ruby"]),
            Err(GeneratorError::UnsupportedLanguage(_))
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            Language::parse_list(&empty),
            Err(GeneratorError::NoLanguages)
        ));
    }

    #[test]
    fn test_names() {
        let name = normalize_name("getPetById");
        assert_eq!(Language::Java.method_name(&name), "getPetById");
        assert_eq!(Language::Python.method_name(&name), "get_pet_by_id");
        assert_eq!(Language::Python.variable_name("petId"), "pet_id");
        assert_eq!(Language::Php.template_name(), "php_api_example");
    }
}
