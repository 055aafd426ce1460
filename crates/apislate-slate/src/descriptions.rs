//! Hand-written descriptions that take precedence over the ones in the
//! specification.

use std::fs;
use std::path::{Path, PathBuf};

/// Looks up supplementary descriptions for definitions and their
/// properties.
pub trait DescriptionSource {
    fn definition_description(&self, definition: &str) -> Option<String>;

    fn property_description(&self, definition: &str, property: &str) -> Option<String>;
}

/// Never supplies anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDescriptions;

impl DescriptionSource for NoDescriptions {
    fn definition_description(&self, _definition: &str) -> Option<String> {
        None
    }

    fn property_description(&self, _definition: &str, _property: &str) -> Option<String> {
        None
    }
}

/// Reads `{root}/definitions/{definition}/description.md` and
/// `{root}/definitions/{definition}/{property}/description.md`, with names
/// lowercased.
#[derive(Debug, Clone)]
pub struct DirectoryDescriptions {
    root: PathBuf,
}

impl DirectoryDescriptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into().join("definitions"),
        }
    }

    fn read(&self, dir: &Path) -> Option<String> {
        let path = dir.join("description.md");
        let text = fs::read_to_string(&path).ok()?;
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        log::info!("Description file processed: {}", path.display());
        Some(text.to_string())
    }
}

impl DescriptionSource for DirectoryDescriptions {
    fn definition_description(&self, definition: &str) -> Option<String> {
        self.read(&self.root.join(definition.to_lowercase()))
    }

    fn property_description(&self, definition: &str, property: &str) -> Option<String> {
        self.read(
            &self
                .root
                .join(definition.to_lowercase())
                .join(property.to_lowercase()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let pet = dir.path().join("definitions").join("pet");
        fs::create_dir_all(pet.join("name")).unwrap();
        fs::write(pet.join("description.md"), "A pet in the store.\n").unwrap();
        fs::write(pet.join("name").join("description.md"), "  ").unwrap();

        let source = DirectoryDescriptions::new(dir.path());
        assert_eq!(
            source.definition_description("Pet").as_deref(),
            Some("A pet in the store.")
        );
        assert_eq!(source.property_description("Pet", "name"), None);
        assert_eq!(source.property_description("Pet", "age"), None);
        assert_eq!(source.definition_description("Order"), None);
    }
}
