use std::fmt;

use indexmap::IndexMap;

use super::operations::{HttpMethod, Operation, OperationKey};
use super::schemas::Model;

/// The read-only specification graph the document compiler works on.
#[derive(Debug, Clone, Default)]
pub struct Specification {
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
    pub tags: Vec<Tag>,
    pub paths: IndexMap<String, PathItem>,
    pub definitions: IndexMap<String, Model>,
}

impl Specification {
    /// Every operation in discovery order: path-map order, then
    /// GET, PUT, POST, DELETE, PATCH, OPTIONS within a path.
    pub fn operations(&self) -> impl Iterator<Item = (OperationKey, &Operation)> + '_ {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (OperationKey::new(path, method), op))
        })
    }

    /// Operations carrying `tag`, in discovery order.
    pub fn operations_tagged<'a>(
        &'a self,
        tag: &'a str,
    ) -> impl Iterator<Item = (OperationKey, &'a Operation)> + 'a {
        self.operations()
            .filter(move |(_, op)| op.tags.iter().any(|t| t == tag))
    }

    pub fn operation_count(&self) -> usize {
        self.paths.values().map(|p| p.operations().count()).sum()
    }
}

/// API metadata.
#[derive(Debug, Clone, Default)]
pub struct Info {
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub contact: Option<Contact>,
    pub license: Option<License>,
    pub terms_of_service: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Contact {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct License {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Tag {
    pub name: String,
    pub description: Option<String>,
}

/// Operations declared on one path template.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub delete: Option<Operation>,
    pub patch: Option<Operation>,
    pub options: Option<Operation>,
}

impl PathItem {
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.get_operation(method).map(|op| (method, op)))
    }

    pub fn get_operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Options => &mut self.options,
        }
    }
}

/// A name with multiple casing variants pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    pub pascal_case: String,
    pub camel_case: String,
    pub snake_case: String,
    pub title_case: String,
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original)
    }
}
