use std::collections::HashSet;

use apislate_core::model::{Model, Parameter, ParameterSchema, Property, PropertyKind, Schema};
use indexmap::IndexMap;

use crate::error::DanglingReference;

/// Definition names linked to while building one document.
pub type RefSet = HashSet<String>;

/// Turns schema nodes into display labels, recording every definition it
/// links to.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    definitions: &'a IndexMap<String, Model>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(definitions: &'a IndexMap<String, Model>) -> Self {
        Self { definitions }
    }

    pub fn resolve_property(
        &self,
        property: &Property,
        refs: &mut RefSet,
    ) -> Result<String, DanglingReference> {
        match &property.kind {
            PropertyKind::Reference(name) => self.link(name, refs),
            PropertyKind::Array(items) => {
                Ok(format!("{} array", self.resolve_property(items, refs)?))
            }
            PropertyKind::String if !property.enum_values.is_empty() => {
                Ok(enum_label(&property.enum_values))
            }
            kind => Ok(with_format(kind.type_name(), property.format.as_deref())),
        }
    }

    pub fn resolve_model(
        &self,
        model: &Model,
        refs: &mut RefSet,
    ) -> Result<String, DanglingReference> {
        match model {
            Model::Reference(name) => self.link(name, refs),
            Model::Array(array) => Ok(format!(
                "{} array",
                self.resolve_property(&array.items, refs)?
            )),
            Model::Plain(_) | Model::Composed(_) => Ok("object".to_string()),
        }
    }

    pub fn resolve_schema(
        &self,
        schema: &Schema,
        refs: &mut RefSet,
    ) -> Result<String, DanglingReference> {
        match schema {
            Schema::Model(model) => self.resolve_model(model, refs),
            Schema::Property(property) => self.resolve_property(property, refs),
        }
    }

    /// Parameters accept an enum on any inline type, and body parameters
    /// resolve through their model.
    pub fn resolve_parameter(
        &self,
        parameter: &Parameter,
        refs: &mut RefSet,
    ) -> Result<String, DanglingReference> {
        match &parameter.schema {
            ParameterSchema::Body(model) => self.resolve_model(model, refs),
            ParameterSchema::Inline(property) if !property.enum_values.is_empty() => {
                Ok(enum_label(&property.enum_values))
            }
            ParameterSchema::Inline(property) => self.resolve_property(property, refs),
        }
    }

    fn link(&self, name: &str, refs: &mut RefSet) -> Result<String, DanglingReference> {
        if !self.definitions.contains_key(name) {
            return Err(DanglingReference(name.to_string()));
        }
        refs.insert(name.to_string());
        Ok(format!("[{name}](#{})", name.to_lowercase()))
    }
}

/// Collapse a resolution result into a label, logging dangling references.
pub fn label_or_placeholder(result: Result<String, DanglingReference>) -> String {
    result.unwrap_or_else(|err| {
        log::warn!("{err}; using placeholder label");
        err.placeholder()
    })
}

fn enum_label(values: &[String]) -> String {
    format!("enum ({})", values.join(", "))
}

fn with_format(type_name: &str, format: Option<&str>) -> String {
    match format {
        Some(format) if !format.trim().is_empty() => format!("{type_name} ({format})"),
        _ => type_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use apislate_core::model::{ArrayModel, ComposedModel, ParameterLocation, PlainModel};

    use super::*;

    fn definitions() -> IndexMap<String, Model> {
        let mut defs = IndexMap::new();
        defs.insert("Pet".to_string(), Model::Plain(PlainModel::default()));
        defs.insert("Tag".to_string(), Model::Plain(PlainModel::default()));
        defs
    }

    #[test]
    fn test_reference_links_and_records() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let label = resolver
            .resolve_property(&Property::reference("Pet"), &mut refs)
            .unwrap();
        assert_eq!(label, "[Pet](#pet)");
        assert!(refs.contains("Pet"));
    }

    #[test]
    fn test_dangling_reference() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let err = resolver
            .resolve_property(&Property::reference("Owner"), &mut refs)
            .unwrap_err();
        assert_eq!(err, DanglingReference("Owner".to_string()));
        assert!(refs.is_empty());
        assert_eq!(label_or_placeholder(Err(err)), "Owner (unresolved)");
    }

    #[test]
    fn test_nested_arrays() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let prop = Property::array(Property::array(Property::reference("Tag")));
        assert_eq!(
            resolver.resolve_property(&prop, &mut refs).unwrap(),
            "[Tag](#tag) array array"
        );
        assert!(refs.contains("Tag"));
    }

    #[test]
    fn test_enum_and_format() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let status = Property::new(PropertyKind::String).with_enum(["available", "sold"]);
        assert_eq!(
            resolver.resolve_property(&status, &mut refs).unwrap(),
            "enum (available, sold)"
        );
        let id = Property::new(PropertyKind::Long).with_format("int64");
        assert_eq!(
            resolver.resolve_property(&id, &mut refs).unwrap(),
            "integer (int64)"
        );
        let plain = Property::new(PropertyKind::Boolean);
        assert_eq!(resolver.resolve_property(&plain, &mut refs).unwrap(), "boolean");
    }

    #[test]
    fn test_models() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let array = Model::Array(ArrayModel {
            items: Box::new(Property::reference("Pet")),
            description: None,
        });
        assert_eq!(
            resolver.resolve_model(&array, &mut refs).unwrap(),
            "[Pet](#pet) array"
        );
        let composed = Model::Composed(ComposedModel::default());
        assert_eq!(resolver.resolve_model(&composed, &mut refs).unwrap(), "object");
    }

    #[test]
    fn test_body_parameter_redirects_to_model() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let mut refs = RefSet::new();
        let param = Parameter {
            name: "body".to_string(),
            location: ParameterLocation::Body,
            required: true,
            description: None,
            schema: ParameterSchema::Body(Model::Reference("Pet".to_string())),
        };
        assert_eq!(
            resolver.resolve_parameter(&param, &mut refs).unwrap(),
            "[Pet](#pet)"
        );
        assert!(refs.contains("Pet"));
    }

    #[test]
    fn test_deterministic() {
        let defs = definitions();
        let resolver = TypeResolver::new(&defs);
        let prop = Property::array(Property::reference("Pet"));
        let first = resolver.resolve_property(&prop, &mut RefSet::new());
        let second = resolver.resolve_property(&prop, &mut RefSet::new());
        assert_eq!(first, second);
    }
}
