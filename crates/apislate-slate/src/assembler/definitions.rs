use apislate_core::markup::{DocumentSink, table_cell};
use apislate_core::model::{Model, Property, Specification};
use serde_json::Value;

use super::intro::non_blank;
use crate::descriptions::DescriptionSource;
use crate::properties::flatten_properties;
use crate::type_resolver::{RefSet, TypeResolver, label_or_placeholder};

/// Definitions never listed in the appendix.
pub const IGNORED_DEFINITIONS: [&str; 1] = ["Void"];

const PROPERTY_HEADER: &str = "name|description|required|type|default";

/// Emit the appendix for referenced definitions, in declaration order.
/// Returns the names that were written.
pub(super) fn emit_definitions(
    sink: &mut dyn DocumentSink,
    spec: &Specification,
    refs: &RefSet,
    descriptions: &dyn DescriptionSource,
) -> Vec<String> {
    let selected: Vec<(&String, &Model)> = spec
        .definitions
        .iter()
        .filter(|(name, _)| {
            !name.trim().is_empty()
                && refs.contains(name.as_str())
                && !IGNORED_DEFINITIONS.contains(&name.as_str())
        })
        .collect();
    if selected.is_empty() {
        log::debug!("no referenced definitions; appendix omitted");
        return Vec::new();
    }

    let resolver = TypeResolver::new(&spec.definitions);
    // Labels here must not widen the appendix.
    let mut scratch = RefSet::new();

    sink.document_title("Definitions");
    for (name, model) in &selected {
        sink.section_title_level1(name);

        let description = descriptions
            .definition_description(name)
            .or_else(|| non_blank(model.description()).map(str::to_string));
        if let Some(description) = description {
            sink.paragraph(&description);
        }

        if let Model::Array(_) = model {
            let label = label_or_placeholder(resolver.resolve_model(model, &mut scratch));
            sink.paragraph(&format!("Type: {label}"));
        }

        let properties = flatten_properties(model, &spec.definitions);
        if !properties.is_empty() {
            let mut rows = vec![PROPERTY_HEADER.to_string()];
            for (property_name, property) in properties {
                let description = descriptions
                    .property_description(name, property_name)
                    .or_else(|| property.description.clone())
                    .unwrap_or_default();
                rows.push(format!(
                    "{}|{}|{}|{}|{}",
                    table_cell(property_name),
                    table_cell(&description),
                    property.required,
                    table_cell(&label_or_placeholder(
                        resolver.resolve_property(property, &mut scratch)
                    )),
                    default_text(property),
                ));
            }
            sink.table_with_header_row(rows);
        }
        log::info!("Definition processed: {name}");
    }

    selected.into_iter().map(|(name, _)| name.clone()).collect()
}

fn default_text(property: &Property) -> String {
    match &property.default_value {
        Some(Value::String(text)) => table_cell(text),
        Some(other) => table_cell(&other.to_string()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use apislate_core::markup::MarkdownDocument;
    use apislate_core::model::{ComposedModel, PlainModel, PropertyKind};
    use serde_json::json;

    use super::*;
    use crate::descriptions::NoDescriptions;

    fn spec() -> Specification {
        let mut spec = Specification::default();
        spec.definitions.insert(
            "Base".to_string(),
            Model::Plain(PlainModel {
                properties: [(
                    "id".to_string(),
                    Property::new(PropertyKind::Long).with_format("int64").required(),
                )]
                .into_iter()
                .collect(),
                description: Some("Shared fields".to_string()),
                example: None,
            }),
        );
        spec.definitions.insert(
            "Dog".to_string(),
            Model::Composed(ComposedModel {
                all_of: vec![
                    Model::Reference("Base".to_string()),
                    Model::Plain(PlainModel {
                        properties: [(
                            "size".to_string(),
                            Property::new(PropertyKind::String)
                                .with_description("Size | class")
                                .with_default(json!("medium")),
                        )]
                        .into_iter()
                        .collect(),
                        ..Default::default()
                    }),
                ],
                description: None,
            }),
        );
        spec.definitions
            .insert("Void".to_string(), Model::Plain(PlainModel::default()));
        spec
    }

    #[test]
    fn test_only_referenced_definitions() {
        let spec = spec();
        let refs: RefSet = ["Dog".to_string(), "Void".to_string()].into_iter().collect();
        let mut doc = MarkdownDocument::new();
        let written = emit_definitions(&mut doc, &spec, &refs, &NoDescriptions);
        assert_eq!(written, vec!["Dog"]);
        let text = doc.as_str();
        assert!(text.starts_with("# Definitions\n\n## Dog\n\n"));
        assert!(!text.contains("## Base"));
        assert!(!text.contains("## Void"));
        assert!(text.contains("id||true|integer (int64)|\n"));
        assert!(text.contains("size|Size \\| class|false|string|medium\n"));
    }

    #[test]
    fn test_empty_refs_emit_nothing() {
        let spec = spec();
        let mut doc = MarkdownDocument::new();
        let written = emit_definitions(&mut doc, &spec, &RefSet::new(), &NoDescriptions);
        assert!(written.is_empty());
        assert!(doc.as_str().is_empty());
    }

    #[test]
    fn test_appendix_labels_do_not_register_refs() {
        let mut spec = spec();
        spec.definitions.insert(
            "Owner".to_string(),
            Model::Plain(PlainModel {
                properties: [("dog".to_string(), Property::reference("Dog"))]
                    .into_iter()
                    .collect(),
                ..Default::default()
            }),
        );
        let refs: RefSet = ["Owner".to_string()].into_iter().collect();
        let mut doc = MarkdownDocument::new();
        let written = emit_definitions(&mut doc, &spec, &refs, &NoDescriptions);
        assert_eq!(written, vec!["Owner"]);
        assert!(doc.as_str().contains("dog||false|[Dog](#dog)|"));
    }

    #[test]
    fn test_enum_with_pipe_stays_in_one_cell() {
        let mut spec = Specification::default();
        spec.definitions.insert(
            "Filter".to_string(),
            Model::Plain(PlainModel {
                properties: [(
                    "op".to_string(),
                    Property::new(PropertyKind::String).with_enum(["a|b", "c"]),
                )]
                .into_iter()
                .collect(),
                ..Default::default()
            }),
        );
        let refs: RefSet = ["Filter".to_string()].into_iter().collect();
        let mut doc = MarkdownDocument::new();
        emit_definitions(&mut doc, &spec, &refs, &NoDescriptions);
        assert!(doc.as_str().contains("op||false|enum (a\\|b, c)|\n"));
    }
}
