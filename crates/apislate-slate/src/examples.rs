//! Example JSON payloads for request bodies and responses.

use std::collections::HashSet;

use apislate_core::model::{
    Model, Operation, Parameter, ParameterLocation, ParameterSchema, Property, PropertyKind,
    Response, Schema,
};
use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use crate::error::OperationError;

const DATE_EXAMPLE: &str = "2015-01-20";
const DATE_TIME_EXAMPLE: &str = "2016-03-03T10:15:30.00Z";

/// Builds example values from schema nodes.
///
/// Explicit examples win over synthesized defaults. References are followed
/// through `definitions`; a definition already being expanded on the current
/// path yields an empty value, so self-referential models terminate.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    definitions: &'a IndexMap<String, Model>,
}

impl<'a> ExampleSynthesizer<'a> {
    pub fn new(definitions: &'a IndexMap<String, Model>) -> Self {
        Self { definitions }
    }

    pub fn synthesize_property(&self, property: &Property) -> Value {
        self.property_value(property, &mut HashSet::new())
    }

    pub fn synthesize_model(&self, model: &Model) -> Value {
        self.model_value(model, &mut HashSet::new())
    }

    pub fn synthesize_schema(&self, schema: &Schema) -> Value {
        match schema {
            Schema::Model(model) => self.synthesize_model(model),
            Schema::Property(property) => self.synthesize_property(property),
        }
    }

    pub fn synthesize_parameter(&self, parameter: &Parameter) -> Value {
        match &parameter.schema {
            ParameterSchema::Body(model) => self.synthesize_model(model),
            ParameterSchema::Inline(property) => self.synthesize_property(property),
        }
    }

    /// Payload for the request: the body parameter's value, or an object of
    /// form fields when there is no single body parameter.
    pub fn request_example(&self, operation: &Operation) -> Result<String, OperationError> {
        let value = match operation.body_parameter() {
            Some(Parameter {
                schema: ParameterSchema::Body(model),
                ..
            }) => match self.array_items(model) {
                Some(items) => Value::Array(vec![self.synthesize_property(items)]),
                None => self.synthesize_model(model),
            },
            Some(parameter) => self.synthesize_parameter(parameter),
            None => Value::Object(
                operation
                    .parameters
                    .iter()
                    .filter(|p| p.location == ParameterLocation::Form)
                    .map(|p| (p.name.clone(), self.synthesize_parameter(p)))
                    .collect(),
            ),
        };
        pretty(&value)
    }

    /// Example for a documented response. Declared examples take
    /// precedence over the schema; `None` when there is nothing to show.
    pub fn response_example(
        &self,
        response: &Response,
    ) -> Option<Result<String, OperationError>> {
        if let Some(example) = &response.example {
            return Some(match example {
                Value::String(text) => Ok(text.clone()),
                other => pretty(other),
            });
        }
        let schema = response.schema.as_ref()?;
        Some(pretty(&self.synthesize_schema(schema)))
    }

    /// Item property of an array model, following one named reference.
    fn array_items<'m>(&'m self, model: &'m Model) -> Option<&'m Property> {
        match model {
            Model::Array(array) => Some(&array.items),
            Model::Reference(name) => match self.definitions.get(name) {
                Some(Model::Array(array)) => Some(&array.items),
                _ => None,
            },
            _ => None,
        }
    }

    fn property_value(&self, property: &Property, visiting: &mut HashSet<String>) -> Value {
        if let Some(example) = &property.example {
            return example.clone();
        }
        match &property.kind {
            PropertyKind::String => match property.enum_values.first() {
                Some(first) => Value::String(first.clone()),
                None => json!("str"),
            },
            PropertyKind::Integer | PropertyKind::Long => json!(1),
            PropertyKind::Double => json!(1.0),
            PropertyKind::Boolean => json!(true),
            PropertyKind::Date => json!(DATE_EXAMPLE),
            PropertyKind::DateTime => json!(DATE_TIME_EXAMPLE),
            PropertyKind::Map(_) => json!({ "prop": {} }),
            PropertyKind::Object => json!("object"),
            PropertyKind::Array(items) => Value::Array(vec![self.property_value(items, visiting)]),
            PropertyKind::Reference(name) => self.reference_value(name, visiting),
        }
    }

    fn model_value(&self, model: &Model, visiting: &mut HashSet<String>) -> Value {
        match model {
            Model::Plain(plain) => match &plain.example {
                Some(example) => example.clone(),
                None => Value::Object(
                    plain
                        .properties
                        .iter()
                        .map(|(name, prop)| (name.clone(), self.property_value(prop, visiting)))
                        .collect(),
                ),
            },
            Model::Reference(name) => self.reference_value(name, visiting),
            Model::Composed(composed) => {
                let mut merged = Map::new();
                for component in &composed.all_of {
                    match self.model_value(component, visiting) {
                        Value::Object(fields) => merged.extend(fields),
                        other => log::debug!("ignoring non-object allOf component example {other}"),
                    }
                }
                Value::Object(merged)
            }
            Model::Array(array) => Value::Array(vec![self.property_value(&array.items, visiting)]),
        }
    }

    fn reference_value(&self, name: &str, visiting: &mut HashSet<String>) -> Value {
        let Some(target) = self.definitions.get(name) else {
            log::warn!("example for undefined definition {name} left empty");
            return json!({});
        };
        if !visiting.insert(name.to_string()) {
            log::debug!("cycle through {name}; emitting empty example");
            return match target {
                Model::Array(_) => json!([]),
                _ => json!({}),
            };
        }
        let value = self.model_value(target, visiting);
        visiting.remove(name);
        value
    }
}

/// Pretty-printed JSON for an example block.
pub fn pretty(value: &Value) -> Result<String, OperationError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use apislate_core::model::{ArrayModel, ComposedModel, PlainModel};

    use super::*;

    fn plain(props: &[(&str, Property)]) -> Model {
        Model::Plain(PlainModel {
            properties: props
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            ..Default::default()
        })
    }

    fn body(model: Model) -> Parameter {
        Parameter {
            name: "body".to_string(),
            location: ParameterLocation::Body,
            required: true,
            description: None,
            schema: ParameterSchema::Body(model),
        }
    }

    fn form(name: &str, property: Property) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: ParameterLocation::Form,
            required: false,
            description: None,
            schema: ParameterSchema::Inline(property),
        }
    }

    #[test]
    fn test_scalar_defaults() {
        let defs = IndexMap::new();
        let synth = ExampleSynthesizer::new(&defs);
        let cases = [
            (PropertyKind::String, json!("str")),
            (PropertyKind::Integer, json!(1)),
            (PropertyKind::Long, json!(1)),
            (PropertyKind::Double, json!(1.0)),
            (PropertyKind::Boolean, json!(true)),
            (PropertyKind::Date, json!("2015-01-20")),
            (PropertyKind::DateTime, json!("2016-03-03T10:15:30.00Z")),
            (PropertyKind::Object, json!("object")),
            (
                PropertyKind::Map(Box::new(Property::new(PropertyKind::String))),
                json!({"prop": {}}),
            ),
        ];
        for (kind, expected) in cases {
            assert_eq!(synth.synthesize_property(&Property::new(kind)), expected);
        }
    }

    #[test]
    fn test_enum_and_explicit_example() {
        let defs = IndexMap::new();
        let synth = ExampleSynthesizer::new(&defs);
        let status = Property::new(PropertyKind::String).with_enum(["available", "sold"]);
        assert_eq!(synth.synthesize_property(&status), json!("available"));
        let named = Property::new(PropertyKind::String).with_example(json!("doggie"));
        assert_eq!(synth.synthesize_property(&named), json!("doggie"));
    }

    #[test]
    fn test_reference_expands_definition() {
        let mut defs = IndexMap::new();
        defs.insert(
            "Pet".to_string(),
            plain(&[
                ("name", Property::new(PropertyKind::String)),
                ("age", Property::new(PropertyKind::Integer)),
            ]),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let value = synth.synthesize_property(&Property::array(Property::reference("Pet")));
        assert_eq!(value, json!([{"name": "str", "age": 1}]));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut defs = IndexMap::new();
        defs.insert(
            "Node".to_string(),
            plain(&[
                ("value", Property::new(PropertyKind::Integer)),
                ("next", Property::reference("Node")),
                ("children", Property::array(Property::reference("Node"))),
            ]),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let value = synth.synthesize_model(&Model::Reference("Node".to_string()));
        assert_eq!(value, json!({"value": 1, "next": {}, "children": [{}]}));
    }

    #[test]
    fn test_mutual_cycle_through_array_definition() {
        let mut defs = IndexMap::new();
        defs.insert(
            "Folder".to_string(),
            plain(&[("entries", Property::reference("Entries"))]),
        );
        defs.insert(
            "Entries".to_string(),
            Model::Array(ArrayModel {
                items: Box::new(Property::reference("Entries")),
                description: None,
            }),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let value = synth.synthesize_model(&Model::Reference("Folder".to_string()));
        assert_eq!(value, json!({"entries": [[]]}));
    }

    #[test]
    fn test_siblings_are_not_cycles() {
        let mut defs = IndexMap::new();
        defs.insert("Tag".to_string(), plain(&[("id", Property::new(PropertyKind::Long))]));
        defs.insert(
            "Pet".to_string(),
            plain(&[
                ("primary", Property::reference("Tag")),
                ("secondary", Property::reference("Tag")),
            ]),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let value = synth.synthesize_model(&Model::Reference("Pet".to_string()));
        assert_eq!(value, json!({"primary": {"id": 1}, "secondary": {"id": 1}}));
    }

    #[test]
    fn test_dangling_reference_is_empty() {
        let defs = IndexMap::new();
        let synth = ExampleSynthesizer::new(&defs);
        assert_eq!(synth.synthesize_property(&Property::reference("Ghost")), json!({}));
    }

    #[test]
    fn test_composed_later_component_wins() {
        let mut defs = IndexMap::new();
        defs.insert(
            "Base".to_string(),
            plain(&[
                ("id", Property::new(PropertyKind::Long)),
                ("kind", Property::new(PropertyKind::String)),
            ]),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let composed = Model::Composed(ComposedModel {
            all_of: vec![
                Model::Reference("Base".to_string()),
                plain(&[(
                    "kind",
                    Property::new(PropertyKind::String).with_example(json!("cat")),
                )]),
            ],
            description: None,
        });
        assert_eq!(
            synth.synthesize_model(&composed),
            json!({"id": 1, "kind": "cat"})
        );
    }

    #[test]
    fn test_request_example_body_array() {
        let mut defs = IndexMap::new();
        defs.insert("Pet".to_string(), plain(&[("name", Property::new(PropertyKind::String))]));
        defs.insert(
            "Pets".to_string(),
            Model::Array(ArrayModel {
                items: Box::new(Property::reference("Pet")),
                description: None,
            }),
        );
        let synth = ExampleSynthesizer::new(&defs);
        let op = Operation {
            parameters: vec![body(Model::Reference("Pets".to_string()))],
            ..Default::default()
        };
        let json = synth.request_example(&op).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, json!([{"name": "str"}]));
    }

    #[test]
    fn test_request_example_form_fields() {
        let defs = IndexMap::new();
        let synth = ExampleSynthesizer::new(&defs);
        let op = Operation {
            parameters: vec![
                form("name", Property::new(PropertyKind::String)),
                form("count", Property::new(PropertyKind::Integer)),
            ],
            ..Default::default()
        };
        let json = synth.request_example(&op).unwrap();
        assert!(json.find("\"name\"").unwrap() < json.find("\"count\"").unwrap());
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, json!({"name": "str", "count": 1}));
    }

    #[test]
    fn test_response_example_precedence() {
        let defs = IndexMap::new();
        let synth = ExampleSynthesizer::new(&defs);
        let declared = Response {
            description: "ok".to_string(),
            schema: Some(Schema::Property(Property::new(PropertyKind::Integer))),
            example: Some(json!({"id": 7})),
        };
        let text = synth.response_example(&declared).unwrap().unwrap();
        assert!(text.contains("\"id\": 7"));

        let synthesized = Response {
            example: None,
            ..declared
        };
        assert_eq!(synth.response_example(&synthesized).unwrap().unwrap(), "1");

        let empty = Response::default();
        assert!(synth.response_example(&empty).is_none());
    }
}
