use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::model::{
    ArrayModel, ComposedModel, Model, Parameter, ParameterLocation, ParameterSchema, PlainModel,
    Property, PropertyKind, Schema,
};
use crate::parse::parameter::{Parameter as RawParameter, ParameterLocation as RawLocation};
use crate::parse::ref_resolve::definition_name;
use crate::parse::schema::{AdditionalProperties, Schema as RawSchema, SchemaOrRef, SchemaType};

/// Convert a parsed schema into a `Model`, used for definitions and body
/// parameters.
pub fn schema_or_ref_to_model(schema_or_ref: &SchemaOrRef) -> Result<Model, ResolveError> {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => Ok(Model::Reference(definition_name(ref_path)?.to_string())),
        SchemaOrRef::Schema(schema) => schema_to_model(schema),
    }
}

pub fn schema_to_model(schema: &RawSchema) -> Result<Model, ResolveError> {
    if !schema.all_of.is_empty() {
        let mut components = schema
            .all_of
            .iter()
            .map(schema_or_ref_to_model)
            .collect::<Result<Vec<_>, _>>()?;
        // Sibling properties act as the last component.
        if !schema.properties.is_empty() {
            components.push(Model::Plain(PlainModel {
                properties: build_properties(&schema.properties, &schema.required)?,
                description: None,
                example: None,
            }));
        }
        return Ok(Model::Composed(ComposedModel {
            all_of: components,
            description: schema.description.clone(),
        }));
    }

    let is_array = schema.schema_type == Some(SchemaType::Array)
        || (schema.schema_type.is_none() && schema.items.is_some() && schema.properties.is_empty());
    if is_array {
        let items = match &schema.items {
            Some(items) => schema_or_ref_to_property(items)?,
            None => Property::new(PropertyKind::Object),
        };
        return Ok(Model::Array(ArrayModel {
            items: Box::new(items),
            description: schema.description.clone(),
        }));
    }

    Ok(Model::Plain(PlainModel {
        properties: build_properties(&schema.properties, &schema.required)?,
        description: schema.description.clone(),
        example: schema.example.clone(),
    }))
}

/// Convert a parsed schema into a `Property`, used for object fields and
/// array items.
pub fn schema_or_ref_to_property(schema_or_ref: &SchemaOrRef) -> Result<Property, ResolveError> {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => Ok(Property::reference(definition_name(ref_path)?)),
        SchemaOrRef::Schema(schema) => schema_to_property(schema),
    }
}

pub fn schema_to_property(schema: &RawSchema) -> Result<Property, ResolveError> {
    let kind = property_kind(
        schema.schema_type,
        schema.format.as_deref(),
        schema.items.as_deref(),
        schema.additional_properties.as_ref(),
    )?;
    Ok(Property {
        kind,
        format: schema.format.clone(),
        description: schema.description.clone(),
        enum_values: enum_strings(&schema.enum_values),
        default_value: schema.default_value.clone(),
        example: schema.example.clone(),
        required: false,
    })
}

/// Convert a response schema. Object-shaped schemas stay models so their
/// properties can be flattened; everything else is a property.
pub fn response_schema(schema_or_ref: &SchemaOrRef) -> Result<Schema, ResolveError> {
    match schema_or_ref {
        SchemaOrRef::Ref { .. } => Ok(Schema::Property(schema_or_ref_to_property(schema_or_ref)?)),
        SchemaOrRef::Schema(schema) => {
            if !schema.all_of.is_empty() || !schema.properties.is_empty() {
                Ok(Schema::Model(schema_to_model(schema)?))
            } else {
                Ok(Schema::Property(schema_to_property(schema)?))
            }
        }
    }
}

/// Convert a resolved parsed parameter into the model form.
pub fn convert_parameter(param: &RawParameter) -> Result<Parameter, ResolveError> {
    let location = match param.location {
        RawLocation::Body => ParameterLocation::Body,
        RawLocation::Header => ParameterLocation::Header,
        RawLocation::FormData => ParameterLocation::Form,
        RawLocation::Query => ParameterLocation::Query,
        RawLocation::Path => ParameterLocation::Path,
    };

    let schema = if location == ParameterLocation::Body {
        let model = match &param.schema {
            Some(schema) => schema_or_ref_to_model(schema)?,
            None => Model::Plain(PlainModel::default()),
        };
        ParameterSchema::Body(model)
    } else {
        let schema_type = param.param_type.as_deref().map(parse_schema_type);
        let kind = property_kind(
            schema_type.unwrap_or(Some(SchemaType::String)),
            param.format.as_deref(),
            param.items.as_deref(),
            None,
        )?;
        ParameterSchema::Inline(Property {
            kind,
            format: param.format.clone(),
            description: param.description.clone(),
            enum_values: enum_strings(&param.enum_values),
            default_value: param.default_value.clone(),
            example: param.example.clone(),
            required: param.required,
        })
    };

    Ok(Parameter {
        name: param.name.clone(),
        location,
        required: param.required,
        description: param.description.clone(),
        schema,
    })
}

fn build_properties(
    properties: &IndexMap<String, SchemaOrRef>,
    required: &[String],
) -> Result<IndexMap<String, Property>, ResolveError> {
    properties
        .iter()
        .map(|(name, prop)| {
            let mut property = schema_or_ref_to_property(prop)?;
            property.required = required.contains(name);
            Ok((name.clone(), property))
        })
        .collect()
}

fn property_kind(
    schema_type: Option<SchemaType>,
    format: Option<&str>,
    items: Option<&SchemaOrRef>,
    additional: Option<&AdditionalProperties>,
) -> Result<PropertyKind, ResolveError> {
    let item_kind = |items: Option<&SchemaOrRef>| -> Result<Box<Property>, ResolveError> {
        Ok(Box::new(match items {
            Some(items) => schema_or_ref_to_property(items)?,
            None => Property::new(PropertyKind::Object),
        }))
    };

    let kind = match schema_type {
        Some(SchemaType::String) => match format {
            Some("date") => PropertyKind::Date,
            Some("date-time") => PropertyKind::DateTime,
            _ => PropertyKind::String,
        },
        Some(SchemaType::Integer) => match format {
            Some("int64") => PropertyKind::Long,
            _ => PropertyKind::Integer,
        },
        Some(SchemaType::Number) => PropertyKind::Double,
        Some(SchemaType::Boolean) => PropertyKind::Boolean,
        Some(SchemaType::File) => PropertyKind::String,
        Some(SchemaType::Array) => PropertyKind::Array(item_kind(items)?),
        Some(SchemaType::Object) | None => match additional {
            Some(AdditionalProperties::Schema(values)) => {
                PropertyKind::Map(Box::new(schema_or_ref_to_property(values)?))
            }
            Some(AdditionalProperties::Bool(true)) => {
                PropertyKind::Map(Box::new(Property::new(PropertyKind::Object)))
            }
            _ if schema_type.is_none() && items.is_some() => PropertyKind::Array(item_kind(items)?),
            _ => PropertyKind::Object,
        },
    };
    Ok(kind)
}

fn parse_schema_type(value: &str) -> Option<SchemaType> {
    match value {
        "string" => Some(SchemaType::String),
        "number" => Some(SchemaType::Number),
        "integer" => Some(SchemaType::Integer),
        "boolean" => Some(SchemaType::Boolean),
        "array" => Some(SchemaType::Array),
        "object" => Some(SchemaType::Object),
        "file" => Some(SchemaType::File),
        _ => None,
    }
}

fn enum_strings(values: &[serde_json::Value]) -> Vec<String> {
    values
        .iter()
        .map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect()
}
