use apislate_core::model::{Model, Property, PropertyKind, Schema};
use serde_json::Value;

use super::language::Language;

/// Map a `Property` to the client type name for `language`.
pub fn property_type(language: Language, property: &Property) -> String {
    match (&property.kind, language) {
        (PropertyKind::Reference(name), _) => name.clone(),
        (PropertyKind::Array(items), Language::Java) => {
            format!("List<{}>", property_type(language, items))
        }
        (PropertyKind::Array(items), Language::Python) => {
            format!("list[{}]", property_type(language, items))
        }
        (PropertyKind::Array(items), Language::Php) => {
            format!("{}[]", property_type(language, items))
        }
        (PropertyKind::Map(values), Language::Java) => {
            format!("Map<String, {}>", property_type(language, values))
        }
        (PropertyKind::Map(values), Language::Python) => {
            format!("dict(str, {})", property_type(language, values))
        }
        (PropertyKind::Map(values), Language::Php) => {
            format!("map[string,{}]", property_type(language, values))
        }
        (kind, Language::Java) => java_scalar(kind).to_string(),
        (kind, Language::Python) => python_scalar(kind).to_string(),
        (kind, Language::Php) => php_scalar(kind).to_string(),
    }
}

/// Map a `Model` to the client type name for `language`.
pub fn model_type(language: Language, model: &Model) -> String {
    match model {
        Model::Reference(name) => name.clone(),
        Model::Array(array) => property_type(language, &Property::array((*array.items).clone())),
        Model::Plain(_) | Model::Composed(_) => {
            property_type(language, &Property::new(PropertyKind::Object))
        }
    }
}

pub fn schema_type(language: Language, schema: &Schema) -> String {
    match schema {
        Schema::Model(model) => model_type(language, model),
        Schema::Property(property) => property_type(language, property),
    }
}

fn java_scalar(kind: &PropertyKind) -> &'static str {
    match kind {
        PropertyKind::String => "String",
        PropertyKind::Integer => "Integer",
        PropertyKind::Long => "Long",
        PropertyKind::Double => "Double",
        PropertyKind::Boolean => "Boolean",
        PropertyKind::Date => "LocalDate",
        PropertyKind::DateTime => "OffsetDateTime",
        _ => "Object",
    }
}

fn python_scalar(kind: &PropertyKind) -> &'static str {
    match kind {
        PropertyKind::String => "str",
        PropertyKind::Integer | PropertyKind::Long => "int",
        PropertyKind::Double => "float",
        PropertyKind::Boolean => "bool",
        PropertyKind::Date => "date",
        PropertyKind::DateTime => "datetime",
        _ => "object",
    }
}

fn php_scalar(kind: &PropertyKind) -> &'static str {
    match kind {
        PropertyKind::String => "string",
        PropertyKind::Integer | PropertyKind::Long => "int",
        PropertyKind::Double => "float",
        PropertyKind::Boolean => "bool",
        PropertyKind::Date | PropertyKind::DateTime => "\\DateTime",
        _ => "object",
    }
}

/// Source literal for a model-typed argument.
pub fn model_literal(language: Language, model: &Model, model_package: &str) -> String {
    match model {
        Model::Reference(name) => construct(language, name, model_package),
        Model::Array(array) => {
            let item = property_literal(language, &array.items, &Value::Null, model_package);
            list_literal(language, &item)
        }
        Model::Plain(_) | Model::Composed(_) => empty_object(language).to_string(),
    }
}

/// Source literal for an inline argument, using `example` for scalar values.
pub fn property_literal(
    language: Language,
    property: &Property,
    example: &Value,
    model_package: &str,
) -> String {
    match &property.kind {
        PropertyKind::Reference(name) => construct(language, name, model_package),
        PropertyKind::Array(items) => {
            let item_example = match example {
                Value::Array(values) => values.first().cloned().unwrap_or(Value::Null),
                _ => Value::Null,
            };
            let item = property_literal(language, items, &item_example, model_package);
            list_literal(language, &item)
        }
        PropertyKind::Map(_) => match language {
            Language::Java => "new HashMap()".to_string(),
            Language::Python => "{}".to_string(),
            Language::Php => "array()".to_string(),
        },
        PropertyKind::Object => empty_object(language).to_string(),
        PropertyKind::Date | PropertyKind::DateTime => {
            let fallback = match property.kind {
                PropertyKind::Date => "2015-01-20",
                _ => "2016-03-03T10:15:30.00Z",
            };
            let text = string_literal(example, fallback);
            match (language, &property.kind) {
                (Language::Java, PropertyKind::Date) => format!("LocalDate.parse({text})"),
                (Language::Java, _) => format!("OffsetDateTime.parse({text})"),
                (Language::Python, _) => text,
                (Language::Php, _) => format!("new \\DateTime({text})"),
            }
        }
        PropertyKind::String => string_literal(example, "str"),
        PropertyKind::Boolean => {
            let flag = example.as_bool().unwrap_or(true);
            match (language, flag) {
                (Language::Python, true) => "True".to_string(),
                (Language::Python, false) => "False".to_string(),
                (_, flag) => flag.to_string(),
            }
        }
        PropertyKind::Long => {
            let number = number_text(example, "1");
            match language {
                Language::Java => format!("{number}L"),
                _ => number,
            }
        }
        PropertyKind::Integer => number_text(example, "1"),
        PropertyKind::Double => number_text(example, "1.0"),
    }
}

fn construct(language: Language, name: &str, model_package: &str) -> String {
    match language {
        Language::Java => format!("new {name}()"),
        Language::Python => format!("{model_package}.{name}()"),
        Language::Php => format!("new \\{model_package}\\{name}()"),
    }
}

fn list_literal(language: Language, item: &str) -> String {
    match language {
        Language::Java => format!("Arrays.asList({item})"),
        Language::Python => format!("[{item}]"),
        Language::Php => format!("array({item})"),
    }
}

fn empty_object(language: Language) -> &'static str {
    match language {
        Language::Java => "new Object()",
        Language::Python => "{}",
        Language::Php => "new \\stdClass",
    }
}

fn string_literal(example: &Value, fallback: &str) -> String {
    let text = match example {
        Value::String(s) => s.as_str(),
        _ => fallback,
    };
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

fn number_text(example: &Value, fallback: &str) -> String {
    match example {
        Value::Number(n) => n.to_string(),
        _ => fallback.to_string(),
    }
}
