use indexmap::IndexMap;

/// A named or inline data shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    Plain(PlainModel),
    /// Points to another model in `definitions` by name.
    Reference(String),
    Composed(ComposedModel),
    Array(ArrayModel),
}

impl Model {
    pub fn description(&self) -> Option<&str> {
        match self {
            Model::Plain(m) => m.description.as_deref(),
            Model::Composed(m) => m.description.as_deref(),
            Model::Array(m) => m.description.as_deref(),
            Model::Reference(_) => None,
        }
    }
}

/// An object model with its own properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlainModel {
    pub properties: IndexMap<String, Property>,
    pub description: Option<String>,
    pub example: Option<serde_json::Value>,
}

/// An `allOf` composition. Later components override earlier ones on
/// property-name collisions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComposedModel {
    pub all_of: Vec<Model>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayModel {
    pub items: Box<Property>,
    pub description: Option<String>,
}

/// A single field description.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub kind: PropertyKind,
    pub format: Option<String>,
    pub description: Option<String>,
    pub enum_values: Vec<String>,
    pub default_value: Option<serde_json::Value>,
    pub example: Option<serde_json::Value>,
    pub required: bool,
}

impl Property {
    pub fn new(kind: PropertyKind) -> Self {
        Self {
            kind,
            format: None,
            description: None,
            enum_values: Vec::new(),
            default_value: None,
            example: None,
            required: false,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(PropertyKind::Reference(name.into()))
    }

    pub fn array(items: Property) -> Self {
        Self::new(PropertyKind::Array(Box::new(items)))
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_default(mut self, default_value: serde_json::Value) -> Self {
        self.default_value = Some(default_value);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Property kinds. Array, map, and reference kinds carry their payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKind {
    String,
    Integer,
    Long,
    Double,
    Boolean,
    Date,
    DateTime,
    Array(Box<Property>),
    /// `additionalProperties` map; the payload describes the values.
    Map(Box<Property>),
    Object,
    Reference(String),
}

impl PropertyKind {
    /// The wire type name as written in the specification.
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyKind::String | PropertyKind::Date | PropertyKind::DateTime => "string",
            PropertyKind::Integer | PropertyKind::Long => "integer",
            PropertyKind::Double => "number",
            PropertyKind::Boolean => "boolean",
            PropertyKind::Array(_) => "array",
            PropertyKind::Map(_) | PropertyKind::Object => "object",
            PropertyKind::Reference(_) => "ref",
        }
    }
}

/// A response schema: either a full model or a single property.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    Model(Model),
    Property(Property),
}
