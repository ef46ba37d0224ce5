use indexmap::IndexMap;
use serde_json::Value;

/// A schema node in the dialect-independent model.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub kind: SchemaKind,
    pub description: Option<String>,
}

/// The shape of a schema node. Exactly one variant is active per node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    Boolean {
        enum_values: Vec<Value>,
    },
    Number {
        enum_values: Vec<Value>,
    },
    Integer,
    String {
        enum_values: Vec<Value>,
    },
    Array {
        items: Box<Schema>,
    },
    Object {
        properties: IndexMap<String, Schema>,
        required: Vec<String>,
        additional_properties: Option<Box<Schema>>,
    },
    /// A `$ref` pointer into the reusable schema section.
    Ref(String),
    /// Anything the model has no dedicated shape for.
    Unknown,
}

impl From<SchemaKind> for Schema {
    fn from(kind: SchemaKind) -> Self {
        Self {
            kind,
            description: None,
        }
    }
}

impl Schema {
    pub fn reference(ref_path: impl Into<String>) -> Self {
        SchemaKind::Ref(ref_path.into()).into()
    }

    pub fn string() -> Self {
        SchemaKind::String {
            enum_values: Vec::new(),
        }
        .into()
    }

    pub fn integer() -> Self {
        SchemaKind::Integer.into()
    }

    pub fn array(items: Schema) -> Self {
        SchemaKind::Array {
            items: Box::new(items),
        }
        .into()
    }

    pub fn unknown() -> Self {
        SchemaKind::Unknown.into()
    }

    /// Enum values declared on a scalar, in declaration order.
    pub fn enum_values(&self) -> &[Value] {
        match &self.kind {
            SchemaKind::Boolean { enum_values }
            | SchemaKind::Number { enum_values }
            | SchemaKind::String { enum_values } => enum_values,
            SchemaKind::Integer
            | SchemaKind::Array { .. }
            | SchemaKind::Object { .. }
            | SchemaKind::Ref(_)
            | SchemaKind::Unknown => &[],
        }
    }
}
