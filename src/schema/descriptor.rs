//! Normalized schema model consumed by the matcher.

use std::fmt::{self, Display};

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

/// A schema node after normalization.
///
/// Every node is exactly one of these shapes, so the matcher can branch
/// exhaustively. A concrete schema never carries alternatives and a union
/// never carries concrete constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaDescriptor {
    /// Accepts every value. Produced for empty schemas and for nodes the
    /// normalizer could not interpret.
    Any,
    /// A schema with direct constraints.
    Concrete(Box<ConcreteSchema>),
    /// `oneOf`/`anyOf`: the value must match at least one alternative.
    Union(UnionSchema),
    /// `allOf`, or composition keywords next to direct constraints: the
    /// value must match every part.
    AllOf(IntersectionSchema),
    /// A local `$ref` such as `#/components/schemas/Node`. Targets are
    /// normalized on demand by the matcher, so recursive schemas stay finite.
    Ref(String),
}

impl SchemaDescriptor {
    /// Returns true for the permissive fallback.
    pub fn is_any(&self) -> bool {
        matches!(self, SchemaDescriptor::Any)
    }

    /// Returns true if `null` is accepted without further checks.
    ///
    /// A reference is not nullable by itself; its target decides.
    pub fn is_nullable(&self) -> bool {
        match self {
            SchemaDescriptor::Any => true,
            SchemaDescriptor::Concrete(concrete) => concrete.nullable,
            SchemaDescriptor::Union(union) => union.nullable,
            SchemaDescriptor::AllOf(all) => all.nullable,
            SchemaDescriptor::Ref(_) => false,
        }
    }
}

/// Alternatives of a `oneOf`/`anyOf` schema, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSchema {
    pub alternatives: Vec<SchemaDescriptor>,
    pub nullable: bool,
}

/// Parts of an `allOf` schema, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionSchema {
    pub parts: Vec<SchemaDescriptor>,
    pub nullable: bool,
}

/// Direct constraints of a non-union schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcreteSchema {
    /// Declared types with `null` folded out. `None` means no usable type
    /// was declared; `Some` of an empty set means only `null` is allowed.
    pub types: Option<TypeSet>,
    pub nullable: bool,
    pub constant: Option<Value>,
    pub allowed: Option<Vec<Value>>,
    pub required: IndexSet<String>,
    pub properties: IndexMap<String, SchemaDescriptor>,
    pub additional_properties: AdditionalProperties,
    pub items: Option<Box<SchemaDescriptor>>,
    /// Recorded for completeness; formats are never enforced.
    pub format: Option<String>,
}

/// How to handle object keys not declared in `properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AdditionalProperties {
    /// Allow unknown keys (default behavior).
    #[default]
    Allow,
    /// Reject unknown keys.
    Deny,
    /// Match unknown keys' values against a schema.
    Validate(Box<SchemaDescriptor>),
}

/// A non-null JSON type a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl JsonType {
    /// Parses a `type` token. Returns `None` for `null` and unknown tokens.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "string" => Some(JsonType::String),
            "integer" => Some(JsonType::Integer),
            "number" => Some(JsonType::Number),
            "boolean" => Some(JsonType::Boolean),
            "array" => Some(JsonType::Array),
            "object" => Some(JsonType::Object),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Number => "number",
            JsonType::Boolean => "boolean",
            JsonType::Array => "array",
            JsonType::Object => "object",
        }
    }

    /// Returns true if `value` is an instance of this type.
    ///
    /// Whole numbers satisfy both `integer` and `number`.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            JsonType::String => value.is_string(),
            JsonType::Integer => ValueKind::of(value) == ValueKind::Integer,
            JsonType::Number => value.is_number(),
            JsonType::Boolean => value.is_boolean(),
            JsonType::Array => value.is_array(),
            JsonType::Object => value.is_object(),
        }
    }
}

/// Declared types of a concrete schema, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeSet(IndexSet<JsonType>);

impl TypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ty: JsonType) {
        self.0.insert(ty);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, ty: JsonType) -> bool {
        self.0.contains(&ty)
    }

    /// Returns true if any declared type accepts `value`.
    pub fn accepts(&self, value: &Value) -> bool {
        self.0.iter().any(|ty| ty.accepts(value))
    }
}

impl FromIterator<JsonType> for TypeSet {
    fn from_iter<I: IntoIterator<Item = JsonType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Display for TypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "null");
        }
        for (i, ty) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            write!(f, "{}", ty.as_str())?;
        }
        Ok(())
    }
}

/// The runtime kind of an example value, as named in mismatch messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Boolean,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Number(n) if is_whole(n) => ValueKind::Integer,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_whole(n: &serde_json::Number) -> bool {
    n.is_i64()
        || n.is_u64()
        || n.as_f64()
            .map_or(false, |f| f.is_finite() && f.fract() == 0.0)
}
