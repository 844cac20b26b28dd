//! Conversion of raw schema nodes into [`SchemaDescriptor`]s.
//!
//! Normalization never fails. Anything that cannot be interpreted degrades
//! to [`SchemaDescriptor::Any`] so that one odd schema cannot stop the rule.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::document::{Document, SpecVersion};

use super::descriptor::{
    AdditionalProperties, ConcreteSchema, IntersectionSchema, JsonType, SchemaDescriptor, TypeSet,
    UnionSchema,
};

/// Default limit on schema nesting and on `$ref` hops while matching.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Builds descriptors for schema nodes of one document.
///
/// The normalizer borrows the document to check local `$ref`s and to know
/// which nullable encodings the declared version uses natively. References
/// are kept as [`SchemaDescriptor::Ref`] and only expanded through
/// [`Normalizer::normalize_ref`]. Both nullable encodings are always honored:
///
/// ```rust
/// use specimen::{Document, Normalizer};
/// use serde_json::json;
///
/// let document = Document::new(json!({"openapi": "3.1.0"})).unwrap();
/// let normalizer = Normalizer::new(&document);
///
/// let legacy = normalizer.normalize(&json!({"type": "string", "nullable": true}));
/// let union = normalizer.normalize(&json!({"type": ["string", "null"]}));
/// assert_eq!(legacy, union);
/// ```
pub struct Normalizer<'doc> {
    document: &'doc Document,
    max_depth: usize,
}

impl<'doc> Normalizer<'doc> {
    /// Creates a normalizer with the default depth limit.
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth of inline schemas.
    ///
    /// Deeper nodes normalize to [`SchemaDescriptor::Any`].
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Normalizes a raw schema node.
    pub fn normalize(&self, node: &Value) -> SchemaDescriptor {
        self.normalize_at(node, 0)
    }

    /// Normalizes the target of a local reference.
    ///
    /// References inside the target stay unexpanded, so this does work
    /// proportional to the target node alone.
    pub fn normalize_ref(&self, reference: &str) -> SchemaDescriptor {
        match self.document.resolve_local(reference) {
            Some(target) => self.normalize(target),
            None => {
                debug!(reference, "unresolvable $ref, accepting any value");
                SchemaDescriptor::Any
            }
        }
    }

    fn normalize_at(&self, node: &Value, depth: usize) -> SchemaDescriptor {
        if depth > self.max_depth {
            debug!(max_depth = self.max_depth, "schema nesting too deep, accepting any value");
            return SchemaDescriptor::Any;
        }

        let map = match node {
            Value::Object(map) => map,
            Value::Bool(_) => return SchemaDescriptor::Any,
            other => {
                debug!(node = %other, "schema node is not a mapping, accepting any value");
                return SchemaDescriptor::Any;
            }
        };

        if let Some(reference) = map.get("$ref").and_then(Value::as_str) {
            if self.document.resolve_local(reference).is_none() {
                debug!(reference, "unresolvable $ref, accepting any value");
                return SchemaDescriptor::Any;
            }
            return SchemaDescriptor::Ref(reference.to_string());
        }

        let (types, null_in_type) = parse_types(map.get("type"));
        let nullable = null_in_type || self.nullable_flag(map);

        let mut parts = Vec::new();
        let mut has_all_of = false;
        for keyword in ["oneOf", "anyOf"] {
            if let Some(alternatives) = non_empty_array(map.get(keyword)) {
                parts.push(SchemaDescriptor::Union(UnionSchema {
                    alternatives: alternatives
                        .iter()
                        .map(|alt| self.normalize_at(alt, depth + 1))
                        .collect(),
                    nullable,
                }));
            }
        }
        if let Some(all_of) = non_empty_array(map.get("allOf")) {
            has_all_of = true;
            parts.extend(all_of.iter().map(|part| self.normalize_at(part, depth + 1)));
        }

        let concrete = self.concrete(map, types, nullable, depth);

        match (concrete, parts.len()) {
            (None, 0) => SchemaDescriptor::Any,
            // A lone oneOf/anyOf already carries this node's nullable flag.
            (None, 1) if !has_all_of => parts.remove(0),
            (None, _) => SchemaDescriptor::AllOf(IntersectionSchema { parts, nullable }),
            (Some(concrete), 0) => SchemaDescriptor::Concrete(Box::new(concrete)),
            (Some(concrete), _) => {
                parts.insert(0, SchemaDescriptor::Concrete(Box::new(concrete)));
                SchemaDescriptor::AllOf(IntersectionSchema { parts, nullable })
            }
        }
    }

    fn nullable_flag(&self, map: &Map<String, Value>) -> bool {
        let version = self.document.version();
        let flag = map.get("nullable").and_then(Value::as_bool).unwrap_or(false);
        if flag && !version.uses_nullable_flag() {
            trace!(%version, "honoring legacy nullable flag");
        }

        let vendor = version == SpecVersion::Swagger2
            && map.get("x-nullable").and_then(Value::as_bool).unwrap_or(false);

        flag || vendor
    }

    /// Collects direct constraints, or `None` if the node declares none.
    fn concrete(
        &self,
        map: &Map<String, Value>,
        types: Option<TypeSet>,
        nullable: bool,
        depth: usize,
    ) -> Option<ConcreteSchema> {
        let required: IndexSet<String> = map
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let properties: IndexMap<String, SchemaDescriptor> = map
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| {
                props
                    .iter()
                    .map(|(name, node)| (name.clone(), self.normalize_at(node, depth + 1)))
                    .collect()
            })
            .unwrap_or_default();

        let additional_properties = match map.get("additionalProperties") {
            Some(Value::Bool(false)) => AdditionalProperties::Deny,
            Some(node @ Value::Object(_)) => match self.normalize_at(node, depth + 1) {
                SchemaDescriptor::Any => AdditionalProperties::Allow,
                schema => AdditionalProperties::Validate(Box::new(schema)),
            },
            _ => AdditionalProperties::Allow,
        };

        let items = map
            .get("items")
            .map(|node| self.normalize_at(node, depth + 1))
            .filter(|schema| !schema.is_any())
            .map(Box::new);

        let concrete = ConcreteSchema {
            types,
            nullable,
            constant: map.get("const").cloned(),
            allowed: map.get("enum").and_then(Value::as_array).cloned(),
            required,
            properties,
            additional_properties,
            items,
            format: map.get("format").and_then(Value::as_str).map(str::to_string),
        };

        let constrained = concrete.types.is_some()
            || concrete.constant.is_some()
            || concrete.allowed.is_some()
            || !concrete.required.is_empty()
            || !concrete.properties.is_empty()
            || concrete.additional_properties != AdditionalProperties::Allow
            || concrete.items.is_some();

        constrained.then_some(concrete)
    }
}

/// Parses a `type` field into a type set and whether `null` was listed.
///
/// Unknown tokens drop the whole type constraint rather than guessing.
fn parse_types(field: Option<&Value>) -> (Option<TypeSet>, bool) {
    match field {
        None => (None, false),
        Some(Value::String(token)) if token == "null" => (Some(TypeSet::new()), true),
        Some(Value::String(token)) => match JsonType::from_token(token) {
            Some(ty) => (Some([ty].into_iter().collect()), false),
            None => {
                debug!(token = token.as_str(), "unknown schema type, accepting any type");
                (None, false)
            }
        },
        Some(Value::Array(tokens)) if !tokens.is_empty() => {
            let mut set = TypeSet::new();
            let mut null = false;
            for token in tokens {
                match token.as_str() {
                    Some("null") => null = true,
                    Some(name) => match JsonType::from_token(name) {
                        Some(ty) => set.insert(ty),
                        None => {
                            debug!(token = name, "unknown schema type, accepting any type");
                            return (None, null);
                        }
                    },
                    None => return (None, null),
                }
            }
            (Some(set), null)
        }
        Some(other) => {
            debug!(field = %other, "malformed schema type, accepting any type");
            (None, false)
        }
    }
}

fn non_empty_array(field: Option<&Value>) -> Option<&Vec<Value>> {
    field.and_then(Value::as_array).filter(|items| !items.is_empty())
}
