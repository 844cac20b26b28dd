//! Read-only view over a parsed API description.
//!
//! The rule does not parse or resolve documents itself. [`Document`] only
//! pairs an already-built JSON tree with its declared specification version,
//! with convenience constructors for YAML and JSON text.

use std::fmt::{self, Display};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::error::DocumentError;

/// The major specification line a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecVersion {
    /// Swagger 2.0 (`swagger: "2.0"`), nullable via `x-nullable`.
    Swagger2,
    /// OpenAPI 3.0.x, nullable via the `nullable` flag.
    OpenApi30,
    /// OpenAPI 3.1.x and later 3.x, nullable via `type: [..., "null"]`.
    OpenApi31,
}

impl SpecVersion {
    /// Parses a declared version string such as `3.1.0`, `3.0` or `2.0`.
    ///
    /// `field` names the root field the version came from; `swagger` only
    /// accepts 2.x and `openapi` only accepts 3.x.
    pub fn parse(field: &str, declared: &str) -> Result<Self, DocumentError> {
        static VERSION: OnceLock<Regex> = OnceLock::new();
        let pattern = VERSION
            .get_or_init(|| Regex::new(r"^\s*(\d+)\.(\d+)").expect("version pattern is valid"));

        let unsupported = || DocumentError::UnsupportedVersion {
            version: declared.to_string(),
        };

        let captures = pattern.captures(declared).ok_or_else(unsupported)?;
        let major: u32 = captures[1].parse().map_err(|_| unsupported())?;
        let minor: u32 = captures[2].parse().map_err(|_| unsupported())?;

        match (field, major, minor) {
            ("swagger", 2, _) => Ok(SpecVersion::Swagger2),
            ("openapi", 3, 0) => Ok(SpecVersion::OpenApi30),
            ("openapi", 3, _) => Ok(SpecVersion::OpenApi31),
            _ => Err(unsupported()),
        }
    }

    /// Returns true if the legacy `nullable: true` flag is this version's
    /// native way of allowing null.
    pub fn uses_nullable_flag(self) -> bool {
        matches!(self, SpecVersion::OpenApi30)
    }
}

impl Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecVersion::Swagger2 => write!(f, "2.0"),
            SpecVersion::OpenApi30 => write!(f, "3.0"),
            SpecVersion::OpenApi31 => write!(f, "3.1"),
        }
    }
}

/// A parsed, reference-resolved API description and its declared version.
///
/// `Document` is immutable. It is `Send + Sync`, so one instance can be
/// shared (e.g. behind an `Arc`) by rules running on different threads.
///
/// # Example
///
/// ```rust
/// use specimen::{Document, SpecVersion};
///
/// let document = Document::from_yaml_str("openapi: 3.1.0\npaths: {}\n").unwrap();
/// assert_eq!(document.version(), SpecVersion::OpenApi31);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
    version: SpecVersion,
}

impl Document {
    /// Wraps a parsed tree, detecting the version from `openapi` or `swagger`.
    ///
    /// The version may be declared as a string or, as happens with unquoted
    /// YAML like `openapi: 3.1`, as a number.
    pub fn new(root: Value) -> Result<Self, DocumentError> {
        let map = root.as_object().ok_or(DocumentError::NotAMapping {
            actual: kind_name(&root),
        })?;

        let (field, declared) = ["openapi", "swagger"]
            .iter()
            .find_map(|field| map.get(*field).map(|v| (*field, v)))
            .ok_or(DocumentError::MissingVersion)?;

        let declared = match declared {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return Err(DocumentError::MissingVersion),
        };

        let version = SpecVersion::parse(field, &declared)?;
        Ok(Self { root, version })
    }

    /// Wraps a parsed tree whose version the host has already determined.
    pub fn with_version(root: Value, version: SpecVersion) -> Self {
        Self { root, version }
    }

    /// Parses YAML text into a document.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|source| DocumentError::InvalidYaml { source })?;
        Self::new(yaml_to_json(yaml))
    }

    /// Parses JSON text into a document.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let json: Value =
            serde_json::from_str(text).map_err(|source| DocumentError::InvalidJson { source })?;
        Self::new(json)
    }

    /// Returns the root of the document tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the declared specification version.
    pub fn version(&self) -> SpecVersion {
        self.version
    }

    /// Looks up a node by a local reference such as `#/components/schemas/Pet`.
    ///
    /// Returns `None` for remote references and for pointers that do not
    /// resolve.
    pub fn resolve_local(&self, reference: &str) -> Option<&Value> {
        let pointer = reference.strip_prefix('#')?;
        if pointer.is_empty() {
            return Some(&self.root);
        }
        self.root.pointer(pointer)
    }
}

/// Converts a YAML tree into JSON, stringifying non-string mapping keys.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    match value {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(b),
        serde_yaml::Value::Number(n) => yaml_number(&n),
        serde_yaml::Value::String(s) => Value::String(s),
        serde_yaml::Value::Sequence(items) => {
            Value::Array(items.into_iter().map(yaml_to_json).collect())
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut map = Map::new();
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        other => yaml_to_json(other).to_string(),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Document>();
    assert_sync::<Document>();
};
