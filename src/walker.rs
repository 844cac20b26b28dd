//! Discovery of example sites in a document.
//!
//! The [`Walker`] performs a read-only, depth-first traversal in document
//! order and yields one [`ExampleSite`] for every place an `example` or
//! `examples` field sits next to a schema: on schemas themselves (including
//! nested properties and items), on parameters, on headers and on media
//! types.

use std::fmt::{self, Display};

use serde_json::{Map, Value};
use tracing::trace;

use crate::document::{Document, SpecVersion};
use crate::path::DocumentPath;
use crate::schema::{Normalizer, SchemaDescriptor, DEFAULT_MAX_DEPTH};

const OPERATIONS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

const COMPOSITIONS: [&str; 3] = ["oneOf", "anyOf", "allOf"];

/// Where an example site was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiteKind {
    Schema,
    Parameter,
    Header,
    MediaType,
    /// Swagger 2.0 response-level examples keyed by MIME type.
    Response,
}

impl SiteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SiteKind::Schema => "schema",
            SiteKind::Parameter => "parameter",
            SiteKind::Header => "header",
            SiteKind::MediaType => "media_type",
            SiteKind::Response => "response",
        }
    }
}

impl Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The example data declared at a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExamplePayload<'doc> {
    /// A singular `example` value.
    Single(&'doc Value),
    /// A schema-level `examples` sequence.
    Sequence(&'doc [Value]),
    /// Named examples; each entry wraps its payload under `value`.
    Named(&'doc Map<String, Value>),
    /// Raw values keyed by MIME type, without a wrapper.
    Keyed(&'doc Map<String, Value>),
}

/// One location in the document bearing example data.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleSite<'doc> {
    pub kind: SiteKind,
    /// The normalized schema the examples claim to illustrate.
    pub schema: SchemaDescriptor,
    /// Path of the node that owns the `example`/`examples` field.
    pub path: DocumentPath,
    pub payload: ExamplePayload<'doc>,
}

impl<'doc> ExampleSite<'doc> {
    /// Returns every example value with its own path, in declaration order.
    ///
    /// Named entries without a `value` field (for instance those that only
    /// carry an `externalValue`) are skipped.
    pub fn samples(&self) -> Vec<(DocumentPath, &'doc Value)> {
        match self.payload {
            ExamplePayload::Single(value) => vec![(self.path.push_field("example"), value)],
            ExamplePayload::Sequence(values) => {
                let base = self.path.push_field("examples");
                values
                    .iter()
                    .enumerate()
                    .map(|(i, value)| (base.push_index(i), value))
                    .collect()
            }
            ExamplePayload::Named(entries) => {
                let base = self.path.push_field("examples");
                entries
                    .iter()
                    .filter_map(|(name, entry)| {
                        entry.get("value").map(|value| (base.push_key(name), value))
                    })
                    .collect()
            }
            ExamplePayload::Keyed(entries) => {
                let base = self.path.push_field("examples");
                entries
                    .iter()
                    .map(|(name, value)| (base.push_key(name), value))
                    .collect()
            }
        }
    }
}

/// Enumerates example sites reachable from a document's root.
///
/// # Example
///
/// ```rust
/// use specimen::{Document, Walker};
///
/// let document = Document::from_yaml_str(r#"
/// openapi: 3.1.0
/// components:
///   schemas:
///     Herbs:
///       type: string
///       examples: [basil, thyme]
/// "#).unwrap();
///
/// let sites = Walker::new(&document).sites();
/// assert_eq!(sites.len(), 1);
/// assert_eq!(sites[0].path.to_string(), "$.components.schemas['Herbs']");
/// ```
pub struct Walker<'doc> {
    document: &'doc Document,
    normalizer: Normalizer<'doc>,
    max_depth: usize,
}

impl<'doc> Walker<'doc> {
    /// Creates a walker with the default depth limit.
    pub fn new(document: &'doc Document) -> Self {
        Self {
            document,
            normalizer: Normalizer::new(document),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum schema nesting depth for both traversal and
    /// normalization.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.normalizer = Normalizer::new(self.document).with_max_depth(depth);
        self.max_depth = depth;
        self
    }

    /// Collects all example sites in document order.
    pub fn sites(&self) -> Vec<ExampleSite<'doc>> {
        let mut sites = Vec::new();
        let root = self.document.root();
        match self.document.version() {
            SpecVersion::Swagger2 => self.walk_swagger(root, &mut sites),
            SpecVersion::OpenApi30 | SpecVersion::OpenApi31 => self.walk_openapi(root, &mut sites),
        }
        sites
    }

    fn walk_openapi(&self, root: &'doc Value, sites: &mut Vec<ExampleSite<'doc>>) {
        let base = DocumentPath::root();
        for (key, node) in entries(root) {
            let path = base.push_field(key);
            match key.as_str() {
                "components" => self.walk_components(node, &path, sites),
                "paths" | "webhooks" => {
                    for (name, item) in entries(node) {
                        self.walk_path_item(item, &path.push_key(name), sites);
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_components(
        &self,
        components: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (section, members) in entries(components) {
            let section_path = path.push_field(section);
            for (name, node) in entries(members) {
                let node_path = section_path.push_key(name);
                match section.as_str() {
                    "schemas" => self.walk_schema(node, &node_path, 0, sites),
                    "parameters" => {
                        self.walk_parameter(node, &node_path, SiteKind::Parameter, sites)
                    }
                    "headers" => self.walk_parameter(node, &node_path, SiteKind::Header, sites),
                    "requestBodies" => self.walk_content(node, &node_path, sites),
                    "responses" => self.walk_response(node, &node_path, sites),
                    "pathItems" => self.walk_path_item(node, &node_path, sites),
                    _ => {}
                }
            }
        }
    }

    fn walk_path_item(
        &self,
        item: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (key, node) in entries(item) {
            let node_path = path.push_field(key);
            if key == "parameters" {
                self.walk_parameter_list(node, &node_path, sites);
            } else if OPERATIONS.contains(&key.as_str()) {
                self.walk_operation(node, &node_path, sites);
            }
        }
    }

    fn walk_operation(
        &self,
        operation: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (key, node) in entries(operation) {
            let node_path = path.push_field(key);
            match key.as_str() {
                "parameters" => self.walk_parameter_list(node, &node_path, sites),
                "requestBody" => self.walk_content(node, &node_path, sites),
                "responses" => {
                    for (code, response) in entries(node) {
                        self.walk_response(response, &node_path.push_key(code), sites);
                    }
                }
                "callbacks" => {
                    for (name, callback) in entries(node) {
                        let callback_path = node_path.push_key(name);
                        for (expression, item) in entries(callback) {
                            self.walk_path_item(item, &callback_path.push_key(expression), sites);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_parameter_list(
        &self,
        list: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        if let Some(parameters) = list.as_array() {
            for (i, parameter) in parameters.iter().enumerate() {
                self.walk_parameter(parameter, &path.push_index(i), SiteKind::Parameter, sites);
            }
        }
    }

    fn walk_response(
        &self,
        response: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (key, node) in entries(response) {
            let node_path = path.push_field(key);
            match key.as_str() {
                "headers" => {
                    for (name, header) in entries(node) {
                        let header_path = node_path.push_key(name);
                        self.walk_parameter(header, &header_path, SiteKind::Header, sites);
                    }
                }
                "content" => self.walk_media_types(node, &node_path, sites),
                _ => {}
            }
        }
    }

    /// Walks the `content` map of a request body or parameter.
    fn walk_content(
        &self,
        owner: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        if let Some(content) = owner.get("content") {
            self.walk_media_types(content, &path.push_field("content"), sites);
        }
    }

    fn walk_media_types(
        &self,
        content: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (media_type, media) in entries(content) {
            let media_path = path.push_key(media_type);
            self.walk_binding(media, &media_path, SiteKind::MediaType, sites);

            if let Some(encodings) = media.get("encoding") {
                for (property, encoding) in entries(encodings) {
                    let encoding_path = media_path.push_field("encoding").push_key(property);
                    if let Some(headers) = encoding.get("headers") {
                        for (name, header) in entries(headers) {
                            let header_path = encoding_path.push_field("headers").push_key(name);
                            self.walk_parameter(header, &header_path, SiteKind::Header, sites);
                        }
                    }
                }
            }
        }
    }

    fn walk_parameter(
        &self,
        parameter: &'doc Value,
        path: &DocumentPath,
        kind: SiteKind,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        self.walk_binding(parameter, path, kind, sites);
        self.walk_content(parameter, path, sites);
    }

    /// Walks a node that binds a `schema` to `example`/`examples` fields.
    fn walk_binding(
        &self,
        node: &'doc Value,
        path: &DocumentPath,
        kind: SiteKind,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        let schema_node = match node.get("schema") {
            Some(schema_node) => schema_node,
            None => return,
        };
        let example = node.get("example");
        let named = node.get("examples").and_then(Value::as_object);
        if example.is_some() || named.is_some() {
            let schema = self.normalizer.normalize(schema_node);
            if let Some(example) = example {
                let payload = ExamplePayload::Single(example);
                self.push(sites, kind, schema.clone(), path, payload);
            }
            if let Some(named) = named {
                self.push(sites, kind, schema, path, ExamplePayload::Named(named));
            }
        }

        self.walk_schema(schema_node, &path.push_field("schema"), 0, sites);
    }

    fn walk_schema(
        &self,
        node: &'doc Value,
        path: &DocumentPath,
        depth: usize,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        if depth > self.max_depth {
            trace!(path = %path, "schema nesting too deep, not walking further");
            return;
        }
        let map = match node.as_object() {
            Some(map) => map,
            None => return,
        };
        // Reference targets are walked at their own location.
        if map.contains_key("$ref") {
            return;
        }

        let example = map.get("example");
        let examples = map.get("examples").and_then(Value::as_array);
        if example.is_some() || examples.is_some() {
            let schema = self.normalizer.normalize(node);
            if let Some(example) = example {
                let payload = ExamplePayload::Single(example);
                self.push(sites, SiteKind::Schema, schema.clone(), path, payload);
            }
            if let Some(examples) = examples {
                let payload = ExamplePayload::Sequence(examples);
                self.push(sites, SiteKind::Schema, schema, path, payload);
            }
        }

        for (key, child) in map {
            match key.as_str() {
                "properties" => {
                    let properties_path = path.push_field("properties");
                    for (name, property) in entries(child) {
                        let property_path = properties_path.push_key(name);
                        self.walk_schema(property, &property_path, depth + 1, sites);
                    }
                }
                "items" | "additionalProperties" => {
                    self.walk_schema(child, &path.push_field(key), depth + 1, sites);
                }
                _ if COMPOSITIONS.contains(&key.as_str()) => {
                    if let Some(alternatives) = child.as_array() {
                        let composition_path = path.push_field(key);
                        for (i, alternative) in alternatives.iter().enumerate() {
                            let alternative_path = composition_path.push_index(i);
                            self.walk_schema(alternative, &alternative_path, depth + 1, sites);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_swagger(&self, root: &'doc Value, sites: &mut Vec<ExampleSite<'doc>>) {
        let base = DocumentPath::root();
        for (key, node) in entries(root) {
            let path = base.push_field(key);
            match key.as_str() {
                "definitions" => {
                    for (name, schema) in entries(node) {
                        self.walk_schema(schema, &path.push_key(name), 0, sites);
                    }
                }
                "parameters" => {
                    for (name, parameter) in entries(node) {
                        self.walk_swagger_parameter(parameter, &path.push_key(name), sites);
                    }
                }
                "responses" => {
                    for (name, response) in entries(node) {
                        self.walk_swagger_response(response, &path.push_key(name), sites);
                    }
                }
                "paths" => {
                    for (name, item) in entries(node) {
                        self.walk_swagger_path_item(item, &path.push_key(name), sites);
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_swagger_path_item(
        &self,
        item: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        for (key, node) in entries(item) {
            let node_path = path.push_field(key);
            if key == "parameters" {
                self.walk_swagger_parameter_list(node, &node_path, sites);
            } else if OPERATIONS.contains(&key.as_str()) {
                for (field, child) in entries(node) {
                    let child_path = node_path.push_field(field);
                    match field.as_str() {
                        "parameters" => self.walk_swagger_parameter_list(child, &child_path, sites),
                        "responses" => {
                            for (code, response) in entries(child) {
                                let response_path = child_path.push_key(code);
                                self.walk_swagger_response(response, &response_path, sites);
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn walk_swagger_parameter_list(
        &self,
        list: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        if let Some(parameters) = list.as_array() {
            for (i, parameter) in parameters.iter().enumerate() {
                self.walk_swagger_parameter(parameter, &path.push_index(i), sites);
            }
        }
    }

    /// Only body parameters carry a schema in Swagger 2.0.
    fn walk_swagger_parameter(
        &self,
        parameter: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        if let Some(schema) = parameter.get("schema") {
            self.walk_schema(schema, &path.push_field("schema"), 0, sites);
        }
    }

    fn walk_swagger_response(
        &self,
        response: &'doc Value,
        path: &DocumentPath,
        sites: &mut Vec<ExampleSite<'doc>>,
    ) {
        let schema_node = match response.get("schema") {
            Some(schema_node) => schema_node,
            None => return,
        };
        if let Some(keyed) = response.get("examples").and_then(Value::as_object) {
            let schema = self.normalizer.normalize(schema_node);
            self.push(sites, SiteKind::Response, schema, path, ExamplePayload::Keyed(keyed));
        }
        self.walk_schema(schema_node, &path.push_field("schema"), 0, sites);
    }

    fn push(
        &self,
        sites: &mut Vec<ExampleSite<'doc>>,
        kind: SiteKind,
        schema: SchemaDescriptor,
        path: &DocumentPath,
        payload: ExamplePayload<'doc>,
    ) {
        trace!(path = %path, kind = kind.as_str(), "found example site");
        sites.push(ExampleSite {
            kind,
            schema,
            path: path.clone(),
            payload,
        });
    }
}

/// Iterates a mapping node's entries, or nothing for any other node.
fn entries<'a>(node: &'a Value) -> impl Iterator<Item = (&'a String, &'a Value)> + 'a {
    node.as_object().into_iter().flat_map(|map| map.iter())
}
