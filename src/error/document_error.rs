//! Errors raised while wrapping a parsed description into a [`Document`](crate::Document).

use thiserror::Error;

/// Errors during document construction.
///
/// These are the only failures this crate reports through `Result`. Once a
/// [`Document`](crate::Document) exists, running the rule cannot fail.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid YAML: {source}")]
    InvalidYaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("document root must be a mapping, got {actual}")]
    NotAMapping { actual: &'static str },

    #[error("document declares neither 'openapi' nor 'swagger' version")]
    MissingVersion,

    #[error("unsupported specification version \"{version}\"")]
    UnsupportedVersion { version: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = DocumentError::NotAMapping { actual: "array" };
        assert_eq!(err.to_string(), "document root must be a mapping, got array");

        let err = DocumentError::UnsupportedVersion {
            version: "4.0".into(),
        };
        assert_eq!(err.to_string(), "unsupported specification version \"4.0\"");

        assert_eq!(
            DocumentError::MissingVersion.to_string(),
            "document declares neither 'openapi' nor 'swagger' version"
        );
    }
}
