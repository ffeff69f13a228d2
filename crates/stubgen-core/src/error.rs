//! Error types for the generation pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating the stub file.
///
/// Every failure is fatal to the run; nothing in the pipeline retries or
/// skips past an error.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The HTTP request could not be completed.
    #[error("failed to fetch '{url}': {reason}")]
    Transport { url: String, reason: String },

    /// The endpoint answered with anything other than `200 OK`.
    #[error("fetching '{url}' returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The document body is not well-formed XML.
    #[error("malformed API document: {0}")]
    Parse(String),

    /// An XPath expression could not be evaluated.
    #[error("XPath query '{expr}' failed: {reason}")]
    Query { expr: String, reason: String },

    /// An element is missing an attribute the transformer depends on.
    #[error("<{element}> in entry '{entry}' is missing the '{attribute}' attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        entry: String,
    },

    /// An `<entry>` selected for rendering has a kind the transformer does not handle.
    #[error("entry '{entry}' has unsupported type '{kind}'")]
    UnsupportedEntry { entry: String, kind: String },

    /// An element is missing a child element the transformer depends on.
    #[error("<{element}> in entry '{entry}' has no <{child}> child")]
    MissingElement {
        element: String,
        child: &'static str,
        entry: String,
    },

    /// Reading the header or writing the output failed.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GenerateError {
    /// Wrap an I/O error together with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        GenerateError::Io {
            path: path.into(),
            source,
        }
    }

    /// The pipeline stage this error belongs to.
    pub fn stage(&self) -> Stage {
        match self {
            GenerateError::Transport { .. } | GenerateError::Status { .. } => Stage::Fetch,
            GenerateError::Parse(_) => Stage::Parse,
            GenerateError::Query { .. }
            | GenerateError::UnsupportedEntry { .. }
            | GenerateError::MissingAttribute { .. }
            | GenerateError::MissingElement { .. } => Stage::Transform,
            GenerateError::Io { .. } => Stage::Write,
            GenerateError::Config(_) => Stage::Config,
        }
    }
}

/// Pipeline stage, used when reporting which step of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Fetch,
    Parse,
    Transform,
    Write,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Fetch => "fetch",
            Stage::Parse => "parse",
            Stage::Transform => "transform",
            Stage::Write => "write",
        };
        f.write_str(name)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_of_each_variant() {
        let status = GenerateError::Status {
            url: "http://x".to_string(),
            status: 404,
        };
        assert_eq!(status.stage(), Stage::Fetch);
        assert_eq!(GenerateError::Parse("eof".into()).stage(), Stage::Parse);

        let missing = GenerateError::MissingAttribute {
            element: "argument".to_string(),
            attribute: "name",
            entry: "click".to_string(),
        };
        assert_eq!(missing.stage(), Stage::Transform);

        let io = GenerateError::io("out.js", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(io.stage(), Stage::Write);
    }

    #[test]
    fn messages_name_the_entry() {
        let err = GenerateError::MissingAttribute {
            element: "argument".to_string(),
            attribute: "name",
            entry: "deferred.resolve".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "<argument> in entry 'deferred.resolve' is missing the 'name' attribute"
        );
        assert_eq!(Stage::Transform.to_string(), "transform");
    }
}
