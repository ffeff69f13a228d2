//! Stub generator for jQuery's API description.
//!
//! Reads the XML feed that documents jQuery's public API and writes a single
//! JavaScript file of JSDoc-annotated stub declarations, so editors without
//! jQuery's sources can still offer completion and inline documentation.
//!
//! The run is one straight pass:
//! - fetch the feed ([`source`])
//! - parse it and select the `method` and `property` entries ([`document`])
//! - turn each entry into a doc comment and a stub ([`entry`], [`naming`], [`render`])
//! - prepend the hand-written header and write the file ([`output`])
//!
//! [`Generator`] ties these together for a given [`Config`].

pub mod config;
pub mod document;
pub mod entry;
pub mod error;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod source;

pub use config::{Config, ConfigFile, VersionFilter, CONFIG_FILE};
pub use entry::{ApiEntry, EntryKind, Example, RawArgument, Signature};
pub use error::{GenerateError, Result, Stage};
pub use naming::{Argument, DefinitionTarget, TypeName};
pub use pipeline::{Generator, Report, Transformed, ENTRY_XPATH};
pub use source::{FileSource, HttpSource, Source};

/// Crate version, shown by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
