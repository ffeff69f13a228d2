//! Generator configuration and the optional `stubgen.toml` overlay.

use crate::error::{GenerateError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default location of jQuery's API description.
pub const DEFAULT_URL: &str = "https://api.jquery.com/resources/api.xml";

/// Default generated file.
pub const DEFAULT_OUTPUT: &str = "jquery-jsdoc.js";

/// Default hand-written header prepended to the output.
pub const DEFAULT_HEADER: &str = "assets/jquery-header.js";

/// Name of the configuration file picked up from the working directory.
pub const CONFIG_FILE: &str = "stubgen.toml";

/// Name prefixes whose members live on a stand-in object instead of the
/// prefix itself.
const OWNER_PREFIXES: &[(&str, &str)] = &[
    ("deferred", "__jQueryDeferred.prototype"),
    ("Promise", "__jQueryPromise.prototype"),
    ("event", "__jQueryEvent.prototype"),
];

/// Type names that have no constructor in the stub world.
const TYPE_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("Promise", "__jQueryPromise"),
    ("Integer", "Number"),
    ("XMLDocument", "Document"),
    ("boolean", "Boolean"),
];

/// Which API entries are rendered, based on the version they were added in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VersionFilter {
    /// Every entry is rendered.
    #[default]
    Latest,
    /// Only entries added in this version or earlier are rendered.
    UpTo(String),
}

impl VersionFilter {
    /// Parse a filter; `"latest"` disables filtering.
    pub fn parse(value: &str) -> Self {
        if value == "latest" {
            VersionFilter::Latest
        } else {
            VersionFilter::UpTo(value.to_string())
        }
    }

    /// Whether an entry added in `added` passes the filter.
    ///
    /// The comparison is a plain string comparison, so `"1.10"` sorts before
    /// `"1.9"`. Generated files for a given target have always been produced
    /// this way and are kept stable rather than switched to semver ordering.
    pub fn admits(&self, added: &str) -> bool {
        match self {
            VersionFilter::Latest => true,
            VersionFilter::UpTo(target) => added <= target.as_str(),
        }
    }
}

impl fmt::Display for VersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFilter::Latest => f.write_str("latest"),
            VersionFilter::UpTo(version) => f.write_str(version),
        }
    }
}

/// Immutable settings for one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Endpoint serving the API XML.
    pub url: String,
    /// Version filter applied to every entry.
    pub target_version: VersionFilter,
    /// Collapse `A, B` type lists to `A` (Eclipse JSDT cannot read unions).
    pub single_return_type: bool,
    /// File the generated stubs are written to.
    pub output: PathBuf,
    /// File prepended verbatim to the output.
    pub header: PathBuf,
    /// Name prefix to owning object, e.g. `deferred` to `__jQueryDeferred.prototype`.
    pub owner_prefixes: Vec<(String, String)>,
    /// Raw type name to rendered type name.
    pub type_substitutions: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            target_version: VersionFilter::Latest,
            single_return_type: true,
            output: PathBuf::from(DEFAULT_OUTPUT),
            header: PathBuf::from(DEFAULT_HEADER),
            owner_prefixes: to_owned_table(OWNER_PREFIXES),
            type_substitutions: to_owned_table(TYPE_SUBSTITUTIONS),
        }
    }
}

impl Config {
    /// Owning object for a dotted-name prefix, if the prefix is remapped.
    pub fn owner_for(&self, prefix: &str) -> Option<&str> {
        lookup(&self.owner_prefixes, prefix)
    }

    /// Substituted spelling of a single type name, if any.
    pub fn substitute_type(&self, raw: &str) -> Option<&str> {
        lookup(&self.type_substitutions, raw)
    }
}

fn lookup<'a>(table: &'a [(String, String)], key: &str) -> Option<&'a str> {
    table
        .iter()
        .find(|(from, _)| from == key)
        .map(|(_, to)| to.as_str())
}

fn to_owned_table(table: &[(&str, &str)]) -> Vec<(String, String)> {
    table
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

/// Replace entries with the same key, append the rest.
fn merge_table(table: &mut Vec<(String, String)>, overrides: BTreeMap<String, String>) {
    for (key, value) in overrides {
        match table.iter_mut().find(|(from, _)| *from == key) {
            Some(entry) => entry.1 = value,
            None => table.push((key, value)),
        }
    }
}

/// Contents of a `stubgen.toml` file. Every key is optional and overrides
/// the corresponding default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub target_version: Option<String>,
    pub single_return_type: Option<bool>,
    pub output: Option<PathBuf>,
    pub header: Option<PathBuf>,
    /// Extra or replacement owner prefixes.
    #[serde(default)]
    pub owners: BTreeMap<String, String>,
    /// Extra or replacement type substitutions.
    #[serde(default)]
    pub types: BTreeMap<String, String>,
}

impl ConfigFile {
    /// Load a configuration file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| GenerateError::io(path, e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GenerateError::Config(e.to_string()))
    }

    /// Layer this file over `base`.
    pub fn apply(self, mut base: Config) -> Config {
        if let Some(url) = self.url {
            base.url = url;
        }
        if let Some(version) = self.target_version {
            base.target_version = VersionFilter::parse(&version);
        }
        if let Some(single) = self.single_return_type {
            base.single_return_type = single;
        }
        if let Some(output) = self.output {
            base.output = output;
        }
        if let Some(header) = self.header {
            base.header = header;
        }
        merge_table(&mut base.owner_prefixes, self.owners);
        merge_table(&mut base.type_substitutions, self.types);
        base
    }
}
