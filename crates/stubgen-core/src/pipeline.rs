//! The fetch, parse, transform and write sequence.

use tracing::{debug, info};

use crate::config::Config;
use crate::document;
use crate::entry::ApiEntry;
use crate::error::Result;
use crate::output;
use crate::render::render_entry;
use crate::source::Source;

/// Selects every entry the transformer renders.
pub const ENTRY_XPATH: &str = r#"//entries/entry[@type="method" or @type="property"]"#;

/// Entry name of the constructor, which the header declares by hand.
const CONSTRUCTOR: &str = "jQuery";

/// Counts from one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Report {
    /// Entries rendered into the output.
    pub rendered: usize,
    /// The `jQuery` constructor entry, left to the header.
    pub skipped_constructor: usize,
    /// Entries newer than the target version.
    pub skipped_version: usize,
}

/// Rendered blocks plus the counts that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformed {
    pub blocks: Vec<String>,
    pub report: Report,
}

/// Runs the generator with a fixed configuration.
#[derive(Debug, Clone)]
pub struct Generator {
    config: Config,
}

impl Generator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse an API document and render every qualifying entry, in document
    /// order. Any malformed entry fails the whole transform.
    pub fn transform(&self, xml: &str) -> Result<Transformed> {
        let package = document::parse(xml)?;
        let doc = package.as_document();
        let elements = document::select(&doc, ENTRY_XPATH)?;
        debug!(entries = elements.len(), "selected API entries");

        let mut out = Transformed::default();
        for element in elements {
            let entry = ApiEntry::from_element(element)?;

            if entry.name == CONSTRUCTOR {
                out.report.skipped_constructor += 1;
                continue;
            }
            if !self.config.target_version.admits(&entry.added_version) {
                debug!(
                    name = %entry.name,
                    added = %entry.added_version,
                    "skipping entry newer than target version"
                );
                out.report.skipped_version += 1;
                continue;
            }

            out.blocks.push(render_entry(&entry, &self.config));
            out.report.rendered += 1;
        }

        Ok(out)
    }

    /// Fetch from `source`, transform, and write the configured output file.
    pub fn run(&self, source: &dyn Source) -> Result<Report> {
        info!(source = %source.describe(), "fetching API document");
        let xml = source.fetch()?;

        let transformed = self.transform(&xml)?;

        output::write_output(&self.config.header, &transformed.blocks, &self.config.output)?;
        info!(
            output = %self.config.output.display(),
            rendered = transformed.report.rendered,
            "wrote stub file"
        );
        Ok(transformed.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VersionFilter;
    use crate::error::GenerateError;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<entries>
  <entry type="method" name="jQuery" return="jQuery">
    <signature><added>1.0</added></signature>
    <desc>Constructor.</desc>
  </entry>
  <entry type="method" name="old" return="jQuery">
    <signature><added>1.3</added></signature>
    <desc>Old.</desc>
  </entry>
  <entry type="selector" name="animated">
    <signature><added>1.2</added></signature>
  </entry>
  <entry type="method" name="new" return="jQuery">
    <signature><added>1.5</added></signature>
    <desc>New.</desc>
  </entry>
</entries>"#;

    #[test]
    fn constructor_is_skipped() {
        let transformed = Generator::new(Config::default()).transform(FEED).unwrap();
        assert_eq!(transformed.report.skipped_constructor, 1);
        assert_eq!(transformed.report.rendered, 2);
        assert!(transformed
            .blocks
            .iter()
            .all(|b| !b.contains("jQuery.prototype.jQuery")));
    }

    #[test]
    fn version_filter_drops_newer_entries() {
        let config = Config {
            target_version: VersionFilter::parse("1.4"),
            ..Config::default()
        };
        let transformed = Generator::new(config).transform(FEED).unwrap();
        assert_eq!(
            transformed.report,
            Report {
                rendered: 1,
                skipped_constructor: 1,
                skipped_version: 1,
            }
        );
        assert!(transformed.blocks[0].ends_with("jQuery.prototype.old = function() { return new jQuery(); };"));
    }

    #[test]
    fn one_bad_entry_fails_the_run() {
        let feed = r#"<entries>
  <entry type="method" name="fine" return="jQuery"/>
  <entry type="method" return="jQuery"/>
</entries>"#;
        let err = Generator::new(Config::default()).transform(feed).unwrap_err();
        assert!(matches!(err, GenerateError::MissingAttribute { attribute: "name", .. }));
    }

    #[test]
    fn non_entry_documents_render_nothing() {
        let transformed = Generator::new(Config::default())
            .transform("<api><entry type=\"method\" name=\"x\"/></api>")
            .unwrap();
        assert!(transformed.blocks.is_empty());
    }
}
