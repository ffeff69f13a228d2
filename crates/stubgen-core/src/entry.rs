//! In-memory description of one API member, read from an `<entry>` node.

use crate::document::{attribute, child, children, inner_markup, required_attribute, text_content};
use crate::error::{GenerateError, Result};
use crate::naming::strip_qualifiers;
use sxd_document::dom::Element;

/// Version assumed when an entry does not say when it was added.
pub const DEFAULT_ADDED_VERSION: &str = "1.0";

/// Kind of API member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Method,
    Property,
}

impl EntryKind {
    /// Map the `type` attribute of an `<entry>`.
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "method" => Some(EntryKind::Method),
            "property" => Some(EntryKind::Property),
            _ => None,
        }
    }
}

/// One documented API member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEntry {
    /// Dotted name, e.g. `deferred.resolve`.
    pub name: String,
    pub kind: EntryKind,
    /// Call shapes in document order.
    pub signatures: Vec<Signature>,
    /// Raw comma-separated return type; empty when the entry has none.
    pub return_type: String,
    pub added_version: String,
    pub short_description: String,
    pub long_description: String,
    pub examples: Vec<Example>,
}

/// A documented call shape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub added: Option<String>,
    pub arguments: Vec<RawArgument>,
}

/// An argument exactly as the feed declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArgument {
    pub name: String,
    /// Raw comma-separated type list.
    pub type_list: String,
    /// Embedded markup of the `<desc>` child.
    pub description: String,
}

/// A usage example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Embedded markup of the `<desc>` child.
    pub description: String,
    /// Source code, as plain text.
    pub code: String,
}

impl ApiEntry {
    /// Read an entry from its `<entry>` element.
    ///
    /// A missing `name` or `type` attribute, an unsupported `type`, or an
    /// argument without a usable name or a type fails the whole run.
    pub fn from_element(element: Element<'_>) -> Result<Self> {
        let name = required_attribute(element, "name", "?")?.to_string();
        let kind_attr = required_attribute(element, "type", &name)?;
        let kind = EntryKind::from_attribute(kind_attr).ok_or_else(|| {
            GenerateError::UnsupportedEntry {
                entry: name.clone(),
                kind: kind_attr.to_string(),
            }
        })?;

        let signatures = children(element, "signature")
            .into_iter()
            .map(|sig| Signature::from_element(sig, &name))
            .collect::<Result<Vec<_>>>()?;

        let added_version = signatures
            .first()
            .and_then(|sig| sig.added.clone())
            .unwrap_or_else(|| DEFAULT_ADDED_VERSION.to_string());

        let examples = children(element, "example")
            .into_iter()
            .map(|ex| Example::from_element(ex, &name))
            .collect::<Result<Vec<_>>>()?;

        Ok(ApiEntry {
            return_type: attribute(element, "return").unwrap_or_default().to_string(),
            short_description: markup_of(element, "desc"),
            long_description: markup_of(element, "longdesc"),
            name,
            kind,
            signatures,
            added_version,
            examples,
        })
    }

    /// Arguments of the first signature.
    ///
    /// Known limitation: overloads after the first are not documented, so
    /// every generated stub carries a single call shape.
    pub fn primary_arguments(&self) -> &[RawArgument] {
        self.signatures
            .first()
            .map_or(&[][..], |sig| sig.arguments.as_slice())
    }
}

impl Signature {
    fn from_element(element: Element<'_>, entry: &str) -> Result<Self> {
        let added = child(element, "added")
            .map(|added| text_content(added).trim().to_string())
            .filter(|added| !added.is_empty());

        let arguments = children(element, "argument")
            .into_iter()
            .map(|arg| RawArgument::from_element(arg, entry))
            .collect::<Result<Vec<_>>>()?;

        Ok(Signature { added, arguments })
    }
}

impl RawArgument {
    fn from_element(element: Element<'_>, entry: &str) -> Result<Self> {
        let name = required_attribute(element, "name", entry)?.to_string();
        if strip_qualifiers(&name).is_empty() {
            return Err(GenerateError::MissingAttribute {
                element: "argument".to_string(),
                attribute: "name",
                entry: entry.to_string(),
            });
        }

        // Newer feeds list alternatives as <type name="..."/> children.
        let type_list = match attribute(element, "type") {
            Some(ty) => ty.to_string(),
            None => {
                let alternatives: Vec<&str> = children(element, "type")
                    .into_iter()
                    .filter_map(|ty| attribute(ty, "name"))
                    .collect();
                if alternatives.is_empty() {
                    return Err(GenerateError::MissingAttribute {
                        element: "argument".to_string(),
                        attribute: "type",
                        entry: entry.to_string(),
                    });
                }
                alternatives.join(", ")
            }
        };

        Ok(RawArgument {
            name,
            type_list,
            description: markup_of(element, "desc"),
        })
    }
}

impl Example {
    fn from_element(element: Element<'_>, entry: &str) -> Result<Self> {
        let code = child(element, "code").ok_or_else(|| GenerateError::MissingElement {
            element: "example".to_string(),
            child: "code",
            entry: entry.to_string(),
        })?;

        Ok(Example {
            description: markup_of(element, "desc"),
            code: text_content(code).trim().to_string(),
        })
    }
}

fn markup_of(element: Element<'_>, name: &str) -> String {
    child(element, name)
        .map(|e| inner_markup(e).trim().to_string())
        .unwrap_or_default()
}
