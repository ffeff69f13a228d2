//! XML document access: parsing, XPath selection and child lookup.

use crate::error::{GenerateError, Result};
use sxd_document::dom::{ChildOfElement, Document, Element};
use sxd_document::Package;
use sxd_xpath::nodeset::Node;
use sxd_xpath::Value;

/// Parse the raw API description into a document package.
pub fn parse(xml: &str) -> Result<Package> {
    sxd_document::parser::parse(xml).map_err(|e| GenerateError::Parse(e.to_string()))
}

/// All elements matching `expr`, in document order.
///
/// Non-element matches (text, attributes) are ignored.
pub fn select<'d>(document: &'d Document<'d>, expr: &str) -> Result<Vec<Element<'d>>> {
    let value = sxd_xpath::evaluate_xpath(document, expr).map_err(|e| GenerateError::Query {
        expr: expr.to_string(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Nodeset(nodes) => Ok(nodes
            .document_order()
            .into_iter()
            .filter_map(|node| match node {
                Node::Element(element) => Some(element),
                _ => None,
            })
            .collect()),
        other => Err(GenerateError::Query {
            expr: expr.to_string(),
            reason: format!("expected a node-set, got {other:?}"),
        }),
    }
}

/// Local tag name of an element.
pub fn tag<'d>(element: Element<'d>) -> &'d str {
    element.name().local_part()
}

/// Direct children with the given tag name.
pub fn children<'d>(element: Element<'d>, name: &str) -> Vec<Element<'d>> {
    element
        .children()
        .into_iter()
        .filter_map(|child| match child {
            ChildOfElement::Element(e) if tag(e) == name => Some(e),
            _ => None,
        })
        .collect()
}

/// First direct child with the given tag name.
pub fn child<'d>(element: Element<'d>, name: &str) -> Option<Element<'d>> {
    children(element, name).into_iter().next()
}

/// Attribute value, if present.
pub fn attribute<'d>(element: Element<'d>, name: &str) -> Option<&'d str> {
    element.attribute_value(name)
}

/// Attribute value, failing the run when it is absent.
///
/// `entry` names the API entry being transformed, for the error message.
pub fn required_attribute<'d>(
    element: Element<'d>,
    name: &'static str,
    entry: &str,
) -> Result<&'d str> {
    attribute(element, name).ok_or_else(|| GenerateError::MissingAttribute {
        element: tag(element).to_string(),
        attribute: name,
        entry: entry.to_string(),
    })
}

/// Concatenated text of all descendants, with markup removed.
pub fn text_content(element: Element<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: Element<'_>, out: &mut String) {
    for child in element.children() {
        match child {
            ChildOfElement::Element(e) => collect_text(e, out),
            ChildOfElement::Text(t) => out.push_str(t.text()),
            ChildOfElement::Comment(_) | ChildOfElement::ProcessingInstruction(_) => {}
        }
    }
}

/// The element's children serialized back to markup.
///
/// Descriptions in the API feed embed HTML as child elements; this restores
/// that HTML without the surrounding tag.
pub fn inner_markup(element: Element<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        write_node(child, &mut out);
    }
    out
}

fn write_node(node: ChildOfElement<'_>, out: &mut String) {
    match node {
        ChildOfElement::Element(e) => {
            let name = tag(e);
            out.push('<');
            out.push_str(name);

            let mut attributes = e.attributes();
            attributes.sort_by(|a, b| a.name().local_part().cmp(b.name().local_part()));
            for attr in attributes {
                out.push(' ');
                out.push_str(attr.name().local_part());
                out.push_str("=\"");
                out.push_str(&escape_text(attr.value()).replace('"', "&quot;"));
                out.push('"');
            }

            let children = e.children();
            if children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in children {
                    write_node(child, out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
        ChildOfElement::Text(t) => out.push_str(&escape_text(t.text())),
        ChildOfElement::Comment(_) | ChildOfElement::ProcessingInstruction(_) => {}
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
