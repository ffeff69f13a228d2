//! Rendering of JSDoc comments and stub declarations.

use std::fmt::{self, Write};

use crate::config::Config;
use crate::entry::{ApiEntry, EntryKind};
use crate::naming::{Argument, DefinitionTarget, TypeName};

/// Make text safe to embed in a `/* ... */` block.
///
/// `*/` becomes `* /` and `/*` becomes `/ *`, so example code can never end
/// the surrounding comment.
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "* /").replace("/*", "/ *")
}

/// Escape text for display inside HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Placeholder value a stub returns or is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Methods without a return type get an empty body.
    Nothing,
    EmptyString,
    Zero,
    EmptyObject,
    /// `new <Type>()`
    Construct(String),
}

impl DefaultValue {
    /// Pick the placeholder for an entry from its first return-type alternative.
    pub fn for_type(kind: EntryKind, primary_type: &str) -> Self {
        match (primary_type, kind) {
            ("String", _) => DefaultValue::EmptyString,
            ("Number", _) => DefaultValue::Zero,
            ("" | "undefined", EntryKind::Method) => DefaultValue::Nothing,
            ("" | "undefined", EntryKind::Property) => DefaultValue::EmptyObject,
            (ty, _) => DefaultValue::Construct(ty.to_string()),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Nothing => Ok(()),
            DefaultValue::EmptyString => f.write_str("\"\""),
            DefaultValue::Zero => f.write_str("0"),
            DefaultValue::EmptyObject => f.write_str("{}"),
            DefaultValue::Construct(ty) => write!(f, "new {ty}()"),
        }
    }
}

/// Render the stub assignment for an entry.
pub fn render_definition(entry: &ApiEntry, arguments: &[Argument], config: &Config) -> String {
    let target = DefinitionTarget::resolve(&entry.name, config);
    let return_type = TypeName::parse(&entry.return_type, config);
    let default = DefaultValue::for_type(entry.kind, return_type.primary());

    match entry.kind {
        EntryKind::Method => {
            let params: Vec<&str> = arguments.iter().map(|a| a.name.as_str()).collect();
            let body = match default {
                DefaultValue::Nothing => "{}".to_string(),
                value => format!("{{ return {value}; }}"),
            };
            format!("{target} = function({}) {body};", params.join(", "))
        }
        EntryKind::Property => format!("{target} = {default};"),
    }
}

/// Render the JSDoc block for an entry.
pub fn render_doc(entry: &ApiEntry, arguments: &[Argument], config: &Config) -> String {
    let mut text = escape_comment(&entry.short_description);

    if entry.kind == EntryKind::Method && !entry.long_description.is_empty() {
        text.push('\n');
        text.push_str(&escape_comment(&entry.long_description));
    }

    for example in &entry.examples {
        write!(
            text,
            "\nExample: {}\n<pre>\n{}\n</pre>",
            escape_comment(&escape_html(&example.description)),
            escape_comment(&escape_html(&example.code)),
        )
        .unwrap();
    }

    for arg in arguments {
        write!(
            text,
            "\n@param {{{}}} {}",
            escape_comment(&arg.type_name),
            escape_comment(&arg.name)
        )
        .unwrap();
        if !arg.description.is_empty() {
            text.push(' ');
            text.push_str(&escape_comment(&arg.description));
        }
    }

    write!(text, "\n@since {}", escape_comment(&entry.added_version)).unwrap();

    let type_name = TypeName::parse(&entry.return_type, config).render(config);
    let type_name = if type_name.is_empty() {
        "undefined".to_string()
    } else {
        escape_comment(&type_name)
    };
    match entry.kind {
        EntryKind::Method => {
            write!(text, "\n@returns {{{type_name}}}").unwrap();
        }
        EntryKind::Property => {
            write!(text, "\n@type {type_name}").unwrap();
        }
    }

    let mut out = String::from("/**\n");
    for line in text.lines() {
        out.push_str(" * ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(" */");
    out
}

/// Doc comment followed by the stub it documents.
pub fn render_entry(entry: &ApiEntry, config: &Config) -> String {
    let arguments: Vec<Argument> = match entry.kind {
        EntryKind::Method => entry
            .primary_arguments()
            .iter()
            .map(|raw| Argument::from_raw(raw, config))
            .collect(),
        EntryKind::Property => Vec::new(),
    };

    format!(
        "{}\n{}",
        render_doc(entry, &arguments, config),
        render_definition(entry, &arguments, config)
    )
}
