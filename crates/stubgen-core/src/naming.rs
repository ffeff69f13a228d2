//! Name and type mapping from feed spellings to valid JavaScript.

use crate::config::Config;
use crate::entry::RawArgument;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Owner of members whose name has no dotted prefix.
pub const DEFAULT_OWNER: &str = "jQuery.prototype";

/// Argument name the feed uses for "a jQuery instance".
const JQUERY_OBJECT: &str = "jQuery object";

static RE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("qualifier pattern is valid"));

/// JavaScript keywords that show up as argument names in the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedWord {
    Function,
    True,
    False,
    Switch,
}

impl ReservedWord {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "function" => Some(ReservedWord::Function),
            "true" => Some(ReservedWord::True),
            "false" => Some(ReservedWord::False),
            "switch" => Some(ReservedWord::Switch),
            _ => None,
        }
    }
}

/// Classified argument name, after qualifiers like `(eventObject)` are
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgName<'a> {
    /// The literal `jQuery object`.
    JqueryObject,
    Reserved(ReservedWord),
    /// A name starting with `-`; holds the remainder.
    Negated(&'a str),
    Plain(&'a str),
}

impl<'a> ArgName<'a> {
    /// Classify an already stripped name.
    pub fn classify(name: &'a str) -> Self {
        if name == JQUERY_OBJECT {
            return ArgName::JqueryObject;
        }
        if let Some(word) = ReservedWord::parse(name) {
            return ArgName::Reserved(word);
        }
        match name.strip_prefix('-') {
            Some(rest) => ArgName::Negated(rest),
            None => ArgName::Plain(name),
        }
    }
}

impl fmt::Display for ArgName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgName::JqueryObject => f.write_str("jq"),
            ArgName::Reserved(ReservedWord::Function) => f.write_str("fn"),
            ArgName::Reserved(ReservedWord::True) => f.write_str("_true"),
            ArgName::Reserved(ReservedWord::False) => f.write_str("_false"),
            ArgName::Reserved(ReservedWord::Switch) => f.write_str("_switch"),
            ArgName::Negated(rest) => write!(f, "neg_{rest}"),
            ArgName::Plain(name) => f.write_str(name),
        }
    }
}

/// Drop a trailing parenthesized qualifier, e.g. `handler(eventObject)` to `handler`.
pub fn strip_qualifiers(name: &str) -> String {
    RE_QUALIFIER.replace_all(name, "").trim().to_string()
}

/// A parameter ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Valid JavaScript identifier.
    pub name: String,
    /// Rendered type annotation.
    pub type_name: String,
    /// Embedded markup describing the parameter.
    pub description: String,
}

impl Argument {
    /// Sanitize a raw argument's name and map its type.
    pub fn from_raw(raw: &RawArgument, config: &Config) -> Self {
        let stripped = strip_qualifiers(&raw.name);
        let name = ArgName::classify(&stripped);

        let type_name = match name {
            ArgName::JqueryObject => "jQuery".to_string(),
            _ => TypeName::parse(&raw.type_list, config).render(config),
        };

        Argument {
            name: name.to_string(),
            type_name,
            description: raw.description.clone(),
        }
    }
}

/// Where a generated stub is assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionTarget {
    pub owner: String,
    pub member: String,
}

impl DefinitionTarget {
    /// Split `prefix.member` on the first dot, remapping known prefixes.
    pub fn resolve(name: &str, config: &Config) -> Self {
        match name.split_once('.') {
            Some((prefix, member)) => DefinitionTarget {
                owner: config.owner_for(prefix).unwrap_or(prefix).to_string(),
                member: member.to_string(),
            },
            None => DefinitionTarget {
                owner: DEFAULT_OWNER.to_string(),
                member: name.to_string(),
            },
        }
    }
}

impl fmt::Display for DefinitionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner, self.member)
    }
}

/// A comma-separated type list with substitutions applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeName {
    alternatives: Vec<String>,
}

impl TypeName {
    /// Split a raw list like `"jQuery, Promise"` and substitute each part.
    pub fn parse(raw: &str, config: &Config) -> Self {
        let alternatives = raw
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| config.substitute_type(part).unwrap_or(part).to_string())
            .collect();
        TypeName { alternatives }
    }

    /// First alternative, or `""` when the list is empty.
    pub fn primary(&self) -> &str {
        self.alternatives.first().map_or("", String::as_str)
    }

    /// Annotation text: the first alternative in single-type mode,
    /// otherwise all of them joined with `|`.
    pub fn render(&self, config: &Config) -> String {
        if config.single_return_type {
            self.primary().to_string()
        } else {
            self.alternatives.join("|")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, type_list: &str) -> RawArgument {
        RawArgument {
            name: name.to_string(),
            type_list: type_list.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn strips_qualifiers() {
        assert_eq!(strip_qualifiers("handler(eventObject)"), "handler");
        assert_eq!(strip_qualifiers("function(index, html)"), "function");
        assert_eq!(strip_qualifiers("selector"), "selector");
        assert_eq!(strip_qualifiers("foo(x)bar"), "foo(x)bar");
        assert_eq!(strip_qualifiers("callback (data) "), "callback");
        assert_eq!(strip_qualifiers("(x)"), "");
    }

    #[test]
    fn renames_reserved_and_special_names() {
        let config = Config::default();
        let rename = |name: &str| Argument::from_raw(&raw(name, "Object"), &config).name;

        assert_eq!(rename("function"), "fn");
        assert_eq!(rename("function(index)"), "fn");
        assert_eq!(rename("true"), "_true");
        assert_eq!(rename("false"), "_false");
        assert_eq!(rename("switch"), "_switch");
        assert_eq!(rename("-=value"), "neg_=value");
        assert_eq!(rename("duration"), "duration");
    }

    #[test]
    fn jquery_object_argument() {
        let arg = Argument::from_raw(&raw("jQuery object", "Element"), &Config::default());
        assert_eq!(arg.name, "jq");
        assert_eq!(arg.type_name, "jQuery");
    }

    #[test]
    fn type_substitution_and_modes() {
        let single = Config::default();
        let union = Config {
            single_return_type: false,
            ..Config::default()
        };

        let ty = TypeName::parse("Integer, Promise", &single);
        assert_eq!(ty.primary(), "Number");
        assert_eq!(ty.render(&single), "Number");
        assert_eq!(ty.render(&union), "Number|__jQueryPromise");

        assert_eq!(TypeName::parse("XMLDocument", &single).render(&single), "Document");
        assert_eq!(TypeName::parse("boolean", &single).render(&single), "Boolean");
        assert_eq!(TypeName::parse("", &single).render(&union), "");
    }

    #[test]
    fn definition_targets() {
        let config = Config::default();
        let target = |name: &str| DefinitionTarget::resolve(name, &config).to_string();

        assert_eq!(target("click"), "jQuery.prototype.click");
        assert_eq!(target("deferred.resolve"), "__jQueryDeferred.prototype.resolve");
        assert_eq!(target("event.preventDefault"), "__jQueryEvent.prototype.preventDefault");
        assert_eq!(target("Promise.then"), "__jQueryPromise.prototype.then");
        assert_eq!(target("jQuery.ajax"), "jQuery.ajax");
        assert_eq!(target("jQuery.fx.off"), "jQuery.fx.off");
    }
}
