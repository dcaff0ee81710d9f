//! Tag resolution of plain scalars.
use crate::*;
use regex::Regex;
use std::sync::LazyLock;

/// Marks the resolvers that accept the empty scalar.
const EMPTY: char = '\0';

/// The YAML 1.1 implicit resolvers, the first match wins.
static YAML11: LazyLock<Vec<ImplicitType>> = LazyLock::new(|| {
    [
        (
            tag::BOOL,
            r"^(?:yes|Yes|YES|no|No|NO|true|True|TRUE|false|False|FALSE|on|On|ON|off|Off|OFF)$",
            "yYnNtTfFoO",
        ),
        (
            tag::FLOAT,
            r"^(?:[-+]?(?:[0-9][0-9_]*)\.[0-9_]*(?:[eE][-+][0-9]+)?|\.[0-9][0-9_]*(?:[eE][-+][0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
            "-+0123456789.",
        ),
        (
            tag::INT,
            r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
            "-+0123456789",
        ),
        (tag::MERGE, r"^(?:<<)$", "<"),
        (tag::NULL, r"^(?:~|null|Null|NULL|)$", "~nN\0"),
        (
            tag::TIMESTAMP,
            r"^(?:[0-9][0-9][0-9][0-9]-[0-9][0-9]-[0-9][0-9]|[0-9][0-9][0-9][0-9]-[0-9][0-9]?-[0-9][0-9]?(?:[Tt]|[ \t]+)[0-9][0-9]?:[0-9][0-9]:[0-9][0-9](?:\.[0-9]*)?(?:[ \t]*(?:Z|[-+][0-9][0-9]?(?::[0-9][0-9])?))?)$",
            "0123456789",
        ),
        (tag::VALUE, r"^(?:=)$", "="),
    ]
    .into_iter()
    .map(|(tag, pattern, first)| ImplicitType {
        tag: tag.to_string(),
        regex: Regex::new(pattern).expect("invalid built-in pattern"),
        first: first.chars().collect(),
    })
    .collect()
});

/// The interface of tag resolution.
///
/// The serializer asks the resolver which tag a reader would infer,
/// to decide whether the tag of a node can be omitted.
pub trait Resolver {
    /// Resolve the tag of a node.
    ///
    /// + An explicit tag other than `!` is returned as is.
    /// + If `implicit` is true, a scalar is matched against the content patterns.
    /// + Otherwise, the default tag of the kind is returned.
    fn resolve(&self, kind: Kind, tag: Option<&str>, value: &str, implicit: bool) -> String;
}

#[derive(Clone, Debug)]
struct ImplicitType {
    tag: String,
    regex: Regex,
    first: Vec<char>,
}

/// The resolver with the YAML 1.1 implicit scalar types.
///
/// ```
/// use yaml_dump::{tag, DefaultResolver, Kind, Resolver};
///
/// let r = DefaultResolver::new();
/// assert_eq!(tag::INT, r.resolve(Kind::Scalar, None, "0x1F", true));
/// assert_eq!(tag::BOOL, r.resolve(Kind::Scalar, None, "yes", true));
/// assert_eq!(tag::NULL, r.resolve(Kind::Scalar, None, "", true));
/// assert_eq!(tag::STR, r.resolve(Kind::Scalar, None, "yes", false));
/// assert_eq!(tag::SEQ, r.resolve(Kind::Sequence, None, "", true));
/// assert_eq!("!x", r.resolve(Kind::Scalar, Some("!x"), "1", true));
/// ```
#[derive(Clone, Debug)]
pub struct DefaultResolver {
    implicit: Vec<ImplicitType>,
}

impl Default for DefaultResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultResolver {
    /// Create a resolver with the YAML 1.1 table.
    pub fn new() -> Self {
        Self {
            implicit: YAML11.clone(),
        }
    }

    /// Create a resolver without implicit types, every plain scalar is a string.
    pub fn empty() -> Self {
        Self {
            implicit: Vec::new(),
        }
    }

    /// Add an implicit resolver, it is tried after the existing ones.
    ///
    /// `first` lists the possible first characters of the matched scalars,
    /// use `'\0'` to match the empty scalar.
    ///
    /// ```
    /// use regex::Regex;
    /// use yaml_dump::{DefaultResolver, Kind, Resolver};
    ///
    /// let mut r = DefaultResolver::empty();
    /// r.add_implicit_resolver("!color", Regex::new(r"^#[0-9a-f]{6}$").unwrap(), "#");
    /// assert_eq!("!color", r.resolve(Kind::Scalar, None, "#ff0000", true));
    /// assert_eq!(yaml_dump::tag::STR, r.resolve(Kind::Scalar, None, "#red", true));
    /// ```
    pub fn add_implicit_resolver(&mut self, tag: impl Into<String>, regex: Regex, first: &str) {
        self.implicit.push(ImplicitType {
            tag: tag.into(),
            regex,
            first: first.chars().collect(),
        });
    }
}

impl Resolver for DefaultResolver {
    fn resolve(&self, kind: Kind, tag: Option<&str>, value: &str, implicit: bool) -> String {
        if let Some(tag) = tag.filter(|t| *t != "!") {
            return tag.to_string();
        }
        if kind == Kind::Scalar && implicit {
            let first = value.chars().next().unwrap_or(EMPTY);
            let found = self
                .implicit
                .iter()
                .filter(|i| i.first.contains(&first))
                .find(|i| i.regex.is_match(value));
            if let Some(i) = found {
                return i.tag.clone();
            }
        }
        kind.default_tag().to_string()
    }
}
