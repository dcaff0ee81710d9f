//! Tag constants and tag directive checks.
use crate::ConfigError;

/// The prefix of the YAML core tags, abbreviated by the `!!` handle.
pub const CORE_PREFIX: &str = "tag:yaml.org,2002:";
/// Default tag of scalars.
pub const STR: &str = "tag:yaml.org,2002:str";
/// Default tag of sequences.
pub const SEQ: &str = "tag:yaml.org,2002:seq";
/// Default tag of mappings.
pub const MAP: &str = "tag:yaml.org,2002:map";
/// Null tag.
pub const NULL: &str = "tag:yaml.org,2002:null";
/// Boolean tag.
pub const BOOL: &str = "tag:yaml.org,2002:bool";
/// Integer tag.
pub const INT: &str = "tag:yaml.org,2002:int";
/// Float tag.
pub const FLOAT: &str = "tag:yaml.org,2002:float";
/// Binary tag, the content is base64 text.
pub const BINARY: &str = "tag:yaml.org,2002:binary";
/// Merge key tag.
pub const MERGE: &str = "tag:yaml.org,2002:merge";
/// Timestamp tag.
pub const TIMESTAMP: &str = "tag:yaml.org,2002:timestamp";
/// Value key tag.
pub const VALUE: &str = "tag:yaml.org,2002:value";

/// The shape discriminant of a node, used by the resolver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Scalar
    Scalar,
    /// Sequence
    Sequence,
    /// Mapping
    Mapping,
}

impl Kind {
    /// The default tag of this kind.
    pub fn default_tag(self) -> &'static str {
        match self {
            Self::Scalar => STR,
            Self::Sequence => SEQ,
            Self::Mapping => MAP,
        }
    }
}

/// Check a `%TAG` directive pair.
///
/// The handle must start and end with `!`, and the prefix must not be empty.
///
/// ```
/// use yaml_dump::check_tag_directive;
/// assert!(check_tag_directive("!e!", "tag:example.com,2000:").is_ok());
/// assert!(check_tag_directive("e!", "tag:example.com,2000:").is_err());
/// assert!(check_tag_directive("!e!", "").is_err());
/// ```
pub fn check_tag_directive(handle: &str, prefix: &str) -> Result<(), ConfigError> {
    if handle.is_empty() || !handle.starts_with('!') || !handle.ends_with('!') {
        return Err(ConfigError::TagHandle(handle.to_string()));
    }
    if prefix.is_empty() {
        return Err(ConfigError::TagPrefix(handle.to_string()));
    }
    Ok(())
}
