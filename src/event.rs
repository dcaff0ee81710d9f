//! The event protocol between the serializer and the emitters.
use crate::*;

/// A `%TAG` directive, `handle` is abbreviated from `prefix`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagDirective {
    /// Handle such as `!e!`
    pub handle: String,
    /// Tag prefix
    pub prefix: String,
}

impl TagDirective {
    /// Create a directive, the pair is checked.
    pub fn new(handle: &str, prefix: &str) -> Result<Self, ConfigError> {
        check_tag_directive(handle, prefix)?;
        Ok(Self {
            handle: handle.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// The tag implicitness of a scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Implicit {
    /// The tag equals the one guessed from the content, a plain scalar may omit it.
    pub plain: bool,
    /// The tag equals the schema default, a quoted scalar may omit it.
    pub quoted: bool,
}

/// Stream events, see [`Serializer`] for the order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Start of the stream
    StreamStart,
    /// End of the stream
    StreamEnd,
    /// Start of a document
    DocumentStart {
        /// The `---` marker is requested.
        explicit: bool,
        /// The `%YAML` directive.
        version: Option<String>,
        /// The `%TAG` directives.
        tags: Vec<TagDirective>,
    },
    /// End of a document
    DocumentEnd {
        /// The `...` marker is requested.
        explicit: bool,
    },
    /// Reference to an anchored node
    Alias {
        /// Referenced anchor
        anchor: String,
    },
    /// Scalar
    Scalar {
        /// Defined anchor
        anchor: Option<String>,
        /// Tag
        tag: String,
        /// Whether the tag can be omitted
        implicit: Implicit,
        /// Text
        value: String,
        /// Style hint
        style: ScalarStyle,
    },
    /// Start of a sequence
    SequenceStart {
        /// Defined anchor
        anchor: Option<String>,
        /// Tag
        tag: String,
        /// The tag is the default sequence tag.
        implicit: bool,
        /// Style hint
        style: CollectionStyle,
    },
    /// End of a sequence
    SequenceEnd,
    /// Start of a mapping
    MappingStart {
        /// Defined anchor
        anchor: Option<String>,
        /// Tag
        tag: String,
        /// The tag is the default mapping tag.
        implicit: bool,
        /// Style hint
        style: CollectionStyle,
    },
    /// End of a mapping
    MappingEnd,
}

impl Event {
    /// A short name of the event, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::StreamStart => "stream start",
            Self::StreamEnd => "stream end",
            Self::DocumentStart { .. } => "document start",
            Self::DocumentEnd { .. } => "document end",
            Self::Alias { .. } => "alias",
            Self::Scalar { .. } => "scalar",
            Self::SequenceStart { .. } => "sequence start",
            Self::SequenceEnd => "sequence end",
            Self::MappingStart { .. } => "mapping start",
            Self::MappingEnd => "mapping end",
        }
    }

    /// Check the event starts a node.
    pub fn is_node(&self) -> bool {
        matches!(
            self,
            Self::Alias { .. }
                | Self::Scalar { .. }
                | Self::SequenceStart { .. }
                | Self::MappingStart { .. }
        )
    }
}
