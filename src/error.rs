use std::io;
use thiserror::Error;

/// Invalid option of the dumper, reported when the option is set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Indentation width is zero.
    #[error("indentation width must be nonzero")]
    ZeroIndent,
    /// Tag handle is not delimited by `!`.
    #[error("tag handle `{0}` must start and end with '!'")]
    TagHandle(String),
    /// Tag prefix is empty.
    #[error("tag prefix of handle `{0}` must not be empty")]
    TagPrefix(String),
}

/// The error of an emitter.
#[derive(Debug, Error)]
pub enum EmitError {
    /// The sink failed to write.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An event arrived out of the protocol order.
    #[error("expected {expected}, but got {found}")]
    Unexpected {
        /// What the emitter was waiting for
        expected: &'static str,
        /// The name of the received event
        found: &'static str,
    },
}

impl EmitError {
    pub(crate) fn unexpected(expected: &'static str, event: &crate::Event) -> Self {
        Self::Unexpected {
            expected,
            found: event.name(),
        }
    }
}

/// The error of the serde representer.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct SerdeError(pub String);

impl serde::ser::Error for SerdeError {
    fn custom<T>(msg: T) -> Self
    where
        T: std::fmt::Display,
    {
        Self(msg.to_string())
    }
}

/// The error of the dumper.
#[derive(Debug, Error)]
pub enum DumpError {
    /// The file cannot be opened.
    #[error("Unable to open file {path} for YAML dumping: {source}")]
    Open {
        /// File path
        path: String,
        /// Cause
        source: io::Error,
    },
    /// The emitter failed.
    #[error("Unable to dump YAML to stream {name}: {source}")]
    Emit {
        /// Stream name
        name: String,
        /// Cause
        source: EmitError,
    },
    /// A value cannot be represented as a node.
    #[error("Unable to dump YAML to stream {name}: {source}")]
    Represent {
        /// Stream name
        name: String,
        /// Cause
        source: SerdeError,
    },
}
