//! A YAML writer.
//!
//! Document trees (or graphs with shared and cyclic nodes) are serialized into an event stream,
//! where repeated nodes become anchors and aliases, and then rendered into text.
//!
//! The pipeline:
//!
//! + [`Representer`] turns serde data into [`Node`] trees.
//! + [`Serializer`] turns [`Document`]s into [`Event`]s, consulting a [`Resolver`] for the tags.
//! + [`YamlEmitter`] renders the events into text, or [`EventRecorder`] keeps them.
//! + [`Dumper`] wires them up from a set of options.
//!
//! ```
//! use yaml_dump::{dump, node};
//!
//! let long = node!("a scalar longer than sixty four bytes gets an anchor when repeated");
//! let doc = dump([node!([long.clone(), long, "end"])]).unwrap();
//! assert_eq!(
//!     "- &id001 a scalar longer than sixty four bytes gets an anchor when repeated\n- *id001\n- end\n",
//!     doc
//! );
//! ```
#![warn(missing_docs)]
pub use crate::dumper::*;
pub use crate::emitter::*;
pub use crate::error::*;
pub use crate::event::*;
pub use crate::graph::*;
pub use crate::node::*;
pub use crate::representer::*;
pub use crate::resolver::*;
pub use crate::serializer::*;
pub use crate::tag::{check_tag_directive, Kind};
pub use crate::yaml::*;

/// Create [`Node`] items literally.
///
/// Sequences are written in brackets and mappings in braces,
/// the members are converted by [`From`].
/// An optional tag follows the single value form.
///
/// ```
/// use yaml_dump::{node, tag, Node, Yaml};
///
/// assert_eq!(node!("a"), Node::new(Yaml::Scalar("a".into())));
/// assert_eq!(node!(null), Node::null());
/// assert_eq!(node!("1", tag::INT), node!(1));
/// assert_eq!(node!([1, 2]), [1, 2].into_iter().map(Node::from).collect::<Node>());
/// let m = node!({"a" => node!([]), node!(1) => 2.5});
/// assert_eq!(m["a"], node!([]));
/// ```
#[macro_export]
macro_rules! node {
    ([$($v:expr),* $(,)?]) => {{
        let seq: $crate::Seq = ::std::vec![$($crate::Node::from($v)),*];
        $crate::Node::new($crate::Yaml::Seq(seq))
    }};
    ({$($k:expr => $v:expr),* $(,)?}) => {{
        let map: $crate::Map = ::std::vec![$(($crate::Node::from($k), $crate::Node::from($v))),*];
        $crate::Node::new($crate::Yaml::Map(map))
    }};
    (null) => {
        $crate::Node::null()
    };
    ($yaml:expr $(, $tag:expr)?) => {
        $crate::Node::from($yaml)$(.tag($tag))?
    };
}

/// Create [`Yaml::Seq`] items literally.
///
/// ```
/// use yaml_dump::{node, yaml_seq};
/// yaml_seq![node!("a"), node!("b"), node!("c")];
/// ```
#[macro_export]
macro_rules! yaml_seq {
    ($($v:expr),* $(,)?) => {
        $crate::Yaml::Seq(::std::vec![$($v),*])
    };
}

/// Create [`Yaml::Map`] items literally.
///
/// ```
/// use yaml_dump::{node, yaml_map};
/// yaml_map! {
///     node!("a") => node!("b"),
///     node!("c") => node!("d"),
/// };
/// ```
#[macro_export]
macro_rules! yaml_map {
    ($($k:expr => $v:expr),* $(,)?) => {
        $crate::Yaml::Map(::std::vec![$(($k, $v)),*])
    };
}

mod dumper;
mod emitter;
mod error;
mod event;
mod graph;
mod node;
mod representer;
mod resolver;
mod serializer;
pub mod tag;
#[cfg(test)]
mod tests;
mod yaml;
