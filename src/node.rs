use crate::*;
use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    iter::FromIterator,
    ops::Index,
};

macro_rules! impl_from {
    ($(impl $($from_ty:ty),+ => $tag:ident)+) => {
        $($(impl From<$from_ty> for Node {
            fn from(s: $from_ty) -> Self {
                Self::new(Yaml::Scalar(s.to_string())).tag(tag::$tag)
            }
        })+)+
    };
}

macro_rules! as_method {
    {$(#[$meta:meta])* fn $id:ident = $ty:ident -> $r:ty} => {
        $(#[$meta])*
        pub fn $id(&self) -> Option<$r> {
            match &self.yaml {
                Yaml::$ty(v) => Some(v),
                _ => None,
            }
        }
    };
}

/// Presentation hint for scalars.
///
/// The emitter honors the hint when the text can be written in that style,
/// otherwise it picks one by itself.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScalarStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    /// Plain (unquoted).
    Plain,
    /// Single quoted.
    SingleQuoted,
    /// Double quoted.
    DoubleQuoted,
    /// Literal block (`|`).
    Literal,
}

/// Presentation hint for sequences and mappings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CollectionStyle {
    /// Let the emitter choose.
    #[default]
    Any,
    /// Indented block style.
    Block,
    /// Bracketed flow style.
    Flow,
}

/// Document tree node, includes the tag and the style hints.
///
/// Nodes are compared and hashed by tag and content only,
/// the style hints are ignored.
///
/// ```
/// use std::collections::HashSet;
/// use yaml_dump::{node, CollectionStyle};
/// let mut s = HashSet::new();
/// s.insert(node!([1, 2]));
/// s.insert(node!([1, 2]).collection_style(CollectionStyle::Flow));
/// s.insert(node!([1, 2]).collection_style(CollectionStyle::Block));
/// assert_eq!(s.len(), 1);
/// ```
///
/// There is a convenient macro [`node!`] to create nodes literally.
///
/// Nodes can be indexing by `usize` or `&str`,
/// but it will always return self if the index is not contained.
///
/// ```
/// use yaml_dump::node;
/// let n = node!({"a" => node!([10, 20])});
/// assert_eq!(n["a"][1], node!(20));
/// assert_eq!(n["b"][0], n);
/// ```
#[derive(Eq, Clone)]
pub struct Node {
    /// Type tag
    pub tag: String,
    /// Scalar style hint
    pub style: ScalarStyle,
    /// Collection style hint
    pub collection_style: CollectionStyle,
    /// YAML data
    pub yaml: Yaml,
}

impl Node {
    /// Create node from YAML data, with the default tag of its shape.
    pub fn new(yaml: Yaml) -> Self {
        Self {
            tag: yaml.kind().default_tag().to_string(),
            style: ScalarStyle::Any,
            collection_style: CollectionStyle::Any,
            yaml,
        }
    }

    /// Create a null scalar.
    pub fn null() -> Self {
        Self::new(Yaml::Scalar("null".into())).tag(tag::NULL)
    }

    /// Builder function for the tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Builder function for the scalar style hint.
    pub fn style(mut self, style: ScalarStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder function for the collection style hint.
    pub fn collection_style(mut self, style: CollectionStyle) -> Self {
        self.collection_style = style;
        self
    }

    /// YAML data.
    pub fn yaml(&self) -> &Yaml {
        &self.yaml
    }

    /// The shape discriminant.
    pub fn kind(&self) -> Kind {
        self.yaml.kind()
    }

    as_method! {
        /// Get the scalar text.
        ///
        /// ```
        /// use yaml_dump::node;
        /// assert_eq!(Some("60"), node!(60).as_scalar().map(String::as_str));
        /// assert_eq!(None, node!([60]).as_scalar());
        /// ```
        fn as_scalar = Scalar -> &String
    }

    as_method! {
        /// Get the sequence items.
        fn as_seq = Seq -> &Seq
    }

    as_method! {
        /// Get the mapping entries.
        fn as_map = Map -> &Map
    }

    /// Get the value of a mapping by key, the first matched entry is returned.
    pub fn get(&self, key: &Node) -> Option<&Node> {
        self.as_map()?
            .iter()
            .find_map(|(k, v)| if k == key { Some(v) } else { None })
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_fmt(format_args!("Node<{}>{:?}", self.tag, &self.yaml))
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        self.yaml.hash(state);
    }
}

impl PartialEq for Node {
    fn eq(&self, rhs: &Self) -> bool {
        self.tag == rhs.tag && self.yaml == rhs.yaml
    }
}

impl From<Yaml> for Node {
    fn from(yaml: Yaml) -> Self {
        Self::new(yaml)
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Self::null()
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Self::new(Yaml::Scalar(if b { "true" } else { "false" }.into())).tag(tag::BOOL)
    }
}

impl From<f32> for Node {
    fn from(f: f32) -> Self {
        // Keep the shortest text of the single precision value
        let f = format!("{:?}", f).parse().unwrap_or(f as f64);
        Self::from(f)
    }
}

impl From<f64> for Node {
    fn from(f: f64) -> Self {
        Self::new(Yaml::Scalar(float_text(f))).tag(tag::FLOAT)
    }
}

impl_from! {
    impl char, &str, String, &String => STR
    impl usize, u8, u16, u32, u64, u128, isize, i8, i16, i32, i64, i128 => INT
}

impl FromIterator<Node> for Node {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        Self::new(Yaml::Seq(iter.into_iter().collect()))
    }
}

impl FromIterator<(Node, Node)> for Node {
    fn from_iter<T: IntoIterator<Item = (Node, Node)>>(iter: T) -> Self {
        Self::new(Yaml::Map(iter.into_iter().collect()))
    }
}

impl Index<usize> for Node {
    type Output = Self;

    fn index(&self, index: usize) -> &Self::Output {
        match &self.yaml {
            Yaml::Seq(a) => a.get(index).unwrap_or(self),
            Yaml::Map(_) => self.get(&Node::from(index)).unwrap_or(self),
            Yaml::Scalar(_) => self,
        }
    }
}

impl Index<&str> for Node {
    type Output = Self;

    fn index(&self, index: &str) -> &Self::Output {
        self.get(&Node::from(index)).unwrap_or(self)
    }
}
