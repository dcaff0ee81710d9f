use crate::*;

/// The sequence data structure of YAML.
pub type Seq = Vec<Node>;
/// The mapping data structure of YAML.
///
/// Entries keep their insertion order and keys are nodes themselves.
pub type Map = Vec<(Node, Node)>;

/// The three shapes of YAML data.
///
/// Scalars hold their text only, the type is given by the tag of the [`Node`].
///
/// ```
/// use yaml_dump::{node, yaml_map, yaml_seq, Yaml};
///
/// assert_eq!(Yaml::Scalar("a".into()), *node!("a").yaml());
/// assert_eq!(yaml_seq![node!(1), node!(2)], *node!([1, 2]).yaml());
/// assert_eq!(yaml_map! { node!("a") => node!(1) }, *node!({"a" => 1}).yaml());
/// ```
#[derive(Hash, Eq, PartialEq, Debug, Clone)]
pub enum Yaml {
    /// Scalar text
    Scalar(String),
    /// Sequence
    Seq(Seq),
    /// Mapping
    Map(Map),
}

impl Yaml {
    /// The shape discriminant.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Scalar(_) => Kind::Scalar,
            Self::Seq(_) => Kind::Sequence,
            Self::Map(_) => Kind::Mapping,
        }
    }

    /// Number of children, mapping entries count as one. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 0,
            Self::Seq(s) => s.len(),
            Self::Map(m) => m.len(),
        }
    }

    /// Check there is no child.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Seq> for Yaml {
    fn from(s: Seq) -> Self {
        Self::Seq(s)
    }
}

impl From<Map> for Yaml {
    fn from(m: Map) -> Self {
        Self::Map(m)
    }
}

/// Format a float in the way the YAML 1.1 float pattern accepts it.
///
/// ```
/// use yaml_dump::float_text;
/// assert_eq!("1.0", float_text(1.));
/// assert_eq!("1.0e+20", float_text(1e20));
/// assert_eq!("2.5e-7", float_text(2.5e-7));
/// assert_eq!("-.inf", float_text(f64::NEG_INFINITY));
/// assert_eq!(".nan", float_text(f64::NAN));
/// ```
pub fn float_text(f: f64) -> String {
    if f.is_nan() {
        return ".nan".into();
    }
    if f.is_infinite() {
        return if f > 0. { ".inf" } else { "-.inf" }.into();
    }
    let mut s = format!("{:?}", f);
    if let Some(e) = s.find('e') {
        if !s[..e].contains('.') {
            s.insert_str(e, ".0");
        }
        let e = s.find('e').unwrap_or(e);
        if !s[e + 1..].starts_with('-') {
            s.insert(e + 1, '+');
        }
    }
    s
}
