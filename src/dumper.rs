//! Dumper components, the configuration façade over the serializer and the emitter.
use crate::*;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// The default `%YAML` version.
pub const YAML_VERSION: &str = "1.1";

/// Dump documents into a writer.
///
/// Options are set by the builder functions,
/// every dump call writes one stream with a fresh emitter and serializer session.
///
/// ```
/// use yaml_dump::{node, Dumper, LineBreak};
///
/// let mut buf = Vec::new();
/// Dumper::new(&mut buf)
///     .explicit_start(true)
///     .line_break(LineBreak::Windows)
///     .dump([node!({"a" => "b", "c" => "d"})])
///     .unwrap();
/// assert_eq!("---\r\na: b\r\nc: d\r\n", String::from_utf8(buf).unwrap());
/// ```
pub struct Dumper<W: Write, R: Resolver = DefaultResolver> {
    sink: W,
    style: Style,
    version: String,
    version_set: bool,
    tags: Vec<TagDirective>,
    explicit_start: bool,
    explicit_end: bool,
    name: String,
    resolver: R,
    representer: Representer,
}

impl<W: Write> Dumper<W> {
    /// Create a dumper on a writer, with the default options.
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            style: Style::default(),
            version: YAML_VERSION.to_string(),
            version_set: false,
            tags: Vec::new(),
            explicit_start: false,
            explicit_end: false,
            name: "<unknown>".to_string(),
            resolver: DefaultResolver::new(),
            representer: Representer::default(),
        }
    }
}

impl Dumper<BufWriter<File>> {
    /// Create a dumper on a new file, the stream is named after the path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DumpError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| DumpError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(BufWriter::new(file)).name(path.display().to_string()))
    }
}

impl<W: Write, R: Resolver> Dumper<W, R> {
    /// Canonical output.
    pub fn canonical(mut self, canonical: bool) -> Self {
        self.style.canonical = canonical;
        self
    }

    /// Indentation width, must be nonzero.
    pub fn indent(mut self, indent: usize) -> Result<Self, ConfigError> {
        if indent == 0 {
            return Err(ConfigError::ZeroIndent);
        }
        self.style.indent = indent;
        Ok(self)
    }

    /// Preferred text width.
    pub fn width(mut self, width: usize) -> Self {
        self.style.width = width;
        self
    }

    /// Line break convention.
    pub fn line_break(mut self, line_break: LineBreak) -> Self {
        self.style.line_break = line_break;
        self
    }

    /// Output encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.style.encoding = encoding;
        self
    }

    /// The `%YAML` version, setting it makes the directive written.
    pub fn yaml_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self.version_set = true;
        self
    }

    /// The `%TAG` directives, each pair is `(handle, prefix)`.
    ///
    /// ```
    /// use yaml_dump::{ConfigError, Dumper};
    /// let r = Dumper::new(Vec::new()).tag_directives([("e!", "tag:example.com,2000:")]);
    /// assert_eq!(Some(ConfigError::TagHandle("e!".into())), r.err());
    /// ```
    pub fn tag_directives<I, H, P>(mut self, tags: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (H, P)>,
        H: AsRef<str>,
        P: AsRef<str>,
    {
        self.tags = tags
            .into_iter()
            .map(|(h, p)| TagDirective::new(h.as_ref(), p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Request the `---` marker on every document.
    pub fn explicit_start(mut self, explicit: bool) -> Self {
        self.explicit_start = explicit;
        self
    }

    /// Request the `...` marker on every document.
    pub fn explicit_end(mut self, explicit: bool) -> Self {
        self.explicit_end = explicit;
        self
    }

    /// The stream name used in error messages.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the resolver.
    pub fn resolver<R2: Resolver>(self, resolver: R2) -> Dumper<W, R2> {
        Dumper {
            sink: self.sink,
            style: self.style,
            version: self.version,
            version_set: self.version_set,
            tags: self.tags,
            explicit_start: self.explicit_start,
            explicit_end: self.explicit_end,
            name: self.name,
            resolver,
            representer: self.representer,
        }
    }

    /// Replace the representer of [`Dumper::dump_values`].
    pub fn representer(mut self, representer: Representer) -> Self {
        self.representer = representer;
        self
    }

    /// Get back the writer.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn options(&self) -> DocumentOptions {
        let version = if self.style.canonical || self.version_set {
            Some(self.version.clone())
        } else {
            None
        };
        DocumentOptions {
            explicit_start: self.explicit_start,
            explicit_end: self.explicit_end,
            version,
            tags: self.tags.clone(),
        }
    }

    /// Dump the documents as one stream.
    ///
    /// The documents can be [`Node`], `&Node` or [`Document`] graphs.
    pub fn dump<I>(&mut self, docs: I) -> Result<(), DumpError>
    where
        I: IntoIterator,
        I::Item: Into<Document>,
    {
        self.stream(docs.into_iter().map(|doc| Ok(doc.into())))
    }

    /// Represent the values and dump them as one stream, one document per value.
    ///
    /// ```
    /// use yaml_dump::Dumper;
    /// let mut buf = Vec::new();
    /// Dumper::new(&mut buf).dump_values([vec![1, 2], vec![3]]).unwrap();
    /// assert_eq!("- 1\n- 2\n---\n- 3\n", String::from_utf8(buf).unwrap());
    /// ```
    pub fn dump_values<I>(&mut self, values: I) -> Result<(), DumpError>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        let representer = self.representer;
        self.stream(
            values
                .into_iter()
                .map(|v| representer.represent(&v).map(Document::from)),
        )
    }

    fn stream<I>(&mut self, docs: I) -> Result<(), DumpError>
    where
        I: Iterator<Item = Result<Document, SerdeError>>,
    {
        let options = self.options();
        let name = self.name.clone();
        let emit = |source: EmitError| DumpError::Emit {
            name: name.clone(),
            source,
        };
        let mut emitter = YamlEmitter::new(&mut self.sink, self.style.clone());
        let mut session = Serializer::new(&mut emitter, &self.resolver, options).map_err(emit)?;
        for doc in docs {
            let doc = doc.map_err(|source| DumpError::Represent {
                name: name.clone(),
                source,
            })?;
            session.serialize(&doc).map_err(emit)?;
        }
        session.close().map_err(emit)
    }
}

/// Dump the documents into a string with the default options.
///
/// ```
/// use yaml_dump::{dump, node};
/// let doc = dump([node!({"a" => "b", "c" => "d"}), node!([1, 2])]).unwrap();
/// assert_eq!("a: b\nc: d\n---\n- 1\n- 2\n", doc);
/// ```
pub fn dump<I>(docs: I) -> Result<String, DumpError>
where
    I: IntoIterator,
    I::Item: Into<Document>,
{
    let mut buf = Vec::new();
    Dumper::new(&mut buf).dump(docs)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Represent the value and dump it into a string with the default options.
///
/// ```
/// use serde::Serialize;
/// use yaml_dump::to_string;
///
/// #[derive(Serialize)]
/// struct Member<'a> {
///     name: &'a str,
///     married: bool,
///     age: u8,
/// }
///
/// let officer = Member { name: "Bob", married: true, age: 46 };
/// let officer_doc = "\
/// name: Bob
/// married: true
/// age: 46
/// ";
/// assert_eq!(officer_doc, to_string(&officer).unwrap());
/// ```
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, DumpError> {
    let mut buf = Vec::new();
    Dumper::new(&mut buf).dump_values([value])?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
