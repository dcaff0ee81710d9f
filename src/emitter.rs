//! Emitter components, the consumers of the event stream.
use crate::*;
use std::io::Write;

/// Longest scalar that can be written as a simple key.
const SIMPLE_KEY_LEN: usize = 128;
/// Fallback of a too narrow text width.
const DEFAULT_WIDTH: usize = 80;

/// The interface for consuming events.
pub trait Emitter {
    /// Consume an event.
    fn emit(&mut self, event: Event) -> Result<(), EmitError>;
}

/// An emitter that keeps the events.
///
/// ```
/// use yaml_dump::{Emitter, Event, EventRecorder};
/// let mut r = EventRecorder::default();
/// r.emit(Event::StreamStart).unwrap();
/// assert_eq!(&[Event::StreamStart], r.events());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventRecorder {
    events: Vec<Event>,
}

impl EventRecorder {
    /// The recorded events.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the recorded events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Emitter for EventRecorder {
    fn emit(&mut self, event: Event) -> Result<(), EmitError> {
        self.events.push(event);
        Ok(())
    }
}

/// Line break convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum LineBreak {
    /// `\n`
    #[default]
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Macintosh,
}

impl LineBreak {
    /// The characters of the line break.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unix => "\n",
            Self::Windows => "\r\n",
            Self::Macintosh => "\r",
        }
    }
}

/// Character encoding of the output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// UTF-8, without BOM
    #[default]
    Utf8,
    /// UTF-16 little endian
    Utf16Le,
    /// UTF-16 big endian
    Utf16Be,
    /// UTF-32 little endian
    Utf32Le,
    /// UTF-32 big endian
    Utf32Be,
}

impl Encoding {
    /// Byte order mark written at the stream start.
    pub fn bom(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0, 0],
            Self::Utf32Be => &[0, 0, 0xFE, 0xFF],
        }
    }

    /// Encode the text.
    ///
    /// ```
    /// use yaml_dump::Encoding;
    /// assert_eq!(vec![b'a', 0], Encoding::Utf16Le.encode("a"));
    /// assert_eq!(vec![0, 0, 0, b'a'], Encoding::Utf32Be.encode("a"));
    /// ```
    pub fn encode(self, s: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => s.as_bytes().to_vec(),
            Self::Utf16Le => s.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf16Be => s.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            Self::Utf32Le => s.chars().flat_map(|c| (c as u32).to_le_bytes()).collect(),
            Self::Utf32Be => s.chars().flat_map(|c| (c as u32).to_be_bytes()).collect(),
        }
    }
}

/// Text style options of [`YamlEmitter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Style {
    /// Canonical form: flow collections, double quoted scalars and explicit tags.
    pub canonical: bool,
    /// Indentation width.
    pub indent: usize,
    /// Preferred text width.
    pub width: usize,
    /// Line break.
    pub line_break: LineBreak,
    /// Output encoding.
    pub encoding: Encoding,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            canonical: false,
            indent: 2,
            width: DEFAULT_WIDTH,
            line_break: LineBreak::Unix,
            encoding: Encoding::Utf8,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum State {
    StreamStart,
    DocumentStart,
    Node,
    DocumentEnd,
    End,
}

struct Frame {
    kind: Kind,
    flow: bool,
    /// Column of the entries.
    indent: usize,
    /// Column of the closing bracket.
    close: usize,
    /// Emitted children, keys and values are counted separately.
    count: usize,
    simple_key: bool,
}

/// The properties and content of a node event.
struct NodeHead {
    anchor: Option<String>,
    tag: Option<String>,
    simple: bool,
}

/// Render events into YAML text.
///
/// The events are written as they arrive,
/// only a collection start is held until the next event to find out if it is empty.
///
/// ```
/// use yaml_dump::{node, Dumper};
/// let mut buf = Vec::new();
/// Dumper::new(&mut buf).dump([node!({"a" => node!([1, 2]), "b" => node!({})})]).unwrap();
/// assert_eq!("a:\n  - 1\n  - 2\nb: {}\n", String::from_utf8(buf).unwrap());
/// ```
pub struct YamlEmitter<W: Write> {
    sink: W,
    style: Style,
    state: State,
    frames: Vec<Frame>,
    held: Option<Event>,
    tags: Vec<TagDirective>,
    documents: usize,
    open_ended: bool,
    out: String,
    column: usize,
    whitespace: bool,
    indention: bool,
    alias_key: bool,
}

impl<W: Write> YamlEmitter<W> {
    /// Create an emitter on the sink.
    pub fn new(sink: W, mut style: Style) -> Self {
        style.indent = style.indent.max(1);
        if style.width <= style.indent * 2 {
            style.width = DEFAULT_WIDTH;
        }
        Self {
            sink,
            style,
            state: State::StreamStart,
            frames: Vec::new(),
            held: None,
            tags: Vec::new(),
            documents: 0,
            open_ended: false,
            out: String::new(),
            column: 0,
            whitespace: true,
            indention: true,
            alias_key: false,
        }
    }

    /// Get back the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn flush_out(&mut self) -> Result<(), EmitError> {
        if !self.out.is_empty() {
            let bytes = self.style.encoding.encode(&self.out);
            self.out.clear();
            self.sink.write_all(&bytes)?;
        }
        Ok(())
    }

    fn dispatch(&mut self, event: Event) -> Result<(), EmitError> {
        match (self.state, event) {
            (State::StreamStart, Event::StreamStart) => {
                self.sink.write_all(self.style.encoding.bom())?;
                self.state = State::DocumentStart;
            }
            (_, Event::StreamEnd) => {
                self.flush_out()?;
                self.sink.flush()?;
                let state = std::mem::replace(&mut self.state, State::End);
                if state != State::DocumentStart {
                    return Err(EmitError::unexpected("document end", &Event::StreamEnd));
                }
            }
            (State::DocumentStart, Event::DocumentStart { explicit, version, tags }) => {
                self.document_start(explicit, version, tags);
            }
            (State::DocumentEnd, Event::DocumentEnd { explicit }) => {
                if self.column > 0 || !self.indention {
                    self.write_break();
                }
                if explicit {
                    self.write_indicator("...", true, false);
                    self.write_break();
                }
                self.open_ended = !explicit;
                self.documents += 1;
                self.state = State::DocumentStart;
            }
            (State::Node, Event::Alias { anchor }) => {
                let head = NodeHead {
                    anchor: None,
                    tag: None,
                    simple: true,
                };
                self.slot(&head);
                self.write_indicator(&format!("*{}", anchor), true, false);
                self.alias_key = true;
                self.node_done();
            }
            (
                State::Node,
                Event::Scalar {
                    anchor,
                    tag,
                    implicit,
                    value,
                    style,
                },
            ) => self.scalar(anchor, &tag, implicit, &value, style),
            (State::Node, Event::SequenceEnd) => self.collection_end(Kind::Sequence)?,
            (State::Node, Event::MappingEnd) => self.collection_end(Kind::Mapping)?,
            (state, event) => {
                let expected = match state {
                    State::StreamStart => "stream start",
                    State::DocumentStart => "document start",
                    State::Node => "node",
                    State::DocumentEnd => "document end",
                    State::End => "nothing",
                };
                return Err(EmitError::unexpected(expected, &event));
            }
        }
        Ok(())
    }

    fn document_start(&mut self, explicit: bool, version: Option<String>, tags: Vec<TagDirective>) {
        let directives = version.is_some() || !tags.is_empty();
        if directives && self.open_ended {
            self.write_indent(0);
            self.write_indicator("...", true, false);
            self.write_break();
        }
        if let Some(version) = version {
            self.write_indent(0);
            self.write_indicator(&format!("%YAML {}", version), true, false);
            self.write_break();
        }
        for t in &tags {
            self.write_indent(0);
            self.write_indicator(&format!("%TAG {} {}", t.handle, t.prefix), true, false);
            self.write_break();
        }
        let implicit = self.documents == 0 && !explicit && !directives && !self.style.canonical;
        if !implicit {
            self.write_indent(0);
            self.write_indicator("---", true, false);
        }
        self.tags = tags;
        self.state = State::Node;
    }

    /// Write the separator of the next node, and return the indentation of its content.
    fn slot(&mut self, head: &NodeHead) -> usize {
        let indent = self.style.indent;
        let canonical = self.style.canonical;
        let width = self.style.width;
        let alias_key = std::mem::take(&mut self.alias_key);
        let (kind, flow, f_indent, count, simple_key) = match self.frames.last_mut() {
            Some(f) => {
                if f.kind == Kind::Mapping && f.count % 2 == 0 {
                    f.simple_key = head.simple && !canonical;
                }
                (f.kind, f.flow, f.indent, f.count, f.simple_key)
            }
            None => return 0,
        };
        let is_key = kind == Kind::Mapping && count % 2 == 0;
        let is_value = kind == Kind::Mapping && count % 2 == 1;
        if flow {
            if is_value {
                if simple_key {
                    if alias_key {
                        self.write(" ");
                    }
                    self.write_indicator(":", false, false);
                } else {
                    if canonical {
                        self.write_indent(f_indent);
                    }
                    self.write_indicator(":", false, false);
                }
                return f_indent;
            }
            if count > 0 {
                self.write_indicator(",", false, false);
            }
            if canonical || self.column > width {
                self.write_indent(f_indent);
            }
            if is_key && !simple_key {
                self.write_indicator("?", true, false);
            }
            return f_indent;
        }
        match kind {
            Kind::Sequence => {
                let step = indent.max(2);
                self.write_indent(f_indent);
                self.write_indicator("-", true, true);
                self.pad(f_indent + step);
                f_indent + step
            }
            _ if is_key => {
                self.write_indent(f_indent);
                if !simple_key {
                    self.write_indicator("?", true, true);
                    self.pad(f_indent + indent);
                }
                f_indent + indent
            }
            _ => {
                if simple_key {
                    if alias_key {
                        self.write(" ");
                    }
                    self.write_indicator(":", false, false);
                } else {
                    self.write_indent(f_indent);
                    self.write_indicator(":", true, true);
                    self.pad(f_indent + indent);
                }
                f_indent + indent
            }
        }
    }

    /// Indentation of the next block scalar content, relative to its parent.
    fn content_step(&self) -> usize {
        match self.frames.last() {
            Some(f) if f.kind == Kind::Sequence => self.style.indent.max(2),
            _ => self.style.indent,
        }
    }

    fn in_flow(&self) -> bool {
        self.style.canonical || self.frames.last().is_some_and(|f| f.flow)
    }

    fn in_key(&self) -> bool {
        self.frames
            .last()
            .is_some_and(|f| f.kind == Kind::Mapping && f.count % 2 == 0)
    }

    fn node_done(&mut self) {
        match self.frames.last_mut() {
            Some(f) => f.count += 1,
            None => self.state = State::DocumentEnd,
        }
    }

    fn write_props(&mut self, head: &NodeHead) {
        if let Some(anchor) = &head.anchor {
            self.write_indicator(&format!("&{}", anchor), true, false);
        }
        if let Some(tag) = &head.tag {
            let tag = self.tag_text(tag);
            self.write_indicator(&tag, true, false);
        }
    }

    fn collection_start(&mut self, event: Event, empty: bool) -> Result<(), EmitError> {
        let (kind, anchor, tag, implicit, style) = match event {
            Event::SequenceStart {
                anchor,
                tag,
                implicit,
                style,
            } => (Kind::Sequence, anchor, tag, implicit, style),
            Event::MappingStart {
                anchor,
                tag,
                implicit,
                style,
            } => (Kind::Mapping, anchor, tag, implicit, style),
            event => return Err(EmitError::unexpected("collection start", &event)),
        };
        if self.state != State::Node {
            let event = match kind {
                Kind::Mapping => Event::MappingEnd,
                _ => Event::SequenceEnd,
            };
            return Err(EmitError::unexpected("node", &event));
        }
        let canonical = self.style.canonical;
        let head = NodeHead {
            anchor,
            tag: if implicit && !canonical { None } else { Some(tag) },
            simple: empty,
        };
        let flow = empty || self.in_flow() || style == CollectionStyle::Flow;
        let base = self.slot(&head);
        self.write_props(&head);
        let (open, close) = match kind {
            Kind::Mapping => ("{", "}"),
            _ => ("[", "]"),
        };
        if empty {
            self.write_indicator(&format!("{}{}", open, close), true, false);
            self.node_done();
            return Ok(());
        }
        if flow {
            self.write_indicator(open, true, false);
            self.whitespace = true;
        }
        self.frames.push(Frame {
            kind,
            flow,
            indent: if flow { base + self.style.indent } else { base },
            close: base,
            count: 0,
            simple_key: false,
        });
        Ok(())
    }

    fn collection_end(&mut self, kind: Kind) -> Result<(), EmitError> {
        let event = match kind {
            Kind::Mapping => Event::MappingEnd,
            _ => Event::SequenceEnd,
        };
        let frame = match self.frames.pop() {
            Some(f) if f.kind == kind && (kind == Kind::Sequence || f.count % 2 == 0) => f,
            Some(f) => {
                let expected = if f.kind == Kind::Mapping && f.count % 2 == 1 {
                    "mapping value"
                } else {
                    "node"
                };
                return Err(EmitError::unexpected(expected, &event));
            }
            None => return Err(EmitError::unexpected("document end", &event)),
        };
        if frame.flow {
            if self.style.canonical {
                self.write_indent(frame.close);
            }
            self.write_indicator(if kind == Kind::Mapping { "}" } else { "]" }, false, false);
        }
        self.node_done();
        Ok(())
    }

    fn scalar(
        &mut self,
        anchor: Option<String>,
        tag: &str,
        implicit: Implicit,
        value: &str,
        hint: ScalarStyle,
    ) {
        let canonical = self.style.canonical;
        let simple = !canonical && !value.contains('\n') && value.chars().count() <= SIMPLE_KEY_LEN;
        let key = self.in_key() && simple;
        let flow = self.in_flow();
        let step = self.content_step();
        // An indentation indicator has only one digit
        let literal = !flow && !key && (step <= 9 || !value.starts_with([' ', '\n']));
        let style = choose_style(value, implicit, hint, canonical, literal, flow, key);
        let show_tag = canonical
            || match style {
                ScalarStyle::Plain => !implicit.plain,
                _ => !implicit.quoted,
            };
        let head = NodeHead {
            anchor,
            tag: if show_tag { Some(tag.to_string()) } else { None },
            simple,
        };
        let base = self.slot(&head);
        let base = if self.frames.is_empty() {
            self.style.indent
        } else {
            base
        };
        self.write_props(&head);
        match style {
            ScalarStyle::Plain => self.write_plain(value, base, !key),
            ScalarStyle::SingleQuoted => self.write_single(value, base, !key),
            ScalarStyle::Literal => self.write_literal(value, base, step),
            _ => self.write_double(value, base, !key),
        }
        self.node_done();
    }

    fn tag_text(&self, tag: &str) -> String {
        if tag == "!" {
            return tag.to_string();
        }
        let defaults = [("!", "!"), ("!!", tag::CORE_PREFIX)];
        let directives = self
            .tags
            .iter()
            .map(|t| (t.handle.as_str(), t.prefix.as_str()))
            .chain(defaults);
        for (handle, prefix) in directives {
            if let Some(suffix) = tag.strip_prefix(prefix) {
                if !suffix.is_empty() {
                    return format!("{}{}", handle, escape_uri(suffix));
                }
            }
        }
        format!("!<{}>", tag)
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
        self.column += s.chars().count();
        self.whitespace = s.ends_with(' ');
    }

    fn write_break(&mut self) {
        self.out.push_str(self.style.line_break.as_str());
        self.column = 0;
        self.whitespace = true;
        self.indention = true;
    }

    fn pad(&mut self, column: usize) {
        while self.column < column {
            self.out.push(' ');
            self.column += 1;
        }
        self.whitespace = true;
    }

    fn write_indent(&mut self, indent: usize) {
        if !self.indention || self.column > indent || (self.column == indent && !self.whitespace) {
            self.write_break();
        }
        self.pad(indent);
        self.indention = true;
    }

    fn write_indicator(&mut self, s: &str, need_ws: bool, indention: bool) {
        if need_ws && !self.whitespace {
            self.out.push(' ');
            self.column += 1;
        }
        self.out.push_str(s);
        self.column += s.chars().count();
        self.whitespace = false;
        self.indention = self.indention && indention;
    }

    /// Write text, a single space between words becomes a line break when the line is too long.
    fn write_folded(&mut self, text: &str, base: usize, breaks: bool) {
        let chars = text.chars().collect::<Vec<_>>();
        for (i, &c) in chars.iter().enumerate() {
            let single_space = c == ' '
                && i > 0
                && chars[i - 1] != ' '
                && chars.get(i + 1).is_some_and(|&n| n != ' ');
            if breaks && single_space && self.column > self.style.width {
                self.write_break();
                self.pad(base);
                continue;
            }
            self.out.push(c);
            self.column += 1;
        }
    }

    fn write_plain(&mut self, value: &str, base: usize, breaks: bool) {
        if !self.whitespace {
            self.write(" ");
        }
        self.write_folded(value, base, breaks);
        self.whitespace = false;
        self.indention = false;
    }

    fn write_single(&mut self, value: &str, base: usize, breaks: bool) {
        self.write_indicator("'", true, false);
        self.write_folded(&value.replace('\'', "''"), base, breaks);
        self.write_indicator("'", false, false);
    }

    fn write_double(&mut self, value: &str, base: usize, breaks: bool) {
        self.write_indicator("\"", true, false);
        let mut escaped = String::with_capacity(value.len());
        for c in value.chars() {
            match c {
                '"' => escaped += "\\\"",
                '\\' => escaped += "\\\\",
                '\0' => escaped += "\\0",
                '\x07' => escaped += "\\a",
                '\x08' => escaped += "\\b",
                '\t' => escaped += "\\t",
                '\n' => escaped += "\\n",
                '\x0B' => escaped += "\\v",
                '\x0C' => escaped += "\\f",
                '\r' => escaped += "\\r",
                '\x1B' => escaped += "\\e",
                '\u{85}' => escaped += "\\N",
                '\u{A0}' => escaped += "\\_",
                '\u{2028}' => escaped += "\\L",
                '\u{2029}' => escaped += "\\P",
                c if is_printable(c) => escaped.push(c),
                c if (c as u32) <= 0xFF => escaped += &format!("\\x{:02X}", c as u32),
                c if (c as u32) <= 0xFFFF => escaped += &format!("\\u{:04X}", c as u32),
                c => escaped += &format!("\\U{:08X}", c as u32),
            }
        }
        // Leading spaces of a continuation line would be dropped
        let breaks = breaks && !value.contains("  ");
        self.write_folded(&escaped, base, breaks);
        self.write_indicator("\"", false, false);
    }

    fn write_literal(&mut self, value: &str, base: usize, step: usize) {
        let mut header = String::from("|");
        if value.starts_with([' ', '\n']) {
            header += &step.to_string();
        }
        let body = value.strip_suffix('\n').unwrap_or(value);
        if !value.ends_with('\n') {
            header.push('-');
        } else if body.ends_with('\n') || body.is_empty() {
            header.push('+');
        }
        self.write_indicator(&header, true, false);
        for line in body.split('\n') {
            self.write_break();
            if !line.is_empty() {
                self.pad(base);
                self.out.push_str(line);
                self.column += line.chars().count();
            }
        }
        self.whitespace = false;
        self.indention = false;
    }
}

impl<W: Write> Emitter for YamlEmitter<W> {
    fn emit(&mut self, event: Event) -> Result<(), EmitError> {
        if let Some(held) = self.held.take() {
            let empty = matches!(
                (&held, &event),
                (Event::SequenceStart { .. }, Event::SequenceEnd)
                    | (Event::MappingStart { .. }, Event::MappingEnd)
            );
            self.collection_start(held, empty)?;
            if empty {
                return self.flush_out();
            }
        }
        match event {
            Event::SequenceStart { .. } | Event::MappingStart { .. } => {
                if self.state != State::Node {
                    return Err(EmitError::unexpected("node", &event));
                }
                self.held = Some(event);
                Ok(())
            }
            event => {
                let r = self.dispatch(event);
                self.flush_out()?;
                r
            }
        }
    }
}

fn is_printable(c: char) -> bool {
    matches!(c,
        '\x20'..='\x7E'
        | '\u{85}'
        | '\u{A0}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
        && c != '\u{FEFF}'
}

/// Check the text can be written without quotes.
fn plain_allowed(value: &str, flow: bool, key: bool) -> bool {
    let Some(first) = value.chars().next() else {
        return false;
    };
    if value.starts_with(' ')
        || value.ends_with(' ')
        || value.ends_with(':')
        || value.starts_with("---")
        || value.starts_with("...")
        || value.contains(": ")
        || value.contains(" #")
        || value.contains('\t')
        || !value.chars().all(is_printable)
        || (key && value.chars().count() > SIMPLE_KEY_LEN)
    {
        return false;
    }
    if flow && value.contains([',', '[', ']', '{', '}', ':']) {
        return false;
    }
    match first {
        '-' | '?' | ':' => value
            .chars()
            .nth(1)
            .is_some_and(|c| c.is_alphanumeric() || ".+_".contains(c)),
        ',' | '[' | ']' | '{' | '}' | '#' | '&' | '*' | '!' | '|' | '>' | '\'' | '"' | '%'
        | '@' | '`' => false,
        _ => true,
    }
}

fn literal_allowed(value: &str) -> bool {
    value.contains('\n') && value.chars().all(|c| c == '\n' || is_printable(c))
}

fn choose_style(
    value: &str,
    implicit: Implicit,
    hint: ScalarStyle,
    canonical: bool,
    literal: bool,
    flow: bool,
    key: bool,
) -> ScalarStyle {
    if canonical {
        return ScalarStyle::DoubleQuoted;
    }
    let literal = literal && literal_allowed(value);
    match hint {
        ScalarStyle::Literal if literal => return ScalarStyle::Literal,
        ScalarStyle::Any | ScalarStyle::Plain
            if (implicit.plain || !implicit.quoted) && plain_allowed(value, flow, key) =>
        {
            return ScalarStyle::Plain
        }
        ScalarStyle::Any if literal => return ScalarStyle::Literal,
        ScalarStyle::DoubleQuoted => return ScalarStyle::DoubleQuoted,
        _ => {}
    }
    if !value.contains('\n') && value.chars().all(is_printable) {
        ScalarStyle::SingleQuoted
    } else {
        ScalarStyle::DoubleQuoted
    }
}

/// Percent-encode the characters that are not allowed in a tag suffix.
fn escape_uri(suffix: &str) -> String {
    let mut s = String::with_capacity(suffix.len());
    for c in suffix.chars() {
        if c.is_ascii_alphanumeric() || "-;/?:@&=+$,_.~*'()[]%".contains(c) {
            s.push(c);
        } else {
            let mut buf = [0; 4];
            for b in c.encode_utf8(&mut buf).bytes() {
                s += &format!("%{:02X}", b);
            }
        }
    }
    s
}
