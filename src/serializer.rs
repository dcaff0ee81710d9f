//! The serializer, turns documents into event streams.
//!
//! Each document is walked twice:
//!
//! 1. The anchor pass finds the anchorable nodes that occur more than once,
//!    and allocates an anchor for each of them.
//! 2. The serialize pass emits the events, the first occurrence of an anchored
//!    node defines it and the later occurrences become aliases.
//!
//! Nodes are identified by structural equality, so two equal subtrees built
//! separately share one anchor.
use crate::*;
use ritelinked::{LinkedHashMap, LinkedHashSet};

/// Scalars longer than this (in bytes) are anchorable.
pub const ANCHOR_SCALAR_LEN: usize = 64;
/// Collections with more children than this are anchorable.
pub const ANCHOR_COLLECTION_LEN: usize = 2;

/// Per-document options of the serializer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Request the `---` marker.
    pub explicit_start: bool,
    /// Request the `...` marker.
    pub explicit_end: bool,
    /// The `%YAML` directive.
    pub version: Option<String>,
    /// The `%TAG` directives.
    pub tags: Vec<TagDirective>,
}

enum Task {
    Node(NodeId),
    SeqEnd,
    MapEnd,
}

/// Per-document facts of the graph.
struct Analysis {
    classes: Vec<usize>,
    cyclic: Vec<bool>,
}

impl Analysis {
    fn new(graph: &Graph) -> Self {
        Self {
            classes: graph.classes(),
            cyclic: graph.cyclic(),
        }
    }

    fn class(&self, id: NodeId) -> usize {
        self.classes[id.index()]
    }

    /// Long scalars, large collections, and nodes that lead to a cycle.
    fn anchorable(&self, graph: &Graph, id: NodeId) -> bool {
        self.cyclic[id.index()]
            || match &graph[id].shape {
                Shape::Scalar(s) => s.len() > ANCHOR_SCALAR_LEN,
                Shape::Seq(s) => s.len() > ANCHOR_COLLECTION_LEN,
                Shape::Map(m) => m.len() > ANCHOR_COLLECTION_LEN,
            }
    }
}

/// A serializer session.
///
/// Creating the session emits [`Event::StreamStart`], [`Serializer::close`] emits
/// [`Event::StreamEnd`]. If the session is dropped without closing,
/// e.g. by an early error return, the stream is closed by the drop.
///
/// ```
/// use yaml_dump::{node, DefaultResolver, DocumentOptions, Event, EventRecorder, Serializer};
///
/// let mut recorder = EventRecorder::default();
/// let resolver = DefaultResolver::new();
/// let mut s = Serializer::new(&mut recorder, &resolver, DocumentOptions::default()).unwrap();
/// s.serialize(&node!([1, 2, 3, 4, 5]).into()).unwrap();
/// s.close().unwrap();
/// let events = recorder.events();
/// assert_eq!(Event::StreamStart, events[0]);
/// assert_eq!(5, events.iter().filter(|e| matches!(e, Event::Scalar { .. })).count());
/// assert_eq!(Some(&Event::StreamEnd), events.last());
/// ```
pub struct Serializer<'a, E: Emitter + ?Sized, R: Resolver + ?Sized> {
    emitter: &'a mut E,
    resolver: &'a R,
    options: DocumentOptions,
    /// Marked classes, `None` means seen once.
    anchors: LinkedHashMap<usize, Option<String>>,
    /// Classes whose definitions have been emitted.
    serialized: LinkedHashSet<usize>,
    last_anchor_id: u32,
    closed: bool,
}

impl<'a, E: Emitter + ?Sized, R: Resolver + ?Sized> Serializer<'a, E, R> {
    /// Open a session, the stream start event is emitted.
    pub fn new(
        emitter: &'a mut E,
        resolver: &'a R,
        options: DocumentOptions,
    ) -> Result<Self, EmitError> {
        log::debug!("opening YAML stream");
        emitter.emit(Event::StreamStart)?;
        Ok(Self {
            emitter,
            resolver,
            options,
            anchors: LinkedHashMap::new(),
            serialized: LinkedHashSet::new(),
            last_anchor_id: 0,
            closed: false,
        })
    }

    /// Close the session, the stream end event is emitted.
    pub fn close(mut self) -> Result<(), EmitError> {
        log::debug!("closing YAML stream");
        self.closed = true;
        self.emitter.emit(Event::StreamEnd)
    }

    /// Serialize a document.
    ///
    /// The anchors are local to the document,
    /// the next document starts from the first anchor again.
    pub fn serialize(&mut self, doc: &Document) -> Result<(), EmitError> {
        log::debug!("serializing a document of {} nodes", doc.graph.len());
        let r = self.document(doc);
        self.anchors.clear();
        self.serialized.clear();
        self.last_anchor_id = 0;
        r
    }

    fn document(&mut self, doc: &Document) -> Result<(), EmitError> {
        self.emitter.emit(Event::DocumentStart {
            explicit: self.options.explicit_start,
            version: self.options.version.clone(),
            tags: self.options.tags.clone(),
        })?;
        let analysis = Analysis::new(&doc.graph);
        self.anchor_node(&doc.graph, &analysis, doc.root);
        self.serialize_node(&doc.graph, &analysis, doc.root)?;
        self.emitter.emit(Event::DocumentEnd {
            explicit: self.options.explicit_end,
        })
    }

    fn generate_anchor(&mut self) -> String {
        self.last_anchor_id += 1;
        let anchor = format!("id{:03}", self.last_anchor_id);
        log::trace!("allocated anchor {}", anchor);
        anchor
    }

    /// The anchor pass.
    ///
    /// A marked node is never descended again, which stops the walk on cycles.
    fn anchor_node(&mut self, graph: &Graph, analysis: &Analysis, root: NodeId) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !analysis.anchorable(graph, id) {
                continue;
            }
            let class = analysis.class(id);
            match self.anchors.get(&class).map(Option::is_some) {
                Some(true) => {}
                Some(false) => {
                    let anchor = self.generate_anchor();
                    self.anchors.insert(class, Some(anchor));
                }
                None => {
                    self.anchors.insert(class, None);
                    let children = graph.children(id).collect::<Vec<_>>();
                    stack.extend(children.into_iter().rev());
                }
            }
        }
    }

    /// The serialize pass.
    fn serialize_node(
        &mut self,
        graph: &Graph,
        analysis: &Analysis,
        root: NodeId,
    ) -> Result<(), EmitError> {
        let mut stack = vec![Task::Node(root)];
        while let Some(task) = stack.pop() {
            let id = match task {
                Task::Node(id) => id,
                Task::SeqEnd => {
                    self.emitter.emit(Event::SequenceEnd)?;
                    continue;
                }
                Task::MapEnd => {
                    self.emitter.emit(Event::MappingEnd)?;
                    continue;
                }
            };
            let class = analysis.class(id);
            let anchorable = analysis.anchorable(graph, id);
            let aliased = if anchorable {
                self.anchors.get(&class).cloned().flatten()
            } else {
                None
            };
            if self.serialized.contains(&class) {
                if let Some(anchor) = aliased {
                    self.emitter.emit(Event::Alias { anchor })?;
                    continue;
                }
            }
            if anchorable {
                self.serialized.insert(class);
            }
            let node = &graph[id];
            match &node.shape {
                Shape::Scalar(value) => {
                    let detected = self.resolver.resolve(Kind::Scalar, None, value, true);
                    let default = self.resolver.resolve(Kind::Scalar, None, value, false);
                    self.emitter.emit(Event::Scalar {
                        anchor: aliased,
                        tag: node.tag.clone(),
                        implicit: Implicit {
                            plain: node.tag == detected,
                            quoted: node.tag == default,
                        },
                        value: value.clone(),
                        style: node.style,
                    })?;
                }
                Shape::Seq(items) => {
                    let default = self.resolver.resolve(Kind::Sequence, None, "", false);
                    self.emitter.emit(Event::SequenceStart {
                        anchor: aliased,
                        tag: node.tag.clone(),
                        implicit: node.tag == default,
                        style: node.collection_style,
                    })?;
                    stack.push(Task::SeqEnd);
                    stack.extend(items.iter().rev().map(|&id| Task::Node(id)));
                }
                Shape::Map(entries) => {
                    let default = self.resolver.resolve(Kind::Mapping, None, "", false);
                    self.emitter.emit(Event::MappingStart {
                        anchor: aliased,
                        tag: node.tag.clone(),
                        implicit: node.tag == default,
                        style: node.collection_style,
                    })?;
                    stack.push(Task::MapEnd);
                    for &(k, v) in entries.iter().rev() {
                        stack.push(Task::Node(v));
                        stack.push(Task::Node(k));
                    }
                }
            }
        }
        Ok(())
    }
}

impl<E: Emitter + ?Sized, R: Resolver + ?Sized> Drop for Serializer<'_, E, R> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        log::warn!("YAML stream dropped before closing");
        self.closed = true;
        if let Err(e) = self.emitter.emit(Event::StreamEnd) {
            log::warn!("failed to close YAML stream: {}", e);
        }
    }
}
