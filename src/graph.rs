//! Arena documents, the input of the serializer.
//!
//! A [`Graph`] stores nodes by index, so the children of a collection may refer
//! back to one of its ancestors. Trees of [`Node`] are lowered into graphs by
//! [`Graph::add_node`].
use crate::*;
use std::{collections::HashMap, ops::Index};

/// Index of a node in a [`Graph`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The position in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The shape of a graph node, collections hold the ids of their children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Scalar text
    Scalar(String),
    /// Sequence items
    Seq(Vec<NodeId>),
    /// Mapping entries
    Map(Vec<(NodeId, NodeId)>),
}

/// A node stored in a [`Graph`].
#[derive(Clone, Debug)]
pub struct GraphNode {
    /// Type tag
    pub tag: String,
    /// Scalar style hint
    pub style: ScalarStyle,
    /// Collection style hint
    pub collection_style: CollectionStyle,
    /// Content
    pub shape: Shape,
}

impl GraphNode {
    /// The shape discriminant.
    pub fn kind(&self) -> Kind {
        match self.shape {
            Shape::Scalar(_) => Kind::Scalar,
            Shape::Seq(_) => Kind::Sequence,
            Shape::Map(_) => Kind::Mapping,
        }
    }
}

/// Node arena.
///
/// ```
/// use yaml_dump::{tag, Graph};
///
/// // A mapping that contains itself.
/// let mut g = Graph::new();
/// let map = g.add_map(tag::MAP);
/// let key = g.add_scalar(tag::STR, "self");
/// g.insert(map, key, map);
/// let classes = g.classes();
/// assert_ne!(classes[map.index()], classes[key.index()]);
/// assert!(g.cyclic()[map.index()]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
}

impl Graph {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push_node(&mut self, tag: &str, shape: Shape) -> NodeId {
        self.nodes.push(GraphNode {
            tag: tag.to_string(),
            style: ScalarStyle::Any,
            collection_style: CollectionStyle::Any,
            shape,
        });
        NodeId(self.nodes.len() - 1)
    }

    /// Add a scalar.
    pub fn add_scalar(&mut self, tag: &str, text: impl Into<String>) -> NodeId {
        self.push_node(tag, Shape::Scalar(text.into()))
    }

    /// Add an empty sequence.
    pub fn add_seq(&mut self, tag: &str) -> NodeId {
        self.push_node(tag, Shape::Seq(Vec::new()))
    }

    /// Add an empty mapping.
    pub fn add_map(&mut self, tag: &str) -> NodeId {
        self.push_node(tag, Shape::Map(Vec::new()))
    }

    /// Append an item to a sequence.
    ///
    /// Panics if `seq` is not a sequence.
    pub fn push(&mut self, seq: NodeId, item: NodeId) {
        match &mut self.nodes[seq.0].shape {
            Shape::Seq(items) => items.push(item),
            _ => panic!("node {} is not a sequence", seq.0),
        }
    }

    /// Append an entry to a mapping.
    ///
    /// Panics if `map` is not a mapping.
    pub fn insert(&mut self, map: NodeId, key: NodeId, value: NodeId) {
        match &mut self.nodes[map.0].shape {
            Shape::Map(entries) => entries.push((key, value)),
            _ => panic!("node {} is not a mapping", map.0),
        }
    }

    /// Set the style hints of a node.
    pub fn set_style(&mut self, id: NodeId, style: ScalarStyle, collection: CollectionStyle) {
        let node = &mut self.nodes[id.0];
        node.style = style;
        node.collection_style = collection;
    }

    /// Lower a tree into the arena, return the id of its root.
    pub fn add_node(&mut self, node: &Node) -> NodeId {
        let root = self.alloc(node);
        let mut stack = vec![(node, root)];
        while let Some((node, id)) = stack.pop() {
            match node.yaml() {
                Yaml::Scalar(_) => {}
                Yaml::Seq(seq) => {
                    for item in seq {
                        let child = self.alloc(item);
                        self.push(id, child);
                        stack.push((item, child));
                    }
                }
                Yaml::Map(map) => {
                    for (k, v) in map {
                        let (key, value) = (self.alloc(k), self.alloc(v));
                        self.insert(id, key, value);
                        stack.push((k, key));
                        stack.push((v, value));
                    }
                }
            }
        }
        root
    }

    fn alloc(&mut self, node: &Node) -> NodeId {
        let shape = match node.yaml() {
            Yaml::Scalar(s) => Shape::Scalar(s.clone()),
            Yaml::Seq(s) => Shape::Seq(Vec::with_capacity(s.len())),
            Yaml::Map(m) => Shape::Map(Vec::with_capacity(m.len())),
        };
        let id = self.push_node(&node.tag, shape);
        self.set_style(id, node.style, node.collection_style);
        id
    }

    /// Iterate the children of a node: sequence items, or mapping keys and values in order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let (seq, map) = match &self[id].shape {
            Shape::Scalar(_) => (&[][..], &[][..]),
            Shape::Seq(s) => (s.as_slice(), &[][..]),
            Shape::Map(m) => (&[][..], m.as_slice()),
        };
        seq.iter()
            .copied()
            .chain(map.iter().flat_map(|&(k, v)| [k, v]))
    }

    /// Structural equivalence classes, indexed by [`NodeId::index`].
    ///
    /// Two nodes share a class iff their tags and contents are equal
    /// when both are unfolded, which is the [`Node`] equality for trees.
    ///
    /// Finite nodes are labeled children first in one pass.
    /// The nodes reaching a cycle are split by partition refinement afterwards,
    /// their classes never meet the finite ones.
    pub fn classes(&self) -> Vec<usize> {
        let (order, cyclic) = self.peel();
        let mut class = vec![0; self.nodes.len()];
        let mut index = HashMap::new();
        for i in order {
            let node = &self.nodes[i];
            let text = match &node.shape {
                Shape::Scalar(s) => Some(s.as_str()),
                _ => None,
            };
            let children = self
                .children(NodeId(i))
                .map(|c| class[c.0])
                .collect::<Vec<_>>();
            let next = index.len();
            class[i] = *index
                .entry((node.tag.as_str(), node.kind(), text, children))
                .or_insert(next);
        }
        let rest = (0..self.nodes.len())
            .filter(|&i| cyclic[i])
            .collect::<Vec<_>>();
        if rest.is_empty() {
            return class;
        }
        let base = index.len();
        let mut shapes = HashMap::new();
        for &i in &rest {
            let node = &self.nodes[i];
            let len = self.children(NodeId(i)).count();
            let next = base + shapes.len();
            class[i] = *shapes
                .entry((node.tag.as_str(), node.kind(), len))
                .or_insert(next);
        }
        let mut count = shapes.len();
        loop {
            let mut index = HashMap::new();
            let refined = rest
                .iter()
                .map(|&i| {
                    let children = self
                        .children(NodeId(i))
                        .map(|c| class[c.0])
                        .collect::<Vec<_>>();
                    let next = base + index.len();
                    *index.entry((class[i], children)).or_insert(next)
                })
                .collect::<Vec<_>>();
            // Refinement only splits classes
            let stable = index.len() == count;
            count = index.len();
            for (&i, c) in rest.iter().zip(refined) {
                class[i] = c;
            }
            if stable {
                return class;
            }
        }
    }

    /// Mark the nodes whose unfolding is infinite, i.e. they can reach a cycle.
    pub fn cyclic(&self) -> Vec<bool> {
        self.peel().1
    }

    /// Peel the finite nodes off from the leaves.
    ///
    /// Return the finite nodes with children before parents,
    /// and the flags of the remaining nodes.
    fn peel(&self) -> (Vec<usize>, Vec<bool>) {
        let n = self.nodes.len();
        let mut pending = vec![0usize; n];
        let mut parents = vec![Vec::new(); n];
        for (i, count) in pending.iter_mut().enumerate() {
            for c in self.children(NodeId(i)) {
                *count += 1;
                parents[c.0].push(i);
            }
        }
        let mut queue = (0..n).filter(|&i| pending[i] == 0).collect::<Vec<_>>();
        let mut order = Vec::with_capacity(n);
        while let Some(i) = queue.pop() {
            order.push(i);
            for &p in &parents[i] {
                pending[p] -= 1;
                if pending[p] == 0 {
                    queue.push(p);
                }
            }
        }
        (order, pending.into_iter().map(|c| c > 0).collect())
    }
}

impl Index<NodeId> for Graph {
    type Output = GraphNode;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

/// A document to serialize: an arena and its root.
#[derive(Clone, Debug)]
pub struct Document {
    /// Node arena
    pub graph: Graph,
    /// Root node
    pub root: NodeId,
}

impl Document {
    /// Create a document from an arena and the root.
    pub fn new(graph: Graph, root: NodeId) -> Self {
        Self { graph, root }
    }
}

impl From<&Node> for Document {
    fn from(node: &Node) -> Self {
        let mut graph = Graph::new();
        let root = graph.add_node(node);
        Self { graph, root }
    }
}

impl From<Node> for Document {
    fn from(node: Node) -> Self {
        Self::from(&node)
    }
}
