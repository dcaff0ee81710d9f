//! Property-based tests of the event streams.
use super::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        (0..3i32).prop_map(Node::from),
        prop::sample::select(vec!["a", "b", ""]).prop_map(Node::from),
        prop::sample::select(vec!['x', 'y']).prop_map(|c| Node::from(long(c))),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5)
                .prop_map(|v| v.into_iter().collect::<Node>()),
            prop::collection::vec((inner.clone(), inner), 0..4)
                .prop_map(|v| v.into_iter().collect::<Node>()),
        ]
    })
}

fn anchorable(n: &Node) -> bool {
    match n.yaml() {
        Yaml::Scalar(s) => s.len() > ANCHOR_SCALAR_LEN,
        Yaml::Seq(s) => s.len() > ANCHOR_COLLECTION_LEN,
        Yaml::Map(m) => m.len() > ANCHOR_COLLECTION_LEN,
    }
}

/// Check any anchorable subtree occurs twice.
fn has_repeats(root: &Node) -> bool {
    let mut seen = HashMap::new();
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        if anchorable(n) {
            *seen.entry(n).or_insert(0) += 1;
        }
        match n.yaml() {
            Yaml::Scalar(_) => {}
            Yaml::Seq(s) => stack.extend(s),
            Yaml::Map(m) => stack.extend(m.iter().flat_map(|(k, v)| [k, v])),
        }
    }
    seen.values().any(|&c| c > 1)
}

proptest! {
    /// Every start has a matching end and every document holds one root
    #[test]
    fn prop_balanced(docs in prop::collection::vec(tree(), 0..3)) {
        let mut stack = Vec::new();
        let mut roots = 0;
        for e in events(docs.clone()) {
            match e {
                Event::DocumentStart { .. } => {
                    prop_assert!(stack.is_empty());
                    roots = 0;
                }
                Event::DocumentEnd { .. } => {
                    prop_assert!(stack.is_empty());
                    prop_assert_eq!(roots, 1);
                }
                Event::SequenceStart { .. } | Event::MappingStart { .. } => {
                    if stack.is_empty() {
                        roots += 1;
                    }
                    stack.push(matches!(e, Event::SequenceStart { .. }));
                }
                Event::SequenceEnd => {
                    prop_assert_eq!(stack.pop(), Some(true));
                }
                Event::MappingEnd => {
                    prop_assert_eq!(stack.pop(), Some(false));
                }
                Event::Scalar { .. } | Event::Alias { .. } if stack.is_empty() => {
                    roots += 1;
                }
                _ => {}
            }
        }
        prop_assert!(stack.is_empty());
        prop_assert!(dump(docs).is_ok());
    }

    /// Anchors are defined once per document, before any alias to them
    #[test]
    fn prop_anchor_unique(docs in prop::collection::vec(tree(), 1..3)) {
        let mut defined = HashSet::new();
        for e in events(docs) {
            match e {
                Event::DocumentStart { .. } => defined.clear(),
                Event::Scalar { anchor: Some(a), .. }
                | Event::SequenceStart { anchor: Some(a), .. }
                | Event::MappingStart { anchor: Some(a), .. } => {
                    prop_assert!(defined.insert(a.clone()), "anchor {} defined twice", a);
                }
                Event::Alias { anchor } => {
                    prop_assert!(defined.contains(&anchor), "undefined alias {}", anchor);
                }
                _ => {}
            }
        }
    }

    /// Nothing is aliased without a repeated anchorable subtree
    #[test]
    fn prop_no_repeats_no_alias(root in tree()) {
        prop_assume!(!has_repeats(&root));
        let ev = events([root]);
        prop_assert!(
            ev.iter().all(|e| !matches!(e, Event::Alias { .. })),
            "alias without a repeated subtree"
        );
    }

    /// The anchor ids of a document are `id001` up to the number of anchors
    #[test]
    fn prop_anchor_numbering(root in tree()) {
        let defined = events([root])
            .into_iter()
            .filter_map(|e| match e {
                Event::Scalar { anchor, .. }
                | Event::SequenceStart { anchor, .. }
                | Event::MappingStart { anchor, .. } => anchor,
                _ => None,
            })
            .collect::<Vec<_>>();
        let ids = defined.iter().cloned().collect::<HashSet<_>>();
        prop_assert_eq!(ids.len(), defined.len());
        let expected = (1..=defined.len())
            .map(|i| format!("id{:03}", i))
            .collect::<HashSet<_>>();
        prop_assert_eq!(ids, expected);
    }
}
