use super::*;

fn classes_of_children(node: Node) -> Vec<usize> {
    let doc = Document::from(node);
    let classes = doc.graph.classes();
    doc.graph
        .children(doc.root)
        .map(|id| classes[id.index()])
        .collect()
}

#[test]
fn test_lowering() {
    let n = node!({"a" => node!([1, 2]), "b" => node!(null)});
    let doc = Document::from(&n);
    assert_eq!(doc.graph.len(), 7);
    let root = &doc.graph[doc.root];
    assert_eq!(root.kind(), Kind::Mapping);
    assert_eq!(root.tag, tag::MAP);
    let kids = doc.graph.children(doc.root).collect::<Vec<_>>();
    assert_eq!(kids.len(), 4);
    assert_eq!(doc.graph[kids[0]].shape, Shape::Scalar("a".into()));
    assert_eq!(doc.graph[kids[3]].tag, tag::NULL);
    match &doc.graph[kids[1]].shape {
        Shape::Seq(items) => assert_eq!(items.len(), 2),
        shape => panic!("not a sequence: {:?}", shape),
    }
}

#[test]
fn test_lowering_keeps_styles() {
    let n = node!([node!("a").style(ScalarStyle::Literal)]).collection_style(CollectionStyle::Flow);
    let doc = Document::from(n);
    assert_eq!(doc.graph[doc.root].collection_style, CollectionStyle::Flow);
    let kid = doc.graph.children(doc.root).next().unwrap();
    assert_eq!(doc.graph[kid].style, ScalarStyle::Literal);
}

#[test]
fn test_tree_classes() {
    let c = classes_of_children(node!([node!([1, 2]), node!([1, 2]), node!([1, 3])]));
    assert_eq!(c[0], c[1]);
    assert_ne!(c[0], c[2]);
    // The tag is part of the class
    let c = classes_of_children(node!(["1", 1, "1"]));
    assert_eq!(c[0], c[2]);
    assert_ne!(c[0], c[1]);
    // Style hints are not
    let c = classes_of_children(node!([node!("a"), node!("a").style(ScalarStyle::DoubleQuoted)]));
    assert_eq!(c[0], c[1]);
}

#[test]
fn test_nested_difference() {
    let a = node!([node!([node!([1])])]);
    let b = node!([node!([node!([2])])]);
    let c = classes_of_children(node!([a.clone(), b, a]));
    assert_ne!(c[0], c[1]);
    assert_eq!(c[0], c[2]);
}

#[test]
fn test_cycle_classes() {
    // a = [b], b = [a], c = [c]: all unfold to the same sequence
    let mut g = Graph::new();
    let (a, b, c) = (g.add_seq(tag::SEQ), g.add_seq(tag::SEQ), g.add_seq(tag::SEQ));
    g.push(a, b);
    g.push(b, a);
    g.push(c, c);
    let d = g.add_seq("!other");
    g.push(d, d);
    let classes = g.classes();
    assert_eq!(classes[a.index()], classes[b.index()]);
    assert_eq!(classes[a.index()], classes[c.index()]);
    assert_ne!(classes[a.index()], classes[d.index()]);
}

fn chain(g: &mut Graph, depth: usize, leaf: &str) -> NodeId {
    let mut id = g.add_scalar(tag::STR, leaf);
    for _ in 0..depth {
        let seq = g.add_seq(tag::SEQ);
        g.push(seq, id);
        id = seq;
    }
    id
}

#[test]
fn test_deep_classes() {
    let mut g = Graph::new();
    let a = chain(&mut g, 50_000, "x");
    let b = chain(&mut g, 50_000, "x");
    let c = chain(&mut g, 50_000, "y");
    let d = chain(&mut g, 49_999, "x");
    // A cycle whose child is a deep chain
    let looped = g.add_seq(tag::SEQ);
    g.push(looped, a);
    g.push(looped, looped);
    let classes = g.classes();
    assert_eq!(classes[a.index()], classes[b.index()]);
    assert_ne!(classes[a.index()], classes[c.index()]);
    assert_ne!(classes[a.index()], classes[d.index()]);
    assert_ne!(classes[a.index()], classes[looped.index()]);
    assert!(g.cyclic()[looped.index()]);
    assert!(!g.cyclic()[a.index()]);
}

#[test]
fn test_cyclic() {
    let mut g = Graph::new();
    let root = g.add_seq(tag::SEQ);
    let leaf = g.add_scalar(tag::STR, "x");
    let looped = g.add_map(tag::MAP);
    g.push(root, leaf);
    g.push(root, looped);
    g.insert(looped, leaf, looped);
    assert_eq!(g.cyclic(), [true, false, true]);
    let tree = Document::from(node!([node!([1, 2]), node!([3])]));
    assert!(tree.graph.cyclic().iter().all(|c| !c));
}

#[test]
#[should_panic]
fn test_push_to_scalar() {
    let mut g = Graph::new();
    let s = g.add_scalar(tag::STR, "x");
    g.push(s, s);
}
