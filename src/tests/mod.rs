use crate::*;

mod dumper;
mod graph;
mod properties;
mod representer;
mod resolver;

/// Serialize the documents into a recorded event stream.
fn events<I>(docs: I) -> Vec<Event>
where
    I: IntoIterator,
    I::Item: Into<Document>,
{
    let mut recorder = EventRecorder::default();
    let resolver = DefaultResolver::new();
    let mut s = Serializer::new(&mut recorder, &resolver, DocumentOptions::default())
        .unwrap_or_else(|e| panic!("{}", e));
    for doc in docs {
        s.serialize(&doc.into()).unwrap_or_else(|e| panic!("{}", e));
    }
    s.close().unwrap_or_else(|e| panic!("{}", e));
    recorder.into_events()
}

/// The node events of a single document stream.
fn node_events(node: Node) -> Vec<Event> {
    let events = events([node]);
    events[2..events.len() - 2].to_vec()
}

/// A scalar long enough to be anchored.
fn long(c: char) -> String {
    std::iter::repeat(c).take(70).collect()
}

fn dump_str(node: Node) -> String {
    dump([node]).unwrap_or_else(|e| panic!("{}", e))
}
