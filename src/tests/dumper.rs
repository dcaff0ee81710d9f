use super::*;
use std::io::{self, Write};

struct FullDisk;

impl Write for FullDisk {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn dump_with<F>(docs: Vec<Node>, f: F) -> String
where
    F: FnOnce(Dumper<&mut Vec<u8>>) -> Dumper<&mut Vec<u8>>,
{
    let mut buf = Vec::new();
    f(Dumper::new(&mut buf))
        .dump(docs)
        .unwrap_or_else(|e| panic!("{}", e));
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_multi_document() {
    assert_eq!(
        dump([node!(1), node!({"a" => 2}), node!([3])]).unwrap(),
        "1\n---\na: 2\n---\n- 3\n"
    );
}

#[test]
fn test_explicit_markers() {
    let doc = dump_with(vec![node!(1), node!(2)], |d| {
        d.explicit_start(true).explicit_end(true)
    });
    assert_eq!(doc, "--- 1\n...\n--- 2\n...\n");
}

#[test]
fn test_version_directive() {
    let doc = dump_with(vec![node!(1), node!(2)], |d| d.yaml_version("1.1"));
    assert_eq!(doc, "%YAML 1.1\n--- 1\n...\n%YAML 1.1\n--- 2\n");
}

#[test]
fn test_tag_directive() {
    let doc = dump_with(vec![node!("12", "tag:example.com,2000:app/foo")], |d| {
        d.tag_directives([("!e!", "tag:example.com,2000:app/")])
            .unwrap()
    });
    assert_eq!(doc, "%TAG !e! tag:example.com,2000:app/\n--- !e!foo 12\n");
}

#[test]
fn test_indent() {
    let doc = dump_with(vec![node!({"a" => node!({"b" => node!([1])})})], |d| {
        d.indent(4).unwrap()
    });
    assert_eq!(doc, "a:\n    b:\n        -   1\n");
    let err = Dumper::new(Vec::new()).indent(0).err();
    assert_eq!(err, Some(ConfigError::ZeroIndent));
}

#[test]
fn test_bad_tag_prefix() {
    let err = Dumper::new(Vec::new()).tag_directives([("!e!", "")]).err();
    assert_eq!(err, Some(ConfigError::TagPrefix("!e!".into())));
}

#[test]
fn test_graph_document() {
    let mut g = Graph::new();
    let map = g.add_map(tag::MAP);
    let key = g.add_scalar(tag::STR, "self");
    g.insert(map, key, map);
    assert_eq!(dump([Document::new(g, map)]).unwrap(), "&id001\nself: *id001\n");
}

#[test]
fn test_borrowed_nodes() {
    let nodes = [node!("a"), node!("b")];
    assert_eq!(dump(&nodes).unwrap(), "a\n--- b\n");
}

#[test]
fn test_emit_error_message() {
    let err = Dumper::new(FullDisk)
        .name("out.yaml")
        .dump([node!(1)])
        .unwrap_err();
    assert!(matches!(err, DumpError::Emit { .. }));
    assert_eq!(err.to_string(), "Unable to dump YAML to stream out.yaml: disk full");
}

#[test]
fn test_open_error_message() {
    let path = std::env::temp_dir().join("yaml-dump-missing").join("out.yaml");
    let err = Dumper::open(&path).err().unwrap();
    assert!(err
        .to_string()
        .starts_with(&format!("Unable to open file {} for YAML dumping: ", path.display())));
}

#[test]
fn test_open_file() {
    let path = std::env::temp_dir().join(format!("yaml-dump-{}.yaml", std::process::id()));
    Dumper::open(&path)
        .unwrap()
        .dump([node!({"a" => node!([1, 2])})])
        .unwrap();
    let doc = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(doc, "a:\n  - 1\n  - 2\n");
}

#[test]
fn test_dump_values() {
    let mut buf = Vec::new();
    Dumper::new(&mut buf)
        .dump_values([("a", 1), ("b", 2)])
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "- a\n- 1\n---\n- b\n- 2\n");
}

#[test]
fn test_into_inner() {
    let mut d = Dumper::new(Vec::new()).line_break(LineBreak::Macintosh);
    d.dump([node!([1])]).unwrap();
    assert_eq!(d.into_inner(), b"- 1\r");
}
