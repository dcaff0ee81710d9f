use super::*;
use serde::Serialize;
use std::collections::BTreeMap;

fn repr<T: Serialize>(value: T) -> Node {
    Representer::default()
        .represent(&value)
        .unwrap_or_else(|e| panic!("{}", e))
}

#[derive(Serialize)]
enum Figure {
    Unit,
    New(i32),
    Tup(i32, i32),
    Rec { a: i32 },
}

#[derive(Serialize)]
struct Config {
    name: String,
    tags: Vec<&'static str>,
    limit: Option<u32>,
    ratio: f64,
}

struct Bytes(&'static [u8]);

impl Serialize for Bytes {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bytes(self.0)
    }
}

struct Broken;

impl Serialize for Broken {
    fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("broken value"))
    }
}

#[test]
fn test_scalars() {
    assert_eq!(repr(()), node!(null));
    assert_eq!(repr(None::<i32>), node!(null));
    assert_eq!(repr(Some(3u8)), node!(3));
    assert_eq!(repr(false), node!(false));
    assert_eq!(repr(-7i64), node!("-7", tag::INT));
    assert_eq!(repr(1.5f64), node!("1.5", tag::FLOAT));
    assert_eq!(repr(f64::NEG_INFINITY), node!("-.inf", tag::FLOAT));
    assert_eq!(repr(0.1f32), node!("0.1", tag::FLOAT));
    assert_eq!(repr('c'), node!("c"));
    assert_eq!(repr("text"), node!("text"));
}

#[test]
fn test_bytes() {
    assert_eq!(repr(Bytes(b"hi")), node!("aGk=", tag::BINARY));
}

#[test]
fn test_variants() {
    assert_eq!(repr(Figure::Unit), node!("Unit"));
    assert_eq!(repr(Figure::New(1)), node!({"New" => 1}));
    assert_eq!(repr(Figure::Tup(1, 2)), node!({"Tup" => node!([1, 2])}));
    assert_eq!(repr(Figure::Rec { a: 1 }), node!({"Rec" => node!({"a" => 1})}));
}

#[test]
fn test_struct() {
    let c = Config {
        name: "demo".into(),
        tags: vec!["x", "y"],
        limit: None,
        ratio: 0.5,
    };
    assert_eq!(
        repr(c),
        node!({
            "name" => "demo",
            "tags" => node!(["x", "y"]),
            "limit" => node!(null),
            "ratio" => 0.5,
        })
    );
}

#[test]
fn test_map() {
    let m = BTreeMap::from([(2, "b"), (1, "a")]);
    assert_eq!(repr(m), node!({1 => "a", 2 => "b"}));
    assert_eq!(repr((1, "x")), node!([1, "x"]));
}

#[test]
fn test_styles() {
    let r = Representer::default()
        .collection_style(CollectionStyle::Flow)
        .scalar_style(ScalarStyle::DoubleQuoted);
    let n = r.represent(&vec!["a"]).unwrap();
    assert_eq!(n.collection_style, CollectionStyle::Flow);
    assert_eq!(n[0].style, ScalarStyle::DoubleQuoted);
    let mut buf = Vec::new();
    Dumper::new(&mut buf)
        .representer(r)
        .dump_values([vec!["a", "b"]])
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "[\"a\", \"b\"]\n");
}

#[test]
fn test_error() {
    let err = Representer::default().represent(&vec![Broken]).unwrap_err();
    assert_eq!(err, SerdeError("broken value".into()));
    let err = to_string(&Broken).unwrap_err();
    assert_eq!(err.to_string(), "Unable to dump YAML to stream <unknown>: broken value");
}

#[test]
fn test_unit_struct() {
    #[derive(Serialize)]
    struct Marker;
    assert_eq!(repr(Marker), node!(null));
}
