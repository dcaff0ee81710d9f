use super::*;
use regex::Regex;

fn implicit(value: &str) -> String {
    DefaultResolver::new().resolve(Kind::Scalar, None, value, true)
}

#[test]
fn test_yaml11_table() {
    for (tag, values) in [
        (tag::NULL, &["", "~", "null", "Null", "NULL"][..]),
        (tag::BOOL, &["yes", "No", "TRUE", "false", "on", "Off"]),
        (tag::INT, &["0", "-12", "+7", "1_000", "0b1010", "017", "0x1F", "190:20:30"]),
        (tag::FLOAT, &["1.5", "-0.5", "1.0e+20", "685.230_15e+03", ".5", "-.inf", ".NaN", "190:20:30.15"]),
        (tag::TIMESTAMP, &["2001-12-14", "2001-12-14t21:59:43.10-05:00", "2001-12-14 21:59:43.10 Z"]),
        (tag::MERGE, &["<<"]),
        (tag::VALUE, &["="]),
        (tag::STR, &["hello", "nulls", "1e5", "0x", "yess", "12:60", "-", "2001-1-1"]),
    ] {
        for value in values {
            assert_eq!(implicit(value), tag, "{:?}", value);
        }
    }
}

#[test]
fn test_non_implicit() {
    let r = DefaultResolver::new();
    assert_eq!(r.resolve(Kind::Scalar, None, "12", false), tag::STR);
    assert_eq!(r.resolve(Kind::Sequence, None, "", true), tag::SEQ);
    assert_eq!(r.resolve(Kind::Mapping, None, "", false), tag::MAP);
}

#[test]
fn test_explicit_tag() {
    let r = DefaultResolver::new();
    assert_eq!(r.resolve(Kind::Scalar, Some("!x"), "12", true), "!x");
    assert_eq!(r.resolve(Kind::Mapping, Some("!set"), "", true), "!set");
    // The non-specific tag is resolved as if there were none
    assert_eq!(r.resolve(Kind::Scalar, Some("!"), "12", true), tag::INT);
}

#[test]
fn test_custom_resolver() {
    let mut r = DefaultResolver::new();
    r.add_implicit_resolver("!yes", Regex::new("^(?:yes|maybe)$").unwrap(), "ym");
    // Existing resolvers come first
    assert_eq!(r.resolve(Kind::Scalar, None, "yes", true), tag::BOOL);
    assert_eq!(r.resolve(Kind::Scalar, None, "maybe", true), "!yes");
    // The first character filters the candidates
    let mut r = DefaultResolver::empty();
    r.add_implicit_resolver("!num", Regex::new("^[0-9]+$").unwrap(), "12");
    assert_eq!(r.resolve(Kind::Scalar, None, "123", true), "!num");
    assert_eq!(r.resolve(Kind::Scalar, None, "321", true), tag::STR);
}

#[test]
fn test_resolver_in_dumper() {
    let mut buf = Vec::new();
    Dumper::new(&mut buf)
        .resolver(DefaultResolver::empty())
        .dump([node!(["1", "null"])])
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "- 1\n- null\n");
}
