use super::*;

#[test]
fn parse_nested_yaml() {
    let doc = parse_document_str("user:\n  name: Ada\n  age: 36\ntags: [a, b]\nscore: 1.5\nactive: true\nnote: ~\n").unwrap();

    assert_eq!(doc.lookup(["user", "name"]), Some(&Document::from("Ada")));
    assert_eq!(doc.lookup(["user", "age"]), Some(&Document::Integer(36)));
    assert_eq!(doc.get("tags").and_then(Document::as_array).map(<[Document]>::len), Some(2));
    assert_eq!(doc.get("score"), Some(&Document::Real(1.5)));
    assert_eq!(doc.get("active"), Some(&Document::Boolean(true)));
    assert!(doc.get("note").is_some_and(Document::is_null));
    assert_eq!(doc.lookup(["user", "email"]), None);
}

#[test]
fn parse_json() {
    let doc = parse_document_str(r#"{"a": {"x": 1}, "list": [1, 2, 3]}"#).unwrap();
    assert_eq!(doc.lookup(["a", "x"]), Some(&Document::Integer(1)));
    assert_eq!(doc.shape(), vec!["a", "a.x", "list"]);
}

#[test]
fn scalar_keys_become_text() {
    let doc = parse_document_str("1: one\ntrue: yes\n").unwrap();
    assert_eq!(doc.get("1"), Some(&Document::from("one")));
    assert!(doc.get("true").is_some());
}

#[test]
fn reject_multiple_documents() {
    let err = parse_document_str("a: 1\n---\nb: 2\n").unwrap_err();
    assert!(err.to_string().contains("found 2"), "{}", err);
}

#[test]
fn reject_empty_input() {
    assert!(parse_document_str("").is_err());
}

#[test]
fn aliases_read_as_copies() {
    let doc = parse_document_str("base: &b {x: 1}\ncopy: *b\n").unwrap();
    assert_eq!(doc.lookup(["copy", "x"]), Some(&Document::Integer(1)));
    assert_eq!(doc.get("copy"), doc.get("base"));
}

#[test]
fn reject_complex_keys() {
    assert!(parse_document_str("? [a, b]\n: c\n").is_err());
}

#[test]
fn emit_then_load_keeps_values() {
    let doc: Document = [
        ("title", Document::from("Quarterly report")),
        ("price", Document::Real(12.0)),
        ("count", Document::Integer(7)),
        ("active", Document::Boolean(false)),
        ("items", Document::Array(vec!["x".into(), "y".into()])),
    ]
    .into_iter()
    .collect();

    let out = emit_document_to_string(&doc).unwrap();
    assert!(out.contains("title: Quarterly report"), "{}", out);

    let reloaded = parse_document_str(&out).unwrap();
    assert_eq!(reloaded, doc);
}

#[test]
fn shape_follows_first_array_element() {
    let doc: Document = [(
        "rows",
        Document::Array(vec![[("cell", "a")].into_iter().collect(), Document::new_map()]),
    )]
    .into_iter()
    .collect();
    assert_eq!(doc.shape(), vec!["rows", "rows[].cell"]);
}
