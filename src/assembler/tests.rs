use crate::{extractor::extract, synthesizer::RandomProvider};

use super::*;

fn fields(paths: &[&str]) -> FieldPathSet {
    paths.iter().copied().collect()
}

#[test]
fn nested_leaf() {
    let doc = assemble(&fields(&["user.email"]), &Synthesizer::new()).unwrap();

    let expected: Document = [("user", [("email", "user@example.com")].into_iter().collect::<Document>())]
        .into_iter()
        .collect();
    assert_eq!(doc, expected);
}

#[test]
fn array_fields_get_three_elements() {
    let doc = assemble(&fields(&["items[]"]), &Synthesizer::new()).unwrap();

    let items = doc.get("items").and_then(Document::as_array).unwrap();
    assert_eq!(
        items,
        &[
            Document::from("Sample item 1"),
            Document::from("Sample item 2"),
            Document::from("Sample item 3"),
        ]
    );
}

#[test]
fn keys_follow_sorted_order() {
    let doc = assemble(&fields(&["zeta", "alpha.c", "alpha.b", "beta"]), &Synthesizer::new()).unwrap();

    assert_eq!(doc.shape(), vec!["alpha", "alpha.b", "alpha.c", "beta", "zeta"]);
}

#[test]
fn scalar_parent_becomes_map() {
    let doc = assemble(&fields(&["user", "user.name"]), &Synthesizer::new()).unwrap();

    assert_eq!(doc.lookup(["user", "name"]), Some(&Document::from("Sample Name 1")));
}

#[test]
fn map_is_not_replaced_by_leaf() {
    let doc = assemble(&fields(&["user[]", "user.name"]), &Synthesizer::new()).unwrap();

    assert!(doc.get("user").and_then(Document::as_map).is_some());
    assert_eq!(doc.lookup(["user", "name"]), Some(&Document::from("Sample Name 1")));
}

#[test]
fn empty_segment_becomes_empty_key() {
    let doc = assemble(&fields(&["a..b", "title"]), &Synthesizer::new()).unwrap();

    assert_eq!(doc.lookup(["a", "", "b"]), Some(&Document::from("Sample b")));
    assert_eq!(doc.get("title"), Some(&Document::from("Sample Title")));
}

#[test]
fn empty_set_gives_empty_map() {
    let doc = assemble(&FieldPathSet::new(), &Synthesizer::new()).unwrap();
    assert_eq!(doc, Document::new_map());
}

#[test]
fn every_field_is_reachable() {
    let fields = extract(&[
        "{{title}} {{#each items}}{{name}}{{/each}} {{#if active}}{{description}}{{/if}}",
        "{{customer.address.city}} {{customer.email}} {{#each customer.orders}}{{total}}{{/each}}",
    ]);
    let doc = assemble(&fields, &Synthesizer::new()).unwrap();

    for field in &fields {
        let value = doc.lookup(field.segments());
        assert!(value.is_some_and(|value| !value.is_null()), "{} not reachable", field);
    }
}

#[test]
fn structure_does_not_depend_on_provider() {
    let fields = extract(&["{{#each people}}{{firstName}} {{age}}{{/each}} {{meta.createdAt}} {{meta.count}}"]);

    let plain = assemble(&fields, &Synthesizer::new()).unwrap();
    let random_a = assemble(&fields, &Synthesizer::new().with_provider(RandomProvider::seeded(1))).unwrap();
    let random_b = assemble(&fields, &Synthesizer::new().with_provider(RandomProvider::seeded(2))).unwrap();

    assert_eq!(plain.shape(), random_a.shape());
    assert_eq!(random_a.shape(), random_b.shape());
}

#[test]
fn default_document_shape() {
    let doc = default_document();
    assert_eq!(doc.get("title"), Some(&Document::from("Sample Title")));
    assert_eq!(doc.get("content"), Some(&Document::from("Sample content")));
    assert_eq!(doc.get("items").and_then(Document::as_array).map(<[Document]>::len), Some(3));
}
