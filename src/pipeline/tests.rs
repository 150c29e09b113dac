use crate::{document::parse_document_str, synthesizer::RandomProvider};

use super::*;

const INVOICE: &str = "{{title}} {{#each items}}{{name}}{{/each}} {{#if active}}{{description}}{{/if}}";

#[test]
fn required_fields_for_invoice() {
    let fields = get_required_fields(&[INVOICE]);
    let expected: FieldPathSet = ["title", "items[]", "name", "active", "description"].into_iter().collect();
    assert_eq!(fields, expected);
}

#[test]
fn unparsable_template_has_no_fields() {
    let fields = get_required_fields(&["{{#each items}}{{name}}"]);
    assert!(fields.is_empty());
}

#[test]
fn sample_document_for_invoice() {
    let doc = get_sample_document(&[INVOICE], &Synthesizer::new());

    assert_eq!(doc.shape(), vec!["active", "description", "items", "name", "title"]);
    assert_eq!(doc.get("active"), Some(&Document::Boolean(true)));
    assert_eq!(doc.get("title"), Some(&Document::from("Sample Title")));
    assert_eq!(doc.get("name"), Some(&Document::from("Sample Name 1")));
}

#[test]
fn empty_segment_keeps_other_fields() {
    let texts = ["{{a.[].b}} {{title}} {{customer.email}}"];
    let doc = get_sample_document(&texts, &Synthesizer::new());

    assert_eq!(doc.get("title"), Some(&Document::from("Sample Title")));
    assert_eq!(doc.lookup(["customer", "email"]), Some(&Document::from("user@example.com")));
    assert!(validate_document(&texts, &doc).valid);
}

#[test]
fn failed_sample_becomes_default() {
    let doc = or_default_document(Err(anyhow::anyhow!("no fields")));
    assert_eq!(doc, default_document());

    let doc = or_default_document(Ok(Document::new_map()));
    assert_eq!(doc, Document::new_map());
}

#[test]
fn sample_document_is_structurally_stable() {
    let synthesizer = Synthesizer::new().with_provider(RandomProvider::new());
    let first = get_sample_document(&[INVOICE], &synthesizer);
    let second = get_sample_document(&[INVOICE], &synthesizer);
    assert_eq!(first.shape(), second.shape());
}

#[test]
fn validate_against_templates() {
    let doc = parse_document_str("title: Hello\nitems:\n  - name: one\n").unwrap();
    let result = validate_document(&[INVOICE], &doc);

    assert!(!result.valid);
    let missing: Vec<_> = result.missing_fields.iter().map(|field| field.as_str()).collect();
    assert_eq!(missing, vec!["name", "active", "description"]);
}

#[test]
fn cache_returns_same_fields() {
    let cache = RequiredFieldsCache::default();
    let first = cache.get_required_fields(&[INVOICE]);
    let second = cache.get_required_fields(&[INVOICE]);
    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_keys_on_exact_text() {
    let cache = RequiredFieldsCache::new(4);
    let before = cache.get_required_fields(&["{{title}}"]);
    let after = cache.get_required_fields(&["{{title}} {{subtitle}}"]);

    assert_eq!(before.len(), 1);
    assert_eq!(after.len(), 2);
    assert_eq!(cache.len(), 2);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cache_evicts_least_recently_used() {
    let cache = RequiredFieldsCache::new(1);
    cache.get_required_fields(&["{{a}}"]);
    cache.get_required_fields(&["{{b}}"]);
    assert_eq!(cache.len(), 1);
}
