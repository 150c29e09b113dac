use std::{fs, path::Path};

use super::*;

macro_rules! testlist {
    ($($name:ident,)*) => {
    $(
        #[test]
        fn $name() {
            run_test(stringify!($name))
        }
    )*
    }
}

testlist! {
    decorator_block,
    duplicates,
    each_and_if,
    each_block_params,
    each_flattens_inner_paths,
    else_if_chain,
    escapes_and_raw_blocks,
    generic_block_params_unscanned,
    hash_args_ignored,
    partials_and_comments,
    reference_params_scanned,
    reserved_heads_skipped,
    self_and_data_references,
    subexpressions,
    unless_with_else,
}

fn run_test(name: &str) {
    let rootdir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let test_data_dir = rootdir.join("src/extractor/tests/testdata");

    let test_file = test_data_dir.join(format!("tests/{}.txt", name));
    let expected_file = test_data_dir.join(format!("expected/{}.txt", name));
    let actual_dir = test_data_dir.join("actual");
    let actual_file = actual_dir.join(format!("{}.txt", name));

    let test = fs::read_to_string(test_file).unwrap();

    let fields = extract(&[test]);
    let actual = format_fields(&fields);

    fs::create_dir_all(actual_dir).unwrap();
    fs::write(actual_file, &actual).unwrap();

    let expected = fs::read_to_string(expected_file).unwrap();
    assert_eq!(expected, actual);
}

fn format_fields(fields: &FieldPathSet) -> String {
    let mut string = String::new();

    string.push_str("FIELDS:\n");
    for field in fields {
        string.push_str(field.as_str());
        string.push('\n');
    }

    return string;
}

#[test]
fn unparsable_template_yields_nothing() {
    let fields = extract(&["{{#if open}}never closed"]);
    assert!(fields.is_empty());

    let fields = extract(&["{{"]);
    assert!(fields.is_empty());
}

#[test]
fn broken_template_does_not_stop_the_rest() {
    let fields = extract(&["{{title}}", "{{#each}", "{{author.name}}"]);
    let expected: FieldPathSet = ["title", "author.name"].into_iter().collect();
    assert_eq!(fields, expected);
}

#[test]
fn no_templates_no_fields() {
    let texts: [&str; 0] = [];
    assert!(extract(&texts).is_empty());
}

#[test]
fn order_of_templates_does_not_matter() {
    let a = "{{#each rows}}{{label}}{{/each}}";
    let b = "{{#if visible}}{{label}} {{footer}}{{/if}}";

    let forward = extract(&[a, b]);
    let backward = extract(&[b, a]);
    assert_eq!(forward, backward);
    assert_eq!(forward.len(), 4);
}

#[test]
fn conditions_are_never_array_marked() {
    let fields = extract(&["{{#if rows}}{{/if}}{{#unless cols}}{{/unless}}{{#each cells}}{{/each}}"]);
    let arrays: Vec<_> = fields.iter().filter(|field| field.is_array()).map(FieldPath::as_str).collect();
    assert_eq!(arrays, vec!["cells[]"]);
}

#[test]
fn extract_program_matches_extract() {
    let text = "{{#each items}}{{price}}{{/each}}";
    let program = Parser::new().parse("inline", text).unwrap();
    assert_eq!(extract_program(&program), extract(&[text]));
}

#[test]
fn field_path_accessors() {
    let field = FieldPath::array("order.lines");
    assert_eq!(field.as_str(), "order.lines[]");
    assert!(field.is_array());
    assert_eq!(field.base(), "order.lines");
    assert_eq!(field.segments().collect::<Vec<_>>(), vec!["order", "lines"]);
    assert_eq!(field.leaf(), "lines");

    let field = FieldPath::new("title");
    assert!(!field.is_array());
    assert_eq!(field.leaf(), "title");
    assert_eq!(field.to_string(), "title");
}

#[test]
fn set_is_unique_and_sorts() {
    let mut fields = FieldPathSet::new();
    assert!(fields.insert("b".into()));
    assert!(fields.insert("a.c".into()));
    assert!(!fields.insert("b".into()));
    assert_eq!(fields.len(), 2);
    assert!(fields.contains("a.c"));

    let sorted: Vec<_> = fields.sorted().into_iter().map(FieldPath::as_str).collect();
    assert_eq!(sorted, vec!["a.c", "b"]);
}
