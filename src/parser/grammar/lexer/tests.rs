use super::*;

fn lex(input: &str) -> Vec<Token> {
    let lexer = gen_lexer();
    let tokens = lexer.parse(input).unwrap();
    tokens.into_iter().map(|(tok, _)| tok).collect()
}

fn path(name: &str) -> Token {
    Token::Path(RawPath {
        data: false,
        first: PathPiece::Name(name.to_string()),
        rest: vec![],
    })
}

#[test]
fn content_only() {
    assert_eq!(lex("hello { world }"), vec![Token::Content("hello { world }".to_string())]);
}

#[test]
fn simple_mustache() {
    assert_eq!(
        lex("Hi {{ name }}!"),
        vec![
            Token::Content("Hi ".to_string()),
            Token::Open(Opener::Plain),
            path("name"),
            Token::Close,
            Token::Content("!".to_string()),
        ]
    );
}

#[test]
fn dotted_path_is_one_token() {
    let tokens = lex("{{user.address/city}}");
    assert_eq!(tokens.len(), 3);
    let Token::Path(raw) = &tokens[1] else {
        panic!("expected path, found {:?}", tokens[1]);
    };
    assert_eq!(raw.original(), "user.address/city");
    assert_eq!(
        raw.clone().into_parts(),
        Ok((0, vec!["user".to_string(), "address".to_string(), "city".to_string()]))
    );
}

#[test]
fn spaced_dots_are_separate_paths() {
    let tokens = lex("{{helper . x}}");
    assert_eq!(tokens.len(), 5);
}

#[test]
fn parent_and_this_paths() {
    let tokens = lex("{{../title}}{{this.name}}{{.}}");
    let parts: Vec<_> = tokens
        .into_iter()
        .filter_map(|tok| match tok {
            Token::Path(raw) => Some(raw.into_parts().unwrap()),
            _ => None,
        })
        .collect();
    assert_eq!(
        parts,
        vec![
            (1, vec!["title".to_string()]),
            (0, vec!["name".to_string()]),
            (0, vec![]),
        ]
    );
}

#[test]
fn this_after_name_is_invalid() {
    let tokens = lex("{{foo.this}}");
    let Token::Path(raw) = &tokens[1] else {
        panic!("expected path");
    };
    assert!(raw.clone().into_parts().is_err());
}

#[test]
fn openers() {
    let openers: Vec<_> = lex("{{#if a}}{{^}}{{/if}}{{> p}}{{#> l}}{{/l}}{{& raw}}{{#*inline \"x\"}}{{/inline}}")
        .into_iter()
        .filter_map(|tok| match tok {
            Token::Open(opener) => Some(opener),
            _ => None,
        })
        .collect();
    assert_eq!(
        openers,
        vec![
            Opener::Block,
            Opener::Inverse,
            Opener::End,
            Opener::Partial,
            Opener::PartialBlock,
            Opener::End,
            Opener::Unescaped,
            Opener::DecoratorBlock,
            Opener::End,
        ]
    );
}

#[test]
fn triple_mustache() {
    assert_eq!(
        lex("{{{ body }}}"),
        vec![Token::Open(Opener::Triple), path("body"), Token::CloseTriple]
    );
}

#[test]
fn whitespace_control() {
    assert_eq!(
        lex("{{~#if a~}}"),
        vec![Token::Open(Opener::Block), path("if"), path("a"), Token::Close]
    );
}

#[test]
fn comments() {
    assert_eq!(
        lex("{{! short }}{{!-- has }} inside --}}"),
        vec![
            Token::Comment(" short ".to_string()),
            Token::Comment(" has }} inside ".to_string()),
        ]
    );
}

#[test]
fn literals_and_hash() {
    assert_eq!(
        lex("{{fmt 'a\\'b' -1.5 key=\"v\"}}"),
        vec![
            Token::Open(Opener::Plain),
            path("fmt"),
            Token::String("a'b".to_string()),
            Token::Number("-1.5".to_string()),
            path("key"),
            Token::Eq,
            Token::String("v".to_string()),
            Token::Close,
        ]
    );
}

#[test]
fn unterminated_mustache_is_an_error() {
    let lexer = gen_lexer();
    assert!(lexer.parse("{{#if a}").is_err());
}

#[test]
fn escaped_mustache_is_content() {
    assert_eq!(
        lex("a \\{{b}} c {{d}}"),
        vec![
            Token::Content("a {{b}} c ".to_string()),
            Token::Open(Opener::Plain),
            path("d"),
            Token::Close,
        ]
    );
}

#[test]
fn escaped_backslash_keeps_mustache() {
    assert_eq!(
        lex("\\\\{{d}}"),
        vec![
            Token::Content("\\".to_string()),
            Token::Open(Opener::Plain),
            path("d"),
            Token::Close,
        ]
    );
}

#[test]
fn raw_block_body_is_content() {
    assert_eq!(
        lex("{{{{raw}}}}{{#if x}}{{{{/raw}}}}"),
        vec![Token::Content("{{#if x}}".to_string())]
    );
}
