// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::{fmt, ops::Range};

use chumsky::{
    error::Simple,
    primitive::{choice, empty, end, filter, just, take_until},
    text::{self, TextParser},
    Parser,
};

/// The sigil following `{{`, which decides what kind of statement a mustache is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opener {
    Plain,
    Triple,
    Block,
    End,
    Inverse,
    Partial,
    PartialBlock,
    Unescaped,
    Decorator,
    DecoratorBlock,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    Content(String),
    Comment(String),
    Open(Opener),
    Close,
    CloseTriple,
    Path(RawPath),
    String(String),
    Number(String),
    LParen,
    RParen,
    Eq,
    Pipe,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathPiece {
    Parent,
    Current,
    Name(String),
    // `[...]` segment, never treated as `this`.
    Literal(String),
}

/// A path exactly as it was written, before `this`/`..` handling.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RawPath {
    pub data: bool,
    pub first: PathPiece,
    pub rest: Vec<(char, PathPiece)>,
}

impl fmt::Display for Opener {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Opener::Plain => f.write_str("{{"),
            Opener::Triple => f.write_str("{{{"),
            Opener::Block => f.write_str("{{#"),
            Opener::End => f.write_str("{{/"),
            Opener::Inverse => f.write_str("{{^"),
            Opener::Partial => f.write_str("{{>"),
            Opener::PartialBlock => f.write_str("{{#>"),
            Opener::Unescaped => f.write_str("{{&"),
            Opener::Decorator => f.write_str("{{*"),
            Opener::DecoratorBlock => f.write_str("{{#*"),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Content(_) => f.write_str("content"),
            Token::Comment(_) => f.write_str("comment"),
            Token::Open(opener) => write!(f, "{}", opener),
            Token::Close => f.write_str("}}"),
            Token::CloseTriple => f.write_str("}}}"),
            Token::Path(path) => f.write_str(&path.original()),
            Token::String(value) => write!(f, "{:?}", value),
            Token::Number(value) => f.write_str(value),
            Token::LParen => f.write_str("("),
            Token::RParen => f.write_str(")"),
            Token::Eq => f.write_str("="),
            Token::Pipe => f.write_str("|"),
        }
    }
}

impl PathPiece {
    fn text(&self) -> String {
        match self {
            PathPiece::Parent => "..".to_string(),
            PathPiece::Current => ".".to_string(),
            PathPiece::Name(name) => name.clone(),
            PathPiece::Literal(name) => format!("[{}]", name),
        }
    }

    fn is_context(&self) -> bool {
        match self {
            PathPiece::Parent | PathPiece::Current => true,
            PathPiece::Name(name) => name == "this",
            PathPiece::Literal(_) => false,
        }
    }
}

impl RawPath {
    /// A single plain identifier, e.g. a helper name or a hash key.
    pub fn is_simple(&self) -> bool {
        !self.data && self.rest.is_empty() && matches!(self.first, PathPiece::Name(_))
    }

    pub fn is_name(&self, name: &str) -> bool {
        self.is_simple() && matches!(&self.first, PathPiece::Name(first) if first == name)
    }

    pub fn original(&self) -> String {
        let mut original = String::new();
        if self.data {
            original.push('@');
        }
        original.push_str(&self.first.text());
        for (separator, piece) in &self.rest {
            original.push(*separator);
            original.push_str(&piece.text());
        }
        original
    }

    pub fn into_name(self) -> String {
        match self.first {
            PathPiece::Name(name) | PathPiece::Literal(name) => name,
            piece => piece.text(),
        }
    }

    /// Splits the path into parts, dropping leading `this`, `.` and `..` segments.
    pub fn into_parts(self) -> Result<(usize, Vec<String>), String> {
        let original = self.original();
        let pieces = std::iter::once(self.first).chain(self.rest.into_iter().map(|(_, piece)| piece));

        let mut depth = 0;
        let mut parts = Vec::new();
        for piece in pieces {
            if piece.is_context() {
                if !parts.is_empty() {
                    return Err(format!("invalid path '{}'", original));
                }
                if piece == PathPiece::Parent {
                    depth += 1;
                }
                continue;
            }

            if let PathPiece::Name(name) | PathPiece::Literal(name) = piece {
                parts.push(name);
            }
        }

        Ok((depth, parts))
    }
}

// Matches the Handlebars ID rule: anything but whitespace and the punctuation the grammar reserves.
fn is_id_char(c: &char) -> bool {
    !c.is_whitespace()
        && !matches!(*c, '!'..='#' | '%'..=',' | '.' | '/' | ';'..='>' | '@' | '['..='^' | '`' | '{'..='~')
}

pub fn gen_lexer() -> impl Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>> {
    let strip = just('~').or_not();

    let long_comment = just("{{")
        .then(strip.clone())
        .then(just("!--"))
        .ignore_then(take_until(just("--").then(strip.clone()).then(just("}}"))))
        .map(|(chars, _)| Token::Comment(chars.into_iter().collect()));

    let short_comment = just("{{")
        .then(strip.clone())
        .then(just('!'))
        .ignore_then(take_until(strip.clone().then(just("}}"))))
        .map(|(chars, _)| Token::Comment(chars.into_iter().collect()));

    let comment = long_comment
        .or(short_comment)
        .map_with_span(|tok, span| vec![(tok, span)])
        .labelled("comment");

    let escape = just('\\').ignore_then(choice((
        just('\\'),
        just('/'),
        just('"'),
        just('\''),
        just('n').to('\n'),
        just('r').to('\r'),
        just('t').to('\t'),
    )));

    let double_quoted = just('"')
        .ignore_then(filter(|c: &char| *c != '\\' && *c != '"').or(escape.clone()).repeated())
        .then_ignore(just('"'));

    let single_quoted = just('\'')
        .ignore_then(filter(|c: &char| *c != '\\' && *c != '\'').or(escape).repeated())
        .then_ignore(just('\''));

    let string = double_quoted
        .or(single_quoted)
        .collect::<String>()
        .map(Token::String)
        .labelled("string");

    let frac = just('.').chain(text::digits(10));

    let number = just('-')
        .or_not()
        .chain::<char, _, _>(text::int(10))
        .chain::<char, _, _>(frac.or_not().flatten())
        .collect::<String>()
        .then_ignore(filter(is_id_char).not().rewind())
        .map(Token::Number)
        .labelled("number");

    let ident = filter(is_id_char).repeated().at_least(1).collect::<String>();

    let name = ident.clone().map(PathPiece::Name);

    let literal_segment = just('[')
        .ignore_then(filter(|c: &char| *c != ']').repeated())
        .then_ignore(just(']'))
        .collect::<String>()
        .map(PathPiece::Literal);

    let piece = choice((
        just("..").to(PathPiece::Parent),
        just('.').to(PathPiece::Current),
        name,
        literal_segment,
    ));

    // Path pieces must be adjacent: `a.b` is one path, `a . b` is three.
    let path = just('@')
        .or_not()
        .then(piece.clone())
        .then(just('.').or(just('/')).then(piece).repeated())
        .map(|((at, first), rest)| {
            Token::Path(RawPath {
                data: at.is_some(),
                first,
                rest,
            })
        })
        .labelled("path");

    let ctrl = choice((
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('=').to(Token::Eq),
        just('|').to(Token::Pipe),
    ));

    let inner = choice((string, number, path, ctrl))
        .map_with_span(|tok, span| (tok, span))
        .padded()
        .repeated();

    let whitespace = filter(|c: &char| c.is_whitespace()).repeated();

    let triple = just("{{")
        .then(strip.clone())
        .then(just('{'))
        .map_with_span(|_, span| (Token::Open(Opener::Triple), span))
        .then(inner.clone())
        .then(
            whitespace
                .clone()
                .ignore_then(just('}'))
                .then(strip.clone())
                .then(just("}}"))
                .map_with_span(|_, span| (Token::CloseTriple, span)),
        )
        .map(join_mustache);

    let opener = choice((
        just("#>").to(Opener::PartialBlock),
        just("#*").to(Opener::DecoratorBlock),
        just('#').to(Opener::Block),
        just('/').to(Opener::End),
        just('^').to(Opener::Inverse),
        just('>').to(Opener::Partial),
        just('&').to(Opener::Unescaped),
        just('*').to(Opener::Decorator),
        empty().to(Opener::Plain),
    ));

    let mustache = just("{{")
        .ignore_then(strip.clone())
        .ignore_then(opener)
        .map_with_span(|opener, span| (Token::Open(opener), span))
        .then(inner)
        .then(
            whitespace
                .ignore_then(strip)
                .then(just("}}"))
                .map_with_span(|_, span| (Token::Close, span)),
        )
        .map(join_mustache);

    // `{{{{name ...}}}}` up to the matching `{{{{/name}}}}`; the body is never lexed.
    let raw_block = just("{{{{")
        .ignore_then(ident.clone().padded())
        .then_ignore(take_until(just("}}}}")))
        .then(take_until(
            just("{{{{/")
                .ignore_then(ident.padded())
                .then_ignore(just("}}}}")),
        ))
        .try_map(|(open, (body, close)), span| {
            if open != close {
                return Err(Simple::custom(
                    span,
                    format!("raw block '{}' closed by '{}'", open, close),
                ));
            }
            Ok(vec![(Token::Content(body.into_iter().collect()), span)])
        })
        .labelled("raw block");

    let mustache_start = || choice((just("{{"), just("\\{{"), just("\\\\{{")));

    // `\\{{` keeps one backslash and leaves the mustache that follows intact.
    let escaped_backslash = just("\\\\")
        .then(just("{{").rewind())
        .to("\\".to_string());

    // `\{{` makes the text up to the next mustache literal, braces included.
    let escaped_mustache = just("\\{{")
        .ignore_then(mustache_start().not().repeated())
        .map(|rest: Vec<char>| format!("{{{{{}", rest.into_iter().collect::<String>()));

    let content = choice((
        escaped_backslash,
        escaped_mustache,
        mustache_start().not().map(String::from),
    ))
    .repeated()
    .at_least(1)
    .collect::<String>()
    .map_with_span(|value, span| vec![(Token::Content(value), span)])
    .labelled("content");

    choice((comment, raw_block, triple, mustache, content))
        .repeated()
        .flatten()
        .then_ignore(end())
}

type Spanned = (Token, Range<usize>);

fn join_mustache(((open, mut inner), close): ((Spanned, Vec<Spanned>), Spanned)) -> Vec<Spanned> {
    let mut tokens = Vec::with_capacity(inner.len() + 2);
    tokens.push(open);
    tokens.append(&mut inner);
    tokens.push(close);
    tokens
}
