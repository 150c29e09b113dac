// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::ops::Range;

use chumsky::{error::Error as _, prelude::*, Stream};

use crate::ast::{Call, Expr, HashPair, Literal, PathExpr, SubExpression};

use super::lexer::{gen_lexer, Opener, RawPath, Token};

/// One mustache (or run of content) in source order, before blocks are matched up.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Content(String),
    Comment(String),
    Mustache { call: Call, escaped: bool },
    BlockOpen { call: Call, inverted: bool },
    // `{{else}}`, `{{^}}` or a chained `{{else if cond}}`.
    Else(Option<Call>),
    BlockClose(PathExpr),
    Partial(Call),
    PartialBlockOpen(Call),
    Decorator(Call),
    DecoratorBlockOpen(Call),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxError {
    pub span: Range<usize>,
    pub message: String,
}

pub struct TemplateGrammar {
    lexer: Box<dyn Parser<char, Vec<(Token, Range<usize>)>, Error = Simple<char>>>,
    parser: Box<dyn Parser<Token, Vec<(Statement, Range<usize>)>, Error = Simple<Token>>>,
}

impl TemplateGrammar {
    pub fn new() -> TemplateGrammar {
        let lexer = gen_lexer();
        let parser = gen_statement_parser();
        TemplateGrammar {
            lexer: Box::new(lexer),
            parser: Box::new(parser),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Vec<(Statement, Range<usize>)>, Vec<SyntaxError>> {
        let tokens = self.lexer.parse(input).map_err(to_syntax_errors)?;

        let input_len = input.chars().count();
        let eoi = input_len..input_len + 1;

        self.parser
            .parse(Stream::from_iter(eoi, tokens.into_iter()))
            .map_err(to_syntax_errors)
    }
}

fn to_syntax_errors<T>(errs: Vec<Simple<T>>) -> Vec<SyntaxError>
where
    T: std::hash::Hash + Eq + std::fmt::Display,
{
    errs.into_iter()
        .map(|err| SyntaxError {
            span: err.span(),
            message: err.to_string(),
        })
        .collect()
}

enum Arg {
    Param(Expr),
    Hash(HashPair),
    BlockParams(Vec<String>),
}

fn build_call(head: Expr, args: Vec<Arg>) -> Call {
    let mut call = Call {
        head,
        params: Vec::new(),
        hash: Vec::new(),
        block_params: Vec::new(),
    };
    for arg in args {
        match arg {
            Arg::Param(param) => call.params.push(param),
            Arg::Hash(pair) => call.hash.push(pair),
            Arg::BlockParams(names) => call.block_params.extend(names),
        }
    }
    call
}

fn build_path(raw: RawPath) -> Result<PathExpr, String> {
    let original = raw.original();
    let data = raw.data;
    let (depth, parts) = raw.into_parts()?;
    Ok(PathExpr {
        data,
        depth,
        parts,
        original,
    })
}

fn keyword(name: &'static str) -> impl Parser<Token, (), Error = Simple<Token>> + Clone {
    filter_map(move |span, token: Token| {
        if matches!(&token, Token::Path(raw) if raw.is_name(name)) {
            Ok(())
        } else {
            Err(Simple::expected_input_found(span, None, Some(token)))
        }
    })
}

fn gen_statement_parser() -> impl Parser<Token, Vec<(Statement, Range<usize>)>, Error = Simple<Token>> {
    let name = select! { Token::Path(raw) if raw.is_simple() => raw.into_name() }.labelled("identifier");

    let literal = select! {
        Token::String(value) => Literal::String(value),
        Token::Number(value) => Literal::Number(value),
        Token::Path(raw) if raw.is_name("true") => Literal::Boolean(true),
        Token::Path(raw) if raw.is_name("false") => Literal::Boolean(false),
        Token::Path(raw) if raw.is_name("null") => Literal::Null,
        Token::Path(raw) if raw.is_name("undefined") => Literal::Undefined,
    }
    .labelled("literal");

    let path = select! { Token::Path(raw) => raw }
        .try_map(|raw, span| build_path(raw).map_err(|msg| Simple::custom(span, msg)))
        .labelled("path");

    let expr = recursive(|expr| {
        let hash_pair = name
            .clone()
            .then_ignore(just(Token::Eq))
            .then(expr.clone())
            .map(|(key, value)| Arg::Hash(HashPair { key, value }));

        let arg = hash_pair.or(expr.clone().map(Arg::Param));

        let sub_expression = expr
            .clone()
            .then(arg.repeated())
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .map(|(head, args)| {
                let call = build_call(head, args);
                Expr::SubExpression(Box::new(SubExpression { call }))
            })
            .labelled("sub-expression");

        sub_expression
            .or(literal.clone().map(Expr::Literal))
            .or(path.clone().map(Expr::Path))
    });

    let block_params = keyword("as").ignore_then(
        name.clone()
            .repeated()
            .at_least(1)
            .delimited_by(just(Token::Pipe), just(Token::Pipe)),
    );

    let hash_pair = name
        .then_ignore(just(Token::Eq))
        .then(expr.clone())
        .map(|(key, value)| Arg::Hash(HashPair { key, value }));

    let arg = choice((
        block_params.map(Arg::BlockParams),
        hash_pair,
        expr.clone().map(Arg::Param),
    ));

    let call = expr
        .then(arg.repeated())
        .map(|(head, args)| build_call(head, args))
        .labelled("call");

    let open = |opener| just(Token::Open(opener));
    let close = just(Token::Close);

    let text = select! {
        Token::Content(value) => Statement::Content(value),
        Token::Comment(value) => Statement::Comment(value),
    };

    // Must be tried before plain mustaches, or `else` would read as a field.
    let else_statement = open(Opener::Plain)
        .ignore_then(keyword("else"))
        .ignore_then(call.clone().or_not())
        .then_ignore(close.clone())
        .map(Statement::Else);

    let bare_inverse = open(Opener::Inverse).then(close.clone()).to(Statement::Else(None));

    let mustache = open(Opener::Plain)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(|call| Statement::Mustache { call, escaped: true });

    let unescaped = open(Opener::Unescaped)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(|call| Statement::Mustache { call, escaped: false });

    let triple = open(Opener::Triple)
        .ignore_then(call.clone())
        .then_ignore(just(Token::CloseTriple))
        .map(|call| Statement::Mustache { call, escaped: false });

    let block = open(Opener::Block)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(|call| Statement::BlockOpen { call, inverted: false });

    let inverse = open(Opener::Inverse)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(|call| Statement::BlockOpen { call, inverted: true });

    let block_close = open(Opener::End)
        .ignore_then(path)
        .then_ignore(close.clone())
        .map(Statement::BlockClose);

    let partial = open(Opener::Partial)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(Statement::Partial);

    let partial_block = open(Opener::PartialBlock)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(Statement::PartialBlockOpen);

    let decorator = open(Opener::Decorator)
        .ignore_then(call.clone())
        .then_ignore(close.clone())
        .map(Statement::Decorator);

    let decorator_block = open(Opener::DecoratorBlock)
        .ignore_then(call)
        .then_ignore(close)
        .map(Statement::DecoratorBlockOpen);

    let statement = choice((
        text,
        else_statement,
        bare_inverse,
        mustache,
        unescaped,
        triple,
        block,
        inverse,
        block_close,
        partial,
        partial_block,
        decorator,
        decorator_block,
    ));

    statement
        .map_with_span(|statement, span| (statement, span))
        .repeated()
        .then_ignore(end())
}
