// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod grammar;


use std::{iter::Peekable, ops::Range, rc::Rc, vec::IntoIter};

use anyhow::{anyhow, Error};
use tracing::debug;

use crate::ast::{
    BlockNode, Call, CommentNode, ContentNode, Node, PartialNode, PathExpr, Program, ReferenceNode, SourceLocation,
    SourceLocationSpan, UnknownNode,
};

use grammar::{Statement, SyntaxError, TemplateGrammar};

macro_rules! errwithloc {
    ($loc:expr, $fmt:expr $(, $($arg:tt)*)?) => {
        anyhow!(concat!("{}:{}:{} ", $fmt), $loc.filename, $loc.start.line, $loc.start.col, $($($arg)*)?)
    };
}

pub struct Parser {
    grammar: TemplateGrammar,
}

impl Parser {
    pub fn new() -> Parser {
        let grammar = TemplateGrammar::new();
        Parser { grammar }
    }

    pub fn parse(&self, filename: &str, input: &str) -> Result<Program, Error> {
        let locator = Locator::new(filename, input);

        let statements = self
            .grammar
            .parse(input)
            .map_err(|errs| locator.syntax_error(&errs))?;
        debug!(filename, statements = statements.len(), "lexed and parsed template");

        let run = ParserRun::new(&locator, statements);
        run.parse()
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

// Maps character offsets to line/column positions.
struct Locator {
    filename: Rc<String>,
    line_starts: Vec<usize>,
}

impl Locator {
    fn new(filename: &str, input: &str) -> Locator {
        let mut line_starts = vec![0];
        for (index, c) in input.chars().enumerate() {
            if c == '\n' {
                line_starts.push(index + 1);
            }
        }

        Locator {
            filename: Rc::new(filename.to_string()),
            line_starts,
        }
    }

    fn to_source_location_span(&self, span: &Range<usize>) -> SourceLocationSpan {
        SourceLocationSpan {
            filename: self.filename.clone(),
            start: self.to_source_location(span.start),
            end: self.to_source_location(span.end),
        }
    }

    fn to_source_location(&self, index: usize) -> SourceLocation {
        let line = match self.line_starts.binary_search(&index) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };

        SourceLocation {
            index,
            line: line + 1,
            col: index - self.line_starts[line] + 1,
        }
    }

    fn syntax_error(&self, errs: &[SyntaxError]) -> Error {
        for err in errs {
            let loc = self.to_source_location_span(&err.span);
            debug!("{}:{}:{} parse error: {}", loc.filename, loc.start.line, loc.start.col, err.message);
        }

        match errs.first() {
            Some(err) => {
                let loc = self.to_source_location_span(&err.span);
                errwithloc!(loc, "template parse errors (count={}): {}", errs.len(), err.message)
            }
            None => anyhow!("{}: template parse failed", self.filename),
        }
    }
}

struct ParserRun<'a> {
    locator: &'a Locator,
    statements: Peekable<IntoIter<(Statement, Range<usize>)>>,
}

// The remainder of a block after its opening tag.
struct BlockTail {
    program: Program,
    inverse: Option<Program>,
    close: PathExpr,
    close_span: Range<usize>,
}

impl ParserRun<'_> {
    fn new(locator: &Locator, statements: Vec<(Statement, Range<usize>)>) -> ParserRun<'_> {
        ParserRun {
            locator,
            statements: statements.into_iter().peekable(),
        }
    }

    fn parse(mut self) -> Result<Program, Error> {
        let body = self.parse_body()?;

        // parse_body() only stops early on `{{else}}` or a closing tag.
        if let Some((statement, span)) = self.statements.next() {
            let loc = self.locator.to_source_location_span(&span);
            return Err(match statement {
                Statement::BlockClose(path) => errwithloc!(loc, "closing tag '{}' has no matching block", path.original),
                _ => errwithloc!(loc, "'else' outside of a block"),
            });
        }

        Ok(Program { body })
    }

    fn parse_body(&mut self) -> Result<Vec<Node>, Error> {
        let mut body = Vec::new();
        while let Some((statement, span)) = self
            .statements
            .next_if(|(statement, _)| !matches!(statement, Statement::Else(_) | Statement::BlockClose(_)))
        {
            let node = self.parse_statement(statement, span)?;
            body.push(node);
        }
        Ok(body)
    }

    fn parse_statement(&mut self, statement: Statement, span: Range<usize>) -> Result<Node, Error> {
        let src_loc = self.locator.to_source_location_span(&span);
        let node = match statement {
            Statement::Content(value) => Node::Content(ContentNode { src_loc, value }),
            Statement::Comment(value) => Node::Comment(CommentNode { src_loc, value }),
            Statement::Mustache { call, escaped } => Node::Reference(ReferenceNode { src_loc, call, escaped }),
            Statement::BlockOpen { call, inverted } => self.parse_block(call, inverted, span)?,
            Statement::Partial(call) => Node::Partial(PartialNode {
                src_loc,
                call,
                program: None,
            }),
            Statement::PartialBlockOpen(call) => {
                let program = self.parse_simple_block(&call, &span)?;
                Node::Partial(PartialNode {
                    src_loc,
                    call,
                    program: Some(program),
                })
            }
            Statement::Decorator(call) => Node::Unknown(UnknownNode {
                src_loc,
                kind: "decorator",
                call,
                program: None,
            }),
            Statement::DecoratorBlockOpen(call) => {
                let program = self.parse_simple_block(&call, &span)?;
                Node::Unknown(UnknownNode {
                    src_loc,
                    kind: "decorator block",
                    call,
                    program: Some(program),
                })
            }
            Statement::Else(_) | Statement::BlockClose(_) => {
                return Err(errwithloc!(src_loc, "unexpected block delimiter"));
            }
        };
        Ok(node)
    }

    fn parse_block(&mut self, call: Call, inverted: bool, span: Range<usize>) -> Result<Node, Error> {
        let tail = self.parse_block_tail(&span)?;
        self.expect_matching_close(&call, &tail.close, &tail.close_span)?;

        // `{{^name}}` swaps the programs, the same way Handlebars does.
        let (program, inverse) = match inverted {
            false => (tail.program, tail.inverse),
            true => (tail.inverse.unwrap_or_default(), Some(tail.program)),
        };

        let src_loc = self.locator.to_source_location_span(&(span.start..tail.close_span.end));
        Ok(Node::Block(BlockNode {
            src_loc,
            call,
            program,
            inverse,
        }))
    }

    fn parse_block_tail(&mut self, open_span: &Range<usize>) -> Result<BlockTail, Error> {
        let program = Program {
            body: self.parse_body()?,
        };

        match self.statements.next() {
            Some((Statement::BlockClose(close), close_span)) => Ok(BlockTail {
                program,
                inverse: None,
                close,
                close_span,
            }),
            Some((Statement::Else(None), _)) => {
                let inverse = Program {
                    body: self.parse_body()?,
                };
                match self.statements.next() {
                    Some((Statement::BlockClose(close), close_span)) => Ok(BlockTail {
                        program,
                        inverse: Some(inverse),
                        close,
                        close_span,
                    }),
                    Some((_, span)) => {
                        let loc = self.locator.to_source_location_span(&span);
                        Err(errwithloc!(loc, "block already has an 'else' section"))
                    }
                    None => Err(self.unclosed_block(open_span)),
                }
            }
            Some((Statement::Else(Some(call)), else_span)) => {
                // `{{else if cond}}` becomes a nested block that shares the outer closing tag.
                let chained = self.parse_block_tail(&else_span)?;
                let src_loc = self.locator.to_source_location_span(&(else_span.start..chained.close_span.end));
                let block = Node::Block(BlockNode {
                    src_loc,
                    call,
                    program: chained.program,
                    inverse: chained.inverse,
                });
                Ok(BlockTail {
                    program,
                    inverse: Some(Program { body: vec![block] }),
                    close: chained.close,
                    close_span: chained.close_span,
                })
            }
            Some((_, span)) => {
                let loc = self.locator.to_source_location_span(&span);
                Err(errwithloc!(loc, "unexpected statement inside block"))
            }
            None => Err(self.unclosed_block(open_span)),
        }
    }

    // Partial and decorator blocks allow no `{{else}}`.
    fn parse_simple_block(&mut self, call: &Call, span: &Range<usize>) -> Result<Program, Error> {
        let tail = self.parse_block_tail(span)?;
        if tail.inverse.is_some() {
            let loc = self.locator.to_source_location_span(span);
            return Err(errwithloc!(loc, "'else' is not allowed in this block"));
        }
        self.expect_matching_close(call, &tail.close, &tail.close_span)?;
        Ok(tail.program)
    }

    fn expect_matching_close(&self, call: &Call, close: &PathExpr, close_span: &Range<usize>) -> Result<(), Error> {
        let open = call.head_original().unwrap_or_default();
        if open != close.original {
            let loc = self.locator.to_source_location_span(close_span);
            return Err(errwithloc!(
                loc,
                "closing tag '{}' does not match block '{}'",
                close.original,
                open
            ));
        }
        Ok(())
    }

    fn unclosed_block(&self, open_span: &Range<usize>) -> Error {
        let loc = self.locator.to_source_location_span(open_span);
        errwithloc!(loc, "block is never closed")
    }
}
