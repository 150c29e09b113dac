// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use std::rc::Rc;

#[derive(Clone, Debug, Default)]
pub struct Program {
    pub body: Vec<Node>,
}

#[derive(Clone, Debug)]
pub enum Node {
    Content(ContentNode),
    Reference(ReferenceNode),
    Block(BlockNode),
    Partial(PartialNode),
    Comment(CommentNode),
    Unknown(UnknownNode),
}

#[derive(Clone, Debug)]
pub struct ContentNode {
    pub src_loc: SourceLocationSpan,
    pub value: String,
}

/// A plain mustache, e.g. `{{user.name}}`, `{{{body}}}` or `{{format date "short"}}`.
#[derive(Clone, Debug)]
pub struct ReferenceNode {
    pub src_loc: SourceLocationSpan,
    pub call: Call,
    pub escaped: bool,
}

/// A block helper invocation, `{{#name params}}program{{else}}inverse{{/name}}`.
#[derive(Clone, Debug)]
pub struct BlockNode {
    pub src_loc: SourceLocationSpan,
    pub call: Call,
    pub program: Program,
    pub inverse: Option<Program>,
}

#[derive(Clone, Debug)]
pub struct PartialNode {
    pub src_loc: SourceLocationSpan,
    pub call: Call,
    // Set for partial blocks (`{{#> layout}}...{{/layout}}`).
    pub program: Option<Program>,
}

#[derive(Clone, Debug)]
pub struct CommentNode {
    pub src_loc: SourceLocationSpan,
    pub value: String,
}

/// Constructs the extractor has no dedicated handling for (decorators).
#[derive(Clone, Debug)]
pub struct UnknownNode {
    pub src_loc: SourceLocationSpan,
    pub kind: &'static str,
    pub call: Call,
    pub program: Option<Program>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub head: Expr,
    pub params: Vec<Expr>,
    pub hash: Vec<HashPair>,
    pub block_params: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Expr,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Path(PathExpr),
    Literal(Literal),
    SubExpression(Box<SubExpression>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SubExpression {
    pub call: Call,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
    Undefined,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathExpr {
    // `@`-prefixed data variable, e.g. `@index` or `@root.title`.
    pub data: bool,
    // Number of leading `..` segments.
    pub depth: usize,
    // Segments with `this`, `.` and `..` removed.
    pub parts: Vec<String>,
    // The path as written in the template.
    pub original: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceLocationSpan {
    pub filename: Rc<String>,
    pub start: SourceLocation,
    pub end: SourceLocation,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceLocation {
    pub index: usize,
    pub line: usize,
    pub col: usize,
}

impl Node {
    pub fn src_loc(&self) -> &SourceLocationSpan {
        match self {
            Node::Content(ContentNode { src_loc, .. })
            | Node::Reference(ReferenceNode { src_loc, .. })
            | Node::Block(BlockNode { src_loc, .. })
            | Node::Partial(PartialNode { src_loc, .. })
            | Node::Comment(CommentNode { src_loc, .. })
            | Node::Unknown(UnknownNode { src_loc, .. }) => src_loc,
        }
    }
}

impl Call {
    /// Name of the helper in head position, when the head is a simple identifier.
    pub fn helper_name(&self) -> Option<&str> {
        match &self.head {
            Expr::Path(path) if !path.data && path.depth == 0 && path.parts.len() == 1 => Some(&path.parts[0]),
            _ => None,
        }
    }

    pub fn head_original(&self) -> Option<&str> {
        match &self.head {
            Expr::Path(path) => Some(&path.original),
            Expr::Literal(Literal::String(value)) => Some(value),
            _ => None,
        }
    }
}

impl PathExpr {
    /// `this`, `.` and `..` refer to a context rather than to a named field.
    pub fn is_self_reference(&self) -> bool {
        self.parts.is_empty()
    }

    /// Dot-joined parts, or the original text when there are none.
    pub fn normalized(&self) -> String {
        if self.parts.is_empty() {
            self.original.clone()
        } else {
            self.parts.join(".")
        }
    }

    pub fn head(&self) -> Option<&str> {
        self.parts.first().map(String::as_str)
    }
}
