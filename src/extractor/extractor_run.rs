// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use tracing::trace;

use crate::ast::{BlockNode, Call, Expr, Node, PathExpr, Program};

use super::{FieldPath, FieldPathSet};

// Helper names that never denote data when they head a mustache.
const RESERVED_HELPERS: &[&str] = &[
    "if",
    "unless",
    "each",
    "with",
    "lookup",
    "log",
    "helperMissing",
    "blockHelperMissing",
];

pub struct ExtractorRun<'a> {
    fields: &'a mut FieldPathSet,
}

impl ExtractorRun<'_> {
    pub fn new(fields: &mut FieldPathSet) -> ExtractorRun<'_> {
        ExtractorRun { fields }
    }

    pub fn extract_program(&mut self, program: &Program) {
        for node in &program.body {
            self.extract_node(node);
        }
    }

    fn extract_node(&mut self, node: &Node) {
        match node {
            Node::Reference(reference) => self.extract_call(&reference.call),
            Node::Block(block) => self.extract_block(block),
            Node::Unknown(unknown) => {
                if let Some(program) = &unknown.program {
                    self.extract_program(program);
                }
            }
            Node::Partial(_) | Node::Comment(_) | Node::Content(_) => {}
        }
    }

    // Mustaches and sub-expressions: the head unless it names a helper, plus every param.
    fn extract_call(&mut self, call: &Call) {
        match &call.head {
            Expr::Path(path) => {
                if !Self::is_reserved(path) {
                    self.add_path(path, false);
                }
            }
            Expr::SubExpression(sub) => self.extract_call(&sub.call),
            Expr::Literal(_) => {}
        }

        for param in &call.params {
            self.extract_param(param);
        }
    }

    fn extract_param(&mut self, param: &Expr) {
        match param {
            Expr::Path(path) => self.add_path(path, false),
            Expr::SubExpression(sub) => self.extract_call(&sub.call),
            Expr::Literal(_) => {}
        }
    }

    fn extract_block(&mut self, block: &BlockNode) {
        match block.call.helper_name() {
            Some("each") => {
                self.extract_first_param(&block.call, true);
                // Inner paths stay relative to the element and are recorded unprefixed.
                self.extract_program(&block.program);
            }
            Some("if") | Some("unless") => {
                self.extract_first_param(&block.call, false);
                self.extract_program(&block.program);
                if let Some(inverse) = &block.inverse {
                    self.extract_program(inverse);
                }
            }
            // Params of other block helpers are not scanned.
            _ => self.extract_program(&block.program),
        }
    }

    fn extract_first_param(&mut self, call: &Call, array: bool) {
        match call.params.first() {
            Some(Expr::Path(path)) => self.add_path(path, array),
            Some(Expr::SubExpression(sub)) => self.extract_call(&sub.call),
            Some(Expr::Literal(_)) | None => {}
        }
    }

    fn add_path(&mut self, path: &PathExpr, array: bool) {
        let Some(name) = Self::field_name(path) else {
            return;
        };

        let field = match array {
            true => FieldPath::array(&name),
            false => FieldPath::new(name),
        };

        trace!(path = %path.original, %field, "found field");
        self.fields.insert(field);
    }

    // `this`, `.`, `..` and data variables other than `@root.*` are not fields.
    fn field_name(path: &PathExpr) -> Option<String> {
        if path.is_self_reference() {
            return None;
        }

        if path.data {
            return match path.parts.split_first() {
                Some((root, rest)) if root == "root" && !rest.is_empty() => Some(rest.join(".")),
                _ => None,
            };
        }

        Some(path.normalized())
    }

    fn is_reserved(path: &PathExpr) -> bool {
        !path.data && path.head().is_some_and(|head| RESERVED_HELPERS.contains(&head))
    }
}
