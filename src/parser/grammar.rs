// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Handlebars-style template grammar: a character lexer feeding a statement parser.

mod lexer;
mod parser;

pub use parser::{Statement, SyntaxError, TemplateGrammar};
