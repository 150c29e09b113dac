// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

//! Finds the data fields Handlebars-style templates reference, synthesizes
//! sample documents for them and checks candidate documents against them.

pub mod assembler;
pub mod ast;
pub mod document;
pub mod extractor;
pub mod logging;
pub mod parser;
pub mod pipeline;
pub mod synthesizer;
pub mod template_source;
pub mod validator;

pub use assembler::{assemble, default_document};
pub use document::Document;
pub use extractor::{extract, FieldPath, FieldPathSet};
pub use pipeline::{get_required_fields, get_sample_document, validate_document, RequiredFieldsCache};
pub use synthesizer::{Category, DataProvider, LegacyDataProvider, RandomProvider, Synthesizer};
pub use validator::{validate, ValidationResult};
