// Copyright (c) Chris Gunn.
// Licensed under the MIT license.


use tracing::debug;

use crate::{
    document::Document,
    extractor::{FieldPath, FieldPathSet},
};

#[derive(Clone, Debug, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_fields: Vec<FieldPath>,
}

/// Reports every field the document does not provide, in the set's order.
///
/// Array fields only need their key to be present; elements are not inspected.
pub fn validate(fields: &FieldPathSet, document: &Document) -> ValidationResult {
    let missing_fields: Vec<FieldPath> = fields
        .iter()
        .filter(|field| document.lookup(field.segments()).is_none())
        .cloned()
        .collect();

    debug!(fields = fields.len(), missing = missing_fields.len(), "validated document");
    ValidationResult {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}
