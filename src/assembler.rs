// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use anyhow::Error;
use hashlink::LinkedHashMap;
use tracing::{debug, trace};

use crate::{
    document::Document,
    extractor::{FieldPath, FieldPathSet},
    synthesizer::Synthesizer,
};

/// Elements synthesized for every `[]` path.
pub const SAMPLE_ARRAY_LEN: usize = 3;

/// Builds one nested sample document covering every field.
///
/// Fields are placed in lexicographic order, which fixes the key order of the result.
/// An empty segment, as in `a..b`, becomes an empty key so the path stays reachable.
pub fn assemble(fields: &FieldPathSet, synthesizer: &Synthesizer) -> Result<Document, Error> {
    let mut root = LinkedHashMap::new();

    for field in fields.sorted() {
        let segments: Vec<&str> = field.segments().collect();
        let value = sample_value(field, synthesizer);
        trace!(%field, "assembled field");
        insert_path(&mut root, &segments, value);
    }

    debug!(fields = fields.len(), "assembled sample document");
    Ok(Document::Map(root))
}

/// The document substituted when building a sample fails.
pub fn default_document() -> Document {
    let items = (1..=SAMPLE_ARRAY_LEN)
        .map(|n| Document::String(format!("Item {}", n)))
        .collect();

    [
        ("title", Document::from("Sample Title")),
        ("content", Document::from("Sample content")),
        ("items", Document::Array(items)),
    ]
    .into_iter()
    .collect()
}

fn sample_value(field: &FieldPath, synthesizer: &Synthesizer) -> Document {
    let leaf = field.leaf();
    match field.is_array() {
        true => Document::Array(
            (0..SAMPLE_ARRAY_LEN)
                .map(|index| synthesizer.synthesize(leaf, index))
                .collect(),
        ),
        false => synthesizer.synthesize(leaf, 0),
    }
}

// Scalars in the way of a deeper path become maps, and an existing map is never replaced by a leaf.
fn insert_path(map: &mut LinkedHashMap<String, Document>, segments: &[&str], value: Document) {
    let Some((last, parents)) = segments.split_last() else {
        return;
    };

    let mut current = map;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(Document::new_map);
        if !matches!(entry, Document::Map(_)) {
            *entry = Document::new_map();
        }
        let Document::Map(child) = entry else {
            unreachable!()
        };
        current = child;
    }

    match current.get(*last) {
        Some(Document::Map(_)) => {}
        _ => {
            current.insert(last.to_string(), value);
        }
    }
}
