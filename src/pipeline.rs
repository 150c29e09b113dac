// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::sync::Mutex;

use anyhow::Error;
use hashlink::LruCache;
use tracing::{debug, error};

use crate::{
    assembler::{assemble, default_document},
    document::Document,
    extractor::{extract, FieldPathSet},
    synthesizer::Synthesizer,
    validator::{validate, ValidationResult},
};

/// The fields a set of templates needs. Templates that fail to parse are skipped.
pub fn get_required_fields<S: AsRef<str>>(texts: &[S]) -> FieldPathSet {
    extract(texts)
}

/// A sample document covering every field the templates need.
///
/// Falls back to [`default_document`] rather than failing.
pub fn get_sample_document<S: AsRef<str>>(texts: &[S], synthesizer: &Synthesizer) -> Document {
    or_default_document(try_get_sample_document(texts, synthesizer))
}

pub fn try_get_sample_document<S: AsRef<str>>(texts: &[S], synthesizer: &Synthesizer) -> Result<Document, Error> {
    let fields = extract(texts);
    let doc = assemble(&fields, synthesizer)?;
    Ok(doc)
}

fn or_default_document(result: Result<Document, Error>) -> Document {
    match result {
        Ok(doc) => doc,
        Err(err) => {
            error!("failed to build sample document, using default: {:#}", err);
            default_document()
        }
    }
}

pub fn validate_document<S: AsRef<str>>(texts: &[S], document: &Document) -> ValidationResult {
    let fields = extract(texts);
    validate(&fields, document)
}

/// Memoizes [`get_required_fields`] by the exact template texts.
pub struct RequiredFieldsCache {
    cache: Mutex<LruCache<Vec<String>, FieldPathSet>>,
}

impl RequiredFieldsCache {
    pub const DEFAULT_CAPACITY: usize = 32;

    pub fn new(capacity: usize) -> RequiredFieldsCache {
        RequiredFieldsCache {
            cache: Mutex::new(LruCache::new(capacity.max(1))),
        }
    }

    pub fn get_required_fields<S: AsRef<str>>(&self, texts: &[S]) -> FieldPathSet {
        let key: Vec<String> = texts.iter().map(|text| text.as_ref().to_string()).collect();

        if let Some(fields) = self.lock().get(&key) {
            debug!("required fields cache hit");
            return fields.clone();
        }

        // Extract without holding the lock.
        let fields = extract(texts);
        self.lock().insert(key, fields.clone());
        fields
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<Vec<String>, FieldPathSet>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for RequiredFieldsCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
