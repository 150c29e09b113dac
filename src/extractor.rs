// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

mod extractor_run;

#[cfg(test)]
mod tests;

use std::fmt;

use hashlink::LinkedHashSet;
use tracing::{debug, warn};

use crate::{ast::Program, parser::Parser};

use extractor_run::ExtractorRun;

/// A dotted data path referenced by a template, e.g. `user.address.city` or `items[]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath(String);

impl FieldPath {
    pub const ARRAY_MARKER: &'static str = "[]";

    pub fn new(path: impl Into<String>) -> FieldPath {
        FieldPath(path.into())
    }

    /// A path the template iterates over.
    pub fn array(path: &str) -> FieldPath {
        FieldPath(format!("{}{}", path, Self::ARRAY_MARKER))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_array(&self) -> bool {
        self.0.ends_with(Self::ARRAY_MARKER)
    }

    /// The path with any array marker removed.
    pub fn base(&self) -> &str {
        self.0.strip_suffix(Self::ARRAY_MARKER).unwrap_or(&self.0)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.base().split('.')
    }

    pub fn leaf(&self) -> &str {
        self.base().rsplit('.').next().unwrap_or_default()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(path: &str) -> Self {
        FieldPath::new(path)
    }
}

impl From<String> for FieldPath {
    fn from(path: String) -> Self {
        FieldPath::new(path)
    }
}

/// The unique field paths found across a set of templates, in discovery order.
#[derive(Clone, Debug, Default)]
pub struct FieldPathSet {
    paths: LinkedHashSet<FieldPath>,
}

impl FieldPathSet {
    pub fn new() -> FieldPathSet {
        FieldPathSet::default()
    }

    /// Returns false if the path was already present.
    pub fn insert(&mut self, path: FieldPath) -> bool {
        self.paths.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(&FieldPath::new(path))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.paths.iter()
    }

    pub fn sorted(&self) -> Vec<&FieldPath> {
        let mut sorted: Vec<_> = self.paths.iter().collect();
        sorted.sort();
        sorted
    }

    pub fn extend(&mut self, other: FieldPathSet) {
        self.paths.extend(other.paths);
    }
}

// Discovery order is not part of a set's identity.
impl PartialEq for FieldPathSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|path| other.paths.contains(path))
    }
}

impl Eq for FieldPathSet {}

impl<P: Into<FieldPath>> FromIterator<P> for FieldPathSet {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        FieldPathSet {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldPathSet {
    type Item = &'a FieldPath;
    type IntoIter = hashlink::linked_hash_set::Iter<'a, FieldPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Collects the data fields referenced by each template.
///
/// A template that fails to parse is logged and contributes nothing.
pub fn extract<S: AsRef<str>>(texts: &[S]) -> FieldPathSet {
    let parser = Parser::new();
    let mut fields = FieldPathSet::new();

    for (index, text) in texts.iter().enumerate() {
        let filename = format!("<template {}>", index + 1);
        match parser.parse(&filename, text.as_ref()) {
            Ok(program) => fields.extend(extract_program(&program)),
            Err(err) => {
                warn!("skipping template that failed to parse: {}", err);
            }
        }
    }

    debug!(templates = texts.len(), fields = fields.len(), "extracted field paths");
    fields
}

fn extract_program(program: &Program) -> FieldPathSet {
    let mut fields = FieldPathSet::new();
    let mut extractor_run = ExtractorRun::new(&mut fields);
    extractor_run.extract_program(program);
    fields
}
