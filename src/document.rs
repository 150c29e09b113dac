// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

// Ordered value tree used for synthesized samples and candidate documents.

mod loader;

#[cfg(test)]
mod tests;

use hashlink::LinkedHashMap;

pub use loader::{emit_document_to_string, parse_document_str};

#[derive(Clone, PartialEq, Debug)]
pub enum Document {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Array(Vec<Document>),
    Map(LinkedHashMap<String, Document>),
}

impl Document {
    pub fn new_map() -> Document {
        Document::Map(LinkedHashMap::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&LinkedHashMap<String, Document>> {
        match self {
            Document::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(values) => Some(values),
            _ => None,
        }
    }

    /// Looks up a key when this is a map.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Follows `segments` through nested maps.
    pub fn lookup<'a, I>(&self, segments: I) -> Option<&Document>
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments.into_iter().try_fold(self, |value, segment| value.get(segment))
    }

    /// The map keys at every level, in order. Arrays contribute their first element's shape.
    pub fn shape(&self) -> Vec<String> {
        let mut keys = Vec::new();
        self.collect_shape("", &mut keys);
        keys
    }

    fn collect_shape(&self, prefix: &str, keys: &mut Vec<String>) {
        match self {
            Document::Map(map) => {
                for (key, value) in map {
                    let path = match prefix {
                        "" => key.clone(),
                        _ => format!("{}.{}", prefix, key),
                    };
                    keys.push(path.clone());
                    value.collect_shape(&path, keys);
                }
            }
            Document::Array(values) => {
                if let Some(first) = values.first() {
                    first.collect_shape(&format!("{}[]", prefix), keys);
                }
            }
            Document::Null | Document::Boolean(_) | Document::Integer(_) | Document::Real(_) | Document::String(_) => {}
        }
    }
}

impl From<&str> for Document {
    fn from(value: &str) -> Self {
        Document::String(value.to_string())
    }
}

impl From<String> for Document {
    fn from(value: String) -> Self {
        Document::String(value)
    }
}

impl From<bool> for Document {
    fn from(value: bool) -> Self {
        Document::Boolean(value)
    }
}

impl From<i64> for Document {
    fn from(value: i64) -> Self {
        Document::Integer(value)
    }
}

impl From<f64> for Document {
    fn from(value: f64) -> Self {
        Document::Real(value)
    }
}

impl<K: Into<String>, V: Into<Document>> FromIterator<(K, V)> for Document {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Document::Map(iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect())
    }
}
