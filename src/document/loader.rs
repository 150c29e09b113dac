// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

use anyhow::{anyhow, Context, Error};
use hashlink::LinkedHashMap;
use saphyr::{Yaml, YamlEmitter, YamlLoader};

use super::Document;

/// Loads a candidate document. JSON input is accepted as the YAML subset it is.
///
/// Anchors are resolved by the loader, so an alias reads as a copy of its anchored value.
pub fn parse_document_str(input: &str) -> Result<Document, Error> {
    let docs = YamlLoader::load_from_str(input).context("invalid YAML document")?;

    match &docs[..] {
        [doc] => from_yaml(doc),
        _ => Err(anyhow!("expected exactly one YAML document, found {}", docs.len())),
    }
}

pub fn emit_document_to_string(doc: &Document) -> Result<String, Error> {
    let yaml = to_yaml(doc);

    let mut out_str = String::new();
    let mut emitter = YamlEmitter::new(&mut out_str);
    emitter.dump(&yaml)?;

    out_str.push('\n');
    Ok(out_str)
}

fn from_yaml(yaml: &Yaml) -> Result<Document, Error> {
    let doc = match yaml {
        Yaml::Real(value) => {
            let real = value
                .parse::<f64>()
                .map_err(|_| anyhow!("unsupported real number '{}'", value))?;
            Document::Real(real)
        }
        Yaml::Integer(value) => Document::Integer(*value),
        Yaml::String(value) => Document::String(value.clone()),
        Yaml::Boolean(value) => Document::Boolean(*value),
        Yaml::Null => Document::Null,
        Yaml::Array(values) => {
            let values = values.iter().map(from_yaml).collect::<Result<Vec<_>, _>>()?;
            Document::Array(values)
        }
        Yaml::Hash(hash) => {
            let mut map = LinkedHashMap::new();
            for (key, value) in hash {
                map.insert(map_key(key)?, from_yaml(value)?);
            }
            Document::Map(map)
        }
        Yaml::Alias(_) | Yaml::BadValue => return Err(anyhow!("invalid yaml value")),
    };
    Ok(doc)
}

// Scalar keys are compared as text when validating paths.
fn map_key(key: &Yaml) -> Result<String, Error> {
    match key {
        Yaml::String(key) | Yaml::Real(key) => Ok(key.clone()),
        Yaml::Integer(key) => Ok(key.to_string()),
        Yaml::Boolean(key) => Ok(key.to_string()),
        Yaml::Null => Ok("null".to_string()),
        _ => Err(anyhow!("map keys must be scalars")),
    }
}

fn to_yaml(doc: &Document) -> Yaml {
    match doc {
        Document::Null => Yaml::Null,
        Document::Boolean(value) => Yaml::Boolean(*value),
        Document::Integer(value) => Yaml::Integer(*value),
        Document::Real(value) => Yaml::Real(format_real(*value)),
        Document::String(value) => Yaml::String(value.clone()),
        Document::Array(values) => Yaml::Array(values.iter().map(to_yaml).collect()),
        Document::Map(map) => Yaml::Hash(
            map.iter()
                .map(|(key, value)| (Yaml::String(key.clone()), to_yaml(value)))
                .collect(),
        ),
    }
}

// Whole numbers keep a fractional part so they read back as reals.
fn format_real(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else if value.is_nan() {
        ".nan".to_string()
    } else if value.is_infinite() {
        match value.is_sign_positive() {
            true => ".inf".to_string(),
            false => "-.inf".to_string(),
        }
    } else {
        value.to_string()
    }
}
