// Copyright (c) Chris Gunn.
// Licensed under the MIT license.

#[cfg(test)]
mod tests;

use std::{fs, io, path::Path};

use anyhow::{Context, Error};
use tracing::{debug, warn};

/// Reads template files in order. Missing files are skipped with a warning.
pub fn read_templates<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<String>, Error> {
    let mut texts = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => {
                debug!(path = %path.display(), len = text.len(), "read template");
                texts.push(text);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("template {} not found, skipping", path.display());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read template {}", path.display()));
            }
        }
    }

    Ok(texts)
}
