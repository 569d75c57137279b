//! Catalog file input for offline replay.
//!
//! A previously introspected schema can be serialized as JSON (the
//! `SchemaCatalog` shape) and rendered later without a database connection.

use anyhow::{Context, Result};
use indexscope_core::SchemaCatalog;
use std::io::{self, Read};
use std::path::Path;

/// Read a schema catalog from a JSON file, or from stdin when the path
/// is `-`.
pub fn read_catalog(path: &Path) -> Result<SchemaCatalog> {
    let content = if path == Path::new("-") {
        read_from_stdin()?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Invalid catalog JSON in {}", path.display()))
}

fn read_from_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read from stdin")?;
    Ok(content)
}
