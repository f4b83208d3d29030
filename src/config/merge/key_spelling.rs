//! Key spelling: restores the case of keys the layered loader folded to lowercase.
//!
//! The `config` crate lowercases every key it reads, including keys inside
//! pass-through maps such as request headers, container styles and button
//! payloads. Each file layer is also parsed here as written; after layering, a
//! lowercased key takes back the spelling it had in the last document that
//! wrote it. Keys that only came from environment variables or built-in
//! defaults stay as the loader produced them.

use config::{ConfigError, FileFormat, Map, Value, ValueKind};
use serde_json::Value as JsonValue;
use std::path::Path;

/// Merged view of every raw document fed to the loader, keys as written
#[derive(Debug, Default)]
pub struct KeySpelling {
    written: JsonValue,
}

impl KeySpelling {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file layer. Formats other than TOML and JSON are skipped.
    pub fn record_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => return Ok(()),
        };
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        self.record_document(&contents, format, Some(path.display().to_string()))
    }

    /// Record an in-memory layer.
    pub fn record_str(&mut self, contents: &str, format: FileFormat) -> Result<(), ConfigError> {
        self.record_document(contents, format, None)
    }

    fn record_document(
        &mut self,
        contents: &str,
        format: FileFormat,
        uri: Option<String>,
    ) -> Result<(), ConfigError> {
        let document: JsonValue = match format {
            FileFormat::Toml => toml::from_str(contents)
                .map_err(|e| ConfigError::FileParse { uri, cause: Box::new(e) })?,
            FileFormat::Json => serde_json::from_str(contents)
                .map_err(|e| ConfigError::FileParse { uri, cause: Box::new(e) })?,
            _ => return Ok(()),
        };
        merge_written(&mut self.written, document);
        Ok(())
    }

    /// Rewrite the keys of a layered value to their recorded spelling.
    pub fn restore(&self, layered: Value) -> Value {
        restore_value(layered, Some(&self.written))
    }
}

fn merge_written(base: &mut JsonValue, layer: JsonValue) {
    match (base, layer) {
        (JsonValue::Object(base), JsonValue::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(existing) => merge_written(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, layer) => *base = layer,
    }
}

fn spelled<'a>(
    written: &'a serde_json::Map<String, JsonValue>,
    key: String,
) -> (String, Option<&'a JsonValue>) {
    if let Some(child) = written.get(&key) {
        return (key, Some(child));
    }
    match written.iter().find(|(name, _)| name.to_lowercase() == key) {
        Some((name, child)) => (name.clone(), Some(child)),
        None => (key, None),
    }
}

fn restore_value(value: Value, written: Option<&JsonValue>) -> Value {
    match value.kind {
        ValueKind::Table(table) => {
            let written = written.and_then(JsonValue::as_object);
            let restored: Map<String, Value> = table
                .into_iter()
                .map(|(key, child)| {
                    let (key, written_child) = match written {
                        Some(written) => spelled(written, key),
                        None => (key, None),
                    };
                    (key, restore_value(child, written_child))
                })
                .collect();
            Value::new(None, ValueKind::Table(restored))
        }
        ValueKind::Array(items) => {
            let written = written.and_then(JsonValue::as_array);
            let restored = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| restore_value(item, written.and_then(|w| w.get(index))))
                .collect();
            Value::new(None, ValueKind::Array(restored))
        }
        kind => Value::new(None, kind),
    }
}
