//! JSON rendering for story forests and fragment traces.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
        JsonFormat::Compact => serde_json::to_string(doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize records as newline-delimited JSON, one compact record per line.
pub fn to_ndjson<T: Serialize>(records: &[T]) -> Result<String> {
    let mut output = String::new();
    for record in records {
        let line = serde_json::to_string(record)
            .map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))?;
        output.push_str(&line);
        output.push('\n');
    }
    Ok(output)
}
