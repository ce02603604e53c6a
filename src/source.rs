//! Fragment input detection and loading.
//!
//! Fragments reach the crate as JSON produced by an external layout
//! extractor. Three shapes are accepted:
//!
//! - a JSON array of [`Fragment`] objects,
//! - newline-delimited JSON, one [`Fragment`] per line,
//! - a page dump: an array of pages, each holding
//!   `blocks → lines → spans` with `text`, `font`, `size`, `flags`, `color`
//!   and `origin: [x, y]`. A lone page object is read as a one-page dump.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Fragment, Location, Origin, StyleSignature};

/// Shape of a fragment input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentFormat {
    /// JSON array of fragments
    FragmentArray,
    /// One fragment per line
    Ndjson,
    /// Array of pages with nested blocks, lines and spans
    PageDump,
}

impl fmt::Display for FragmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FragmentFormat::FragmentArray => write!(f, "fragment array"),
            FragmentFormat::Ndjson => write!(f, "NDJSON"),
            FragmentFormat::PageDump => write!(f, "page dump"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PageDump {
    #[serde(default)]
    blocks: Vec<BlockDump>,
}

// Image blocks carry no lines.
#[derive(Debug, Deserialize)]
struct BlockDump {
    #[serde(default)]
    lines: Vec<LineDump>,
}

#[derive(Debug, Deserialize)]
struct LineDump {
    #[serde(default)]
    spans: Vec<SpanDump>,
}

#[derive(Debug, Deserialize)]
struct SpanDump {
    text: String,
    font: String,
    size: f32,
    #[serde(default)]
    flags: u32,
    #[serde(default)]
    color: u32,
    origin: (f32, f32),
}

/// Detect the shape of a fragment input.
///
/// # Returns
/// * `Ok(FragmentFormat)` for a recognised shape
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format(input: &str) -> Result<FragmentFormat> {
    let trimmed = input.trim_start();

    if trimmed.starts_with('{') {
        // NDJSON fails to parse as a single value past its first line.
        return match serde_json::from_str::<Value>(trimmed) {
            Ok(value) if value.get("blocks").is_some() => Ok(FragmentFormat::PageDump),
            _ => Ok(FragmentFormat::Ndjson),
        };
    }

    if trimmed.starts_with('[') {
        let value: Value = serde_json::from_str(trimmed)?;
        return match value.as_array().and_then(|items| items.first()) {
            None => Ok(FragmentFormat::FragmentArray),
            Some(first) if first.get("blocks").is_some() => Ok(FragmentFormat::PageDump),
            Some(first) if first.get("text").is_some() => Ok(FragmentFormat::FragmentArray),
            Some(_) => Err(Error::UnknownFormat),
        };
    }

    Err(Error::UnknownFormat)
}

/// Check if text looks like a fragment input.
pub fn is_fragment_input(input: &str) -> bool {
    detect_format(input).is_ok()
}

/// Parse fragments from any accepted shape.
pub fn parse_fragments(input: &str) -> Result<Vec<Fragment>> {
    match detect_format(input)? {
        FragmentFormat::FragmentArray => Ok(serde_json::from_str(input)?),
        FragmentFormat::Ndjson => input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(Error::from))
            .collect(),
        FragmentFormat::PageDump if input.trim_start().starts_with('{') => {
            let page: PageDump = serde_json::from_str(input)?;
            Ok(flatten_pages(std::slice::from_ref(&page)))
        }
        FragmentFormat::PageDump => {
            let pages: Vec<PageDump> = serde_json::from_str(input)?;
            Ok(flatten_pages(&pages))
        }
    }
}

/// Read and parse a fragment file.
pub fn load_fragments<P: AsRef<Path>>(path: P) -> Result<Vec<Fragment>> {
    let input = fs::read_to_string(path)?;
    parse_fragments(&input)
}

fn flatten_pages(pages: &[PageDump]) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for (page, page_dump) in (0u32..).zip(pages) {
        for (block, block_dump) in (0u32..).zip(&page_dump.blocks) {
            for (line, line_dump) in (0u32..).zip(&block_dump.lines) {
                for (span, span_dump) in (0u32..).zip(&line_dump.spans) {
                    fragments.push(Fragment::new(
                        span_dump.text.clone(),
                        StyleSignature::new(
                            span_dump.font.clone(),
                            span_dump.size,
                            span_dump.flags,
                            span_dump.color,
                        ),
                        Origin::new(span_dump.origin.0, span_dump.origin.1),
                        Location::new(page, block, line, span),
                    ));
                }
            }
        }
    }

    fragments
}
