//! Diagnostics, statistics and the classified-fragment trace.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Document, Fragment, Location, Node, SemanticStyle};
use crate::render::{self, JsonFormat, RenderOptions};

/// Kind of a non-fatal problem found during a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An optional style or position anchor matched nothing
    CalibrationWarning,
    /// A non-empty fragment had an uncalibrated signature and was dropped
    UnknownStyleSpan,
    /// A fragment made no sense in the builder's current state and was dropped
    StructuralMismatch,
}

/// A non-fatal problem, recorded instead of raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,

    /// Where, when tied to a fragment
    pub location: Option<Location>,

    /// Fragment text, when tied to a fragment
    pub text: Option<String>,

    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Create a calibration warning.
    pub fn calibration(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::CalibrationWarning,
            location: None,
            text: None,
            message: message.into(),
        }
    }

    /// Create an unknown-style diagnostic for a fragment.
    pub fn unknown_style(fragment: &Fragment) -> Self {
        Self::at(
            DiagnosticKind::UnknownStyleSpan,
            fragment,
            format!("unknown style {}", fragment.style),
        )
    }

    /// Create a structural mismatch diagnostic for a fragment.
    pub fn mismatch(fragment: &Fragment, message: impl Into<String>) -> Self {
        Self::at(DiagnosticKind::StructuralMismatch, fragment, message)
    }

    fn at(kind: DiagnosticKind, fragment: &Fragment, message: impl Into<String>) -> Self {
        Self {
            kind,
            location: Some(fragment.location),
            text: Some(fragment.text.clone()),
            message: message.into(),
        }
    }
}

/// A kept fragment together with its semantic style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedFragment {
    /// Semantic style assigned by the classifier
    pub semantic: SemanticStyle,

    /// The fragment itself
    #[serde(flatten)]
    pub fragment: Fragment,
}

impl ClassifiedFragment {
    /// Pair a fragment with its style.
    pub fn new(semantic: SemanticStyle, fragment: Fragment) -> Self {
        Self { semantic, fragment }
    }
}

/// Statistics collected during a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Fragments offered to the classifier
    pub fragments_seen: u32,

    /// Fragments handed to the builder
    pub fragments_kept: u32,

    /// Fragments dropped by the classifier
    pub fragments_dropped: u32,

    /// Number of stories
    pub story_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of lists
    pub list_count: u32,

    /// Number of list entries
    pub list_entry_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of table rows, headers included
    pub table_row_count: u32,

    /// Number of in-body headings
    pub heading_count: u32,

    /// Whether a stop sentinel ended the conversion
    pub stopped: bool,
}

impl BuildStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the nodes of a finished document.
    pub fn tally(&mut self, document: &Document) {
        self.story_count = document.stories.len() as u32;
        for node in document.stories.iter().flat_map(|s| s.body.iter()) {
            match node {
                Node::Paragraph(_) => self.paragraph_count += 1,
                Node::List(list) => {
                    self.list_count += 1;
                    self.list_entry_count += list.entry_count() as u32;
                }
                Node::Table(table) => {
                    self.table_count += 1;
                    self.table_row_count += table.row_count() as u32;
                }
                Node::Heading(_) => self.heading_count += 1,
                Node::Frame(_) | Node::Link(_) | Node::LinkList(_) => {}
            }
        }
    }

    /// Merge another set of statistics into this one.
    pub fn merge(&mut self, other: &BuildStats) {
        self.fragments_seen += other.fragments_seen;
        self.fragments_kept += other.fragments_kept;
        self.fragments_dropped += other.fragments_dropped;
        self.story_count += other.story_count;
        self.paragraph_count += other.paragraph_count;
        self.list_count += other.list_count;
        self.list_entry_count += other.list_entry_count;
        self.table_count += other.table_count;
        self.table_row_count += other.table_row_count;
        self.heading_count += other.heading_count;
        self.stopped |= other.stopped;
    }
}

/// Everything a conversion learned besides the document itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildReport {
    /// Non-fatal problems in the order they were found
    pub diagnostics: Vec<Diagnostic>,

    /// Conversion statistics
    pub stats: BuildStats,

    /// Every kept fragment with its semantic style
    pub trace: Vec<ClassifiedFragment>,
}

impl BuildReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics of one kind.
    pub fn diagnostics_of(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Number of diagnostics of one kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics_of(kind).count()
    }

    /// Check if the conversion found no problems at all.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Export the trace as newline-delimited JSON.
    pub fn trace_ndjson(&self) -> Result<String> {
        render::to_ndjson(&self.trace)
    }
}

/// Output of a conversion: the story forest and its report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    /// The built document
    pub document: Document,

    /// Diagnostics, statistics and trace
    pub report: BuildReport,
}

impl Conversion {
    /// Render the document as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render the document as a plain text outline.
    pub fn to_text(&self, options: &RenderOptions) -> Result<String> {
        render::to_text(&self.document, options)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Take the document, dropping the report.
    pub fn into_document(self) -> Document {
        self.document
    }
}
