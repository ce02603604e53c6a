//! # pdfstory
//!
//! Turns the positioned text fragments of a laid-out PDF into a tree of
//! stories for tabletop campaign tools.
//!
//! A conversion makes three passes over the fragment stream:
//!
//! 1. **Calibrate**: anchor texts from the configuration locate the font
//!    signature of each semantic style, and the origin of each column anchor.
//! 2. **Classify**: every fragment is mapped to a semantic style, or dropped
//!    as noise, until a stop sentinel is seen.
//! 3. **Build**: a state machine turns the classified stream into stories
//!    holding paragraphs, lists, tables and headings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfstory::{CalibrationConfig, Pdfstory, SemanticStyle};
//!
//! fn main() -> pdfstory::Result<()> {
//!     let config = CalibrationConfig::new()
//!         .with_style_anchor(SemanticStyle::Heading1, "Introduction")
//!         .with_style_anchor(SemanticStyle::Body, "Welcome");
//!
//!     let conversion = Pdfstory::new(config).run_file("dump.json")?;
//!     for name in conversion.document.story_names() {
//!         println!("{}", name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Calibrated styles**: no hard-coded fonts; anchors pick them per document
//! - **Story forest**: numbered stories with paragraphs, lists, tables and headings
//! - **Non-fatal diagnostics**: calibration gaps and structural oddities are reported, not raised
//! - **Several input shapes**: fragment arrays, NDJSON and page dumps

pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Document, Fragment, Frame, Heading, Link, LinkList, List, Location, Metadata, Node, Origin,
    Paragraph, Position, Run, Segment, SemanticStyle, Story, StoryIdGenerator, StyleSignature,
    Table, TableRow,
};
pub use parser::{
    build_document, BuildOptions, BuildReport, BuildStats, BulletExitPolicy, CalibrationConfig,
    ConfigFile, Conversion, Diagnostic, DiagnosticKind, PageSelection, ParagraphPolicy,
};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, RenderOptions};
pub use source::{detect_format, load_fragments, parse_fragments, FragmentFormat};

use std::path::Path;

/// Convert a fragment stream with default build options.
///
/// # Example
///
/// ```no_run
/// use pdfstory::{convert, load_fragments, CalibrationConfig, SemanticStyle};
///
/// let fragments = load_fragments("dump.json")?;
/// let config = CalibrationConfig::new()
///     .with_style_anchor(SemanticStyle::Heading1, "Introduction");
/// let conversion = convert(&fragments, &config)?;
/// println!("{} stories", conversion.document.story_count());
/// # Ok::<(), pdfstory::Error>(())
/// ```
pub fn convert(fragments: &[Fragment], config: &CalibrationConfig) -> Result<Conversion> {
    let mut ids = StoryIdGenerator::new();
    build_document(fragments, config, &BuildOptions::default(), &mut ids)
}

/// Builder for converting fragment streams.
///
/// The builder owns a [`StoryIdGenerator`]; successive runs draw from the
/// same sequence, so stories of several documents never share an id.
///
/// # Example
///
/// ```no_run
/// use pdfstory::{ConfigFile, Pdfstory};
///
/// let file = ConfigFile::from_path("config.json")?;
/// let mut converter = Pdfstory::for_document(&file, "DDEX1-01")?;
/// let first = converter.run_file("DDEX1-01.json")?;
/// let second = converter.run_file("DDEX1-02.json")?;
/// # Ok::<(), pdfstory::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Pdfstory {
    config: CalibrationConfig,
    options: BuildOptions,
    ids: StoryIdGenerator,
}

impl Pdfstory {
    /// Create a new builder for a calibration.
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            config,
            options: BuildOptions::default(),
            ids: StoryIdGenerator::new(),
        }
    }

    /// Resolve a document's calibration from a configuration file.
    ///
    /// The document code also becomes the document name.
    pub fn for_document(file: &ConfigFile, document_code: &str) -> Result<Self> {
        let config = file.resolve(document_code)?;
        Ok(Self::new(config).with_document_name(document_code))
    }

    /// Set build options.
    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the document name.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_document_name(name);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Continue an existing story id sequence.
    pub fn with_ids(mut self, ids: StoryIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// The calibration in use.
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// The build options in use.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// The story id sequence.
    pub fn ids(&self) -> &StoryIdGenerator {
        &self.ids
    }

    /// Convert fragments.
    pub fn run(&mut self, fragments: &[Fragment]) -> Result<Conversion> {
        build_document(fragments, &self.config, &self.options, &mut self.ids)
    }

    /// Parse fragment input text and convert it.
    pub fn run_str(&mut self, input: &str) -> Result<Conversion> {
        let fragments = parse_fragments(input)?;
        self.run(&fragments)
    }

    /// Load a fragment file and convert it.
    pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Conversion> {
        let path = path.as_ref();
        let fragments = load_fragments(path)?;
        let mut conversion = self.run(&fragments)?;
        conversion.document.metadata.source = Some(path.display().to_string());
        Ok(conversion)
    }
}
