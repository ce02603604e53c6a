//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering a story forest as a text outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Character to use for list entry markers
    pub list_marker: char,

    /// Separator placed between table cells
    pub cell_separator: String,

    /// Prefix each story name with its record name (e.g., "[id-00001]")
    pub include_record_names: bool,

    /// Mark in-body headings with their level (e.g., "### Treasure")
    pub mark_headings: bool,

    /// Render locked stories
    pub include_locked: bool,

    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Set the table cell separator.
    pub fn with_cell_separator(mut self, separator: impl Into<String>) -> Self {
        self.cell_separator = separator.into();
        self
    }

    /// Enable or disable record names before story names.
    pub fn with_record_names(mut self, include: bool) -> Self {
        self.include_record_names = include;
        self
    }

    /// Enable or disable heading level markers.
    pub fn with_heading_marks(mut self, mark: bool) -> Self {
        self.mark_headings = mark;
        self
    }

    /// Enable or disable rendering of locked stories.
    pub fn with_locked(mut self, include: bool) -> Self {
        self.include_locked = include;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            list_marker: '•',
            cell_separator: "\t".to_string(),
            include_record_names: false,
            mark_headings: false,
            include_locked: true,
            cleanup: None,
        }
    }
}
