//! Document-level types.

use super::Story;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The ordered forest of stories built from one source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata
    pub metadata: Metadata,

    /// Stories in creation order
    pub stories: Vec<Story>,
}

impl Document {
    /// Create a new empty document.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            metadata: Metadata::named(name),
            stories: Vec::new(),
        }
    }

    /// Get the number of stories.
    pub fn story_count(&self) -> usize {
        self.stories.len()
    }

    /// Add a story to the document.
    pub fn add_story(&mut self, story: Story) {
        self.stories.push(story);
    }

    /// Get a story by id.
    pub fn get_story(&self, id: u32) -> Option<&Story> {
        self.stories.iter().find(|s| s.id == id)
    }

    /// Find the first story whose name contains the given text.
    pub fn find_story(&self, name: &str) -> Option<&Story> {
        self.stories.iter().find(|s| s.name.contains(name))
    }

    /// Check if the document has any stories.
    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    /// Story names in order.
    pub fn story_names(&self) -> Vec<&str> {
        self.stories.iter().map(|s| s.name.as_str()).collect()
    }

    /// Total length in characters of all story bodies.
    pub fn len(&self) -> usize {
        self.stories.iter().map(Story::len).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.stories
            .iter()
            .map(|story| format!("{}\n\n{}", story.name, story.plain_text()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document (campaign/module) name
    pub name: String,

    /// Where the fragments came from (file path, URL, ...)
    pub source: Option<String>,

    /// Number of pages seen in the fragment stream
    pub page_count: u32,

    /// Number of fragments consumed before the stream ended or stopped
    pub fragment_count: u32,

    /// Whether a stop sentinel ended processing early
    pub stopped_early: bool,

    /// When the conversion ran
    pub converted_at: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Create metadata for a named document.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the source and return self.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new("The Tempter");
        assert!(doc.is_empty());
        assert_eq!(doc.story_count(), 0);
        assert_eq!(doc.metadata.name, "The Tempter");
    }

    #[test]
    fn test_story_lookup() {
        let mut doc = Document::new("Test");
        doc.add_story(Story::new(1, "00 (Test)"));
        doc.add_story(Story::new(2, "01 Introduction"));

        assert_eq!(doc.get_story(2).map(|s| s.name.as_str()), Some("01 Introduction"));
        assert_eq!(doc.find_story("Intro").map(|s| s.id), Some(2));
        assert_eq!(doc.story_names(), vec!["00 (Test)", "01 Introduction"]);
    }

    #[test]
    fn test_metadata_source() {
        let metadata = Metadata::named("Test").with_source("dump.ndjson");
        assert_eq!(metadata.source.as_deref(), Some("dump.ndjson"));
        assert!(!metadata.stopped_early);
    }
}
