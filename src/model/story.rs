//! Stories and the id sequence that numbers them.

use super::Node;
use serde::{Deserialize, Serialize};

/// A top-level titled section of the output, analogous to a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Unique, creation-ordered id
    pub id: u32,

    /// Story title, including its section label
    pub name: String,

    /// Whether the target application should open the story read-only
    pub locked: bool,

    /// Top-level nodes in reading order
    pub body: Vec<Node>,
}

impl Story {
    /// Create a new, empty, unlocked story.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            locked: false,
            body: Vec::new(),
        }
    }

    /// Storage key of the story record (e.g., "id-00042").
    pub fn record_name(&self) -> String {
        format!("id-{:05}", self.id)
    }

    /// Append a node to the body and return its index.
    pub fn push(&mut self, node: Node) -> usize {
        self.body.push(node);
        self.body.len() - 1
    }

    /// Total length in characters of the body.
    pub fn len(&self) -> usize {
        self.body.iter().map(Node::len).sum()
    }

    /// Check if the body holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get plain text content of the body.
    pub fn plain_text(&self) -> String {
        self.body
            .iter()
            .map(Node::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Monotonic source of story ids.
///
/// Each build context owns one; share a generator between documents when
/// their stories must not collide in the same target campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryIdGenerator {
    next: u32,
}

impl StoryIdGenerator {
    /// First id handed out by a fresh generator.
    pub const FIRST_ID: u32 = 1;

    /// Create a generator starting at [`Self::FIRST_ID`].
    pub fn new() -> Self {
        Self::starting_at(Self::FIRST_ID)
    }

    /// Create a generator starting at the given id.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Take the next id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> u32 {
        self.next
    }

    /// Restart the sequence at [`Self::FIRST_ID`].
    pub fn reset(&mut self) {
        self.next = Self::FIRST_ID;
    }
}

impl Default for StoryIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_record_name() {
        let story = Story::new(42, "01 Introduction");
        assert_eq!(story.record_name(), "id-00042");
    }

    #[test]
    fn test_id_generator_sequence() {
        let mut ids = StoryIdGenerator::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);
        assert_eq!(ids.peek(), 3);

        ids.reset();
        assert_eq!(ids.next_id(), 1);
    }

    #[test]
    fn test_independent_generators() {
        let mut a = StoryIdGenerator::new();
        let mut b = StoryIdGenerator::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), 1);
        assert_eq!(a.next_id(), 3);
    }

    #[test]
    fn test_story_length() {
        let mut story = Story::new(1, "00 Title");
        story.push(Node::Paragraph(Paragraph::with_text("Hello")));
        story.push(Node::Paragraph(Paragraph::with_text("world")));
        assert_eq!(story.len(), 10);
        assert_eq!(story.plain_text(), "Hello\n\nworld");
    }
}
