//! Visitor pattern for customizing how stories are rendered.
//!
//! A visitor is consulted before each story and each body node. It can let
//! the renderer proceed, substitute its own output, or drop the element.
//!
//! # Example
//!
//! ```
//! use pdfstory::render::visitor::{DocumentVisitor, VisitorAction};
//! use pdfstory::model::Table;
//!
//! struct HideTables;
//!
//! impl DocumentVisitor for HideTables {
//!     fn visit_table(&mut self, _table: &Table) -> VisitorAction {
//!         VisitorAction::Replace("[table omitted]".to_string())
//!     }
//! }
//! ```

use crate::model::{Document, Frame, Heading, Link, LinkList, List, Node, Paragraph, Story, Table};

/// Action returned by visitor methods to control rendering behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Continue with default rendering.
    #[default]
    Continue,

    /// Replace the element with custom output.
    Replace(String),

    /// Skip this element entirely (produce no output).
    Skip,
}

impl VisitorAction {
    /// Check if this action indicates the element should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::Skip)
    }

    /// Check if this action provides replacement content.
    pub fn is_replace(&self) -> bool {
        matches!(self, VisitorAction::Replace(_))
    }

    /// Get replacement content if available.
    pub fn replacement(&self) -> Option<&str> {
        match self {
            VisitorAction::Replace(s) => Some(s),
            _ => None,
        }
    }
}

/// Trait for visiting stories and nodes during rendering.
///
/// All methods return `VisitorAction::Continue` by default.
pub trait DocumentVisitor {
    /// Called before rendering a story. Skipping a story skips its body.
    fn visit_story(&mut self, story: &Story) -> VisitorAction {
        let _ = story;
        VisitorAction::Continue
    }

    /// Called before rendering a paragraph.
    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        let _ = para;
        VisitorAction::Continue
    }

    /// Called before rendering a list.
    fn visit_list(&mut self, list: &List) -> VisitorAction {
        let _ = list;
        VisitorAction::Continue
    }

    /// Called before rendering a table.
    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        let _ = table;
        VisitorAction::Continue
    }

    /// Called before rendering an in-body heading.
    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        let _ = heading;
        VisitorAction::Continue
    }

    /// Called before rendering a frame.
    fn visit_frame(&mut self, frame: &Frame) -> VisitorAction {
        let _ = frame;
        VisitorAction::Continue
    }

    /// Called before rendering a link.
    fn visit_link(&mut self, link: &Link) -> VisitorAction {
        let _ = link;
        VisitorAction::Continue
    }

    /// Called before rendering a link list.
    fn visit_link_list(&mut self, links: &LinkList) -> VisitorAction {
        let _ = links;
        VisitorAction::Continue
    }

    /// Called after a story's body has been walked.
    fn on_story_end(&mut self, story: &Story) {
        let _ = story;
    }
}

/// Route a node to the matching visitor hook.
pub fn visit_node<V: DocumentVisitor + ?Sized>(visitor: &mut V, node: &Node) -> VisitorAction {
    match node {
        Node::Paragraph(p) => visitor.visit_paragraph(p),
        Node::List(l) => visitor.visit_list(l),
        Node::Table(t) => visitor.visit_table(t),
        Node::Heading(h) => visitor.visit_heading(h),
        Node::Frame(f) => visitor.visit_frame(f),
        Node::Link(l) => visitor.visit_link(l),
        Node::LinkList(l) => visitor.visit_link_list(l),
    }
}

/// An element reached by [`walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visited<'a> {
    /// A story the visitor let through
    Story(&'a Story),
    /// A body node the visitor let through
    Node(&'a Node),
    /// Output a visitor substituted for a story or node
    Replaced(String),
    /// End of a story that was let through
    StoryEnd(&'a Story),
}

/// Walk every story and node in order, consulting the visitor first.
///
/// Elements the visitor skips are not emitted. A replaced story emits its
/// replacement instead of its name and body.
pub fn walk<'a, V, F>(doc: &'a Document, visitor: &mut V, mut emit: F)
where
    V: DocumentVisitor + ?Sized,
    F: FnMut(Visited<'a>),
{
    for story in &doc.stories {
        match visitor.visit_story(story) {
            VisitorAction::Skip => continue,
            VisitorAction::Replace(output) => {
                emit(Visited::Replaced(output));
                continue;
            }
            VisitorAction::Continue => emit(Visited::Story(story)),
        }

        for node in &story.body {
            match visit_node(visitor, node) {
                VisitorAction::Skip => {}
                VisitorAction::Replace(output) => emit(Visited::Replaced(output)),
                VisitorAction::Continue => emit(Visited::Node(node)),
            }
        }

        visitor.on_story_end(story);
        emit(Visited::StoryEnd(story));
    }
}

/// Default visitor that performs no customization.
#[derive(Debug, Clone, Default)]
pub struct DefaultVisitor;

impl DefaultVisitor {
    /// Create a new default visitor.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentVisitor for DefaultVisitor {}

/// Visitor that skips locked stories.
#[derive(Debug, Clone, Default)]
pub struct SkipLockedVisitor;

impl DocumentVisitor for SkipLockedVisitor {
    fn visit_story(&mut self, story: &Story) -> VisitorAction {
        if story.locked {
            VisitorAction::Skip
        } else {
            VisitorAction::Continue
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// a non-Continue action determines the result.
#[derive(Default)]
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    fn first_action(
        &mut self,
        mut visit: impl FnMut(&mut Box<dyn DocumentVisitor>) -> VisitorAction,
    ) -> VisitorAction {
        for visitor in &mut self.visitors {
            let action = visit(visitor);
            if action != VisitorAction::Continue {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_story(&mut self, story: &Story) -> VisitorAction {
        self.first_action(|v| v.visit_story(story))
    }

    fn visit_paragraph(&mut self, para: &Paragraph) -> VisitorAction {
        self.first_action(|v| v.visit_paragraph(para))
    }

    fn visit_list(&mut self, list: &List) -> VisitorAction {
        self.first_action(|v| v.visit_list(list))
    }

    fn visit_table(&mut self, table: &Table) -> VisitorAction {
        self.first_action(|v| v.visit_table(table))
    }

    fn visit_heading(&mut self, heading: &Heading) -> VisitorAction {
        self.first_action(|v| v.visit_heading(heading))
    }

    fn visit_frame(&mut self, frame: &Frame) -> VisitorAction {
        self.first_action(|v| v.visit_frame(frame))
    }

    fn visit_link(&mut self, link: &Link) -> VisitorAction {
        self.first_action(|v| v.visit_link(link))
    }

    fn visit_link_list(&mut self, links: &LinkList) -> VisitorAction {
        self.first_action(|v| v.visit_link_list(links))
    }

    fn on_story_end(&mut self, story: &Story) {
        for visitor in &mut self.visitors {
            visitor.on_story_end(story);
        }
    }
}
