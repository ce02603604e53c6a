//! Data model: input fragments, semantic styles and the story tree.
//!
//! Fragments flow in from an external page-layout extractor; stories flow
//! out to an external serializer. Both ends see only the types defined here.

mod document;
mod fragment;
mod node;
mod story;
mod style;

pub use document::{Document, Metadata};
pub use fragment::{Fragment, Location, Origin, StyleSignature};
pub use node::{Frame, Heading, Link, LinkList, List, Node, Paragraph, Run, Segment, Table, TableRow};
pub use story::{Story, StoryIdGenerator};
pub use style::{Position, SemanticStyle};
