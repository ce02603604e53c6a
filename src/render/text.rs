//! Plain text outline rendering for story forests.

use crate::error::Result;
use crate::model::{Document, Node, Story};

use super::visitor::{walk, DefaultVisitor, DocumentVisitor, SkipLockedVisitor, Visited};
use super::{CleanupPipeline, RenderOptions};

/// Convert a document to a plain text outline.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    if options.include_locked {
        to_text_with_visitor(doc, options, &mut DefaultVisitor)
    } else {
        to_text_with_visitor(doc, options, &mut SkipLockedVisitor)
    }
}

/// Convert a document to a plain text outline, consulting a visitor first.
pub fn to_text_with_visitor<V: DocumentVisitor + ?Sized>(
    doc: &Document,
    options: &RenderOptions,
    visitor: &mut V,
) -> Result<String> {
    let mut blocks: Vec<String> = Vec::new();

    walk(doc, visitor, |visited| match visited {
        Visited::Story(story) => blocks.push(story_title(story, options)),
        Visited::Node(node) => blocks.push(render_node(node, options)),
        Visited::Replaced(output) => blocks.push(output),
        Visited::StoryEnd(_) => {}
    });

    blocks.retain(|block| !block.trim().is_empty());
    let mut output = blocks.join("\n\n");

    if let Some(ref cleanup_options) = options.cleanup {
        let pipeline = CleanupPipeline::new(cleanup_options.clone())?;
        output = pipeline.process(&output);
    }

    Ok(output.trim().to_string())
}

fn story_title(story: &Story, options: &RenderOptions) -> String {
    if options.include_record_names {
        format!("[{}] {}", story.record_name(), story.name)
    } else {
        story.name.clone()
    }
}

fn render_node(node: &Node, options: &RenderOptions) -> String {
    match node {
        Node::Paragraph(p) => p.run.plain_text(),
        Node::List(list) => list
            .entries
            .iter()
            .map(|entry| format!("{} {}", options.list_marker, entry.plain_text()))
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Table(table) => table
            .rows
            .iter()
            .map(|row| {
                row.columns
                    .iter()
                    .map(|cell| cell.plain_text())
                    .collect::<Vec<_>>()
                    .join(&options.cell_separator)
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Node::Heading(h) if options.mark_headings => {
            format!("{} {}", "#".repeat(h.level as usize), h.text)
        }
        Node::Heading(h) => h.text.clone(),
        Node::Frame(f) => f.text.clone(),
        Node::Link(link) => link.text.clone(),
        Node::LinkList(links) => links
            .links
            .iter()
            .map(|link| format!("{} {}", options.list_marker, link.text))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
