//! Incremental story construction.
//!
//! [`DocumentBuilder`] folds classified fragments, in document order, into a
//! forest of [`Story`] trees. It never fails: a fragment that makes no sense
//! in the current state is recorded as a structural mismatch and dropped.
//!
//! The builder tracks one open story and, inside it, a cursor pointing at the
//! open paragraph, in-body heading, list entry or table cell. Nodes are
//! addressed by their index in the story body, so the cursor stays valid as
//! the body grows.

use super::options::{BuildOptions, BulletExitPolicy, ParagraphPolicy};
use super::report::Diagnostic;
use super::resolver::PositionTable;
use super::sections::SectionCounter;
use crate::model::{
    Fragment, Heading, List, Node, Paragraph, Run, Segment, SemanticStyle, Story,
    StoryIdGenerator, Table, TableRow,
};

/// What a fragment did to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// A new story was opened
    StoryOpened {
        /// Id of the new story
        id: u32,
    },
    /// A wrapped story heading was appended to the story name
    StoryNameExtended,
    /// An in-body heading was opened
    HeadingOpened,
    /// A wrapped in-body heading was extended
    HeadingExtended,
    /// A new paragraph was opened
    ParagraphOpened,
    /// Text was appended to the open run
    TextAppended,
    /// Body text left the list and opened a paragraph
    ListExited,
    /// A new list was opened with one empty entry
    ListOpened,
    /// A new entry was opened in the open list
    ListEntryOpened,
    /// A table title and an empty table were emitted
    TableOpened,
    /// A header cell was added
    HeaderCellAdded,
    /// A body cell was added
    CellAdded {
        /// Whether the cell started a new row
        new_row: bool,
    },
    /// The fragment carries no structure
    Ignored,
    /// The fragment did not fit the current state
    Dropped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunSlot {
    Paragraph(usize),
    ListEntry { node: usize, entry: usize },
    TableCell { node: usize, row: usize, column: usize },
}

#[derive(Debug, Clone, Copy)]
struct OpenList {
    node: usize,
    entry: usize,
    // x column of the first text in an entry
    anchor: Option<i32>,
}

#[derive(Debug, Clone, Copy)]
struct OpenTable {
    node: usize,
    header_columns: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    run: Option<RunSlot>,
    paragraph: Option<usize>,
    heading: Option<usize>,
    list: Option<OpenList>,
    table: Option<OpenTable>,
}

#[derive(Debug, Clone, Copy)]
struct Previous {
    style: SemanticStyle,
    page: u32,
}

/// Stateful builder turning classified fragments into stories.
#[derive(Debug)]
pub struct DocumentBuilder<'a> {
    ids: &'a mut StoryIdGenerator,
    paragraph: ParagraphPolicy,
    bullet_exit: BulletExitPolicy,
    margins: Vec<i32>,
    stories: Vec<Story>,
    story: Option<Story>,
    cursor: Cursor,
    sections: SectionCounter,
    previous: Option<Previous>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> DocumentBuilder<'a> {
    /// Create a builder drawing story ids from `ids`.
    ///
    /// With `options.title_story` set, a front-matter story is opened
    /// immediately so text before the first heading has a home.
    pub fn new(
        ids: &'a mut StoryIdGenerator,
        positions: &PositionTable,
        options: &BuildOptions,
    ) -> Self {
        let mut builder = Self {
            ids,
            paragraph: options.paragraph.clone(),
            bullet_exit: options.bullet_exit,
            margins: positions.margin_columns(),
            stories: Vec::new(),
            story: None,
            cursor: Cursor::default(),
            sections: SectionCounter::new(),
            previous: None,
            diagnostics: Vec::new(),
        };

        if options.title_story {
            let id = builder.ids.next_id();
            builder.story = Some(Story::new(id, options.title_story_name()));
        }

        builder
    }

    /// Fold one classified fragment into the tree.
    pub fn push(&mut self, style: SemanticStyle, fragment: &Fragment) -> Transition {
        let transition = match style {
            SemanticStyle::Heading1 => self.story_heading(style, 0, fragment),
            SemanticStyle::Heading2 => self.story_heading(style, 1, fragment),
            SemanticStyle::Heading3 => self.subheading(fragment),
            SemanticStyle::Body
            | SemanticStyle::BodyBold
            | SemanticStyle::BodyItalic
            | SemanticStyle::BodyBoldItalic => self.body(style, fragment),
            SemanticStyle::Bullet => self.bullet(fragment),
            SemanticStyle::TableTitle => self.table_title(fragment),
            SemanticStyle::TableHeading => self.table_heading(fragment),
            SemanticStyle::TableText | SemanticStyle::TableTextItalic => {
                self.table_text(style, fragment)
            }
            // box headings are ignored
            SemanticStyle::BoxHeading => Transition::Ignored,
            // whitespace pass-through; not a "previous fragment"
            SemanticStyle::Unknown => return Transition::Ignored,
        };

        self.previous = Some(Previous {
            style,
            page: fragment.page(),
        });
        transition
    }

    /// Stories closed so far.
    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    /// The story currently receiving content.
    pub fn current_story(&self) -> Option<&Story> {
        self.story.as_ref()
    }

    /// Structural mismatches recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Close everything and return the stories with their diagnostics.
    pub fn finish(mut self) -> (Vec<Story>, Vec<Diagnostic>) {
        self.close_story();
        (self.stories, self.diagnostics)
    }

    fn story_heading(&mut self, style: SemanticStyle, level: usize, fragment: &Fragment) -> Transition {
        if self.continues(style, fragment.page()) {
            if let Some(story) = self.story.as_mut() {
                story.name.push_str(&fragment.text);
                return Transition::StoryNameExtended;
            }
        }

        self.close_story();
        self.sections.increment(level);
        let id = self.ids.next_id();
        let name = format!("{} {}", self.sections.label(), fragment.text);
        log::debug!("story {} '{}'", id, name.trim_end());
        self.story = Some(Story::new(id, name));
        Transition::StoryOpened { id }
    }

    fn subheading(&mut self, fragment: &Fragment) -> Transition {
        if self.continues(SemanticStyle::Heading3, fragment.page()) {
            let index = self.cursor.heading;
            if let Some(Node::Heading(heading)) = index.and_then(|i| self.node_mut(i)) {
                heading.append(&fragment.text);
                return Transition::HeadingExtended;
            }
        }

        self.close_blocks();
        match self.push_node(Node::Heading(Heading::new(fragment.text.clone(), 3))) {
            Some(index) => {
                self.cursor.heading = Some(index);
                Transition::HeadingOpened
            }
            None => self.mismatch(fragment, "heading outside any story"),
        }
    }

    fn body(&mut self, style: SemanticStyle, fragment: &Fragment) -> Transition {
        if self.story.is_none() {
            return self.mismatch(fragment, "body text outside any story");
        }

        let (bold, italic) = (style.is_bold(), style.is_italic());
        let mut text = fragment.text.as_str();

        // ". " and ", " belong to the text before them
        if text.starts_with(". ") || text.starts_with(", ") {
            if let Some(run) = self.open_run_mut() {
                run.extend_last(&text[..2]);
                if text.len() == 2 {
                    return Transition::TextAppended;
                }
                text = &text[2..];
            }
        }

        let column = fragment.origin.column();
        if let Some(list) = self.cursor.list {
            if let Some(anchor) = list.anchor {
                let drifted = self.bullet_exit.on_left_drift && column < anchor;
                let on_margin = self.bullet_exit.on_margin && self.margins.contains(&column);
                if drifted || on_margin {
                    self.close_blocks();
                    self.open_paragraph(Segment::new(text, bold, italic));
                    return Transition::ListExited;
                }
            }

            let entry = RunSlot::ListEntry {
                node: list.node,
                entry: list.entry,
            };
            if self.run_mut(entry).is_some_and(|run| run.is_empty()) {
                self.cursor.list = Some(OpenList {
                    anchor: Some(column),
                    ..list
                });
            }
        }

        let segment = Segment::new(text, bold, italic);
        let previous_is_body = self.previous.is_some_and(|p| p.style.is_body());
        if let (true, Some(slot)) = (previous_is_body, self.cursor.run) {
            let last = self.run_mut(slot).and_then(|run| run.last_visible_char());
            if self.paragraph.splits_after(last, text) {
                self.close_blocks();
                self.open_paragraph(segment);
                return Transition::ParagraphOpened;
            }
            self.append(slot, segment);
            return Transition::TextAppended;
        }

        let slot = match (self.cursor.list, self.cursor.paragraph) {
            (Some(list), _) => RunSlot::ListEntry {
                node: list.node,
                entry: list.entry,
            },
            (None, Some(index)) => RunSlot::Paragraph(index),
            (None, None) => {
                self.open_paragraph(segment);
                return Transition::ParagraphOpened;
            }
        };
        self.append(slot, segment);
        self.cursor.run = Some(slot);
        Transition::TextAppended
    }

    fn bullet(&mut self, fragment: &Fragment) -> Transition {
        self.close_paragraph();

        if let Some(open) = self.cursor.list {
            let entry = match self.node_mut(open.node) {
                Some(Node::List(list)) => list.open_entry(),
                _ => return self.mismatch(fragment, "open list is gone"),
            };
            self.cursor.list = Some(OpenList { entry, ..open });
            self.cursor.run = Some(RunSlot::ListEntry {
                node: open.node,
                entry,
            });
            return Transition::ListEntryOpened;
        }

        self.close_blocks();
        let mut list = List::new();
        let entry = list.open_entry();
        match self.push_node(Node::List(list)) {
            Some(node) => {
                self.cursor.list = Some(OpenList {
                    node,
                    entry,
                    anchor: None,
                });
                self.cursor.run = Some(RunSlot::ListEntry { node, entry });
                Transition::ListOpened
            }
            None => self.mismatch(fragment, "bullet outside any story"),
        }
    }

    fn table_title(&mut self, fragment: &Fragment) -> Transition {
        self.close_blocks();
        let title = Paragraph::new(Run::from_segment(Segment::bold(fragment.text.clone())));
        let Some(index) = self.push_node(Node::Paragraph(title)) else {
            return self.mismatch(fragment, "table title outside any story");
        };
        // the title is not a paragraph body text can continue
        self.cursor.run = Some(RunSlot::Paragraph(index));
        self.open_table();
        Transition::TableOpened
    }

    fn table_heading(&mut self, fragment: &Fragment) -> Transition {
        let current = self.cursor.table;
        let open = match current {
            Some(open) if !self.table_has_body(open.node) => open,
            _ => {
                self.close_blocks();
                match self.open_table() {
                    Some(open) => open,
                    None => return self.mismatch(fragment, "table heading outside any story"),
                }
            }
        };

        let column = match self.node_mut(open.node) {
            Some(Node::Table(table)) => {
                if table.rows.is_empty() {
                    table.add_row(TableRow::new());
                }
                let header = &mut table.rows[0];
                header
                    .columns
                    .push(Run::from_segment(Segment::bold(fragment.text.clone())));
                let column = header.count() - 1;
                table.expected_columns = Some(open.header_columns + 1);
                Some(column)
            }
            _ => None,
        };
        let Some(column) = column else {
            return self.mismatch(fragment, "open table is gone");
        };

        self.cursor.table = Some(OpenTable {
            header_columns: open.header_columns + 1,
            ..open
        });
        self.cursor.run = Some(RunSlot::TableCell {
            node: open.node,
            row: 0,
            column,
        });
        Transition::HeaderCellAdded
    }

    fn table_text(&mut self, style: SemanticStyle, fragment: &Fragment) -> Transition {
        let Some(open) = self.cursor.table else {
            return self.mismatch(fragment, "table text with no open table");
        };
        if open.header_columns == 0 {
            return self.mismatch(fragment, "table text before any table heading");
        }

        let italic = style == SemanticStyle::TableTextItalic;
        let placed = match self.node_mut(open.node) {
            Some(Node::Table(table)) => {
                let new_row = table
                    .rows
                    .last()
                    .map_or(true, |row| row.count() >= open.header_columns);
                if new_row {
                    table.add_row(TableRow::new());
                }
                let row = table.rows.len() - 1;
                let cells = &mut table.rows[row].columns;
                cells.push(Run::from_segment(Segment::new(
                    fragment.text.clone(),
                    false,
                    italic,
                )));
                Some((row, cells.len() - 1, new_row))
            }
            _ => None,
        };
        let Some((row, column, new_row)) = placed else {
            return self.mismatch(fragment, "open table is gone");
        };

        self.cursor.run = Some(RunSlot::TableCell {
            node: open.node,
            row,
            column,
        });
        Transition::CellAdded { new_row }
    }

    fn continues(&self, style: SemanticStyle, page: u32) -> bool {
        self.previous
            .is_some_and(|p| p.style == style && p.page == page)
    }

    fn open_paragraph(&mut self, segment: Segment) {
        let paragraph = Paragraph::new(Run::from_segment(segment));
        if let Some(index) = self.push_node(Node::Paragraph(paragraph)) {
            self.cursor.paragraph = Some(index);
            self.cursor.run = Some(RunSlot::Paragraph(index));
        }
    }

    fn open_table(&mut self) -> Option<OpenTable> {
        let node = self.push_node(Node::Table(Table::new()))?;
        let open = OpenTable {
            node,
            header_columns: 0,
        };
        self.cursor.table = Some(open);
        Some(open)
    }

    fn table_has_body(&self, index: usize) -> bool {
        matches!(self.node(index), Some(Node::Table(table)) if table.row_count() > 1)
    }

    fn close_paragraph(&mut self) {
        self.cursor.paragraph = None;
        if matches!(self.cursor.run, Some(RunSlot::Paragraph(_))) {
            self.cursor.run = None;
        }
    }

    fn close_blocks(&mut self) {
        self.cursor = Cursor::default();
    }

    fn close_story(&mut self) {
        self.close_blocks();
        let Some(mut story) = self.story.take() else {
            return;
        };

        for node in &mut story.body {
            if let Node::List(list) = node {
                list.prune_empty();
            }
        }
        story
            .body
            .retain(|node| !matches!(node, Node::List(list) if list.entries.is_empty()));
        story.name.truncate(story.name.trim_end().len());

        self.stories.push(story);
    }

    fn append(&mut self, slot: RunSlot, segment: Segment) {
        if let Some(run) = self.run_mut(slot) {
            run.push(segment);
        }
    }

    fn open_run_mut(&mut self) -> Option<&mut Run> {
        let slot = self.cursor.run?;
        self.run_mut(slot)
    }

    fn run_mut(&mut self, slot: RunSlot) -> Option<&mut Run> {
        match slot {
            RunSlot::Paragraph(index) => match self.node_mut(index)? {
                Node::Paragraph(paragraph) => Some(&mut paragraph.run),
                _ => None,
            },
            RunSlot::ListEntry { node, entry } => match self.node_mut(node)? {
                Node::List(list) => list.entries.get_mut(entry),
                _ => None,
            },
            RunSlot::TableCell { node, row, column } => match self.node_mut(node)? {
                Node::Table(table) => table.rows.get_mut(row)?.columns.get_mut(column),
                _ => None,
            },
        }
    }

    fn node(&self, index: usize) -> Option<&Node> {
        self.story.as_ref()?.body.get(index)
    }

    fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.story.as_mut()?.body.get_mut(index)
    }

    fn push_node(&mut self, node: Node) -> Option<usize> {
        self.story.as_mut().map(|story| story.push(node))
    }

    fn mismatch(&mut self, fragment: &Fragment, message: &str) -> Transition {
        log::debug!("dropped '{}' at {}: {}", fragment.text, fragment.location, message);
        self.diagnostics.push(Diagnostic::mismatch(fragment, message));
        Transition::Dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Location, Origin, Position, StyleSignature};
    use SemanticStyle::*;

    fn frag(page: u32, x: f32, text: &str) -> Fragment {
        Fragment::new(
            text,
            StyleSignature::new("Bookinsanity", 9.5, 4, 0),
            Origin::new(x, 500.0),
            Location::new(page, 0, 0, 0),
        )
    }

    fn build(options: &BuildOptions, input: &[(SemanticStyle, Fragment)]) -> Vec<Story> {
        let mut ids = StoryIdGenerator::new();
        let positions = PositionTable::default();
        let mut builder = DocumentBuilder::new(&mut ids, &positions, options);
        for (style, fragment) in input {
            builder.push(*style, fragment);
        }
        builder.finish().0
    }

    fn untitled() -> BuildOptions {
        BuildOptions::new().with_title_story(false)
    }

    fn paragraphs(story: &Story) -> Vec<String> {
        story
            .body
            .iter()
            .filter_map(|node| match node {
                Node::Paragraph(p) => Some(p.run.plain_text()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_title_story_opened_first() {
        let options = BuildOptions::new().with_document_name("The Tempter");
        let stories = build(
            &options,
            &[(Body, frag(0, 100.0, "By Someone")), (Heading1, frag(1, 50.0, "Introduction"))],
        );

        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].name, "00 (The Tempter)");
        assert_eq!(stories[0].id, 1);
        assert_eq!(paragraphs(&stories[0]), vec!["By Someone"]);
        assert_eq!(stories[1].name, "01 Introduction");
        assert_eq!(stories[1].id, 2);
    }

    #[test]
    fn test_heading_wrap_merges_on_same_page() {
        let stories = build(
            &untitled(),
            &[(Heading1, frag(3, 50.0, "Intro")), (Heading1, frag(3, 80.0, "duction"))],
        );
        assert_eq!(stories.len(), 1);
        assert_eq!(stories[0].name, "01 Introduction");
    }

    #[test]
    fn test_heading_on_next_page_is_new_story() {
        let stories = build(
            &untitled(),
            &[(Heading1, frag(3, 50.0, "Intro")), (Heading1, frag(4, 50.0, "Part Two"))],
        );
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[1].name, "02 Part Two");
    }

    #[test]
    fn test_heading2_numbering() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Adventure")),
                (Heading2, frag(1, 50.0, "Part 1")),
                (Body, frag(1, 50.0, "text")),
                (Heading2, frag(1, 50.0, "Part 2")),
                (Heading1, frag(2, 50.0, "Appendix")),
            ],
        );
        let names: Vec<_> = stories.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["01 Adventure", "01.01 Part 1", "01.02 Part 2", "02 Appendix"]);
    }

    #[test]
    fn test_no_split_merges_run() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "Hello ")),
                (Body, frag(1, 80.0, "world.")),
            ],
        );
        assert_eq!(stories[0].name, "01 Intro");
        assert_eq!(stories[0].body.len(), 1);
        let Node::Paragraph(paragraph) = &stories[0].body[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.run.segments.len(), 1);
        assert_eq!(paragraph.run.plain_text(), "Hello world.");
    }

    #[test]
    fn test_paragraph_split() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "End of thought.")),
                (Body, frag(1, 50.0, " New thought begins.")),
            ],
        );
        assert_eq!(
            paragraphs(&stories[0]),
            vec!["End of thought.", " New thought begins."]
        );
    }

    #[test]
    fn test_style_change_starts_segment() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "The ")),
                (BodyBold, frag(1, 60.0, "dragon")),
                (Body, frag(1, 90.0, " sleeps")),
            ],
        );
        let Node::Paragraph(paragraph) = &stories[0].body[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.run.segments.len(), 3);
        assert!(paragraph.run.segments[1].bold);
    }

    #[test]
    fn test_leading_punctuation_spliced() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "The end")),
                (BodyItalic, frag(1, 60.0, "really")),
                (Body, frag(1, 90.0, ". Then more")),
            ],
        );
        let Node::Paragraph(paragraph) = &stories[0].body[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.run.segments[1].text, "really. ");
        assert_eq!(paragraph.run.segments[2].text, "Then more");
        assert_eq!(paragraph.run.plain_text(), "The endreally. Then more");
    }

    #[test]
    fn test_lone_comma_spliced() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "gold")),
                (Body, frag(1, 60.0, ", ")),
            ],
        );
        assert_eq!(paragraphs(&stories[0]), vec!["gold, "]);
    }

    #[test]
    fn test_list_entries() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Gear")),
                (Bullet, frag(1, 50.0, "•")),
                (Body, frag(1, 60.0, "Sword")),
                (Bullet, frag(1, 50.0, "•")),
                (Body, frag(1, 60.0, "Shield")),
            ],
        );
        assert_eq!(stories[0].body.len(), 1);
        let Node::List(list) = &stories[0].body[0] else {
            panic!("expected a list");
        };
        let entries: Vec<_> = list.entries.iter().map(Run::plain_text).collect();
        assert_eq!(entries, vec!["Sword", "Shield"]);
    }

    #[test]
    fn test_empty_bullet_pruned() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Gear")),
                (Bullet, frag(1, 50.0, "•")),
                (Bullet, frag(1, 50.0, "-")),
                (Body, frag(1, 60.0, "Rope")),
            ],
        );
        let Node::List(list) = &stories[0].body[0] else {
            panic!("expected a list");
        };
        assert_eq!(list.entry_count(), 1);
        assert_eq!(list.entries[0].plain_text(), "Rope");
    }

    #[test]
    fn test_list_with_only_empty_entries_removed() {
        let stories = build(
            &untitled(),
            &[(Heading1, frag(1, 50.0, "Gear")), (Bullet, frag(1, 50.0, "•"))],
        );
        assert!(stories[0].body.is_empty());
    }

    #[test]
    fn test_bullet_exit_on_left_drift() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Gear")),
                (Bullet, frag(1, 50.0, "•")),
                (Body, frag(1, 60.0, "Sword and")),
                (Body, frag(1, 60.3, " board")),
                (Body, frag(1, 50.0, "Back to prose")),
            ],
        );
        assert_eq!(stories[0].body.len(), 2);
        let Node::List(list) = &stories[0].body[0] else {
            panic!("expected a list");
        };
        assert_eq!(list.entries[0].plain_text(), "Sword and board");
        assert_eq!(paragraphs(&stories[0]), vec!["Back to prose"]);
    }

    #[test]
    fn test_bullet_exit_on_margin() {
        let mut ids = StoryIdGenerator::new();
        let positions: PositionTable = [(Position::RightColumnMargin, Origin::new(310.4, 0.0))]
            .into_iter()
            .collect();
        let options = untitled();
        let mut builder = DocumentBuilder::new(&mut ids, &positions, &options);

        builder.push(Heading1, &frag(1, 50.0, "Gear"));
        builder.push(Bullet, &frag(1, 290.0, "•"));
        builder.push(Body, &frag(1, 300.0, "Sword"));
        let exit = builder.push(Body, &frag(1, 310.9, "Next column"));
        assert_eq!(exit, Transition::ListExited);

        let (stories, _) = builder.finish();
        assert_eq!(paragraphs(&stories[0]), vec!["Next column"]);
    }

    #[test]
    fn test_bullet_exit_can_be_disabled() {
        let options = untitled().with_bullet_exit(BulletExitPolicy {
            on_left_drift: false,
            on_margin: false,
        });
        let stories = build(
            &options,
            &[
                (Heading1, frag(1, 50.0, "Gear")),
                (Bullet, frag(1, 50.0, "•")),
                (Body, frag(1, 60.0, "Sword")),
                (Body, frag(1, 20.0, " more")),
            ],
        );
        assert_eq!(stories[0].body.len(), 1);
    }

    #[test]
    fn test_table_wrap() {
        let mut input = vec![
            (Heading1, frag(1, 50.0, "Encounters")),
            (TableTitle, frag(1, 50.0, "Random Encounters")),
        ];
        for heading in ["d6", "Creature", "Number"] {
            input.push((TableHeading, frag(1, 50.0, heading)));
        }
        for i in 0..9 {
            input.push((TableText, frag(1, 50.0, &format!("cell {}", i))));
        }
        let stories = build(&untitled(), &input);

        assert_eq!(paragraphs(&stories[0]), vec!["Random Encounters"]);
        let Node::Table(table) = &stories[0].body[1] else {
            panic!("expected a table");
        };
        assert_eq!(table.expected_columns, Some(3));
        assert_eq!(table.header().map(TableRow::count), Some(3));
        assert!(table.header().is_some_and(|h| h.columns[0].segments[0].bold));
        assert_eq!(table.body().len(), 3);
        assert!(table.body().iter().all(|row| row.count() == 3));
        assert_eq!(table.body()[2].plain_text(), "cell 6\tcell 7\tcell 8");
    }

    #[test]
    fn test_table_guard() {
        let mut ids = StoryIdGenerator::new();
        let positions = PositionTable::default();
        let options = untitled();
        let mut builder = DocumentBuilder::new(&mut ids, &positions, &options);

        builder.push(Heading1, &frag(1, 50.0, "Encounters"));
        builder.push(TableTitle, &frag(1, 50.0, "Loot"));
        assert_eq!(builder.push(TableText, &frag(1, 50.0, "orphan")), Transition::Dropped);
        assert_eq!(builder.diagnostics().len(), 1);

        let (stories, diagnostics) = builder.finish();
        let Node::Table(table) = &stories[0].body[1] else {
            panic!("expected a table");
        };
        assert!(table.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_table_text_without_table_dropped() {
        let stories = build(
            &untitled(),
            &[(Heading1, frag(1, 50.0, "Intro")), (TableText, frag(1, 50.0, "stray"))],
        );
        assert!(stories[0].body.is_empty());
    }

    #[test]
    fn test_table_heading_without_title() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (TableHeading, frag(1, 50.0, "Level")),
                (TableHeading, frag(1, 50.0, "XP")),
                (TableTextItalic, frag(1, 50.0, "1")),
                (TableText, frag(1, 50.0, "300")),
            ],
        );
        let Node::Table(table) = &stories[0].body[0] else {
            panic!("expected a table");
        };
        assert_eq!(table.row_count(), 2);
        assert!(table.body()[0].columns[0].segments[0].italic);
    }

    #[test]
    fn test_late_table_heading_starts_new_table() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (TableHeading, frag(1, 50.0, "A")),
                (TableText, frag(1, 50.0, "1")),
                (TableHeading, frag(1, 50.0, "B")),
                (TableText, frag(1, 50.0, "2")),
            ],
        );
        assert_eq!(stories[0].body.len(), 2);
        assert!(stories[0].body.iter().all(|node| matches!(
            node,
            Node::Table(table) if table.expected_columns == Some(1) && table.row_count() == 2
        )));
    }

    #[test]
    fn test_subheading_wrap() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Heading3, frag(1, 50.0, "The Hidden ")),
                (Heading3, frag(1, 50.0, "Door")),
                (Body, frag(1, 50.0, "It is locked.")),
                (Heading3, frag(2, 50.0, "Beyond")),
            ],
        );
        let headings: Vec<_> = stories[0]
            .body
            .iter()
            .filter_map(|node| match node {
                Node::Heading(h) => Some(h.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["The Hidden Door", "Beyond"]);
        assert_eq!(paragraphs(&stories[0]), vec!["It is locked."]);
    }

    #[test]
    fn test_box_heading_and_unknown_ignored() {
        let stories = build(
            &untitled(),
            &[
                (Heading1, frag(1, 50.0, "Intro")),
                (Body, frag(1, 50.0, "one")),
                (Unknown, frag(1, 50.0, " ")),
                (Body, frag(1, 50.0, " two")),
                (BoxHeading, frag(1, 50.0, "Sidebar")),
            ],
        );
        assert_eq!(paragraphs(&stories[0]), vec!["one two"]);
    }

    #[test]
    fn test_body_without_story_dropped() {
        let mut ids = StoryIdGenerator::new();
        let positions = PositionTable::default();
        let options = untitled();
        let mut builder = DocumentBuilder::new(&mut ids, &positions, &options);

        assert_eq!(builder.push(Body, &frag(1, 50.0, "orphan")), Transition::Dropped);
        let (stories, diagnostics) = builder.finish();
        assert!(stories.is_empty());
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_shared_id_generator() {
        let mut ids = StoryIdGenerator::new();
        let positions = PositionTable::default();
        let options = BuildOptions::new();

        let first = {
            let mut builder = DocumentBuilder::new(&mut ids, &positions, &options);
            builder.push(Heading1, &frag(1, 50.0, "A"));
            builder.finish().0
        };
        let second = {
            let mut builder = DocumentBuilder::new(&mut ids, &positions, &options);
            builder.push(Heading1, &frag(1, 50.0, "B"));
            builder.finish().0
        };

        let ids: Vec<_> = first.iter().chain(&second).map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(second[1].name, "01 B");
    }
}
