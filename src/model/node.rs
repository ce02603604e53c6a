//! Document nodes: the rich-text tree stored inside each story.

use serde::{Deserialize, Serialize};

/// The smallest styled text unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// The text content
    pub text: String,

    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl Segment {
    /// Create a new segment.
    pub fn new(text: impl Into<String>, bold: bool, italic: bool) -> Self {
        Self {
            text: text.into(),
            bold,
            italic,
        }
    }

    /// Create an unstyled segment.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, false, false)
    }

    /// Create a bold segment.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, true, false)
    }

    /// Create an italic segment.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, false, true)
    }

    /// Check if this segment has the same weight and slant as another.
    pub fn same_style(&self, bold: bool, italic: bool) -> bool {
        self.bold == bold && self.italic == italic
    }

    /// Append raw text to the segment.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the segment holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A sequence of styled segments read as one continuous piece of prose.
///
/// Consecutive text with identical `{bold, italic}` always lands in the same
/// segment; a style change starts a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Segments in reading order
    pub segments: Vec<Segment>,
}

impl Run {
    /// Create an empty run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a run holding one segment.
    pub fn from_segment(segment: Segment) -> Self {
        let mut run = Self::new();
        run.push(segment);
        run
    }

    /// Append a segment, merging it into the last one when the style matches.
    pub fn push(&mut self, segment: Segment) {
        match self.segments.last_mut() {
            Some(last) if last.same_style(segment.bold, segment.italic) => {
                last.append(&segment.text);
            }
            _ => self.segments.push(segment),
        }
    }

    /// Append styled text.
    pub fn push_text(&mut self, text: impl Into<String>, bold: bool, italic: bool) {
        self.push(Segment::new(text, bold, italic));
    }

    /// Append raw text to the last segment, whatever its style.
    ///
    /// An empty run gets a new unstyled segment instead.
    pub fn extend_last(&mut self, text: &str) {
        match self.segments.last_mut() {
            Some(last) => last.append(text),
            None => self.segments.push(Segment::plain(text)),
        }
    }

    /// The last segment, if any.
    pub fn last_segment(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Check if the run holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// The last non-whitespace character, without joining segments.
    pub fn last_visible_char(&self) -> Option<char> {
        self.segments
            .iter()
            .rev()
            .find_map(|s| s.text.trim_end().chars().last())
    }
}

/// A paragraph of prose.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text
    pub run: Run,
}

impl Paragraph {
    /// Create a paragraph from a run.
    pub fn new(run: Run) -> Self {
        Self { run }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(Run::from_segment(Segment::plain(text)))
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.run.len()
    }

    /// Check if the paragraph holds no text.
    pub fn is_empty(&self) -> bool {
        self.run.is_empty()
    }
}

/// A bulleted list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    /// Entries in bullet order
    pub entries: Vec<Run>,
}

impl List {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty entry and return its index.
    pub fn open_entry(&mut self) -> usize {
        self.entries.push(Run::new());
        self.entries.len() - 1
    }

    /// Drop entries that never received any text.
    pub fn prune_empty(&mut self) {
        self.entries.retain(|entry| !entry.is_empty());
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.entries.iter().map(Run::len).sum()
    }

    /// Check if the list holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in column order
    pub columns: Vec<Run>,
}

impl TableRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: values
                .into_iter()
                .map(|v| Run::from_segment(Segment::plain(v)))
                .collect(),
        }
    }

    /// Number of columns filled so far.
    pub fn count(&self) -> usize {
        self.columns.len()
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.columns.iter().map(Run::len).sum()
    }

    /// Check if the row holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get plain text representation (tab separated).
    pub fn plain_text(&self) -> String {
        self.columns
            .iter()
            .map(Run::plain_text)
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table whose first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows, header first
    pub rows: Vec<TableRow>,

    /// Column count fixed by the header row
    pub expected_columns: Option<usize>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows, header included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&TableRow> {
        self.rows.first()
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[TableRow] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.rows.iter().map(TableRow::len).sum()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(TableRow::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// An in-body heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text
    pub text: String,

    /// Heading level (3 = in-body subheading)
    pub level: u8,
}

impl Heading {
    /// Create a new heading.
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }

    /// Append wrapped heading text.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the heading holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Unstyled call-out text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Frame text; may contain line breaks
    pub text: String,
}

impl Frame {
    /// Create a new frame.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Append text to the frame.
    pub fn append(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the frame holds no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A link to another record in the target application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link text
    pub text: String,

    /// Record class in the target application
    pub class: String,

    /// Record name the link points at
    pub record: String,
}

impl Link {
    /// Create a new link.
    pub fn new(
        text: impl Into<String>,
        class: impl Into<String>,
        record: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            class: class.into(),
            record: record.into(),
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Check if the link has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A list of links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkList {
    /// Links in order
    pub links: Vec<Link>,
}

impl LinkList {
    /// Create an empty link list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link.
    pub fn push(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        self.links.iter().map(Link::len).sum()
    }

    /// Check if the list holds no link text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A top-level node in a story body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A paragraph of prose
    Paragraph(Paragraph),

    /// A bulleted list
    List(List),

    /// A table
    Table(Table),

    /// An in-body heading
    Heading(Heading),

    /// A call-out frame
    Frame(Frame),

    /// A single link
    Link(Link),

    /// A list of links
    LinkList(LinkList),
}

impl Node {
    /// Short name of the node kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Paragraph(_) => "paragraph",
            Node::List(_) => "list",
            Node::Table(_) => "table",
            Node::Heading(_) => "heading",
            Node::Frame(_) => "frame",
            Node::Link(_) => "link",
            Node::LinkList(_) => "link_list",
        }
    }

    /// Total length in characters.
    pub fn len(&self) -> usize {
        match self {
            Node::Paragraph(p) => p.len(),
            Node::List(l) => l.len(),
            Node::Table(t) => t.len(),
            Node::Heading(h) => h.len(),
            Node::Frame(f) => f.len(),
            Node::Link(l) => l.len(),
            Node::LinkList(l) => l.len(),
        }
    }

    /// Check if the node holds no text.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        match self {
            Node::Paragraph(p) => p.run.plain_text(),
            Node::List(l) => l
                .entries
                .iter()
                .map(Run::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Node::Table(t) => t.plain_text(),
            Node::Heading(h) => h.text.clone(),
            Node::Frame(f) => f.text.clone(),
            Node::Link(l) => l.text.clone(),
            Node::LinkList(l) => l
                .links
                .iter()
                .map(|link| link.text.as_str())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_merges_same_style() {
        let mut run = Run::new();
        run.push_text("Hello ", false, false);
        run.push_text("world.", false, false);

        assert_eq!(run.segments.len(), 1);
        assert_eq!(run.plain_text(), "Hello world.");
    }

    #[test]
    fn test_last_visible_char_skips_trailing_space() {
        let mut run = Run::new();
        assert_eq!(run.last_visible_char(), None);

        run.push_text("He said ", false, false);
        run.push_text("stop.", true, false);
        run.push_text("  ", false, false);
        assert_eq!(run.last_visible_char(), Some('.'));
    }

    #[test]
    fn test_run_splits_on_style_change() {
        let mut run = Run::new();
        run.push_text("The ", false, false);
        run.push_text("dragon", true, false);
        run.push_text(" sleeps", false, false);

        assert_eq!(run.segments.len(), 3);
        assert!(run.segments[1].bold);
        assert_eq!(run.len(), 17);
    }

    #[test]
    fn test_run_extend_last_ignores_style() {
        let mut run = Run::from_segment(Segment::italic("tired"));
        run.extend_last(".");
        assert_eq!(run.segments.len(), 1);
        assert_eq!(run.segments[0].text, "tired.");

        let mut empty = Run::new();
        empty.extend_last(",");
        assert_eq!(empty.plain_text(), ",");
    }

    #[test]
    fn test_length_counts_characters() {
        let seg = Segment::plain("café");
        assert_eq!(seg.len(), 4);
    }

    #[test]
    fn test_list_prune_empty() {
        let mut list = List::new();
        let first = list.open_entry();
        list.entries[first].push_text("Sword", false, false);
        list.open_entry();
        let third = list.open_entry();
        list.entries[third].push_text("Shield", false, false);

        list.prune_empty();
        assert_eq!(list.entry_count(), 2);
        assert_eq!(list.entries[1].plain_text(), "Shield");
    }

    #[test]
    fn test_table_header_and_body() {
        let mut table = Table::new();
        table.add_row(TableRow::from_strings(["d6", "Result"]));
        table.add_row(TableRow::from_strings(["1", "Goblin"]));
        table.add_row(TableRow::from_strings(["2", "Orc"]));

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.header().map(TableRow::count), Some(2));
        assert_eq!(table.body().len(), 2);
        assert_eq!(table.plain_text(), "d6\tResult\n1\tGoblin\n2\tOrc");
    }

    #[test]
    fn test_empty_table_body() {
        let table = Table::new();
        assert!(table.body().is_empty());
        assert!(table.header().is_none());
    }

    #[test]
    fn test_node_length_aggregation() {
        let mut links = LinkList::new();
        links.push(Link::new("Map", "imagewindow", "image.id-00001"));
        links.push(Link::new("Keep", "encounter", "encounter.id-00002"));

        let nodes = [
            Node::Paragraph(Paragraph::with_text("abc")),
            Node::Heading(Heading::new("Keep", 3)),
            Node::Frame(Frame::new("Read aloud")),
            Node::LinkList(links),
        ];
        let total: usize = nodes.iter().map(Node::len).sum();
        assert_eq!(total, 3 + 4 + 10 + 7);
    }

    #[test]
    fn test_node_serializes_with_type_tag() {
        let node = Node::Heading(Heading::new("Treasure", 3));
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains("\"type\":\"heading\""));
        assert!(json.contains("\"level\":3"));
    }
}
