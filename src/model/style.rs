//! Semantic roles and calibrated page positions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The structural role a fragment plays in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticStyle {
    /// Chapter heading; opens a new top-level story
    #[serde(alias = "heading_1")]
    Heading1,
    /// Section heading; opens a new story one level down
    #[serde(alias = "heading_2")]
    Heading2,
    /// In-body subheading
    #[serde(alias = "heading_3")]
    Heading3,
    /// Plain body text
    Body,
    /// Bold body text
    BodyBold,
    /// Italic body text
    BodyItalic,
    /// Bold italic body text
    BodyBoldItalic,
    /// A bullet glyph starting a list entry
    Bullet,
    /// Caption above a table
    TableTitle,
    /// Table header cell
    TableHeading,
    /// Table body cell
    TableText,
    /// Italic table body cell
    TableTextItalic,
    /// Heading of a boxed call-out
    BoxHeading,
    /// Style could not be resolved
    Unknown,
}

impl SemanticStyle {
    /// Every style, in calibration order.
    pub const ALL: [SemanticStyle; 14] = [
        SemanticStyle::Heading1,
        SemanticStyle::Heading2,
        SemanticStyle::Heading3,
        SemanticStyle::Body,
        SemanticStyle::BodyBold,
        SemanticStyle::BodyItalic,
        SemanticStyle::BodyBoldItalic,
        SemanticStyle::Bullet,
        SemanticStyle::TableTitle,
        SemanticStyle::TableHeading,
        SemanticStyle::TableText,
        SemanticStyle::TableTextItalic,
        SemanticStyle::BoxHeading,
        SemanticStyle::Unknown,
    ];

    /// Canonical name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticStyle::Heading1 => "heading1",
            SemanticStyle::Heading2 => "heading2",
            SemanticStyle::Heading3 => "heading3",
            SemanticStyle::Body => "body",
            SemanticStyle::BodyBold => "body_bold",
            SemanticStyle::BodyItalic => "body_italic",
            SemanticStyle::BodyBoldItalic => "body_bold_italic",
            SemanticStyle::Bullet => "bullet",
            SemanticStyle::TableTitle => "table_title",
            SemanticStyle::TableHeading => "table_heading",
            SemanticStyle::TableText => "table_text",
            SemanticStyle::TableTextItalic => "table_text_italic",
            SemanticStyle::BoxHeading => "box_heading",
            SemanticStyle::Unknown => "unknown",
        }
    }

    /// Check if this is one of the four body variants.
    pub fn is_body(&self) -> bool {
        matches!(
            self,
            SemanticStyle::Body
                | SemanticStyle::BodyBold
                | SemanticStyle::BodyItalic
                | SemanticStyle::BodyBoldItalic
        )
    }

    /// Check if this style carries bold weight.
    pub fn is_bold(&self) -> bool {
        matches!(self, SemanticStyle::BodyBold | SemanticStyle::BodyBoldItalic)
    }

    /// Check if this style carries italic slant.
    pub fn is_italic(&self) -> bool {
        matches!(
            self,
            SemanticStyle::BodyItalic | SemanticStyle::BodyBoldItalic | SemanticStyle::TableTextItalic
        )
    }

    /// Check if this style is a table cell (header or body).
    pub fn is_table_cell(&self) -> bool {
        matches!(
            self,
            SemanticStyle::TableHeading | SemanticStyle::TableText | SemanticStyle::TableTextItalic
        )
    }

    /// Body variant for the given weight and slant.
    pub fn body(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (true, true) => SemanticStyle::BodyBoldItalic,
            (true, false) => SemanticStyle::BodyBold,
            (false, true) => SemanticStyle::BodyItalic,
            (false, false) => SemanticStyle::Body,
        }
    }
}

impl fmt::Display for SemanticStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace("heading_", "heading");
        SemanticStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == normalized)
            .ok_or_else(|| format!("unknown semantic style: {}", s))
    }
}

/// Named page positions calibrated from anchor text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Left edge of text in the left column
    LeftColumnMargin,
    /// Indented text in the left column
    LeftColumnIndent,
    /// Left edge of text in the right column
    RightColumnMargin,
    /// Indented text in the right column
    RightColumnIndent,
}

impl Position {
    /// Canonical name, as used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::LeftColumnMargin => "left_column_margin",
            Position::LeftColumnIndent => "left_column_indent",
            Position::RightColumnMargin => "right_column_margin",
            Position::RightColumnIndent => "right_column_indent",
        }
    }

    /// Check if this position is a column margin (as opposed to an indent).
    pub fn is_margin(&self) -> bool {
        matches!(self, Position::LeftColumnMargin | Position::RightColumnMargin)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
