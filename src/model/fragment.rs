//! Positioned text fragments as produced by a page-layout extractor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Visual style of a fragment: font, size, weight flags and colour.
///
/// Two fragments with equal signatures were typeset identically, which is
/// what lets a single anchor match stand in for a whole semantic role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSignature {
    /// Font name (e.g., "GillSans-SemiBold")
    pub font: String,

    /// Font size in points
    pub size: f32,

    /// Weight/style flag bitmask reported by the extractor
    pub flags: u32,

    /// Text colour as packed 0xRRGGBB
    pub color: u32,
}

impl StyleSignature {
    /// Create a new style signature.
    pub fn new(font: impl Into<String>, size: f32, flags: u32, color: u32) -> Self {
        Self {
            font: font.into(),
            size,
            flags,
            color,
        }
    }

    /// Check if the font name advertises a bold face.
    pub fn font_is_bold(&self) -> bool {
        self.font.to_lowercase().contains("bold")
    }

    /// Check if the font name advertises an italic face.
    pub fn font_is_italic(&self) -> bool {
        self.font.to_lowercase().contains("italic")
    }
}

// Sizes are compared bit-for-bit: the extractor reports the same float for
// the same typeset style, and a signature must be usable as a map key.
impl PartialEq for StyleSignature {
    fn eq(&self, other: &Self) -> bool {
        self.font == other.font
            && self.size.to_bits() == other.size.to_bits()
            && self.flags == other.flags
            && self.color == other.color
    }
}

impl Eq for StyleSignature {}

impl Hash for StyleSignature {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.font.hash(state);
        self.size.to_bits().hash(state);
        self.flags.hash(state);
        self.color.hash(state);
    }
}

impl fmt::Display for StyleSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} #{:06x}",
            self.font, self.size, self.flags, self.color
        )
    }
}

/// Origin of a fragment on its page, in page units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// X coordinate (left edge of the baseline)
    pub x: f32,
    /// Y coordinate (baseline)
    pub y: f32,
}

impl Origin {
    /// Create a new origin.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// X coordinate truncated to whole page units.
    ///
    /// Layout decisions compare columns at this granularity so that
    /// sub-unit kerning noise does not split aligned text.
    pub fn column(&self) -> i32 {
        self.x.trunc() as i32
    }
}

/// Reading-order address of a fragment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Location {
    /// Page index (0 = title page)
    pub page: u32,
    /// Block index within the page
    pub block: u32,
    /// Line index within the block
    pub line: u32,
    /// Span index within the line
    pub span: u32,
}

impl Location {
    /// Create a new location.
    pub fn new(page: u32, block: u32, line: u32, span: u32) -> Self {
        Self {
            page,
            block,
            line,
            span,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.page, self.block, self.line, self.span)
    }
}

/// A single positioned, styled piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    /// Raw text, untrimmed
    pub text: String,

    /// Visual style
    pub style: StyleSignature,

    /// Page coordinates
    pub origin: Origin,

    /// Reading-order address
    pub location: Location,
}

impl Fragment {
    /// Create a new fragment.
    pub fn new(
        text: impl Into<String>,
        style: StyleSignature,
        origin: Origin,
        location: Location,
    ) -> Self {
        Self {
            text: text.into(),
            style,
            origin,
            location,
        }
    }

    /// Page index of the fragment.
    pub fn page(&self) -> u32 {
        self.location.page
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the fragment has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_signature_is_a_map_key() {
        let a = StyleSignature::new("Bookinsanity", 9.5, 4, 0x231f20);
        let b = StyleSignature::new("Bookinsanity", 9.5, 4, 0x231f20);
        let c = StyleSignature::new("Bookinsanity", 9.75, 4, 0x231f20);

        let mut map = HashMap::new();
        map.insert(a.clone(), "body");
        assert_eq!(map.get(&b), Some(&"body"));
        assert_eq!(map.get(&c), None);
    }

    #[test]
    fn test_font_name_weight() {
        let sig = StyleSignature::new("Bookinsanity-BoldItalic", 10.0, 22, 0);
        assert!(sig.font_is_bold());
        assert!(sig.font_is_italic());

        let plain = StyleSignature::new("Bookinsanity", 10.0, 4, 0);
        assert!(!plain.font_is_bold());
        assert!(!plain.font_is_italic());
    }

    #[test]
    fn test_origin_column_truncates() {
        assert_eq!(Origin::new(72.9, 100.0).column(), 72);
        assert_eq!(Origin::new(72.0, 100.0).column(), 72);
    }

    #[test]
    fn test_signature_display() {
        let sig = StyleSignature::new("Mr Eaves", 23.0, 20, 0x58180d);
        assert_eq!(sig.to_string(), "Mr Eaves 23 20 #58180d");
    }

    #[test]
    fn test_fragment_blank() {
        let frag = Fragment::new(
            "  ",
            StyleSignature::new("F", 9.0, 0, 0),
            Origin::default(),
            Location::new(1, 0, 0, 0),
        );
        assert!(frag.is_blank());
        assert_eq!(frag.page(), 1);
    }
}
