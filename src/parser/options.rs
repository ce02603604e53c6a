//! Build options and layout heuristics.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Options for turning a classified fragment stream into stories.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Document (campaign/module) name
    pub document_name: String,

    /// Page whose fonts bypass calibration (0 = first page)
    pub title_page: u32,

    /// Whether to open a front-matter story before the first heading
    pub title_story: bool,

    /// Which pages to consume
    pub pages: PageSelection,

    /// When body text starts a new paragraph
    pub paragraph: ParagraphPolicy,

    /// When body text leaves a bulleted list
    pub bullet_exit: BulletExitPolicy,

    /// Drop a fragment whose raw text repeats the previous kept fragment
    pub dedupe_consecutive: bool,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document name.
    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Set the title page index.
    pub fn with_title_page(mut self, page: u32) -> Self {
        self.title_page = page;
        self
    }

    /// Enable or disable the front-matter story.
    pub fn with_title_story(mut self, enabled: bool) -> Self {
        self.title_story = enabled;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set the paragraph policy.
    pub fn with_paragraph_policy(mut self, policy: ParagraphPolicy) -> Self {
        self.paragraph = policy;
        self
    }

    /// Set the bullet exit policy.
    pub fn with_bullet_exit(mut self, policy: BulletExitPolicy) -> Self {
        self.bullet_exit = policy;
        self
    }

    /// Enable or disable consecutive duplicate suppression.
    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe_consecutive = enabled;
        self
    }

    /// Name of the front-matter story.
    pub fn title_story_name(&self) -> String {
        format!("00 ({})", self.document_name)
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            document_name: String::from("Untitled"),
            title_page: 0,
            title_story: true,
            pages: PageSelection::All,
            paragraph: ParagraphPolicy::default(),
            bullet_exit: BulletExitPolicy::default(),
            dedupe_consecutive: true,
        }
    }
}

/// Decides whether body text continues the open paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphPolicy {
    /// Characters that may end a paragraph
    pub terminators: Vec<char>,

    /// Whether the next fragment must begin with a space to split
    pub require_leading_space: bool,
}

impl ParagraphPolicy {
    /// Create a policy with the given terminators.
    pub fn with_terminators(terminators: impl IntoIterator<Item = char>) -> Self {
        Self {
            terminators: terminators.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Check if `next` starts a new paragraph after text ending in `current`.
    pub fn splits(&self, current: &str, next: &str) -> bool {
        self.splits_after(current.trim_end().chars().last(), next)
    }

    /// Check if `next` starts a new paragraph after text whose last visible
    /// character is `last`.
    pub fn splits_after(&self, last: Option<char>, next: &str) -> bool {
        let ends_sentence = last.is_some_and(|c| self.terminators.contains(&c));
        ends_sentence && (!self.require_leading_space || next.starts_with(' '))
    }
}

impl Default for ParagraphPolicy {
    fn default() -> Self {
        Self {
            terminators: vec!['.', ':'],
            require_leading_space: true,
        }
    }
}

/// Decides when body text has left a bulleted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletExitPolicy {
    /// Exit when text starts left of the current entry's first text
    pub on_left_drift: bool,

    /// Exit when text starts exactly on a calibrated column margin
    pub on_margin: bool,
}

impl Default for BulletExitPolicy {
    fn default() -> Self {
        Self {
            on_left_drift: true,
            on_margin: true,
        }
    }
}

/// Page selection (0-indexed pages, the title page is page 0).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page
    #[default]
    All,
    /// An inclusive page range
    Range(RangeInclusive<u32>),
    /// An explicit, sorted page list
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page should be consumed.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.binary_search(&page).is_ok(),
        }
    }

    /// Parse a selection such as "all", "0-10" or "0,3,5-7".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let number = |part: &str| -> Result<u32> {
            part.trim()
                .parse()
                .map_err(|_| Error::InvalidPageRange(s.to_string()))
        };

        if !s.contains(',') {
            if let Some((start, end)) = s.split_once('-') {
                let (start, end) = (number(start)?, number(end)?);
                if start > end {
                    return Err(Error::InvalidPageRange(s.to_string()));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            match part.split_once('-') {
                Some((start, end)) => {
                    let (start, end) = (number(start)?, number(end)?);
                    if start > end {
                        return Err(Error::InvalidPageRange(s.to_string()));
                    }
                    pages.extend(start..=end);
                }
                None => pages.push(number(part)?),
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
