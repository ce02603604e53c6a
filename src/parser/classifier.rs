//! Fragment classification.
//!
//! [`classify_style`] is the stateless part: the same signature on the same
//! side of the title page always yields the same style. [`FragmentClassifier`]
//! wraps it with the stream-level rules (stop sentinels, never-allow text,
//! leading page noise, duplicate suppression) that need to remember what came
//! before.

use super::config::CalibrationConfig;
use super::resolver::StyleTable;
use crate::model::{Fragment, SemanticStyle, StyleSignature};

/// Why a fragment was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Contains a never-allow substring
    NeverAllow,
    /// Blank or uncalibrated text before a page's first real content
    LeadingNoise,
    /// Non-empty text with an uncalibrated signature
    UnknownStyle,
    /// Blank uncalibrated text at the start of a page
    PageStartBlank,
    /// Same raw text as the previous kept fragment
    Duplicate,
}

/// Outcome of classifying one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Hand the fragment to the builder with this style
    Keep(SemanticStyle),
    /// Discard the fragment
    Drop(DropReason),
    /// Stop consuming the stream
    Stop,
}

impl Classification {
    /// Style of a kept fragment.
    pub fn style(&self) -> Option<SemanticStyle> {
        match self {
            Classification::Keep(style) => Some(*style),
            _ => None,
        }
    }
}

/// Style of a title-page fragment, judged by font name alone.
pub fn title_page_style(signature: &StyleSignature) -> SemanticStyle {
    SemanticStyle::body(signature.font_is_bold(), signature.font_is_italic())
}

/// Assign a semantic style to a fragment.
pub fn classify_style(
    fragment: &Fragment,
    table: &StyleTable,
    config: &CalibrationConfig,
    title_page: u32,
) -> SemanticStyle {
    if fragment.page() == title_page {
        return title_page_style(&fragment.style);
    }

    if let Some(style) = config.char_override(&fragment.text) {
        return style;
    }

    table
        .lookup(&fragment.style)
        .unwrap_or(SemanticStyle::Unknown)
}

/// Stateful classifier applying stream-level rules in document order.
#[derive(Debug)]
pub struct FragmentClassifier<'a> {
    table: &'a StyleTable,
    config: &'a CalibrationConfig,
    title_page: u32,
    dedupe: bool,
    page: Option<u32>,
    in_leading_noise: bool,
    at_page_start: bool,
    previous_text: Option<String>,
    stopped: bool,
}

impl<'a> FragmentClassifier<'a> {
    /// Create a classifier over a calibrated table.
    pub fn new(table: &'a StyleTable, config: &'a CalibrationConfig) -> Self {
        Self {
            table,
            config,
            title_page: 0,
            dedupe: true,
            page: None,
            in_leading_noise: false,
            at_page_start: true,
            previous_text: None,
            stopped: false,
        }
    }

    /// Set the title page index.
    pub fn with_title_page(mut self, page: u32) -> Self {
        self.title_page = page;
        self
    }

    /// Enable or disable consecutive duplicate suppression.
    pub fn with_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe = enabled;
        self
    }

    /// Check if a stop sentinel has been seen.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Classify the next fragment of the stream.
    pub fn classify(&mut self, fragment: &Fragment) -> Classification {
        if self.stopped {
            return Classification::Stop;
        }

        self.enter_page(fragment.page());

        if self.config.is_stop_sentinel(fragment.trimmed()) {
            log::debug!("stop sentinel '{}' at {}", fragment.trimmed(), fragment.location);
            self.stopped = true;
            return Classification::Stop;
        }

        if self.config.is_never_allowed(&fragment.text) {
            return Classification::Drop(DropReason::NeverAllow);
        }

        if self.in_leading_noise {
            if fragment.is_blank() || !self.table.contains(&fragment.style) {
                return Classification::Drop(DropReason::LeadingNoise);
            }
            self.in_leading_noise = false;
        }

        let style = classify_style(fragment, self.table, self.config, self.title_page);
        if style == SemanticStyle::Unknown {
            if !fragment.is_blank() {
                return Classification::Drop(DropReason::UnknownStyle);
            }
            if self.at_page_start {
                return Classification::Drop(DropReason::PageStartBlank);
            }
        }

        if self.dedupe && self.previous_text.as_deref() == Some(fragment.text.as_str()) {
            return Classification::Drop(DropReason::Duplicate);
        }

        log::trace!("{} {} '{}'", fragment.location, style, fragment.text);
        self.at_page_start = false;
        self.previous_text = Some(fragment.text.clone());
        Classification::Keep(style)
    }

    fn enter_page(&mut self, page: u32) {
        if self.page == Some(page) {
            return;
        }
        self.page = Some(page);
        self.in_leading_noise = page != self.title_page;
        self.at_page_start = true;
    }
}
