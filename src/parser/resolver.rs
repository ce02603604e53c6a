//! One-pass style calibration.
//!
//! [`StyleResolver`] scans the whole fragment corpus once, looking for the
//! first fragment whose trimmed text contains each configured anchor. The
//! signatures it finds become a read-only [`StyleTable`]; the origins found
//! for position anchors become a [`PositionTable`].

use std::collections::{BTreeMap, HashMap};

use super::config::CalibrationConfig;
use super::report::Diagnostic;
use crate::error::{Error, Result};
use crate::model::{Fragment, Origin, Position, SemanticStyle, StyleSignature};

/// Calibrated mapping from style signature to semantic style.
///
/// Built once by [`StyleResolver`]; there is no way to change it afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleTable {
    by_signature: HashMap<StyleSignature, SemanticStyle>,
    by_style: BTreeMap<SemanticStyle, StyleSignature>,
}

impl StyleTable {
    /// Look up the style of a signature.
    pub fn lookup(&self, signature: &StyleSignature) -> Option<SemanticStyle> {
        self.by_signature.get(signature).copied()
    }

    /// Check if a signature is calibrated.
    pub fn contains(&self, signature: &StyleSignature) -> bool {
        self.by_signature.contains_key(signature)
    }

    /// Signature calibrated for a style.
    pub fn signature_for(&self, style: SemanticStyle) -> Option<&StyleSignature> {
        self.by_style.get(&style)
    }

    /// Check if a style was calibrated.
    pub fn is_resolved(&self, style: SemanticStyle) -> bool {
        self.by_style.contains_key(&style)
    }

    /// Calibrated styles, in calibration order.
    pub fn styles(&self) -> impl Iterator<Item = SemanticStyle> + '_ {
        self.by_style.keys().copied()
    }

    /// Number of calibrated styles.
    pub fn len(&self) -> usize {
        self.by_style.len()
    }

    /// Check if nothing was calibrated.
    pub fn is_empty(&self) -> bool {
        self.by_style.is_empty()
    }

    // Returns the style that already owns the signature, if any.
    fn insert(&mut self, style: SemanticStyle, signature: StyleSignature) -> Option<SemanticStyle> {
        if let Some(owner) = self.by_signature.get(&signature) {
            return Some(*owner);
        }
        self.by_signature.insert(signature.clone(), style);
        self.by_style.insert(style, signature);
        None
    }
}

impl FromIterator<(SemanticStyle, StyleSignature)> for StyleTable {
    fn from_iter<I: IntoIterator<Item = (SemanticStyle, StyleSignature)>>(iter: I) -> Self {
        let mut table = StyleTable::default();
        for (style, signature) in iter {
            table.insert(style, signature);
        }
        table
    }
}

/// Calibrated page positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionTable {
    origins: BTreeMap<Position, Origin>,
}

impl PositionTable {
    /// Origin calibrated for a position.
    pub fn get(&self, position: Position) -> Option<Origin> {
        self.origins.get(&position).copied()
    }

    /// Whole-unit x column of a position.
    pub fn column(&self, position: Position) -> Option<i32> {
        self.get(position).map(|origin| origin.column())
    }

    /// Columns of every calibrated column margin.
    pub fn margin_columns(&self) -> Vec<i32> {
        self.origins
            .iter()
            .filter(|(position, _)| position.is_margin())
            .map(|(_, origin)| origin.column())
            .collect()
    }

    /// Number of calibrated positions.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Check if no position was calibrated.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

impl FromIterator<(Position, Origin)> for PositionTable {
    fn from_iter<I: IntoIterator<Item = (Position, Origin)>>(iter: I) -> Self {
        Self {
            origins: iter.into_iter().collect(),
        }
    }
}

/// Result of calibrating one document.
#[derive(Debug, Clone, Default)]
pub struct Calibration {
    /// Signature to style mapping
    pub styles: StyleTable,

    /// Position anchors
    pub positions: PositionTable,

    /// Calibration warnings
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds a [`Calibration`] from a fragment corpus.
#[derive(Debug, Clone)]
pub struct StyleResolver<'a> {
    config: &'a CalibrationConfig,
    title_page: u32,
}

impl<'a> StyleResolver<'a> {
    /// Create a resolver for a configuration.
    pub fn new(config: &'a CalibrationConfig) -> Self {
        Self {
            config,
            title_page: 0,
        }
    }

    /// Set the page skipped when searching style anchors.
    pub fn with_title_page(mut self, page: u32) -> Self {
        self.title_page = page;
        self
    }

    /// Calibrate styles and positions.
    ///
    /// Fails only when a required style has no anchor match.
    pub fn resolve(&self, fragments: &[Fragment]) -> Result<Calibration> {
        let mut calibration = Calibration::default();

        for style in SemanticStyle::ALL {
            let Some(anchor) = self.config.styles.get(&style) else {
                continue;
            };

            match self.find_signature(fragments, anchor) {
                Some(signature) => {
                    log::trace!("style {} -> {}", style, signature);
                    if let Some(owner) = calibration.styles.insert(style, signature.clone()) {
                        let message = format!(
                            "style {} shares signature {} with {}; keeping {}",
                            style, signature, owner, owner
                        );
                        log::warn!("{}", message);
                        calibration.diagnostics.push(Diagnostic::calibration(message));
                    }
                }
                None if self.config.required.contains(&style) => {
                    return Err(Error::MissingRequiredStyle {
                        style,
                        anchor: anchor.clone(),
                    });
                }
                None => {
                    let message = format!("style {} not found using '{}'", style, anchor);
                    log::warn!("{}", message);
                    calibration.diagnostics.push(Diagnostic::calibration(message));
                }
            }
        }

        if let Some(style) = self
            .config
            .required
            .iter()
            .find(|style| !calibration.styles.is_resolved(**style))
        {
            return Err(Error::MissingRequiredStyle {
                style: *style,
                anchor: String::new(),
            });
        }

        let mut origins = BTreeMap::new();
        for (position, anchor) in &self.config.positions {
            match Self::find_origin(fragments, anchor) {
                Some(origin) => {
                    log::trace!("position {} -> ({}, {})", position, origin.x, origin.y);
                    origins.insert(*position, origin);
                }
                None => {
                    let message = format!("position {} not found using '{}'", position, anchor);
                    log::warn!("{}", message);
                    calibration.diagnostics.push(Diagnostic::calibration(message));
                }
            }
        }
        calibration.positions = PositionTable { origins };

        Ok(calibration)
    }

    /// Signature of the first non-title-page fragment containing `anchor`.
    pub fn find_signature<'f>(
        &self,
        fragments: &'f [Fragment],
        anchor: &str,
    ) -> Option<&'f StyleSignature> {
        fragments
            .iter()
            .filter(|f| f.page() != self.title_page)
            .find(|f| f.trimmed().contains(anchor))
            .map(|f| &f.style)
    }

    /// Origin of the first fragment on any page containing `anchor`.
    pub fn find_origin(fragments: &[Fragment], anchor: &str) -> Option<Origin> {
        fragments
            .iter()
            .find(|f| f.trimmed().contains(anchor))
            .map(|f| f.origin)
    }
}
