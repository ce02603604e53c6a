//! Calibration configuration.
//!
//! A [`CalibrationConfig`] holds everything needed to calibrate and classify
//! one document. Configuration files usually describe several document
//! families at once; [`ConfigFile::resolve`] picks one family and overlays
//! the per-document overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Position, SemanticStyle};

/// Placeholder anchor text meaning "every document must override this".
pub const MUST_OVERRIDE: &str = "MUST_OVERRIDE";

/// Resolved configuration for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Anchor substring per semantic style
    pub styles: BTreeMap<SemanticStyle, String>,

    /// Anchor substring per page position
    pub positions: BTreeMap<Position, String>,

    /// Single characters mapped straight to a semantic style
    pub character_overrides: BTreeMap<String, SemanticStyle>,

    /// Substrings that drop any fragment containing them
    pub never_allow: Vec<String>,

    /// Trimmed texts that end processing
    pub stop_sentinels: Vec<String>,

    /// Styles that must calibrate for a conversion to start
    pub required: Vec<SemanticStyle>,
}

impl CalibrationConfig {
    /// Create an empty configuration requiring only `heading1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the anchor text for a semantic style.
    pub fn with_style_anchor(mut self, style: SemanticStyle, anchor: impl Into<String>) -> Self {
        self.styles.insert(style, anchor.into());
        self
    }

    /// Set the anchor text for a page position.
    pub fn with_position_anchor(mut self, position: Position, anchor: impl Into<String>) -> Self {
        self.positions.insert(position, anchor.into());
        self
    }

    /// Map a single character to a semantic style.
    pub fn with_char_override(mut self, ch: char, style: SemanticStyle) -> Self {
        self.character_overrides.insert(ch.to_string(), style);
        self
    }

    /// Add a never-allow substring.
    pub fn with_never_allow(mut self, text: impl Into<String>) -> Self {
        self.never_allow.push(text.into());
        self
    }

    /// Add a stop sentinel.
    pub fn with_stop_sentinel(mut self, text: impl Into<String>) -> Self {
        self.stop_sentinels.push(text.into());
        self
    }

    /// Add a required style.
    pub fn with_required_style(mut self, style: SemanticStyle) -> Self {
        if !self.required.contains(&style) {
            self.required.push(style);
        }
        self
    }

    /// Replace the required styles.
    pub fn with_required_styles(mut self, styles: impl IntoIterator<Item = SemanticStyle>) -> Self {
        self.required = styles.into_iter().collect();
        self
    }

    /// Check if trimmed text is a stop sentinel.
    pub fn is_stop_sentinel(&self, trimmed: &str) -> bool {
        self.stop_sentinels.iter().any(|s| s == trimmed)
    }

    /// Check if raw text contains a never-allow substring.
    pub fn is_never_allowed(&self, text: &str) -> bool {
        self.never_allow
            .iter()
            .any(|s| !s.is_empty() && text.contains(s.as_str()))
    }

    /// Style override for a one-character text.
    pub fn char_override(&self, text: &str) -> Option<SemanticStyle> {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => self.character_overrides.get(text).copied(),
            _ => None,
        }
    }

    /// Check the configuration for structural problems.
    pub fn validate(&self) -> Result<()> {
        if self.styles.contains_key(&SemanticStyle::Unknown) {
            return Err(Error::InvalidConfig(
                "'unknown' cannot be calibrated from an anchor".to_string(),
            ));
        }

        if let Some(key) = self
            .character_overrides
            .keys()
            .find(|key| key.chars().count() != 1)
        {
            return Err(Error::InvalidConfig(format!(
                "character override '{}' must be exactly one character",
                key
            )));
        }

        if let Some((style, _)) = self.styles.iter().find(|(_, anchor)| anchor.trim().is_empty()) {
            return Err(Error::InvalidConfig(format!(
                "style '{}' has an empty anchor",
                style
            )));
        }

        Ok(())
    }

    /// Parse a resolved configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            styles: BTreeMap::new(),
            positions: BTreeMap::new(),
            character_overrides: BTreeMap::new(),
            never_allow: Vec::new(),
            stop_sentinels: Vec::new(),
            required: vec![SemanticStyle::Heading1],
        }
    }
}

/// Anchors for one document family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyConfig {
    /// Anchor per style, shared by the family
    pub styles: BTreeMap<SemanticStyle, String>,

    /// Per-document style anchor overrides, keyed by document code
    pub styles_override: BTreeMap<String, BTreeMap<SemanticStyle, String>>,

    /// Anchor per position, shared by the family
    pub positions: BTreeMap<Position, String>,

    /// Per-document position anchor overrides, keyed by document code
    pub positions_override: BTreeMap<String, BTreeMap<Position, String>>,
}

/// On-disk configuration covering several document families.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Single characters mapped straight to a semantic style
    pub character_override: BTreeMap<String, SemanticStyle>,

    /// Never-allow substrings
    #[serde(alias = "never_allow")]
    pub skip_strings: Vec<String>,

    /// Stop sentinels
    #[serde(alias = "stop_sentinels")]
    pub stop_processing: Vec<String>,

    /// Required styles; `heading1` when absent
    pub required: Option<Vec<SemanticStyle>>,

    /// Families keyed by family code
    #[serde(alias = "seasons")]
    pub families: BTreeMap<String, FamilyConfig>,
}

impl ConfigFile {
    /// Parse a configuration file from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Family code of a document code ("DDAL04-09" belongs to "DDAL04").
    pub fn family_code(document_code: &str) -> &str {
        document_code
            .split_once('-')
            .map_or(document_code, |(family, _)| family)
    }

    /// Build the configuration for one document.
    pub fn resolve(&self, document_code: &str) -> Result<CalibrationConfig> {
        let family_code = Self::family_code(document_code);
        let family = self
            .families
            .get(family_code)
            .ok_or_else(|| Error::UnknownFamily(family_code.to_string()))?;

        let mut styles = family.styles.clone();
        if let Some(overrides) = family.styles_override.get(document_code) {
            styles.extend(overrides.iter().map(|(k, v)| (*k, v.clone())));
        }
        styles.retain(|style, anchor| {
            if anchor == MUST_OVERRIDE {
                log::warn!(
                    "style {} should be overridden for {}",
                    style,
                    document_code
                );
                false
            } else {
                true
            }
        });

        let mut positions = family.positions.clone();
        if let Some(overrides) = family.positions_override.get(document_code) {
            positions.extend(overrides.iter().map(|(k, v)| (*k, v.clone())));
        }
        positions.retain(|position, anchor| {
            if anchor == MUST_OVERRIDE {
                log::warn!(
                    "position {} should be overridden for {}",
                    position,
                    document_code
                );
                false
            } else {
                true
            }
        });

        let config = CalibrationConfig {
            styles,
            positions,
            character_overrides: self.character_override.clone(),
            never_allow: self.skip_strings.clone(),
            stop_sentinels: self.stop_processing.clone(),
            required: self
                .required
                .clone()
                .unwrap_or_else(|| vec![SemanticStyle::Heading1]),
        };
        config.validate()?;
        Ok(config)
    }
}
