//! Text cleanup for rendered story text.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization and whitespace only
    Minimal,
    /// Standard cleanup: NFC, ligatures, replacement characters, hyphenation
    #[default]
    Standard,
    /// Aggressive cleanup: standard plus bullet and private-use cleanup
    Aggressive,
}

/// Options for text cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Fix ligatures (ﬁ, ﬂ, etc.)
    pub fix_ligatures: bool,

    /// Standardize bullet characters (●, ○, ■ → •)
    pub standardize_bullets: bool,

    /// Remove Private Use Area characters (decorative dingbat fonts)
    pub remove_pua: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Join words hyphenated across fragment or line breaks
    pub fix_hyphenation: bool,

    /// Collapse runs of spaces and trim line ends
    pub normalize_whitespace: bool,

    /// Maximum consecutive newlines (0 = unlimited)
    pub max_consecutive_newlines: u8,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: false,
            standardize_bullets: false,
            remove_pua: false,
            remove_replacement_char: false,
            fix_hyphenation: false,
            normalize_whitespace: true,
            max_consecutive_newlines: 0,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            fix_ligatures: true,
            standardize_bullets: false,
            remove_pua: false,
            remove_replacement_char: true,
            fix_hyphenation: true,
            normalize_whitespace: true,
            max_consecutive_newlines: 2,
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            standardize_bullets: true,
            remove_pua: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

const LIGATURES: [(&str, &str); 7] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
    ("\u{FB05}", "st"),
    ("\u{FB06}", "st"),
];

const BULLETS: [char; 10] = ['●', '○', '■', '□', '◆', '◇', '▪', '▫', '►', '▻'];

/// Text cleanup pipeline.
#[derive(Debug, Clone)]
pub struct CleanupPipeline {
    options: CleanupOptions,
    hyphenation: Regex,
    spaces: Regex,
    newlines: Option<Regex>,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Result<Self> {
        let newlines = match options.max_consecutive_newlines {
            0 => None,
            max => Some(compile(&format!(r"\n{{{},}}", max as usize + 1))?),
        };

        Ok(Self {
            hyphenation: compile(r"([a-zA-Z])-(?:[ \t]*\n[ \t]*|[ \t]+)([a-z])")?,
            // Tabs separate table cells and are left alone.
            spaces: compile(r" {2,}")?,
            newlines,
            options,
        })
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Result<Self> {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = text.to_string();

        if self.options.normalize_unicode {
            result = result.nfc().collect();
        }

        if self.options.fix_ligatures {
            for (ligature, replacement) in LIGATURES {
                result = result.replace(ligature, replacement);
            }
        }

        if self.options.standardize_bullets {
            result = result.replace(&BULLETS[..], "•");
        }

        if self.options.remove_pua {
            result.retain(|c| !is_private_use(c));
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.fix_hyphenation {
            result = self.hyphenation.replace_all(&result, "$1$2").into_owned();
        }

        if self.options.normalize_whitespace {
            result = self.spaces.replace_all(&result, " ").into_owned();
            result = result
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n");
        }

        if let Some(newlines) = &self.newlines {
            let replacement = "\n".repeat(self.options.max_consecutive_newlines as usize);
            result = newlines.replace_all(&result, replacement.as_str()).into_owned();
        }

        result.trim().to_string()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Render(format!("invalid cleanup pattern: {}", e)))
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}
