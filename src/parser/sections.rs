//! Hierarchical section numbering for story names.

/// Three-level section counter: `[major, minor, patch]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionCounter {
    levels: [u32; 3],
}

impl SectionCounter {
    /// Create a counter at `[0, 0, 0]`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump `level` (0, 1 or 2) and zero every level below it.
    ///
    /// Levels past the last are clamped to the last.
    pub fn increment(&mut self, level: usize) {
        let level = level.min(self.levels.len() - 1);
        self.levels[level] += 1;
        for lower in &mut self.levels[level + 1..] {
            *lower = 0;
        }
    }

    /// Current counter values.
    pub fn levels(&self) -> [u32; 3] {
        self.levels
    }

    /// Rendered label, e.g. "01", "01.02" or "01.02.03".
    pub fn label(&self) -> String {
        let depth = self
            .levels
            .iter()
            .rposition(|&n| n != 0)
            .map_or(1, |last| last + 1);

        self.levels[..depth]
            .iter()
            .map(|n| format!("{:02}", n))
            .collect::<Vec<_>>()
            .join(".")
    }
}
