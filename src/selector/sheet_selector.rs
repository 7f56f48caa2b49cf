use crate::error::Result;
use crate::selector::glob_pattern::GlobPattern;

/// Ordered, non-empty set of sheet-name globs combined with OR semantics.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<GlobPattern>,
}

impl PatternSet {
    pub const MATCH_ALL: &'static str = "*";

    /// Compile every pattern. An empty list yields the match-all set.
    pub fn parse<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::default());
        }

        let patterns = patterns
            .iter()
            .map(|p| GlobPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// True only for the exact set `["*"]`.
    pub fn is_match_all(&self) -> bool {
        self.patterns.len() == 1 && self.patterns[0].as_str() == Self::MATCH_ALL
    }

    pub fn matches(&self, sheet_name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(sheet_name))
    }

    /// Keep the sheets matched by at least one pattern, in workbook order.
    pub fn select<S: AsRef<str>>(&self, sheet_names: &[S]) -> Vec<String> {
        if self.is_match_all() {
            return sheet_names.iter().map(|s| s.as_ref().to_string()).collect();
        }

        sheet_names
            .iter()
            .map(|s| s.as_ref())
            .filter(|name| self.matches(name))
            .map(str::to_string)
            .collect()
    }

    pub fn sources(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.as_str().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        let match_all = GlobPattern::new(Self::MATCH_ALL)
            .unwrap_or_else(|_| unreachable!("'*' always compiles"));
        Self {
            patterns: vec![match_all],
        }
    }
}

impl std::fmt::Display for PatternSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sources().join(", "))
    }
}

pub fn select_sheets<S: AsRef<str>>(sheet_names: &[S], patterns: &PatternSet) -> Vec<String> {
    patterns.select(sheet_names)
}
