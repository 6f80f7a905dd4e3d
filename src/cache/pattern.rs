//! Key Pattern Module
//!
//! Glob-style matching over cache keys, used for bulk invalidation.
//!
//! `*` matches any run of characters (including none). Every other character
//! is literal, so keys containing regex metacharacters such as `.` or `(`
//! never change the meaning of a pattern. Patterns are anchored to the whole
//! key.

use regex::Regex;

// == Key Pattern ==
/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    source: String,
    regex: Regex,
}

impl KeyPattern {
    // == Compile ==
    /// Compiles a `*`-wildcard pattern.
    ///
    /// Fails only when the resulting expression exceeds the regex engine's
    /// size limit.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let body = pattern
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");
        let regex = Regex::new(&format!("^{}$", body))?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    // == Matches ==
    /// Returns true if the whole key matches the pattern.
    pub fn matches(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }

    /// The pattern as written by the caller.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}
