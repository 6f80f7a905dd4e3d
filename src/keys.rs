//! Cache Key Conventions
//!
//! Keys are a resource name followed by colon-separated qualifiers, with
//! [`UNSET`] standing in for a filter the caller did not provide:
//!
//! ```
//! use ciprel_cache::keys;
//!
//! assert_eq!(keys::workshops(None), "workshop:all");
//! assert_eq!(keys::quiz_results(Some("u1"), None), "quiz_results:u1:all");
//! ```
//!
//! The store itself treats keys as opaque strings.

use std::fmt::Display;

/// Qualifier used when a filter is not set.
pub const UNSET: &str = "all";

// == Cache Key Builder ==
/// Builds a `resource:qualifier:...` key.
#[derive(Debug, Clone)]
pub struct CacheKey {
    key: String,
}

impl CacheKey {
    pub fn new(resource: &str) -> Self {
        Self {
            key: resource.to_string(),
        }
    }

    /// Appends a qualifier, or [`UNSET`] when it is `None`.
    pub fn part<T: Display>(mut self, value: Option<T>) -> Self {
        self.key.push(':');
        match value {
            Some(value) => self.key.push_str(&value.to_string()),
            None => self.key.push_str(UNSET),
        }
        self
    }

    /// Pattern matching every key of this resource.
    pub fn resource_pattern(resource: &str) -> String {
        format!("{}:*", resource)
    }

    pub fn build(self) -> String {
        self.key
    }
}

// == Resource Keys ==
pub const WORKSHOP: &str = "workshop";
pub const METIER: &str = "metier";
pub const VIDEOS: &str = "videos";
pub const PROFILES: &str = "profiles";
pub const QUIZ_RESULTS: &str = "quiz_results";
pub const READING_PROGRESS: &str = "reading_progress";

/// Workshops, optionally filtered by métier.
pub fn workshops(metier_id: Option<&str>) -> String {
    CacheKey::new(WORKSHOP).part(metier_id).build()
}

pub fn metier(metier_id: &str) -> String {
    CacheKey::new(METIER).part(Some(metier_id)).build()
}

/// Videos, optionally filtered by workshop.
pub fn videos(workshop_id: Option<&str>) -> String {
    CacheKey::new(VIDEOS).part(workshop_id).build()
}

pub fn profile(user_id: &str) -> String {
    CacheKey::new(PROFILES).part(Some(user_id)).build()
}

/// Quiz results filtered by user and by workshop.
pub fn quiz_results(user_id: Option<&str>, workshop_id: Option<&str>) -> String {
    CacheKey::new(QUIZ_RESULTS)
        .part(user_id)
        .part(workshop_id)
        .build()
}

pub fn reading_progress(user_id: &str) -> String {
    CacheKey::new(READING_PROGRESS).part(Some(user_id)).build()
}

/// Every quiz-result key of one user, whatever the workshop filter.
pub fn quiz_results_pattern(user_id: &str) -> String {
    format!("{}:{}:*", QUIZ_RESULTS, user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::KeyPattern;

    #[test]
    fn test_unset_qualifier_uses_sentinel() {
        assert_eq!(workshops(None), "workshop:all");
        assert_eq!(videos(None), "videos:all");
        assert_eq!(quiz_results(None, None), "quiz_results:all:all");
    }

    #[test]
    fn test_set_qualifiers() {
        assert_eq!(workshops(Some("3")), "workshop:3");
        assert_eq!(metier("1"), "metier:1");
        assert_eq!(profile("abc"), "profiles:abc");
        assert_eq!(quiz_results(Some("u1"), Some("w2")), "quiz_results:u1:w2");
        assert_eq!(reading_progress("u1"), "reading_progress:u1");
    }

    #[test]
    fn test_builder_accepts_display_values() {
        let key = CacheKey::new("quiz_results").part(Some(42)).part(None::<u32>).build();
        assert_eq!(key, "quiz_results:42:all");
    }

    #[test]
    fn test_resource_pattern_covers_resource_keys() {
        let pattern = KeyPattern::compile(&CacheKey::resource_pattern(WORKSHOP)).unwrap();

        assert!(pattern.matches(&workshops(None)));
        assert!(pattern.matches(&workshops(Some("7"))));
        assert!(!pattern.matches(&metier("7")));
    }

    #[test]
    fn test_quiz_results_pattern() {
        let pattern = KeyPattern::compile(&quiz_results_pattern("u1")).unwrap();

        assert!(pattern.matches(&quiz_results(Some("u1"), None)));
        assert!(pattern.matches(&quiz_results(Some("u1"), Some("w2"))));
        assert!(!pattern.matches(&quiz_results(Some("u2"), None)));
        assert!(!pattern.matches(&profile("u1")));
    }
}
