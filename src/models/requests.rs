//! Request DTOs for the admin API
//!
//! Defines the query parameters accepted by the cache endpoints.

use serde::Deserialize;

/// Query string for `GET /api/cache` and `DELETE /api/cache`
///
/// # Fields
/// - `secret`: Shared secret, checked only in production mode
/// - `pattern`: Wildcard pattern to invalidate (DELETE only; absent = clear all)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheAdminQuery {
    #[serde(default)]
    pub secret: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl CacheAdminQuery {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match &self.pattern {
            Some(pattern) if pattern.is_empty() => Some("Pattern cannot be empty".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_deserialize_empty() {
        let query: CacheAdminQuery = serde_json::from_str("{}").unwrap();
        assert!(query.secret.is_none());
        assert!(query.pattern.is_none());
    }

    #[test]
    fn test_query_deserialize_fields() {
        let json = r#"{"secret": "s3cret", "pattern": "workshop:*"}"#;
        let query: CacheAdminQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.secret.as_deref(), Some("s3cret"));
        assert_eq!(query.pattern.as_deref(), Some("workshop:*"));
    }

    #[test]
    fn test_validate_empty_pattern() {
        let query = CacheAdminQuery {
            pattern: Some(String::new()),
            ..Default::default()
        };
        assert!(query.validate().is_some());
    }

    #[test]
    fn test_validate_valid_query() {
        let query = CacheAdminQuery {
            secret: None,
            pattern: Some("metier:*".to_string()),
        };
        assert!(query.validate().is_none());
        assert!(CacheAdminQuery::default().validate().is_none());
    }
}
