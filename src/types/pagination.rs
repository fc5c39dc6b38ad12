//! Pagination types for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};

/// Offset/limit query parameters shared by all list endpoints.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Number of records to skip
    #[serde(default)]
    pub skip: u64,
    /// Maximum number of records to return
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIST_LIMIT
}

impl ListQuery {
    /// Get limit capped at the allowed maximum
    pub fn limit(&self) -> u64 {
        self.limit.min(MAX_LIST_LIMIT)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIST_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_capped() {
        let query = ListQuery {
            skip: 0,
            limit: 10_000,
        };
        assert_eq!(query.limit(), MAX_LIST_LIMIT);
    }

    #[test]
    fn test_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit(), DEFAULT_LIST_LIMIT);
    }
}
