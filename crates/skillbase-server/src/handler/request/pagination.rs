//! Pagination query parameters for list endpoints.

use serde::{Deserialize, Serialize};
use skillbase_postgres::queries::Pagination;

/// Largest page size a client may request.
const MAX_LIMIT: i64 = 100;

/// Limit/offset query parameters for list endpoints.
#[must_use]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// Maximum number of rows to return (1-100).
    pub limit: Option<i64>,
    /// Number of rows to skip.
    pub offset: Option<i64>,
}

impl From<ListParams> for Pagination {
    fn from(params: ListParams) -> Self {
        let defaults = Pagination::default();
        Self {
            limit: params.limit.unwrap_or(defaults.limit).clamp(1, MAX_LIMIT),
            offset: params.offset.unwrap_or(defaults.offset).max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_values() {
        let params = ListParams {
            limit: Some(1000),
            offset: Some(-5),
        };
        let pagination = Pagination::from(params);

        assert_eq!(pagination.limit, 100);
        assert_eq!(pagination.offset, 0);
    }

    #[test]
    fn defaults_apply_when_absent() {
        let pagination = Pagination::from(ListParams::default());

        assert_eq!(pagination.limit, Pagination::default().limit);
        assert_eq!(pagination.offset, 0);
    }
}
