//! Health monitoring response types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Health status of the API server.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether the server considers itself healthy.
    pub is_healthy: bool,
    /// Current number of database connections in the pool.
    pub pool_size: usize,
    /// Number of idle database connections available.
    pub pool_available: usize,
    /// Timestamp of this health snapshot.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
