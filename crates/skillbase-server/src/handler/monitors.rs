//! System health monitoring handlers.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use skillbase_postgres::PgClient;
use time::OffsetDateTime;

use super::response::HealthStatus;
use crate::extract::Json;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "skillbase_server::handler::monitors";

/// Reports the health of the API server.
///
/// Reads pool statistics without touching the database, so the endpoint
/// stays responsive even while the pool is saturated.
#[tracing::instrument(skip_all)]
async fn health_status(
    State(pg_client): State<PgClient>,
) -> Result<(StatusCode, Json<HealthStatus>)> {
    let pool_status = pg_client.pool_status();

    let response = HealthStatus {
        is_healthy: true,
        pool_size: pool_status.size,
        pool_available: pool_status.available,
        updated_at: OffsetDateTime::now_utc(),
    };

    tracing::debug!(
        target: TRACING_TARGET,
        pool_size = pool_status.size,
        pool_available = pool_status.available,
        "health status reported"
    );

    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all health monitoring routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_endpoint_reports_healthy() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let status = response.json::<HealthStatus>();
        assert!(status.is_healthy);

        Ok(())
    }

    #[tokio::test]
    async fn health_timestamp_is_recent() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/health").await;
        let status = response.json::<HealthStatus>();

        let age = OffsetDateTime::now_utc() - status.updated_at;
        assert!(age.whole_seconds() < 60);

        Ok(())
    }
}
