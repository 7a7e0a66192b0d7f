//! Embedded schema migrations.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

impl PgClient {
    /// Runs all pending embedded migrations on the database.
    ///
    /// The diesel migration harness is synchronous, so the run happens on a
    /// blocking worker over an [`AsyncConnectionWrapper`].
    ///
    /// # Errors
    ///
    /// Returns [`PgError::Migration`] if any migration fails to apply.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_MIGRATION)]
    pub async fn run_pending_migrations(&self) -> PgResult<Vec<String>> {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            "starting database migration process"
        );

        let start_time = Instant::now();
        let conn = self.get_connection().await?;
        let mut conn: AsyncConnectionWrapper<_> = conn.into();

        let results = spawn_blocking(move || {
            conn.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.iter().map(ToString::to_string).collect::<Vec<_>>())
        })
        .await;

        let duration = start_time.elapsed();
        let versions = results
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET_MIGRATION,
                    duration = ?duration,
                    error = %err,
                    "migration task panicked"
                );
                PgError::Migration(err.into())
            })?
            .map_err(|err| {
                tracing::error!(
                    target: TRACING_TARGET_MIGRATION,
                    duration = ?duration,
                    error = &err,
                    "database migration process failed"
                );
                PgError::Migration(err)
            })?;

        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            migrations_count = versions.len(),
            "database migration process completed successfully"
        );

        Ok(versions)
    }
}
