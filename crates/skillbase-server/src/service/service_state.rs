//! Application state and dependency injection.

use skillbase_core::{CredentialService, PasswordStrength};
use skillbase_postgres::{PgClient, PgResult};

use crate::service::ServiceConfig;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    pg_client: PgClient,
    credentials: CredentialService,
    password_strength: PasswordStrength,
}

impl ServiceState {
    /// Initializes application state from configuration.
    ///
    /// The database pool is created lazily; running migrations is left to
    /// the binary so that state construction stays free of I/O.
    pub fn from_config(config: &ServiceConfig) -> PgResult<Self> {
        let service_state = Self {
            pg_client: config.connect_postgres()?,
            credentials: config.create_credential_service(),
            password_strength: config.create_password_strength(),
        };

        Ok(service_state)
    }

    /// Returns the database client.
    #[inline]
    pub fn pg_client(&self) -> &PgClient {
        &self.pg_client
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(pg_client: PgClient);
impl_di!(credentials: CredentialService);
impl_di!(password_strength: PasswordStrength);
