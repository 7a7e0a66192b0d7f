//! User registration and account management handlers.
//!
//! Registration validates the request shape, runs the password strength
//! pipeline against the submitted user attributes, and hashes the password
//! on a blocking worker before anything touches the database. Password
//! verification opportunistically re-creates hashes produced under
//! outdated cost parameters.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use skillbase_core::{CredentialService, PasswordStrength, UserAttributes};
use skillbase_postgres::PgClient;
use skillbase_postgres::models;
use skillbase_postgres::queries::UserRepository;
use time::OffsetDateTime;
use uuid::Uuid;

use super::request::{ListParams, RegisterUser, UpdateUser, VerifyPassword};
use super::response::User;
use crate::extract::{Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for user operations.
const TRACING_TARGET: &str = "skillbase_server::handler::users";

/// Registers a new user.
#[tracing::instrument(skip_all)]
async fn register_user(
    State(pg_client): State<PgClient>,
    State(credentials): State<CredentialService>,
    State(password_strength): State<PasswordStrength>,
    ValidateJson(request): ValidateJson<RegisterUser>,
) -> Result<(StatusCode, Json<User>)> {
    let username = request.username.to_lowercase();
    let email_address = request.email_address.to_lowercase();

    tracing::trace!(
        target: TRACING_TARGET,
        username = %username,
        "registering user"
    );

    let attributes = UserAttributes {
        username: Some(&username),
        email: Some(&email_address),
        first_name: Some(&request.first_name),
        last_name: Some(&request.last_name),
    };
    password_strength.validate(&request.password, &attributes)?;

    let password_hash = hash_password(&credentials, request.password).await?;

    let new_user = models::NewUser {
        username,
        email_address,
        first_name: request.first_name,
        last_name: request.last_name,
        password_hash,
        is_superuser: false,
        is_staff: false,
        is_active: true,
        joined_at: None,
    };

    let mut conn = pg_client.get_connection().await?;
    let user = UserRepository::create_user(&mut conn, new_user).await?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        username = %user.username,
        "user registered"
    );

    Ok((StatusCode::CREATED, Json(User::from_model(user))))
}

/// Retrieves a user by ID.
#[tracing::instrument(skip_all)]
async fn get_user(
    State(pg_client): State<PgClient>,
    Path(user_id): Path<Uuid>,
) -> Result<(StatusCode, Json<User>)> {
    let mut conn = pg_client.get_connection().await?;
    let Some(user) = UserRepository::find_user_by_id(&mut conn, user_id).await? else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {user_id}")));
    };

    Ok((StatusCode::OK, Json(User::from_model(user))))
}

/// Lists users ordered by registration date.
#[tracing::instrument(skip_all)]
async fn list_users(
    State(pg_client): State<PgClient>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Vec<User>>)> {
    let mut conn = pg_client.get_connection().await?;
    let users = UserRepository::list_users(&mut conn, params.into()).await?;

    let users = users.into_iter().map(User::from_model).collect();
    Ok((StatusCode::OK, Json(users)))
}

/// Updates a user.
#[tracing::instrument(skip_all)]
async fn update_user(
    State(pg_client): State<PgClient>,
    State(credentials): State<CredentialService>,
    State(password_strength): State<PasswordStrength>,
    Path(user_id): Path<Uuid>,
    ValidateJson(request): ValidateJson<UpdateUser>,
) -> Result<(StatusCode, Json<User>)> {
    tracing::trace!(
        target: TRACING_TARGET,
        user_id = %user_id,
        has_password = request.password.is_some(),
        "updating user"
    );

    let mut conn = pg_client.get_connection().await?;
    let Some(current) = UserRepository::find_user_by_id(&mut conn, user_id).await? else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {user_id}")));
    };

    if request.is_empty() {
        return Ok((StatusCode::OK, Json(User::from_model(current))));
    }

    let username = request.username.map(|u| u.to_lowercase());
    let email_address = request.email_address.map(|e| e.to_lowercase());

    // The strength pipeline compares against the attribute values the user
    // will have after this update, not the ones being replaced.
    let password_hash = if let Some(password) = request.password {
        let attributes = UserAttributes {
            username: Some(username.as_deref().unwrap_or(&current.username)),
            email: Some(email_address.as_deref().unwrap_or(&current.email_address)),
            first_name: Some(request.first_name.as_deref().unwrap_or(&current.first_name)),
            last_name: Some(request.last_name.as_deref().unwrap_or(&current.last_name)),
        };
        password_strength.validate(&password, &attributes)?;

        Some(hash_password(&credentials, password).await?)
    } else {
        None
    };

    let updates = models::UpdateUser {
        username,
        email_address,
        first_name: request.first_name,
        last_name: request.last_name,
        password_hash,
        ..Default::default()
    };

    let Some(user) = UserRepository::update_user(&mut conn, user_id, updates).await? else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {user_id}")));
    };

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "user updated"
    );

    Ok((StatusCode::OK, Json(User::from_model(user))))
}

/// Deletes a user.
#[tracing::instrument(skip_all)]
async fn delete_user(
    State(pg_client): State<PgClient>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode> {
    let mut conn = pg_client.get_connection().await?;
    let Some(user) = UserRepository::delete_user(&mut conn, user_id).await? else {
        return Err(ErrorKind::NotFound
            .with_resource("user")
            .with_message("User not found")
            .with_context(format!("User ID: {user_id}")));
    };

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "user deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}

/// Verifies a user's password.
///
/// On success the stored hash is opportunistically re-created when it was
/// produced under cost parameters weaker than the current deployment's,
/// and the login timestamp is recorded. Verification failures and unknown
/// user IDs are indistinguishable to the caller.
#[tracing::instrument(skip_all)]
async fn verify_password(
    State(pg_client): State<PgClient>,
    State(credentials): State<CredentialService>,
    Path(user_id): Path<Uuid>,
    Json(request): Json<VerifyPassword>,
) -> Result<(StatusCode, Json<User>)> {
    let mut conn = pg_client.get_connection().await?;
    let user = UserRepository::find_user_by_id(&mut conn, user_id).await?;

    let Some(user) = user else {
        // Burn the same hashing work as a real verification so that
        // unknown IDs are not distinguishable by response time.
        let password = request.password;
        let creds = credentials.clone();
        let _ = run_hashing(move || creds.make(Some(&password), None)).await;

        return Err(unauthorized());
    };

    let stored_hash = user.password_hash.clone();
    let password = request.password;
    let creds = credentials.clone();
    let outcome = run_hashing(move || {
        if !creds.check(Some(&password), &stored_hash) {
            return Ok(None);
        }

        // Re-hash under current parameters while the plaintext is at hand.
        let rehashed = creds
            .must_update(&stored_hash)
            .then(|| creds.make(Some(&password), None))
            .transpose()?;
        Ok(Some(rehashed))
    })
    .await?;

    let Some(rehashed) = outcome else {
        tracing::debug!(
            target: TRACING_TARGET,
            user_id = %user.id,
            "password verification failed"
        );
        return Err(unauthorized());
    };

    let now = OffsetDateTime::now_utc();
    let updated = match rehashed {
        Some(password_hash) => {
            tracing::info!(
                target: TRACING_TARGET,
                user_id = %user.id,
                "stored hash re-created under current parameters"
            );

            let updates = models::UpdateUser {
                password_hash: Some(password_hash),
                last_login_at: Some(now),
                ..Default::default()
            };
            UserRepository::update_user(&mut conn, user.id, updates).await?
        }
        None => UserRepository::record_login(&mut conn, user.id, now).await?,
    };

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %user.id,
        "password verified"
    );

    // The row can only vanish if the user was deleted mid-verification.
    let user = updated.ok_or_else(unauthorized)?;
    Ok((StatusCode::OK, Json(User::from_model(user))))
}

/// Hashes a password on a blocking worker.
///
/// Argon2id is deliberately slow and memory-hard; running it inline would
/// stall the async executor.
async fn hash_password(credentials: &CredentialService, password: String) -> Result<String> {
    let credentials = credentials.clone();
    run_hashing(move || credentials.make(Some(&password), None)).await
}

/// Runs a memory-hard credential computation on the blocking pool.
async fn run_hashing<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> std::result::Result<T, skillbase_core::CredentialError> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(f).await.map_err(|error| {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "credential worker task failed"
        );
        ErrorKind::InternalServerError.into_error()
    })?;

    result.map_err(Into::into)
}

/// Builds the uniform authentication failure response.
fn unauthorized() -> crate::handler::Error<'static> {
    ErrorKind::Unauthorized
        .with_message("Authentication failed")
        .with_resource("user")
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/users", post(register_user).get(list_users))
        .route(
            "/users/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .route("/users/{id}/verify-password", post(verify_password))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn register_rejects_malformed_payloads() -> anyhow::Result<()> {
        let server = create_test_server()?;

        // Missing fields fail deserialization before any database access.
        let response = server
            .post("/users")
            .json(&json!({ "username": "snowball99" }))
            .await;
        response.assert_status_bad_request();

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_weak_passwords_before_storage() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let payload = json!({
            "username": "snowball99",
            "emailAddress": "maria@example.com",
            "firstName": "Maria",
            "lastName": "Gonzalez",
            "password": "1029384756"
        });

        let response = server.post("/users").json(&payload).await;
        response.assert_status_bad_request();
        response.assert_text_contains("entirely numeric");

        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_passwords_matching_the_username() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let payload = json!({
            "username": "snowball99x",
            "emailAddress": "maria@example.com",
            "firstName": "Maria",
            "lastName": "Gonzalez",
            "password": "Snowball99x"
        });

        let response = server.post("/users").json(&payload).await;
        response.assert_status_bad_request();
        response.assert_text_contains("too similar");

        Ok(())
    }

    #[tokio::test]
    async fn malformed_user_ids_are_rejected() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.get("/users/not-a-uuid").await;
        response.assert_status_bad_request();

        Ok(())
    }
}
