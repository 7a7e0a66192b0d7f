//! Skill catalog handlers.

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use skillbase_postgres::PgClient;
use skillbase_postgres::models;
use skillbase_postgres::queries::SkillRepository;
use uuid::Uuid;

use super::request::{CreateSkill, ListParams};
use super::response::Skill;
use crate::extract::{Json, ValidateJson};
use crate::handler::{ErrorKind, Result};
use crate::service::ServiceState;

/// Tracing target for skill operations.
const TRACING_TARGET: &str = "skillbase_server::handler::skills";

/// Creates a new skill.
#[tracing::instrument(skip_all)]
async fn create_skill(
    State(pg_client): State<PgClient>,
    ValidateJson(request): ValidateJson<CreateSkill>,
) -> Result<(StatusCode, Json<Skill>)> {
    let new_skill = models::NewSkill {
        name: request.name,
    };

    let mut conn = pg_client.get_connection().await?;
    let skill = SkillRepository::create_skill(&mut conn, new_skill).await?;

    tracing::info!(
        target: TRACING_TARGET,
        skill_id = %skill.id,
        name = %skill.name,
        "skill created"
    );

    Ok((StatusCode::CREATED, Json(Skill::from_model(skill))))
}

/// Retrieves a skill by ID.
#[tracing::instrument(skip_all)]
async fn get_skill(
    State(pg_client): State<PgClient>,
    Path(skill_id): Path<Uuid>,
) -> Result<(StatusCode, Json<Skill>)> {
    let mut conn = pg_client.get_connection().await?;
    let Some(skill) = SkillRepository::find_skill_by_id(&mut conn, skill_id).await? else {
        return Err(ErrorKind::NotFound
            .with_resource("skill")
            .with_message("Skill not found")
            .with_context(format!("Skill ID: {skill_id}")));
    };

    Ok((StatusCode::OK, Json(Skill::from_model(skill))))
}

/// Lists skills in alphabetical order.
#[tracing::instrument(skip_all)]
async fn list_skills(
    State(pg_client): State<PgClient>,
    Query(params): Query<ListParams>,
) -> Result<(StatusCode, Json<Vec<Skill>>)> {
    let mut conn = pg_client.get_connection().await?;
    let skills = SkillRepository::list_skills(&mut conn, params.into()).await?;

    let skills = skills.into_iter().map(Skill::from_model).collect();
    Ok((StatusCode::OK, Json(skills)))
}

/// Returns a [`Router`] with all related routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/skills", post(create_skill).get(list_skills))
        .route("/skills/{id}", get(get_skill))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn create_rejects_out_of_bounds_names() -> anyhow::Result<()> {
        let server = create_test_server()?;

        let response = server.post("/skills").json(&json!({ "name": "a" })).await;
        response.assert_status_bad_request();

        let response = server
            .post("/skills")
            .json(&json!({ "name": "x".repeat(65) }))
            .await;
        response.assert_status_bad_request();

        Ok(())
    }
}
