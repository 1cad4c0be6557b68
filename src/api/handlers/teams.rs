use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::domain::member::Member;
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{NewTeam, Team};
use crate::infrastructure::repositories::SqliteTeamRepository;

/// Create a new team
///
/// POST /api/teams
pub async fn create_team(
    State(pool): State<SqlitePool>,
    Json(req): Json<NewTeam>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    let team = team_repo.save(&req).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

/// Get a team by ID
///
/// GET /api/teams/:id
pub async fn get_team(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Team>, ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    let team = team_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team not found: {}", id)))?;

    Ok(Json(team))
}

/// List the members of a team
///
/// GET /api/teams/:id/members
pub async fn get_team_members(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let team_repo = SqliteTeamRepository::new(pool);
    if team_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found(format!("Team not found: {}", id)));
    }

    let members = team_repo.find_members(id).await?;

    Ok(Json(members))
}
