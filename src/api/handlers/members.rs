use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::api::errors::ApiError;
use crate::domain::member::{
    Member, MemberSearchCondition, MemberTeamDto, NewMember, Page, PageRequest,
};
use crate::domain::repositories::MemberRepository;
use crate::infrastructure::repositories::SqliteMemberRepository;

const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Query string for the paged search
///
/// Fields are spelled out rather than flattened from
/// `MemberSearchCondition`; flattened numbers do not survive
/// urlencoded deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPageParams {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

impl SearchPageParams {
    fn into_parts(self) -> (MemberSearchCondition, PageRequest) {
        let condition = MemberSearchCondition {
            username: self.username,
            team_name: self.team_name,
            age_goe: self.age_goe,
            age_loe: self.age_loe,
        };
        let page = PageRequest::new(
            self.offset.unwrap_or(0),
            self.limit.unwrap_or(DEFAULT_PAGE_LIMIT),
        );
        (condition, page)
    }
}

/// Search members
///
/// GET /api/members?username=&teamName=&ageGoe=&ageLoe=
pub async fn search_members(
    State(pool): State<SqlitePool>,
    Query(condition): Query<MemberSearchCondition>,
) -> Result<Json<Vec<MemberTeamDto>>, ApiError> {
    let member_repo = SqliteMemberRepository::new(pool);
    let rows = member_repo.search(&condition).await?;

    Ok(Json(rows))
}

/// Search members one window at a time
///
/// GET /api/members/page?...&offset=&limit=
pub async fn search_members_page(
    State(pool): State<SqlitePool>,
    Query(params): Query<SearchPageParams>,
) -> Result<Json<Page<MemberTeamDto>>, ApiError> {
    let (condition, page) = params.into_parts();

    let member_repo = SqliteMemberRepository::new(pool);
    let result = member_repo.search_page_with_total(&condition, &page).await?;

    Ok(Json(result))
}

/// Create a member
///
/// POST /api/members
pub async fn create_member(
    State(pool): State<SqlitePool>,
    Json(req): Json<NewMember>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    let member_repo = SqliteMemberRepository::new(pool);
    let member = member_repo.save(&req).await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Get a member by ID
///
/// GET /api/members/:id
pub async fn get_member(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
) -> Result<Json<Member>, ApiError> {
    let member_repo = SqliteMemberRepository::new(pool);
    let member = member_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: {}", id)))?;

    Ok(Json(member))
}
