// Read-only projections of member rows
// Built fresh per row; equality is field equality

use serde::{Deserialize, Serialize};

use super::Member;
use crate::domain::team::Team;

/// Member joined with its team, flattened
///
/// `team_id`/`team_name` are absent for members without a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: i64,
    pub username: Option<String>,
    pub age: i32,
    pub team_id: Option<i64>,
    pub team_name: Option<String>,
}

/// Username and age
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct MemberDto {
    pub username: Option<String>,
    pub age: i32,
}

impl MemberDto {
    pub fn new(username: Option<String>, age: i32) -> Self {
        Self { username, age }
    }
}

impl From<(Option<String>, i32)> for MemberDto {
    fn from((username, age): (Option<String>, i32)) -> Self {
        Self::new(username, age)
    }
}

/// Projection whose field names differ from the member columns
///
/// Populated by name, so the query has to alias `username AS name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserDto {
    pub name: Option<String>,
    pub age: Option<i32>,
}

/// A member and the team row it was joined to, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberWithTeam {
    pub member: Member,
    pub team: Option<Team>,
}

/// Average age per team
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TeamAgeSummary {
    pub team_name: String,
    pub average_age: f64,
    pub member_count: i64,
}

/// Member with a rank derived from its age bracket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RankedMember {
    pub username: Option<String>,
    pub age: i32,
    pub rank: i32,
}
