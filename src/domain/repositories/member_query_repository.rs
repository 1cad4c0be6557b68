use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::member::{
    Member, MemberDto, MemberWithTeam, RankedMember, SortOrder, TeamAgeSummary, UserDto,
};

/// Catalogue of member queries beyond condition search
///
/// Joins, subqueries, projections, CASE expressions, SQL functions and
/// bulk mutations over the member/team schema. Unless a method says
/// otherwise, list results are ordered by member ID.
#[async_trait]
pub trait MemberQueryRepository: Send + Sync {
    // ===== Ordering =====

    /// Members of the given age, ordered by `sort`
    async fn find_by_age(&self, age: i32, sort: &[SortOrder])
        -> Result<Vec<Member>, RepositoryError>;

    // ===== Joins =====

    /// Members whose team has this name (inner join)
    async fn find_by_team_name(&self, team_name: &str) -> Result<Vec<Member>, RepositoryError>;

    /// Average age and head count per team, ordered by team name
    async fn average_age_by_team(&self) -> Result<Vec<TeamAgeSummary>, RepositoryError>;

    /// Every member, with its team only when the team has this name
    ///
    /// The name test sits in the join condition, so members outside the
    /// team are still returned with `team: None`.
    async fn find_all_with_team_on(
        &self,
        team_name: &str,
    ) -> Result<Vec<MemberWithTeam>, RepositoryError>;

    /// Every member, joined to any team whose name equals its username
    async fn find_joined_on_username_team_name(
        &self,
    ) -> Result<Vec<MemberWithTeam>, RepositoryError>;

    /// The single member with this username, loaded together with its team
    async fn find_with_team(
        &self,
        username: &str,
    ) -> Result<Option<MemberWithTeam>, RepositoryError>;

    // ===== Subqueries =====

    /// Members with the maximum age
    async fn find_oldest(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Members at or above the average age
    async fn find_at_least_average_age(&self) -> Result<Vec<Member>, RepositoryError>;

    // ===== Expressions =====

    /// "ten" for age 10, "twenty" for age 20, "other" otherwise
    async fn age_labels(&self) -> Result<Vec<String>, RepositoryError>;

    /// Members ranked by age bracket: 0..=20 is 2, 21..=30 is 1, the rest 3.
    /// Ordered by rank descending.
    async fn rank_by_age_bracket(&self) -> Result<Vec<RankedMember>, RepositoryError>;

    /// `username_age` strings; NULL when the username is NULL
    async fn username_age_labels(&self) -> Result<Vec<Option<String>>, RepositoryError>;

    /// Usernames with every occurrence of `from` replaced by `to`
    async fn replace_in_usernames(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Option<String>>, RepositoryError>;

    // ===== Projections =====

    async fn find_usernames(&self) -> Result<Vec<Option<String>>, RepositoryError>;

    async fn find_username_age_tuples(&self)
        -> Result<Vec<(Option<String>, i32)>, RepositoryError>;

    /// Username and age with `constant` as a third column on every row
    async fn find_username_age_with_constant(
        &self,
        constant: &str,
    ) -> Result<Vec<(Option<String>, i32, String)>, RepositoryError>;

    /// Positional projection into `MemberDto`
    async fn find_member_dtos(&self) -> Result<Vec<MemberDto>, RepositoryError>;

    /// Named projection into `UserDto`: the username under the alias
    /// `name`, and the overall maximum age on every row
    async fn find_user_dtos(&self) -> Result<Vec<UserDto>, RepositoryError>;

    // ===== Dynamic filters =====

    /// Members matching whichever of `username` and `age` are given
    async fn find_by_optional(
        &self,
        username: Option<&str>,
        age: Option<i32>,
    ) -> Result<Vec<Member>, RepositoryError>;

    // ===== Bulk mutations =====

    /// Set the username of every member younger than `age`
    async fn bulk_rename_younger_than(
        &self,
        age: i32,
        username: &str,
    ) -> Result<u64, RepositoryError>;

    /// Add `delta` to every member's age
    ///
    /// Fails as a whole, changing nothing, if any age would leave the `i32`
    /// range.
    async fn bulk_add_age(&self, delta: i32) -> Result<u64, RepositoryError>;

    /// Delete every member older than `age`
    async fn bulk_delete_older_than(&self, age: i32) -> Result<u64, RepositoryError>;
}
