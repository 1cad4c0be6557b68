use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::member::{
    Member, MemberSearchCondition, MemberTeamDto, NewMember, Page, PageRequest,
};

/// Repository trait for Member entities
///
/// Besides plain CRUD, this carries the condition-driven search: a
/// `MemberSearchCondition` is turned into a WHERE clause containing only
/// the fields that are present, joined against the member's team.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member and return it with its generated ID
    async fn save(&self, member: &NewMember) -> Result<Member, RepositoryError>;

    /// Find a member by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError>;

    /// Find all members, ordered by ID
    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError>;

    /// Find all members with exactly this username
    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, RepositoryError>;

    /// Find the single member with this username
    ///
    /// # Returns
    /// * `Ok(None)` - No member has the username
    /// * `Err(RepositoryError::NonUniqueResult)` - More than one does
    async fn find_one_by_username(&self, username: &str)
        -> Result<Option<Member>, RepositoryError>;

    /// Point a member at a team, or detach it with `None`
    async fn assign_team(
        &self,
        member_id: i64,
        team_id: Option<i64>,
    ) -> Result<(), RepositoryError>;

    /// Search members matching every present field of the condition
    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError>;

    /// Search with an offset/limit window
    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError>;

    /// Search with an offset/limit window, also counting all matches
    async fn search_page_with_total(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, RepositoryError>;

    /// Count members matching the condition
    async fn count(&self, condition: &MemberSearchCondition) -> Result<u64, RepositoryError>;
}
