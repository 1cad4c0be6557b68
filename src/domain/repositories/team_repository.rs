use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::member::Member;
use crate::domain::team::{NewTeam, Team};

/// Repository trait for Team entities
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations should handle database-specific details.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a team and return it with its generated ID
    async fn save(&self, team: &NewTeam) -> Result<Team, RepositoryError>;

    /// Find a team by its ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, RepositoryError>;

    /// Find all teams with the given name (names are not unique)
    async fn find_by_name(&self, name: &str) -> Result<Vec<Team>, RepositoryError>;

    /// Find all teams, ordered by ID
    async fn find_all(&self) -> Result<Vec<Team>, RepositoryError>;

    /// Find the members whose team reference points at this team
    async fn find_members(&self, team_id: i64) -> Result<Vec<Member>, RepositoryError>;

    /// Delete a team by ID
    ///
    /// Fails with the engine's foreign key error while members still
    /// reference the team.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
