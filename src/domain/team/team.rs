use serde::{Deserialize, Serialize};

/// Team entity
///
/// A named group of members. Membership is recorded on the member side
/// (`member.team_id`); a team does not hold its members. Load them on
/// demand with `TeamRepository::find_members`.
///
/// # Example
/// ```
/// use roster_api::domain::team::Team;
///
/// let team = Team::from_persistence(1, "teamA".to_string());
///
/// assert_eq!(team.name(), "teamA");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    #[sqlx(rename = "team_id")]
    id: i64,
    name: String,
}

impl Team {
    // ===== Getters =====

    /// Returns the team's generated ID
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reconstructs a Team from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations for data reconstruction.
    pub fn from_persistence(id: i64, name: String) -> Self {
        Self { id, name }
    }
}

/// Insert payload for a team that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
}

impl NewTeam {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
