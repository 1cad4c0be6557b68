use serde::{Deserialize, Serialize};

/// Member entity
///
/// A person with an optional username and an age, optionally belonging
/// to a team. The team is referenced by id only; use
/// `TeamRepository::find_members` or `MemberQueryRepository::find_with_team`
/// to walk the association.
///
/// # Invariants
/// - `team_id`, when present, references a persisted team
///   (enforced by the store's foreign key)
///
/// # Example
/// ```
/// use roster_api::domain::member::Member;
///
/// let member = Member::from_persistence(1, Some("member1".to_string()), 10, None);
///
/// assert_eq!(member.username(), Some("member1"));
/// assert!(member.team_id().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[sqlx(rename = "member_id")]
    id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
}

impl Member {
    // ===== Getters =====

    /// Returns the member's generated ID
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the username, if one was set
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the member's age
    pub fn age(&self) -> i32 {
        self.age
    }

    /// Returns the ID of the team this member belongs to
    pub fn team_id(&self) -> Option<i64> {
        self.team_id
    }

    /// Reconstructs a Member from persistence layer data
    ///
    /// # Note
    /// Only to be used by repository implementations and tests.
    pub fn from_persistence(
        id: i64,
        username: Option<String>,
        age: i32,
        team_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            username,
            age,
            team_id,
        }
    }
}

/// Insert payload for a member that has not been persisted yet
///
/// The store assigns the ID on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub username: Option<String>,
    pub age: i32,
    #[serde(default)]
    pub team_id: Option<i64>,
}

impl NewMember {
    /// Creates a member payload with a username and no team
    pub fn new(username: impl Into<String>, age: i32) -> Self {
        Self {
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Creates a member payload without a username
    pub fn anonymous(age: i32) -> Self {
        Self {
            username: None,
            age,
            team_id: None,
        }
    }

    /// Places the member in a team
    pub fn in_team(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }
}
