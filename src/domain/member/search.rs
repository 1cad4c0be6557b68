use serde::{Deserialize, Serialize};

/// Filter for member searches
///
/// Every field is optional. A missing field places no constraint on the
/// result; it is dropped from the query rather than matched trivially.
/// No validation is performed: an inverted age range simply matches
/// nothing.
///
/// # Example
/// ```
/// use roster_api::domain::member::MemberSearchCondition;
///
/// let condition = MemberSearchCondition::new()
///     .team_name("teamB")
///     .age_goe(35)
///     .age_loe(40);
///
/// assert_eq!(condition.team_name.as_deref(), Some("teamB"));
/// assert!(condition.username.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Creates a condition that matches every member
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    /// Inclusive lower age bound
    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    /// Inclusive upper age bound
    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

/// Member columns a search can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Username,
    Age,
    TeamName,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// Placement of NULL values within a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NullsOrder {
    /// Whatever the engine does (SQLite sorts NULL first ascending)
    #[default]
    Default,
    First,
    Last,
}

/// One ORDER BY term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: Direction,
    pub nulls: NullsOrder,
}

impl SortOrder {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Asc,
            nulls: NullsOrder::Default,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: Direction::Desc,
            nulls: NullsOrder::Default,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = NullsOrder::First;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = NullsOrder::Last;
        self
    }
}

/// Offset/limit window plus ordering
///
/// With no sort orders, results are ordered by member ID ascending so the
/// window is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: u64,
    pub limit: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Zero-based offset and maximum row count
    pub fn new(offset: u64, limit: u64) -> Self {
        Self {
            offset,
            limit,
            sort: Vec::new(),
        }
    }

    /// Appends a sort order
    pub fn sorted_by(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 20)
    }
}

/// A window of results together with the unpaged total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            content,
            total,
            offset: request.offset,
            limit: request.limit,
        }
    }

    /// Number of pages of `limit` rows needed to cover `total`
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(self.limit)
    }

    /// Returns true if rows exist past this window
    pub fn has_next(&self) -> bool {
        self.offset.saturating_add(self.content.len() as u64) < self.total
    }
}
