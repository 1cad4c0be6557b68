use sqlx::{QueryBuilder, Sqlite};

use crate::domain::member::MemberSearchCondition;

/// A single filter term over the member (`m`) / team (`t`) join
///
/// Values are always bound as parameters, never spliced into the SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberPredicate {
    UsernameEq(String),
    TeamNameEq(String),
    AgeEq(i32),
    /// Inclusive lower bound
    AgeGoe(i32),
    /// Inclusive upper bound
    AgeLoe(i32),
    AgeLt(i32),
    AgeGt(i32),
    /// Inclusive on both ends
    AgeBetween(i32, i32),
}

impl MemberPredicate {
    // Null-safe constructors: an absent parameter yields no predicate.

    pub fn username_eq(username: Option<&str>) -> Option<Self> {
        username.map(|username| Self::UsernameEq(username.to_string()))
    }

    pub fn team_name_eq(team_name: Option<&str>) -> Option<Self> {
        team_name.map(|team_name| Self::TeamNameEq(team_name.to_string()))
    }

    pub fn age_eq(age: Option<i32>) -> Option<Self> {
        age.map(Self::AgeEq)
    }

    pub fn age_goe(age: Option<i32>) -> Option<Self> {
        age.map(Self::AgeGoe)
    }

    pub fn age_loe(age: Option<i32>) -> Option<Self> {
        age.map(Self::AgeLoe)
    }

    /// Returns true if the term reads a team column
    pub fn requires_team_join(&self) -> bool {
        matches!(self, Self::TeamNameEq(_))
    }

    fn push_to<'args>(self, qb: &mut QueryBuilder<'args, Sqlite>) {
        match self {
            Self::UsernameEq(username) => {
                qb.push("m.username = ").push_bind(username);
            }
            Self::TeamNameEq(team_name) => {
                qb.push("t.name = ").push_bind(team_name);
            }
            Self::AgeEq(age) => {
                qb.push("m.age = ").push_bind(age);
            }
            Self::AgeGoe(age) => {
                qb.push("m.age >= ").push_bind(age);
            }
            Self::AgeLoe(age) => {
                qb.push("m.age <= ").push_bind(age);
            }
            Self::AgeLt(age) => {
                qb.push("m.age < ").push_bind(age);
            }
            Self::AgeGt(age) => {
                qb.push("m.age > ").push_bind(age);
            }
            Self::AgeBetween(low, high) => {
                qb.push("m.age BETWEEN ")
                    .push_bind(low)
                    .push(" AND ")
                    .push_bind(high);
            }
        }
    }
}

/// Conjunction of member predicates
///
/// Absent terms are dropped on the way in, so an empty set means "no
/// filter" and renders no WHERE clause at all.
///
/// Two ways to build one, with the same result:
///
/// ```
/// use roster_api::infrastructure::query::{MemberPredicate, Predicates};
///
/// let username: Option<&str> = Some("member1");
/// let age: Option<i32> = None;
///
/// // accumulate
/// let built = Predicates::new()
///     .and(MemberPredicate::username_eq(username))
///     .and(MemberPredicate::age_eq(age));
///
/// // collect
/// let collected: Predicates = [
///     MemberPredicate::username_eq(username),
///     MemberPredicate::age_eq(age),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(built, collected);
/// assert_eq!(built.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicates {
    terms: Vec<MemberPredicate>,
}

impl Predicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term; `None` leaves the set unchanged
    pub fn and(mut self, predicate: impl Into<Option<MemberPredicate>>) -> Self {
        if let Some(predicate) = predicate.into() {
            self.terms.push(predicate);
        }
        self
    }

    /// Terms for every present field of a search condition
    pub fn from_condition(condition: &MemberSearchCondition) -> Self {
        [
            MemberPredicate::username_eq(condition.username.as_deref()),
            MemberPredicate::team_name_eq(condition.team_name.as_deref()),
            MemberPredicate::age_goe(condition.age_goe),
            MemberPredicate::age_loe(condition.age_loe),
        ]
        .into_iter()
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn requires_team_join(&self) -> bool {
        self.terms.iter().any(MemberPredicate::requires_team_join)
    }

    /// Appends ` WHERE t1 AND t2 ...`, or nothing when empty
    pub fn push_where<'args>(self, qb: &mut QueryBuilder<'args, Sqlite>) {
        if self.terms.is_empty() {
            return;
        }

        qb.push(" WHERE ");
        for (i, term) in self.terms.into_iter().enumerate() {
            if i > 0 {
                qb.push(" AND ");
            }
            term.push_to(qb);
        }
    }
}

impl FromIterator<Option<MemberPredicate>> for Predicates {
    fn from_iter<I: IntoIterator<Item = Option<MemberPredicate>>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().flatten().collect(),
        }
    }
}

impl FromIterator<MemberPredicate> for Predicates {
    fn from_iter<I: IntoIterator<Item = MemberPredicate>>(iter: I) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}
