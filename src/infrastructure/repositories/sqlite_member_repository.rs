use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::domain::member::{
    Member, MemberSearchCondition, MemberTeamDto, NewMember, Page, PageRequest,
};
use crate::domain::repositories::{MemberRepository, RepositoryError};
use crate::infrastructure::query::{push_order_by, push_window, Predicates};

/// Member entity columns, named for `Member`'s `FromRow`
pub(crate) const MEMBER_COLUMNS: &str =
    "m.member_id AS member_id, m.username AS username, m.age AS age, m.team_id AS team_id";

const MEMBER_TEAM_SELECT: &str = r#"
    SELECT
        m.member_id AS member_id,
        m.username AS username,
        m.age AS age,
        t.team_id AS team_id,
        t.name AS team_name
    FROM member m
    LEFT JOIN team t ON t.team_id = m.team_id"#;

const MEMBER_COUNT: &str = "SELECT COUNT(*) FROM member m";

const MEMBER_TEAM_JOIN: &str = " LEFT JOIN team t ON t.team_id = m.team_id";

/// Collapses a fetched list into zero or one row
pub(crate) fn single<T>(mut rows: Vec<T>) -> Result<Option<T>, RepositoryError> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(RepositoryError::NonUniqueResult(n)),
    }
}

/// SQLite implementation of MemberRepository
///
/// Searches are assembled at runtime with `sqlx::QueryBuilder`: the
/// member/team join is fixed, and the WHERE clause holds only the terms
/// the condition actually carries.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Creates a new SqliteMemberRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for SQLite
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn search_query(
        condition: &MemberSearchCondition,
        page: Option<&PageRequest>,
    ) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(MEMBER_TEAM_SELECT);
        Predicates::from_condition(condition).push_where(&mut qb);
        match page {
            Some(page) => {
                push_order_by(&page.sort, &mut qb);
                push_window(page, &mut qb);
            }
            None => push_order_by(&[], &mut qb),
        }
        qb
    }

    /// Counts matching members, joining the team only for a team filter
    ///
    /// `team_id` is the team's primary key, so the left join never changes
    /// the member count.
    fn count_query(condition: &MemberSearchCondition) -> QueryBuilder<'static, Sqlite> {
        let predicates = Predicates::from_condition(condition);

        let mut qb = QueryBuilder::new(MEMBER_COUNT);
        if predicates.requires_team_join() {
            qb.push(MEMBER_TEAM_JOIN);
        }
        predicates.push_where(&mut qb);
        qb
    }
}

#[async_trait]
impl MemberRepository for SqliteMemberRepository {
    async fn save(&self, member: &NewMember) -> Result<Member, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO member (username, age, team_id)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(member.username.as_deref())
        .bind(member.age)
        .bind(member.team_id)
        .execute(&self.pool)
        .await?;

        Ok(Member::from_persistence(
            result.last_insert_rowid(),
            member.username.clone(),
            member.age,
            member.team_id,
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Member>, RepositoryError> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member m WHERE m.member_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    async fn find_all(&self) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member m ORDER BY m.member_id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn find_by_username(&self, username: &str) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member m WHERE m.username = ? ORDER BY m.member_id"
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn find_one_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Member>, RepositoryError> {
        single(self.find_by_username(username).await?)
    }

    async fn assign_team(
        &self,
        member_id: i64,
        team_id: Option<i64>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE member SET team_id = ? WHERE member_id = ?")
            .bind(team_id)
            .bind(member_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Member not found: {}",
                member_id
            )));
        }

        Ok(())
    }

    async fn search(
        &self,
        condition: &MemberSearchCondition,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError> {
        let mut qb = Self::search_query(condition, None);
        let rows = qb
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&self.pool)
            .await?;

        debug!(?condition, rows = rows.len(), "member search");
        Ok(rows)
    }

    async fn search_page(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Vec<MemberTeamDto>, RepositoryError> {
        let mut qb = Self::search_query(condition, Some(page));
        let rows = qb
            .build_query_as::<MemberTeamDto>()
            .fetch_all(&self.pool)
            .await?;

        debug!(
            ?condition,
            offset = page.offset,
            limit = page.limit,
            rows = rows.len(),
            "member search page"
        );
        Ok(rows)
    }

    async fn search_page_with_total(
        &self,
        condition: &MemberSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<MemberTeamDto>, RepositoryError> {
        let content = self.search_page(condition, page).await?;
        let total = self.count(condition).await?;

        Ok(Page::new(content, total, page))
    }

    async fn count(&self, condition: &MemberSearchCondition) -> Result<u64, RepositoryError> {
        let mut qb = Self::count_query(condition);
        let (count,): (i64,) = qb.build_query_as().fetch_one(&self.pool).await?;

        Ok(count.max(0) as u64)
    }
}
