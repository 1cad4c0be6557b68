use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use super::sqlite_member_repository::{single, MEMBER_COLUMNS};
use crate::domain::member::{
    Member, MemberDto, MemberWithTeam, RankedMember, SortOrder, TeamAgeSummary, UserDto,
};
use crate::domain::repositories::{MemberQueryRepository, RepositoryError};
use crate::domain::team::Team;
use crate::infrastructure::query::{push_order_by, MemberPredicate, Predicates};

/// Member columns plus the joined team under distinct names
#[derive(Debug, sqlx::FromRow)]
struct MemberTeamRow {
    member_id: i64,
    username: Option<String>,
    age: i32,
    team_id: Option<i64>,
    joined_team_id: Option<i64>,
    joined_team_name: Option<String>,
}

impl From<MemberTeamRow> for MemberWithTeam {
    fn from(row: MemberTeamRow) -> Self {
        let team = row
            .joined_team_id
            .zip(row.joined_team_name)
            .map(|(id, name)| Team::from_persistence(id, name));

        Self {
            member: Member::from_persistence(row.member_id, row.username, row.age, row.team_id),
            team,
        }
    }
}

/// SQLite implementation of MemberQueryRepository
pub struct SqliteMemberQueryRepository {
    pool: SqlitePool,
}

impl SqliteMemberQueryRepository {
    /// Creates a new SqliteMemberQueryRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_members(&self, sql: &str) -> Result<Vec<Member>, RepositoryError> {
        Ok(sqlx::query_as::<_, Member>(sql)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl MemberQueryRepository for SqliteMemberQueryRepository {
    async fn find_by_age(
        &self,
        age: i32,
        sort: &[SortOrder],
    ) -> Result<Vec<Member>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MEMBER_COLUMNS} FROM member m LEFT JOIN team t ON t.team_id = m.team_id"
        ));
        Predicates::new()
            .and(MemberPredicate::AgeEq(age))
            .push_where(&mut qb);
        push_order_by(sort, &mut qb);

        Ok(qb.build_query_as::<Member>().fetch_all(&self.pool).await?)
    }

    async fn find_by_team_name(&self, team_name: &str) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM member m
            JOIN team t ON t.team_id = m.team_id
            WHERE t.name = ?
            ORDER BY m.member_id
            "#
        ))
        .bind(team_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn average_age_by_team(&self) -> Result<Vec<TeamAgeSummary>, RepositoryError> {
        let summaries = sqlx::query_as::<_, TeamAgeSummary>(
            r#"
            SELECT
                t.name AS team_name,
                AVG(m.age) AS average_age,
                COUNT(m.member_id) AS member_count
            FROM member m
            JOIN team t ON t.team_id = m.team_id
            GROUP BY t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    async fn find_all_with_team_on(
        &self,
        team_name: &str,
    ) -> Result<Vec<MemberWithTeam>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberTeamRow>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}, t.team_id AS joined_team_id, t.name AS joined_team_name
            FROM member m
            LEFT JOIN team t ON t.team_id = m.team_id AND t.name = ?
            ORDER BY m.member_id
            "#
        ))
        .bind(team_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MemberWithTeam::from).collect())
    }

    async fn find_joined_on_username_team_name(
        &self,
    ) -> Result<Vec<MemberWithTeam>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberTeamRow>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}, t.team_id AS joined_team_id, t.name AS joined_team_name
            FROM member m
            LEFT JOIN team t ON m.username = t.name
            ORDER BY m.member_id, t.team_id
            "#
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MemberWithTeam::from).collect())
    }

    async fn find_with_team(
        &self,
        username: &str,
    ) -> Result<Option<MemberWithTeam>, RepositoryError> {
        let rows = sqlx::query_as::<_, MemberTeamRow>(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}, t.team_id AS joined_team_id, t.name AS joined_team_name
            FROM member m
            LEFT JOIN team t ON t.team_id = m.team_id
            WHERE m.username = ?
            ORDER BY m.member_id
            "#
        ))
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(single(rows)?.map(MemberWithTeam::from))
    }

    async fn find_oldest(&self) -> Result<Vec<Member>, RepositoryError> {
        self.fetch_members(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM member m
            WHERE m.age = (SELECT MAX(sub.age) FROM member sub)
            ORDER BY m.member_id
            "#
        ))
        .await
    }

    async fn find_at_least_average_age(&self) -> Result<Vec<Member>, RepositoryError> {
        self.fetch_members(&format!(
            r#"
            SELECT {MEMBER_COLUMNS}
            FROM member m
            WHERE m.age >= (SELECT AVG(sub.age) FROM member sub)
            ORDER BY m.member_id
            "#
        ))
        .await
    }

    async fn age_labels(&self) -> Result<Vec<String>, RepositoryError> {
        let labels = sqlx::query_scalar::<_, String>(
            r#"
            SELECT CASE m.age
                WHEN 10 THEN 'ten'
                WHEN 20 THEN 'twenty'
                ELSE 'other'
            END
            FROM member m
            ORDER BY m.member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(labels)
    }

    async fn rank_by_age_bracket(&self) -> Result<Vec<RankedMember>, RepositoryError> {
        let ranked = sqlx::query_as::<_, RankedMember>(
            r#"
            SELECT
                m.username AS username,
                m.age AS age,
                CASE
                    WHEN m.age BETWEEN 0 AND 20 THEN 2
                    WHEN m.age BETWEEN 21 AND 30 THEN 1
                    ELSE 3
                END AS "rank"
            FROM member m
            ORDER BY "rank" DESC, m.member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(ranked)
    }

    async fn username_age_labels(&self) -> Result<Vec<Option<String>>, RepositoryError> {
        let labels = sqlx::query_scalar::<_, Option<String>>(
            "SELECT m.username || '_' || m.age FROM member m ORDER BY m.member_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(labels)
    }

    async fn replace_in_usernames(
        &self,
        from: &str,
        to: &str,
    ) -> Result<Vec<Option<String>>, RepositoryError> {
        let usernames = sqlx::query_scalar::<_, Option<String>>(
            "SELECT replace(m.username, ?, ?) FROM member m ORDER BY m.member_id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(usernames)
    }

    async fn find_usernames(&self) -> Result<Vec<Option<String>>, RepositoryError> {
        let usernames = sqlx::query_scalar::<_, Option<String>>(
            "SELECT m.username FROM member m ORDER BY m.member_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(usernames)
    }

    async fn find_username_age_tuples(
        &self,
    ) -> Result<Vec<(Option<String>, i32)>, RepositoryError> {
        let tuples = sqlx::query_as::<_, (Option<String>, i32)>(
            "SELECT m.username, m.age FROM member m ORDER BY m.member_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tuples)
    }

    async fn find_username_age_with_constant(
        &self,
        constant: &str,
    ) -> Result<Vec<(Option<String>, i32, String)>, RepositoryError> {
        let rows = sqlx::query_as::<_, (Option<String>, i32, String)>(
            "SELECT m.username, m.age, ? FROM member m ORDER BY m.member_id",
        )
        .bind(constant)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_member_dtos(&self) -> Result<Vec<MemberDto>, RepositoryError> {
        Ok(self
            .find_username_age_tuples()
            .await?
            .into_iter()
            .map(MemberDto::from)
            .collect())
    }

    async fn find_user_dtos(&self) -> Result<Vec<UserDto>, RepositoryError> {
        let users = sqlx::query_as::<_, UserDto>(
            r#"
            SELECT
                m.username AS name,
                (SELECT MAX(sub.age) FROM member sub) AS age
            FROM member m
            ORDER BY m.member_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_optional(
        &self,
        username: Option<&str>,
        age: Option<i32>,
    ) -> Result<Vec<Member>, RepositoryError> {
        let mut qb = QueryBuilder::<Sqlite>::new(format!("SELECT {MEMBER_COLUMNS} FROM member m"));
        Predicates::new()
            .and(MemberPredicate::username_eq(username))
            .and(MemberPredicate::age_eq(age))
            .push_where(&mut qb);
        push_order_by(&[], &mut qb);

        Ok(qb.build_query_as::<Member>().fetch_all(&self.pool).await?)
    }

    async fn bulk_rename_younger_than(
        &self,
        age: i32,
        username: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE member SET username = ? WHERE age < ?")
            .bind(username)
            .bind(age)
            .execute(&self.pool)
            .await?;

        info!(age, rows = result.rows_affected(), "bulk rename");
        Ok(result.rows_affected())
    }

    async fn bulk_add_age(&self, delta: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE member SET age = age + ?")
            .bind(delta)
            .execute(&self.pool)
            .await?;

        info!(delta, rows = result.rows_affected(), "bulk age update");
        Ok(result.rows_affected())
    }

    async fn bulk_delete_older_than(&self, age: i32) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM member WHERE age > ?")
            .bind(age)
            .execute(&self.pool)
            .await?;

        info!(age, rows = result.rows_affected(), "bulk delete");
        Ok(result.rows_affected())
    }
}
