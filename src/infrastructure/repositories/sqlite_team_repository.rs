use async_trait::async_trait;
use sqlx::SqlitePool;

use super::sqlite_member_repository::MEMBER_COLUMNS;
use crate::domain::member::Member;
use crate::domain::repositories::{RepositoryError, TeamRepository};
use crate::domain::team::{NewTeam, Team};

/// SQLite implementation of TeamRepository
pub struct SqliteTeamRepository {
    pool: SqlitePool,
}

impl SqliteTeamRepository {
    /// Creates a new SqliteTeamRepository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for SqliteTeamRepository {
    async fn save(&self, team: &NewTeam) -> Result<Team, RepositoryError> {
        let result = sqlx::query("INSERT INTO team (name) VALUES (?)")
            .bind(team.name.as_str())
            .execute(&self.pool)
            .await?;

        Ok(Team::from_persistence(
            result.last_insert_rowid(),
            team.name.clone(),
        ))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Team>, RepositoryError> {
        let team = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name
            FROM team
            WHERE team_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Team>, RepositoryError> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT team_id, name
            FROM team
            WHERE name = ?
            ORDER BY team_id
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    async fn find_all(&self) -> Result<Vec<Team>, RepositoryError> {
        let teams = sqlx::query_as::<_, Team>("SELECT team_id, name FROM team ORDER BY team_id")
            .fetch_all(&self.pool)
            .await?;

        Ok(teams)
    }

    async fn find_members(&self, team_id: i64) -> Result<Vec<Member>, RepositoryError> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM member m WHERE m.team_id = ? ORDER BY m.member_id"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM team WHERE team_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Team not found: {}", id)));
        }

        Ok(())
    }
}
