//! Integration tests for the member and team repositories
//!
//! Each test runs against its own in-memory SQLite database seeded with
//! two teams and four members:
//! - teamA: member1 (10), member2 (20)
//! - teamB: member3 (30), member4 (40)

use roster_api::domain::member::{
    Member, MemberSearchCondition, NewMember, PageRequest, SortField, SortOrder,
};
use roster_api::domain::repositories::{MemberRepository, RepositoryError, TeamRepository};
use roster_api::domain::team::{NewTeam, Team};
use roster_api::infrastructure::database::connect_in_memory;
use roster_api::infrastructure::repositories::{SqliteMemberRepository, SqliteTeamRepository};
use sqlx::SqlitePool;

struct Fixture {
    team_a: Team,
    team_b: Team,
    members: Vec<Member>,
}

/// Set up a fresh test database
async fn setup_test_db() -> SqlitePool {
    connect_in_memory()
        .await
        .expect("Failed to create in-memory database")
}

/// Insert the two-team, four-member fixture
async fn seed(pool: &SqlitePool) -> Fixture {
    let team_repo = SqliteTeamRepository::new(pool.clone());
    let member_repo = SqliteMemberRepository::new(pool.clone());

    let team_a = team_repo.save(&NewTeam::new("teamA")).await.expect("save teamA");
    let team_b = team_repo.save(&NewTeam::new("teamB")).await.expect("save teamB");

    let mut members = Vec::new();
    for (username, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        let member = member_repo
            .save(&NewMember::new(username, age).in_team(team.id()))
            .await
            .expect("save member");
        members.push(member);
    }

    Fixture {
        team_a,
        team_b,
        members,
    }
}

fn usernames<'a>(rows: impl IntoIterator<Item = &'a Option<String>>) -> Vec<&'a str> {
    rows.into_iter()
        .map(|u| u.as_deref().unwrap_or("<null>"))
        .collect()
}

// ===== Member CRUD =====

#[tokio::test]
async fn test_member_save_and_find_by_id() {
    let pool = setup_test_db().await;
    let member_repo = SqliteMemberRepository::new(pool);

    let member = member_repo
        .save(&NewMember::new("member1", 10))
        .await
        .expect("Failed to save member");

    let found = member_repo
        .find_by_id(member.id())
        .await
        .expect("Failed to find member")
        .expect("Member should be found");

    assert_eq!(found, member, "Persisted member should round-trip");
    assert_eq!(found.username(), Some("member1"));
    assert_eq!(found.age(), 10);
    assert!(found.team_id().is_none());
}

#[tokio::test]
async fn test_member_find_by_id_missing() {
    let pool = setup_test_db().await;
    let member_repo = SqliteMemberRepository::new(pool);

    let found = member_repo.find_by_id(999).await.expect("Query should succeed");

    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_all_and_find_by_username() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let all = member_repo.find_all().await.expect("find_all");
    assert_eq!(all, fixture.members);

    let found = member_repo.find_by_username("member1").await.expect("find_by_username");
    assert_eq!(found, vec![fixture.members[0].clone()]);
}

#[tokio::test]
async fn test_find_one_by_username() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let found = member_repo
        .find_one_by_username("member1")
        .await
        .expect("find_one_by_username");
    assert_eq!(found.as_ref(), Some(&fixture.members[0]));

    let missing = member_repo
        .find_one_by_username("nobody")
        .await
        .expect("find_one_by_username");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_find_one_by_username_rejects_duplicates() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);
    member_repo
        .save(&NewMember::new("member1", 99))
        .await
        .expect("save duplicate username");

    let result = member_repo.find_one_by_username("member1").await;

    assert!(
        matches!(result, Err(RepositoryError::NonUniqueResult(2))),
        "Two matches should be a non-unique error: {:?}",
        result
    );
}

#[tokio::test]
async fn test_member_with_unknown_team_is_rejected() {
    let pool = setup_test_db().await;
    let member_repo = SqliteMemberRepository::new(pool);

    let result = member_repo.save(&NewMember::new("ghost", 1).in_team(42)).await;

    let error = result.expect_err("Dangling team reference should fail");
    assert!(
        error.is_constraint_violation(),
        "Error should be a constraint violation: {}",
        error
    );
}

#[tokio::test]
async fn test_assign_team_and_detach() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);
    let member1 = &fixture.members[0];

    member_repo
        .assign_team(member1.id(), Some(fixture.team_b.id()))
        .await
        .expect("assign team");
    let moved = member_repo.find_by_id(member1.id()).await.unwrap().unwrap();
    assert_eq!(moved.team_id(), Some(fixture.team_b.id()));

    member_repo
        .assign_team(member1.id(), None)
        .await
        .expect("detach team");
    let detached = member_repo.find_by_id(member1.id()).await.unwrap().unwrap();
    assert!(detached.team_id().is_none());
}

#[tokio::test]
async fn test_assign_team_missing_member() {
    let pool = setup_test_db().await;
    let member_repo = SqliteMemberRepository::new(pool);

    let result = member_repo.assign_team(999, None).await;

    assert!(matches!(result, Err(RepositoryError::NotFound(_))));
}

// ===== Team repository =====

#[tokio::test]
async fn test_team_save_and_find() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let team_repo = SqliteTeamRepository::new(pool);

    let found = team_repo
        .find_by_id(fixture.team_a.id())
        .await
        .expect("find_by_id")
        .expect("Team should be found");
    assert_eq!(found.name(), "teamA");

    let by_name = team_repo.find_by_name("teamB").await.expect("find_by_name");
    assert_eq!(by_name, vec![fixture.team_b.clone()]);

    let all = team_repo.find_all().await.expect("find_all");
    assert_eq!(all, vec![fixture.team_a, fixture.team_b]);
}

#[tokio::test]
async fn test_team_find_members_is_back_reference() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let team_repo = SqliteTeamRepository::new(pool);

    let members = team_repo
        .find_members(fixture.team_b.id())
        .await
        .expect("find_members");

    assert_eq!(members, fixture.members[2..].to_vec());
}

#[tokio::test]
async fn test_delete_referenced_team_fails() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let team_repo = SqliteTeamRepository::new(pool);

    let error = team_repo
        .delete(fixture.team_a.id())
        .await
        .expect_err("Team with members should not be deletable");

    assert!(error.is_constraint_violation(), "Unexpected error: {}", error);
}

#[tokio::test]
async fn test_delete_empty_team() {
    let pool = setup_test_db().await;
    let team_repo = SqliteTeamRepository::new(pool);
    let team = team_repo.save(&NewTeam::new("teamC")).await.unwrap();

    team_repo.delete(team.id()).await.expect("delete");

    assert!(team_repo.find_by_id(team.id()).await.unwrap().is_none());
    assert!(matches!(
        team_repo.delete(team.id()).await,
        Err(RepositoryError::NotFound(_))
    ));
}

// ===== Condition search =====

#[tokio::test]
async fn test_search_without_condition_returns_all() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let rows = member_repo
        .search(&MemberSearchCondition::new())
        .await
        .expect("search");

    assert_eq!(rows.len(), fixture.members.len());
    assert_eq!(rows[0].team_name.as_deref(), Some("teamA"));
    assert_eq!(rows[3].team_name.as_deref(), Some("teamB"));
}

#[tokio::test]
async fn test_search_by_team_and_age_range() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let condition = MemberSearchCondition::new()
        .age_goe(35)
        .age_loe(40)
        .team_name("teamB");
    let rows = member_repo.search(&condition).await.expect("search");

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.username.as_deref(), Some("member4"));
    assert_eq!(row.age, 40);
    assert_eq!(row.member_id, fixture.members[3].id());
    assert_eq!(row.team_id, Some(fixture.team_b.id()));
    assert_eq!(row.team_name.as_deref(), Some("teamB"));
}

#[tokio::test]
async fn test_search_age_goe_only() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    for goe in [-5, 0, 10, 15, 20, 30, 40, 41] {
        let rows = member_repo
            .search(&MemberSearchCondition::new().age_goe(goe))
            .await
            .expect("search");

        let expected = [10, 20, 30, 40].iter().filter(|&&age| age >= goe).count();
        assert_eq!(rows.len(), expected, "ageGoe={}", goe);
        assert!(rows.iter().all(|row| row.age >= goe), "ageGoe={}", goe);
    }
}

#[tokio::test]
async fn test_search_age_loe_only() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    for loe in [-1, 9, 10, 25, 40, 100] {
        let rows = member_repo
            .search(&MemberSearchCondition::new().age_loe(loe))
            .await
            .expect("search");

        let expected = [10, 20, 30, 40].iter().filter(|&&age| age <= loe).count();
        assert_eq!(rows.len(), expected, "ageLoe={}", loe);
        assert!(rows.iter().all(|row| row.age <= loe), "ageLoe={}", loe);
    }
}

#[tokio::test]
async fn test_search_inverted_range_is_empty() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let rows = member_repo
        .search(&MemberSearchCondition::new().age_goe(40).age_loe(10))
        .await
        .expect("Inverted range should not be an error");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_search_username_is_exact_and_case_sensitive() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let exact = member_repo
        .search(&MemberSearchCondition::new().username("member2"))
        .await
        .unwrap();
    assert_eq!(exact.len(), 1);

    let upper = member_repo
        .search(&MemberSearchCondition::new().username("MEMBER2"))
        .await
        .unwrap();
    assert!(upper.is_empty());

    let prefix = member_repo
        .search(&MemberSearchCondition::new().username("member"))
        .await
        .unwrap();
    assert!(prefix.is_empty());
}

#[tokio::test]
async fn test_search_includes_members_without_team() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);
    member_repo.save(&NewMember::new("loner", 50)).await.unwrap();

    let all = member_repo.search(&MemberSearchCondition::new()).await.unwrap();
    assert_eq!(all.len(), 5);
    let loner = all.last().unwrap();
    assert_eq!(loner.username.as_deref(), Some("loner"));
    assert!(loner.team_id.is_none());
    assert!(loner.team_name.is_none());

    let team_a = member_repo
        .search(&MemberSearchCondition::new().team_name("teamA"))
        .await
        .unwrap();
    assert_eq!(
        usernames(team_a.iter().map(|row| &row.username)),
        vec!["member1", "member2"]
    );
}

// ===== Pagination =====

#[tokio::test]
async fn test_search_page_sorted_by_username_desc() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let page = PageRequest::new(1, 2).sorted_by(SortOrder::desc(SortField::Username));
    let rows = member_repo
        .search_page(&MemberSearchCondition::new(), &page)
        .await
        .expect("search_page");

    assert_eq!(
        usernames(rows.iter().map(|row| &row.username)),
        vec!["member3", "member2"]
    );
}

#[tokio::test]
async fn test_search_page_defaults_to_id_order() {
    let pool = setup_test_db().await;
    let fixture = seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let rows = member_repo
        .search_page(&MemberSearchCondition::new(), &PageRequest::new(2, 10))
        .await
        .expect("search_page");

    let ids: Vec<i64> = rows.iter().map(|row| row.member_id).collect();
    assert_eq!(ids, vec![fixture.members[2].id(), fixture.members[3].id()]);
}

#[tokio::test]
async fn test_search_page_past_end_is_empty() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let rows = member_repo
        .search_page(&MemberSearchCondition::new(), &PageRequest::new(10, 5))
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_search_page_with_total() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    let condition = MemberSearchCondition::new().age_goe(20);
    let page = member_repo
        .search_page_with_total(&condition, &PageRequest::new(0, 2))
        .await
        .expect("search_page_with_total");

    assert_eq!(page.total, 3);
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_pages(), 2);
    assert!(page.has_next());
}

#[tokio::test]
async fn test_count_matches_search() {
    let pool = setup_test_db().await;
    seed(&pool).await;
    let member_repo = SqliteMemberRepository::new(pool);

    for condition in [
        MemberSearchCondition::new(),
        MemberSearchCondition::new().team_name("teamA"),
        MemberSearchCondition::new().age_goe(15).age_loe(35),
        MemberSearchCondition::new().username("nobody"),
    ] {
        let count = member_repo.count(&condition).await.unwrap();
        let rows = member_repo.search(&condition).await.unwrap();
        assert_eq!(count, rows.len() as u64, "{:?}", condition);
    }
}
