//! Integration tests for the Users domain
//!
//! These use real PostgreSQL via testcontainers to check:
//! - Queries and ordering
//! - The unique email constraint
//! - LIKE escaping in name search

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_user(name: &str, email: &str) -> User {
    User::new(UserInput::new(name, email))
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_get_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = repo
        .create(new_user(&builder.name("user", "main"), &builder.email("main")))
        .await
        .unwrap();

    let by_id = assert_some(repo.get_by_id(created.id).await.unwrap(), "user by id");
    assert_uuid_eq(by_id.id, created.id, "retrieved user id");
    assert_eq!(by_id.name, created.name);

    let by_email = assert_some(
        repo.get_by_email(&builder.email("main")).await.unwrap(),
        "user by email",
    );
    assert_uuid_eq(by_email.id, created.id, "user found by email");

    assert!(repo.get_by_email("MAIN@example.com").await.unwrap().is_none());
    assert!(repo.get_by_id(builder.user_id()).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_email_constraint() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("duplicate_email");
    let email = builder.email("shared");

    repo.create(new_user("First", &email)).await.unwrap();
    let result = repo.create(new_user("Second", &email)).await;

    assert!(matches!(result, Err(UserError::AlreadyExists(e)) if e == email));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let ana = repo.create(new_user("Ana", "ana@example.com")).await.unwrap();
    let mut bob = repo.create(new_user("Bob", "bob@example.com")).await.unwrap();

    bob.apply_update(UserInput::new("Roberto", "roberto@example.com"));
    let updated = repo.update(bob.clone()).await.unwrap();
    assert_eq!(updated.name, "Roberto");
    assert!(repo.email_exists("roberto@example.com").await.unwrap());
    assert!(!repo.email_exists("bob@example.com").await.unwrap());

    bob.apply_update(UserInput::new("Roberto", &ana.email));
    let result = repo.update(bob).await;
    assert!(matches!(result, Err(UserError::AlreadyExists(_))));

    let ghost = new_user("Ghost", "ghost@example.com");
    let result = repo.update(ghost).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_user() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let user = repo.create(new_user("Juan", "juan@example.com")).await.unwrap();

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
    assert_eq!(repo.count().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_search_by_name_and_list_order() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());

    let first = repo.create(new_user("Juan Pérez", "juan@example.com")).await.unwrap();
    repo.create(new_user("John Smith", "john@example.com")).await.unwrap();
    repo.create(new_user("100% Pérez_Real", "real@example.com")).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert_uuid_eq(listed[0].id, first.id, "oldest user listed first");

    let found = repo.search_by_name("Pérez").await.unwrap();
    assert_eq!(found.len(), 2);

    let found = repo.search_by_name("%").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "100% Pérez_Real");

    let found = repo.search_by_name("z_R").await.unwrap();
    assert_eq!(found.len(), 1);

    assert!(repo.search_by_name("Nadie").await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_count_after_truncate() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("count");

    for i in 0..3 {
        let suffix = i.to_string();
        repo.create(new_user(&builder.name("user", &suffix), &builder.email(&suffix)))
            .await
            .unwrap();
    }
    assert_eq!(repo.count().await.unwrap(), 3);

    db.truncate_users().await;
    assert_eq!(repo.count().await.unwrap(), 0);
}
